/// Till configuration
///
/// # Environment Variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | STORE_URL | (unset) | Hosted store base URL; unset runs the seeded local store |
/// | STORE_API_KEY | (unset) | API key for the hosted store |
/// | WORK_DIR | ./data | Directory for the snapshot cache and logs |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | SYNC_INTERVAL_SECS | 30 | Background refresh interval |
/// | FETCH_TIMEOUT_SECS | 8 | Hard timeout on any store fetch |
/// | TAX_RATE | 0 | Tax as a fraction of the subtotal (0.05 = 5%) |
/// | CASHIER_NAME | Admin | Name stamped on finalized orders |
/// | POS_PASSCODE | 1234 | Passcode for the unlock gate |
///
/// # Example
///
/// ```ignore
/// STORE_URL=https://xyz.supabase.co STORE_API_KEY=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted store base URL; `None` runs against the local store
    pub store_url: Option<String>,
    /// API key sent as both `apikey` and bearer token
    pub store_api_key: Option<String>,
    /// Working directory for the snapshot cache
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Background refresh interval (seconds)
    pub sync_interval_secs: u64,
    /// Hard timeout on store fetches (seconds)
    pub fetch_timeout_secs: u64,
    /// Tax as a fraction of the subtotal
    pub tax_rate: f64,
    /// Name stamped on finalized orders
    pub cashier_name: String,
    /// Unlock passcode
    pub passcode: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            store_url: std::env::var("STORE_URL").ok().filter(|s| !s.is_empty()),
            store_api_key: std::env::var("STORE_API_KEY").ok().filter(|s| !s.is_empty()),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            sync_interval_secs: std::env::var("SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8),
            tax_rate: std::env::var("TAX_RATE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0.0),
            cashier_name: std::env::var("CASHIER_NAME").unwrap_or_else(|_| "Admin".into()),
            passcode: std::env::var("POS_PASSCODE").unwrap_or_else(|_| "1234".into()),
        }
    }

    /// Whether the remote store binding should be used
    pub fn has_remote_store(&self) -> bool {
        self.store_url.is_some() && self.store_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
