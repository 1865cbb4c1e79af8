//! Server state
//!
//! All long-lived services behind `Arc`s, so cloning the state per
//! request is a handful of pointer bumps.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::cart::CartManager;
use crate::catalog::Catalog;
use crate::checkout::CheckoutService;
use crate::core::Config;
use crate::store::{DataSource, LocalStore, RemoteStore, SnapshotCache};
use crate::sync::SyncService;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub source: Arc<dyn DataSource>,
    pub catalog: Arc<Catalog>,
    pub cache: Arc<SnapshotCache>,
    pub carts: Arc<CartManager>,
    pub checkout: Arc<CheckoutService>,
    pub sync: Arc<SyncService>,
}

impl ServerState {
    /// Build all services. The store binding is decided here, once:
    /// remote when fully configured, otherwise the seeded local store.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("creating work dir {}", config.work_dir))?;
        let cache_path = std::path::Path::new(&config.work_dir).join("till-cache.redb");
        let cache = Arc::new(SnapshotCache::open(&cache_path).context("opening snapshot cache")?);

        let source: Arc<dyn DataSource> = match (&config.store_url, &config.store_api_key) {
            (Some(url), Some(key)) => {
                info!("🛰️ Using hosted store at {}", url);
                Arc::new(RemoteStore::new(url, key))
            }
            _ => {
                info!("🏠 No store configured, using the seeded local store");
                Arc::new(LocalStore::new_seeded())
            }
        };

        let catalog = Arc::new(Catalog::new());
        let carts = Arc::new(CartManager::new());
        let checkout = Arc::new(CheckoutService::new(
            source.clone(),
            catalog.clone(),
            cache.clone(),
            carts.clone(),
            config.tax_rate,
            config.cashier_name.clone(),
        ));
        let sync = Arc::new(SyncService::new(
            source.clone(),
            catalog.clone(),
            cache.clone(),
            std::time::Duration::from_secs(config.sync_interval_secs),
            std::time::Duration::from_secs(config.fetch_timeout_secs),
        ));

        Ok(Self {
            config: config.clone(),
            source,
            catalog,
            cache,
            carts,
            checkout,
            sync,
        })
    }

    /// Spawn the background refresh loop
    pub fn start_background_tasks(&self) {
        let sync = self.sync.clone();
        tokio::spawn(sync.run());
    }
}
