//! Health check routes
//!
//! # Routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /health | GET | Liveness, store binding, lock state |
//! | /health/store | GET | Per-table store probe (counts, latency) |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::store::{SourceKind, TableProbe};

/// Health routes - public, no unlock required
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/store", get(store_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Which store binding is live
    mode: SourceKind,
    uptime_seconds: u64,
    /// Whether the passcode gate is still closed
    locked: bool,
}

#[derive(Serialize)]
pub struct StoreHealthResponse {
    status: &'static str,
    tables: Vec<TableProbe>,
}

// Server start time, first touched by the first health request
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.source.kind(),
        uptime_seconds: uptime_seconds(),
        locked: !state.cache.is_unlocked(),
    })
}

/// Probe every store table, the same check `store-check` runs
pub async fn store_health(State(state): State<ServerState>) -> Json<StoreHealthResponse> {
    let tables = state.source.probe().await;
    let all_ok = !tables.is_empty() && tables.iter().all(|t| t.ok);
    Json(StoreHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        tables,
    })
}
