//! API routing
//!
//! # Structure
//!
//! - [`health`] - health checks and store probing
//! - [`auth`] - passcode unlock gate
//! - [`menu`] - menu browsing and management
//! - [`inventory`] - inventory, restock, low-stock alerts
//! - [`carts`] - per-location carts and checkout
//! - [`orders`] - order history and refunds
//! - [`reports`] - daily sales reports

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod auth;
pub mod carts;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod reports;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(inventory::router())
        .merge(carts::router())
        .merge(orders::router())
        .merge(reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
