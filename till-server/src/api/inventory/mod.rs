//! Inventory API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", inventory_routes())
}

fn inventory_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/low", get(handler::low_stock))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/restock", post(handler::restock))
}
