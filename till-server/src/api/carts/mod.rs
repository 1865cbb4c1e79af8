//! Cart and checkout API module
//!
//! Locations appear in paths as their labels ("Table 3", URL-encoded).

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/carts", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/current", get(handler::current))
        .route("/items", post(handler::add_to_current))
        .route("/{location}/open", post(handler::open))
        .route("/{location}/items", post(handler::add_item))
        .route("/{location}/items/{item_id}", patch(handler::set_quantity))
        .route("/{location}", delete(handler::void))
        .route("/{location}/checkout", post(handler::checkout))
}
