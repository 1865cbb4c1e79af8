//! Cart and checkout API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use shared::ApiResponse;
use shared::Location;
use shared::models::{ActiveCart, Order, PaymentMethod, Voucher};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

fn parse_location(label: &str) -> Result<Location, AppError> {
    label
        .parse()
        .map_err(|_| AppError::validation(format!("invalid location '{label}'")))
}

#[derive(Serialize)]
pub struct CurrentCartResponse {
    pub location: Option<Location>,
    pub cart: Option<ActiveCart>,
}

/// GET /api/carts - all active carts
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ActiveCart>>>> {
    Ok(Json(ApiResponse::ok(state.carts.active())))
}

/// GET /api/carts/current - the location the till is working against
pub async fn current(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<CurrentCartResponse>>> {
    let location = state.carts.current();
    let cart = location.and_then(|loc| state.carts.cart(loc));
    Ok(Json(ApiResponse::ok(CurrentCartResponse { location, cart })))
}

/// POST /api/carts/{location}/open - switch the till to a location
pub async fn open(
    State(state): State<ServerState>,
    Path(label): Path<String>,
) -> AppResult<Json<ApiResponse<CurrentCartResponse>>> {
    let location = parse_location(&label)?;
    state.carts.open(location);
    Ok(Json(ApiResponse::ok(CurrentCartResponse {
        location: Some(location),
        cart: state.carts.cart(location),
    })))
}

#[derive(Deserialize)]
pub struct AddItemRequest {
    menu_item_id: String,
}

/// POST /api/carts/items - add one unit to the current location's cart
pub async fn add_to_current(
    State(state): State<ServerState>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<ActiveCart>>> {
    let item = state
        .catalog
        .menu_item(&req.menu_item_id)
        .ok_or_else(|| AppError::not_found(format!("menu item {}", req.menu_item_id)))?;
    let cart = state
        .carts
        .add_to_current(item, &state.catalog.inventory())?;
    Ok(Json(ApiResponse::ok(cart)))
}

/// POST /api/carts/{location}/items - add one unit to a specific cart
pub async fn add_item(
    State(state): State<ServerState>,
    Path(label): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<ActiveCart>>> {
    let location = parse_location(&label)?;
    let item = state
        .catalog
        .menu_item(&req.menu_item_id)
        .ok_or_else(|| AppError::not_found(format!("menu item {}", req.menu_item_id)))?;
    let cart = state
        .carts
        .add_item(location, item, &state.catalog.inventory())?;
    Ok(Json(ApiResponse::ok(cart)))
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    /// Signed adjustment, usually +1 or -1
    delta: i64,
}

/// PATCH /api/carts/{location}/items/{item_id} - adjust a line quantity.
/// Returns the cart, or `null` when the last line was removed.
pub async fn set_quantity(
    State(state): State<ServerState>,
    Path((label, item_id)): Path<(String, String)>,
    Json(req): Json<QuantityRequest>,
) -> AppResult<Json<ApiResponse<Option<ActiveCart>>>> {
    let location = parse_location(&label)?;
    let cart = state
        .carts
        .set_quantity(location, &item_id, req.delta, &state.catalog.inventory())?;
    Ok(Json(ApiResponse::ok(cart)))
}

/// DELETE /api/carts/{location} - void the cart without an order
pub async fn void(
    State(state): State<ServerState>,
    Path(label): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let location = parse_location(&label)?;
    state.carts.take(location);
    state.carts.release(location);
    Ok(Json(ApiResponse::ok(())))
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    payment_method: PaymentMethod,
    /// Voucher presented at the counter, if any; validated here, not
    /// looked up in the store
    #[serde(default)]
    voucher: Option<Voucher>,
}

/// POST /api/carts/{location}/checkout - finalize the cart into an order
pub async fn checkout(
    State(state): State<ServerState>,
    Path(label): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let location = parse_location(&label)?;
    let order = state
        .checkout
        .checkout(location, req.payment_method, req.voucher)
        .await?;
    Ok(Json(ApiResponse::ok(order)))
}
