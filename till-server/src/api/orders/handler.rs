//! Order history API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::warn;

use shared::ApiResponse;
use shared::models::{Order, OrderStatus};

use crate::core::ServerState;
use crate::store::StoreError;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct ListParams {
    limit: Option<usize>,
}

/// GET /api/orders - history, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let mut orders = state.catalog.orders();
    if let Some(limit) = params.limit {
        orders.truncate(limit);
    }
    Ok(Json(ApiResponse::ok(orders)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    state
        .catalog
        .order(&id)
        .map(|o| Json(ApiResponse::ok(o)))
        .ok_or_else(|| AppError::not_found(format!("order {id}")))
}

/// POST /api/orders/{id}/refund - flip status to refunded.
///
/// Stock is not restored; refunds record a money decision, not a goods
/// return. The store write is best effort: an order that only ever
/// existed locally still refunds locally.
pub async fn refund(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .catalog
        .order(&id)
        .ok_or_else(|| AppError::not_found(format!("order {id}")))?;
    if order.status == OrderStatus::Refunded {
        return Err(AppError::BusinessRule(format!("order {id} is already refunded")));
    }

    match state
        .source
        .update_order_status(&id, OrderStatus::Refunded)
        .await
    {
        Ok(()) | Err(StoreError::NotFound(_)) => {}
        Err(e) => warn!("Failed to record refund of {} in the store: {}", id, e),
    }

    state.catalog.set_order_status(&id, OrderStatus::Refunded);
    if let Err(e) = state.cache.store_orders(&state.catalog.orders()) {
        warn!("Failed to cache order history: {}", e);
    }

    let mut refunded = order;
    refunded.status = OrderStatus::Refunded;
    Ok(Json(ApiResponse::ok_with_message(
        refunded,
        format!("order {id} refunded"),
    )))
}
