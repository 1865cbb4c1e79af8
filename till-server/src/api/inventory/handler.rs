//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::ApiResponse;
use shared::models::{Ingredient, IngredientCreate, IngredientUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/inventory - all ingredients
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Ingredient>>>> {
    Ok(Json(ApiResponse::ok(state.catalog.inventory())))
}

/// GET /api/inventory/low - ingredients at or below their threshold
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Ingredient>>>> {
    Ok(Json(ApiResponse::ok(state.catalog.low_stock())))
}

/// POST /api/inventory - create an ingredient
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<IngredientCreate>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if data.stock < 0.0 {
        return Err(AppError::validation("stock must not be negative"));
    }
    let ing = state.source.create_ingredient(data).await?;
    Ok(Json(ApiResponse::ok(ing)))
}

/// PUT /api/inventory/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<IngredientUpdate>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    if let Some(stock) = data.stock
        && stock < 0.0
    {
        return Err(AppError::validation("stock must not be negative"));
    }
    let ing = state.source.update_ingredient(&id, data).await?;
    Ok(Json(ApiResponse::ok(ing)))
}

#[derive(Deserialize)]
pub struct RestockRequest {
    amount: f64,
}

/// POST /api/inventory/{id}/restock - add stock on delivery
pub async fn restock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<RestockRequest>,
) -> AppResult<Json<ApiResponse<Ingredient>>> {
    if req.amount <= 0.0 {
        return Err(AppError::validation("restock amount must be positive"));
    }
    let mut ing = state
        .catalog
        .inventory()
        .into_iter()
        .find(|i| i.id == id)
        .ok_or_else(|| AppError::not_found(format!("ingredient {id}")))?;

    let new_stock = ing.stock + req.amount;
    state.source.update_ingredient_stock(&id, new_stock).await?;
    state.catalog.apply_stock(&id, new_stock);
    ing.stock = new_stock;
    Ok(Json(ApiResponse::ok(ing)))
}

/// DELETE /api/inventory/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.source.delete_ingredient(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}
