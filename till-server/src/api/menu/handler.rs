//! Menu API Handlers
//!
//! Reads come from the in-memory catalog; writes go to the store, whose
//! change notification pulls the catalog up to date.

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/menu - full menu
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    Ok(Json(ApiResponse::ok(state.catalog.menu())))
}

/// GET /api/menu/categories - distinct categories in menu order
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    Ok(Json(ApiResponse::ok(state.catalog.categories())))
}

/// POST /api/menu - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if data.price < 0.0 {
        return Err(AppError::validation("price must not be negative"));
    }
    let item = state.source.create_menu_item(data).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// PUT /api/menu/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    if let Some(price) = data.price
        && price < 0.0
    {
        return Err(AppError::validation("price must not be negative"));
    }
    let item = state.source.update_menu_item(&id, data).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.source.delete_menu_item(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}
