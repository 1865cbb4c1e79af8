//! Passcode gate routes
//!
//! The till asks for a passcode once per shift; the unlocked flag lives
//! in the snapshot cache so a relaunch does not re-ask.
//!
//! # Routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/auth/status | GET | Current lock state |
//! | /api/auth/unlock | POST | Unlock with the passcode |
//! | /api/auth/lock | POST | Re-lock the till |

use axum::{Json, Router, extract::State, routing::{get, post}};
use serde::{Deserialize, Serialize};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/status", get(status))
        .route("/api/auth/unlock", post(unlock))
        .route("/api/auth/lock", post(lock))
}

#[derive(Deserialize)]
pub struct UnlockRequest {
    passcode: String,
}

#[derive(Serialize)]
pub struct LockState {
    unlocked: bool,
}

pub async fn status(State(state): State<ServerState>) -> Json<ApiResponse<LockState>> {
    Json(ApiResponse::ok(LockState {
        unlocked: state.cache.is_unlocked(),
    }))
}

pub async fn unlock(
    State(state): State<ServerState>,
    Json(req): Json<UnlockRequest>,
) -> AppResult<Json<ApiResponse<LockState>>> {
    if req.passcode != state.config.passcode {
        return Err(AppError::Unauthorized);
    }
    state.cache.set_unlocked(true)?;
    Ok(Json(ApiResponse::ok(LockState { unlocked: true })))
}

pub async fn lock(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<LockState>>> {
    state.cache.set_unlocked(false)?;
    Ok(Json(ApiResponse::ok(LockState { unlocked: false })))
}
