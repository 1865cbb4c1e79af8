//! Sales report routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/reports/daily | GET | Revenue/cost/profit per day |

use axum::{Json, Router, extract::State, routing::get};

use shared::ApiResponse;
use shared::models::SalesReport;

use crate::core::ServerState;
use crate::reporting::daily_reports;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/reports/daily", get(daily))
}

pub async fn daily(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SalesReport>>>> {
    Ok(Json(ApiResponse::ok(daily_reports(&state.catalog.orders()))))
}
