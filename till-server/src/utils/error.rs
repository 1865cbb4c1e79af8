//! Unified error handling
//!
//! [`AppError`] is the application-level error every handler returns.
//! It converts the lower-level errors (cart, checkout, store, cache)
//! into an HTTP status plus the standard [`ApiResponse`] envelope.
//!
//! # Error Code Ranges
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | General / validation | E0003 not found |
//! | E1xxx  | Authentication | E1001 locked |
//! | E4xxx  | Cart errors | E4001 no location open |
//! | E6xxx  | Stock errors | E6001 out of stock |
//! | E9xxx  | System / store | E9002 store error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{ApiErrorCode, ApiResponse};
use tracing::error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::store::{CacheError, StoreError};

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (4xx) ==========
    /// Till locked / wrong passcode (401)
    #[error("Till is locked")]
    Unauthorized,

    // ========== Business logic (4xx) ==========
    /// Resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource conflict (409)
    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// Validation failure (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Cart operation without an open location (422)
    #[error("No location open")]
    NoLocationOpen,

    /// Item cannot be added with current inventory (422)
    #[error("Out of stock: {item}")]
    OutOfStock { item: String },

    /// Business rule violation (422)
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System (5xx) ==========
    /// Hosted store unreachable or rejected the request (502)
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, ApiErrorCode::Unauthorized),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ApiErrorCode::NotFound),
            AppError::Conflict(_) => (StatusCode::CONFLICT, ApiErrorCode::Conflict),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ApiErrorCode::Validation),
            AppError::NoLocationOpen => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorCode::NoLocationOpen)
            }
            AppError::OutOfStock { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorCode::OutOfStock)
            }
            AppError::BusinessRule(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorCode::BusinessRule)
            }
            AppError::Store(_) => (StatusCode::BAD_GATEWAY, ApiErrorCode::Store),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ApiErrorCode::Internal),
        };

        if status.is_server_error() {
            error!("{}: {}", code, self);
        }

        let body: ApiResponse<()> = ApiResponse::error(code.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::NoLocationOpen => AppError::NoLocationOpen,
            CartError::LocationNotActive(loc) => {
                AppError::NotFound(format!("no active cart for {loc}"))
            }
            CartError::OutOfStock { item, .. } => AppError::OutOfStock { item },
            CartError::UnknownItem(id) => AppError::NotFound(format!("menu item {id}")),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart(loc) => {
                AppError::BusinessRule(format!("cart for {loc} is empty"))
            }
            CheckoutError::Cart(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            StoreError::Conflict(what) => AppError::Conflict(what),
            other => AppError::Store(other.to_string()),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Internal(err.to_string())
    }
}
