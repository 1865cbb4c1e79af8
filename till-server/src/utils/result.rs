//! Application result alias

use crate::utils::AppError;

/// Result alias used by handlers and services
pub type AppResult<T> = Result<T, AppError>;
