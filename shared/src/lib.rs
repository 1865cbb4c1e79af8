//! Shared types for the till workspace
//!
//! Domain models, the API response envelope, error types and small
//! utilities used by the server crate and its diagnostic binaries.

pub mod error;
pub mod location;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::ApiErrorCode;
pub use location::{Location, LocationType};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
