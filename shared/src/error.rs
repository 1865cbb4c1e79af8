//! Shared error taxonomy
//!
//! API-level error codes carried in the [`crate::ApiResponse`]
//! envelope. The server maps its own error enum onto these.
//!
//! # Error Code Ranges
//!
//! - E0xxx: General / validation errors
//! - E1xxx: Authentication errors
//! - E4xxx: Cart and order errors
//! - E6xxx: Stock errors
//! - E9xxx: System / store errors

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Authentication required (401)
    Unauthorized,
    /// Resource not found (404)
    NotFound,
    /// Resource already exists (409)
    Conflict,
    /// Business rule violation (422)
    BusinessRule,
    /// Out of stock (422)
    OutOfStock,
    /// No location open (422)
    NoLocationOpen,
    /// Remote store error (502)
    Store,
    /// Internal server error (500)
    Internal,
}

impl ApiErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::BusinessRule => "E0005",
            Self::Unauthorized => "E1001",
            Self::NoLocationOpen => "E4001",
            Self::OutOfStock => "E6001",
            Self::Store => "E9002",
            Self::Internal => "E9001",
        }
    }

}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
