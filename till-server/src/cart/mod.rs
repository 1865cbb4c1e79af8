//! Per-location active carts

pub mod manager;

pub use manager::{CartError, CartManager};
