//! Checkout: order placement and stock deduction

pub mod coordinator;
pub mod deduction;

pub use coordinator::{CheckoutError, CheckoutService};
pub use deduction::build_deduction_map;
