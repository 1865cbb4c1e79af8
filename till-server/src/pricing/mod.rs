//! Order totals

pub mod totals;

pub use totals::{Totals, compute_totals};
