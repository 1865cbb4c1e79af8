//! Sales Report Model

use serde::{Deserialize, Serialize};

/// Per-day sales aggregate over completed orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesReport {
    /// Business date (YYYY-MM-DD)
    pub date: String,
    /// Sum of order totals
    pub revenue: f64,
    /// Sum of item cost basis
    pub cost: f64,
    /// revenue - cost
    pub profit: f64,
    pub order_count: i64,
}
