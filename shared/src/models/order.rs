//! Order Model
//!
//! In-progress carts and finalized orders. A cart line snapshots the
//! menu item it was added from, so later menu edits never rewrite an
//! order's history (price-at-sale integrity).

use crate::location::{Location, LocationType};
use crate::models::MenuItem;
use serde::{Deserialize, Serialize};

/// Payment methods accepted at the till
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    KbzPay,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Completed,
    Refunded,
}

/// One cart line: a menu item snapshot plus quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Snapshot of the menu item at add time
    pub item: MenuItem,
    /// Always >= 1 while the line exists
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartItem {
    pub fn new(item: MenuItem) -> Self {
        Self {
            item,
            quantity: 1,
            notes: None,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.item.price * self.quantity as f64
    }
}

/// The in-progress cart for one open location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveCart {
    pub location: Location,
    pub items: Vec<CartItem>,
    /// Unix millis when the first item was added
    pub created_at: i64,
}

impl ActiveCart {
    pub fn new(location: Location, created_at: i64) -> Self {
        Self {
            location,
            items: Vec::new(),
            created_at,
        }
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Quantity of one menu item already in this cart
    pub fn quantity_of(&self, menu_item_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|i| i.item.id == menu_item_id)
            .map(|i| i.quantity)
            .sum()
    }
}

/// Finalized order - created exactly once at checkout, immutable
/// afterwards except for the refund status flip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Human-friendly 6-digit code
    pub id: String,
    /// Frozen cart snapshot at checkout time
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub tax: f64,
    /// Discount amount actually applied (not the voucher definition)
    pub discount: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// RFC 3339
    pub created_at: String,
    pub cashier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
}
