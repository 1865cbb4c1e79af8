//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Inventory ingredient entity
///
/// Stock is deducted on checkout and topped up by manual restock.
/// Quantities are in the ingredient's own `unit` (pcs, g, ml, cans...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Never negative; deduction floors at zero
    pub stock: f64,
    /// Alert threshold for the low-stock listing
    pub min_stock_level: f64,
    pub cost_per_unit: f64,
}

impl Ingredient {
    /// Whether stock has fallen to or below the alert threshold
    pub fn is_low(&self) -> bool {
        self.stock <= self.min_stock_level
    }
}

/// Create ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: String,
    pub stock: f64,
    pub min_stock_level: Option<f64>,
    pub cost_per_unit: Option<f64>,
}

/// Update ingredient payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub stock: Option<f64>,
    pub min_stock_level: Option<f64>,
    pub cost_per_unit: Option<f64>,
}
