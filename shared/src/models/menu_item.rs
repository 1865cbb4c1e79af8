//! Menu Item Model

use serde::{Deserialize, Serialize};

/// One recipe ingredient reference: `quantity` of `ingredient_id` is
/// consumed per unit sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeLine {
    pub ingredient_id: String,
    pub quantity: f64,
}

/// How a menu item maps to inventory.
///
/// A sum type so an item is either assembled from a recipe or sold
/// straight from packaged stock, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSource {
    /// Assembled to order; each line is consumed per unit sold.
    Recipe { lines: Vec<RecipeLine> },
    /// Sold 1:1 from a single tracked ingredient (canned drink etc.).
    /// `stock_id` may be stale relative to the inventory; the stock
    /// resolver falls back to name matching.
    ReadyMade { stock_id: String },
}

impl ItemSource {
    pub fn is_ready_made(&self) -> bool {
        matches!(self, ItemSource::ReadyMade { .. })
    }
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Sale price (Kyat)
    pub price: f64,
    /// Cost basis for profit reporting
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: ItemSource,
}

impl MenuItem {
    pub fn is_ready_made(&self) -> bool {
        self.source.is_ready_made()
    }

    /// Recipe lines, empty for ready-made items
    pub fn recipe(&self) -> &[RecipeLine] {
        match &self.source {
            ItemSource::Recipe { lines } => lines,
            ItemSource::ReadyMade { .. } => &[],
        }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub source: ItemSource,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub source: Option<ItemSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_accessor() {
        let item = MenuItem {
            id: "m1".into(),
            name: "Latte".into(),
            category: "Drinks".into(),
            price: 4500.0,
            cost: 1200.0,
            description: None,
            source: ItemSource::Recipe {
                lines: vec![RecipeLine {
                    ingredient_id: "i5".into(),
                    quantity: 18.0,
                }],
            },
        };
        assert!(!item.is_ready_made());
        assert_eq!(item.recipe().len(), 1);

        let can = MenuItem {
            source: ItemSource::ReadyMade {
                stock_id: "i7".into(),
            },
            ..item
        };
        assert!(can.is_ready_made());
        assert!(can.recipe().is_empty());
    }
}
