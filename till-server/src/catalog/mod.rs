//! In-memory working set
//!
//! The till serves every read (menu grid, stock badges, history) from
//! this catalog, never from the network. The sync service is the only
//! writer for wholesale replacement; checkout applies point updates so
//! stock badges change the moment an order is placed.

use parking_lot::RwLock;
use tracing::info;

use shared::models::{Ingredient, MenuItem, Order, OrderStatus};

/// Shared in-memory catalog, cheap to clone behind an `Arc`
#[derive(Default)]
pub struct Catalog {
    menu: RwLock<Vec<MenuItem>>,
    inventory: RwLock<Vec<Ingredient>>,
    /// Newest first
    orders: RwLock<Vec<Order>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Reads ==========

    pub fn menu(&self) -> Vec<MenuItem> {
        self.menu.read().clone()
    }

    pub fn menu_item(&self, id: &str) -> Option<MenuItem> {
        self.menu.read().iter().find(|m| m.id == id).cloned()
    }

    /// Distinct categories in menu order
    pub fn categories(&self) -> Vec<String> {
        let menu = self.menu.read();
        let mut categories: Vec<String> = Vec::new();
        for item in menu.iter() {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    pub fn inventory(&self) -> Vec<Ingredient> {
        self.inventory.read().clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.orders.read().iter().find(|o| o.id == id).cloned()
    }

    /// Ingredients at or below their alert threshold
    pub fn low_stock(&self) -> Vec<Ingredient> {
        self.inventory
            .read()
            .iter()
            .filter(|i| i.is_low())
            .cloned()
            .collect()
    }

    // ========== Wholesale replacement (sync service) ==========
    //
    // Each replace compares first and skips identical data, so a
    // background refresh that found nothing new touches nothing.

    pub fn replace_menu(&self, menu: Vec<MenuItem>) -> bool {
        let mut guard = self.menu.write();
        if *guard == menu {
            return false;
        }
        info!("📦 Catalog: loaded {} menu items", menu.len());
        *guard = menu;
        true
    }

    pub fn replace_inventory(&self, inventory: Vec<Ingredient>) -> bool {
        let mut guard = self.inventory.write();
        if *guard == inventory {
            return false;
        }
        info!("📦 Catalog: loaded {} ingredients", inventory.len());
        *guard = inventory;
        true
    }

    pub fn replace_orders(&self, orders: Vec<Order>) -> bool {
        let mut guard = self.orders.write();
        if *guard == orders {
            return false;
        }
        info!("📦 Catalog: loaded {} orders", orders.len());
        *guard = orders;
        true
    }

    // ========== Point updates (checkout / refund) ==========

    pub fn push_order(&self, order: Order) {
        self.orders.write().insert(0, order);
    }

    pub fn set_order_status(&self, id: &str, status: OrderStatus) -> bool {
        let mut orders = self.orders.write();
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    pub fn apply_stock(&self, ingredient_id: &str, stock: f64) -> bool {
        let mut inventory = self.inventory.write();
        match inventory.iter_mut().find(|i| i.id == ingredient_id) {
            Some(ing) => {
                ing.stock = stock;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_replace_skips_identical_data() {
        let catalog = Catalog::new();
        let menu = seed::initial_menu();
        assert!(catalog.replace_menu(menu.clone()));
        assert!(!catalog.replace_menu(menu));
    }

    #[test]
    fn test_categories_in_menu_order() {
        let catalog = Catalog::new();
        catalog.replace_menu(seed::initial_menu());
        assert_eq!(catalog.categories(), vec!["Food", "Drinks"]);
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        let catalog = Catalog::new();
        let mut inventory = seed::initial_ingredients();
        inventory[0].stock = inventory[0].min_stock_level;
        catalog.replace_inventory(inventory);
        let low = catalog.low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "i1");
    }

    #[test]
    fn test_apply_stock_updates_one_ingredient() {
        let catalog = Catalog::new();
        catalog.replace_inventory(seed::initial_ingredients());
        assert!(catalog.apply_stock("i7", 49.0));
        let inv = catalog.inventory();
        assert_eq!(inv.iter().find(|i| i.id == "i7").unwrap().stock, 49.0);
        assert!(!catalog.apply_stock("nope", 1.0));
    }
}
