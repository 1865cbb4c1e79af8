//! Cart manager
//!
//! One independent in-progress cart per open location, plus the "current
//! location" pointer the till UI works against. Carts live only in
//! memory; nothing is written to the store until checkout.
//!
//! A cart entry is created on the first item added, not when the
//! location is opened, so merely tapping through tables never leaves
//! empty carts behind.

use dashmap::DashMap;
use parking_lot::RwLock;

use shared::Location;
use shared::models::{ActiveCart, CartItem, Ingredient, MenuItem};
use shared::util::now_millis;

use crate::stock::{available_quantity, can_add_one};

/// Cart operation errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("No location open")]
    NoLocationOpen,

    #[error("No active cart for {0}")]
    LocationNotActive(Location),

    #[error("Item not in cart: {0}")]
    UnknownItem(String),

    #[error("Out of stock: {item} ({available} available)")]
    OutOfStock { item: String, available: i64 },
}

/// All active carts for this till
#[derive(Default)]
pub struct CartManager {
    carts: DashMap<Location, ActiveCart>,
    current: RwLock<Option<Location>>,
}

impl CartManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Location pointer ==========

    /// Make `location` the one the till is working against
    pub fn open(&self, location: Location) {
        *self.current.write() = Some(location);
    }

    pub fn current(&self) -> Option<Location> {
        *self.current.read()
    }

    /// Drop the pointer if it still points at `location`
    pub fn release(&self, location: Location) {
        let mut current = self.current.write();
        if *current == Some(location) {
            *current = None;
        }
    }

    // ========== Reads ==========

    pub fn cart(&self, location: Location) -> Option<ActiveCart> {
        self.carts.get(&location).map(|c| c.clone())
    }

    /// All non-empty carts, ordered by location
    pub fn active(&self) -> Vec<ActiveCart> {
        let mut carts: Vec<ActiveCart> = self.carts.iter().map(|e| e.value().clone()).collect();
        carts.sort_by_key(|c| c.location);
        carts
    }

    // ========== Mutations ==========

    /// Add one unit of `item` to the cart at `location`.
    ///
    /// Ready-made items are gated on availability, counting what the
    /// cart already holds. Recipe items always go in; the kitchen may
    /// still be able to make them and deduction floors at zero anyway.
    pub fn add_item(
        &self,
        location: Location,
        item: MenuItem,
        inventory: &[Ingredient],
    ) -> Result<ActiveCart, CartError> {
        let existing = self.cart(location);
        if !can_add_one(&item, inventory, existing.as_ref()) {
            let available = available_quantity(&item, inventory, existing.as_ref()).unwrap_or(0);
            return Err(CartError::OutOfStock {
                item: item.name,
                available,
            });
        }

        let mut cart = self
            .carts
            .entry(location)
            .or_insert_with(|| ActiveCart::new(location, now_millis()));
        match cart.items.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => cart.items.push(CartItem::new(item)),
        }
        Ok(cart.clone())
    }

    /// Add one unit to the currently open location's cart
    pub fn add_to_current(
        &self,
        item: MenuItem,
        inventory: &[Ingredient],
    ) -> Result<ActiveCart, CartError> {
        let location = self.current().ok_or(CartError::NoLocationOpen)?;
        self.add_item(location, item, inventory)
    }

    /// Adjust a line's quantity by `delta` (either sign).
    ///
    /// A line clamped to zero or below is removed; a cart left with no
    /// lines is dropped entirely (`Ok(None)`). Increases on ready-made
    /// lines re-check availability.
    pub fn set_quantity(
        &self,
        location: Location,
        item_id: &str,
        delta: i64,
        inventory: &[Ingredient],
    ) -> Result<Option<ActiveCart>, CartError> {
        if delta > 0 {
            let cart = self
                .cart(location)
                .ok_or(CartError::LocationNotActive(location))?;
            let line = cart
                .items
                .iter()
                .find(|l| l.item.id == item_id)
                .ok_or_else(|| CartError::UnknownItem(item_id.to_string()))?;
            if let Some(remaining) = available_quantity(&line.item, inventory, Some(&cart))
                && remaining < delta
            {
                return Err(CartError::OutOfStock {
                    item: line.item.name.clone(),
                    available: remaining,
                });
            }
        }

        let mut cart = self
            .carts
            .get_mut(&location)
            .ok_or(CartError::LocationNotActive(location))?;
        let idx = cart
            .items
            .iter()
            .position(|l| l.item.id == item_id)
            .ok_or_else(|| CartError::UnknownItem(item_id.to_string()))?;

        let new_quantity = cart.items[idx].quantity + delta;
        if new_quantity <= 0 {
            cart.items.remove(idx);
        } else {
            cart.items[idx].quantity = new_quantity;
        }

        if cart.items.is_empty() {
            drop(cart);
            self.carts.remove(&location);
            return Ok(None);
        }
        Ok(Some(cart.clone()))
    }

    /// Remove and return the cart at `location` (checkout, or void)
    pub fn take(&self, location: Location) -> Option<ActiveCart> {
        self.carts.remove(&location).map(|(_, cart)| cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn menu_item(id: &str) -> MenuItem {
        seed::initial_menu().into_iter().find(|m| m.id == id).unwrap()
    }

    #[test]
    fn test_carts_are_independent_per_location() {
        let manager = CartManager::new();
        let inventory = seed::initial_ingredients();

        manager
            .add_item(Location::Table(1), menu_item("m1"), &inventory)
            .unwrap();
        manager
            .add_item(Location::Parcel(1), menu_item("m3"), &inventory)
            .unwrap();
        manager
            .add_item(Location::Table(1), menu_item("m1"), &inventory)
            .unwrap();

        let t1 = manager.cart(Location::Table(1)).unwrap();
        assert_eq!(t1.items.len(), 1);
        assert_eq!(t1.items[0].quantity, 2);

        let p1 = manager.cart(Location::Parcel(1)).unwrap();
        assert_eq!(p1.item_count(), 1);
    }

    #[test]
    fn test_add_to_current_requires_open_location() {
        let manager = CartManager::new();
        let inventory = seed::initial_ingredients();
        let err = manager
            .add_to_current(menu_item("m1"), &inventory)
            .unwrap_err();
        assert_eq!(err, CartError::NoLocationOpen);

        manager.open(Location::Table(2));
        assert!(manager.add_to_current(menu_item("m1"), &inventory).is_ok());
    }

    #[test]
    fn test_ready_made_add_stops_at_stock() {
        let manager = CartManager::new();
        let mut inventory = seed::initial_ingredients();
        inventory.iter_mut().find(|i| i.id == "i7").unwrap().stock = 2.0;

        let loc = Location::Table(1);
        manager.add_item(loc, menu_item("m6"), &inventory).unwrap();
        manager.add_item(loc, menu_item("m6"), &inventory).unwrap();
        let err = manager
            .add_item(loc, menu_item("m6"), &inventory)
            .unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { available: 0, .. }));
    }

    #[test]
    fn test_quantity_clamps_to_zero_and_drops_empty_cart() {
        let manager = CartManager::new();
        let inventory = seed::initial_ingredients();
        let loc = Location::Table(5);
        manager.add_item(loc, menu_item("m1"), &inventory).unwrap();

        let cart = manager
            .set_quantity(loc, "m1", -1, &inventory)
            .unwrap();
        assert!(cart.is_none());
        assert!(manager.cart(loc).is_none());
    }

    #[test]
    fn test_quantity_increase_is_stock_gated() {
        let manager = CartManager::new();
        let mut inventory = seed::initial_ingredients();
        inventory.iter_mut().find(|i| i.id == "i10").unwrap().stock = 1.0;

        let loc = Location::Parcel(3);
        manager.add_item(loc, menu_item("m9"), &inventory).unwrap();
        let err = manager
            .set_quantity(loc, "m9", 1, &inventory)
            .unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
    }

    #[test]
    fn test_release_only_clears_matching_pointer() {
        let manager = CartManager::new();
        manager.open(Location::Table(1));
        manager.release(Location::Table(2));
        assert_eq!(manager.current(), Some(Location::Table(1)));
        manager.release(Location::Table(1));
        assert_eq!(manager.current(), None);
    }
}
