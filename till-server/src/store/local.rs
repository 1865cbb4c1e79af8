//! Local store binding
//!
//! In-memory fallback used when no store URL is configured and as the
//! last tier of the launch fallback chain. Behaves like the remote
//! store (same trait, same change notifications) but is seeded from the
//! built-in data set and forgets everything on shutdown.

use std::time::Instant;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use shared::models::{
    Ingredient, IngredientCreate, IngredientUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
    Order, OrderStatus,
};

use super::source::{
    DataSource, SourceKind, StoreChange, StoreError, StoreResult, TableProbe,
};
use crate::seed;

/// Seeded in-memory store
pub struct LocalStore {
    ingredients: RwLock<Vec<Ingredient>>,
    menu: RwLock<Vec<MenuItem>>,
    /// Newest first
    orders: RwLock<Vec<Order>>,
    changes: broadcast::Sender<StoreChange>,
}

impl LocalStore {
    pub fn new_seeded() -> Self {
        Self::with_data(seed::initial_ingredients(), seed::initial_menu())
    }

    pub fn empty() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    fn with_data(ingredients: Vec<Ingredient>, menu: Vec<MenuItem>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            ingredients: RwLock::new(ingredients),
            menu: RwLock::new(menu),
            orders: RwLock::new(Vec::new()),
            changes,
        }
    }

    fn notify(&self, change: StoreChange) {
        let _ = self.changes.send(change);
    }
}

#[async_trait]
impl DataSource for LocalStore {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    async fn fetch_menu(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(self.menu.read().clone())
    }

    async fn fetch_inventory(&self) -> StoreResult<Vec<Ingredient>> {
        Ok(self.ingredients.read().clone())
    }

    async fn fetch_orders(&self, limit: usize) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().iter().take(limit).cloned().collect())
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        let mut orders = self.orders.write();
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::Conflict(format!("order {}", order.id)));
        }
        orders.insert(0, order.clone());
        drop(orders);
        self.notify(StoreChange::Orders);
        Ok(())
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<()> {
        {
            let mut orders = self.orders.write();
            let order = orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("order {id}")))?;
            order.status = status;
        }
        self.notify(StoreChange::Orders);
        Ok(())
    }

    async fn update_ingredient_stock(&self, id: &str, stock: f64) -> StoreResult<()> {
        {
            let mut ingredients = self.ingredients.write();
            let ing = ingredients
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("ingredient {id}")))?;
            ing.stock = stock;
        }
        self.notify(StoreChange::Ingredients);
        Ok(())
    }

    async fn create_ingredient(&self, data: IngredientCreate) -> StoreResult<Ingredient> {
        let ing = Ingredient {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            unit: data.unit,
            stock: data.stock,
            min_stock_level: data.min_stock_level.unwrap_or(0.0),
            cost_per_unit: data.cost_per_unit.unwrap_or(0.0),
        };
        self.ingredients.write().push(ing.clone());
        self.notify(StoreChange::Ingredients);
        Ok(ing)
    }

    async fn update_ingredient(&self, id: &str, data: IngredientUpdate) -> StoreResult<Ingredient> {
        let updated = {
            let mut ingredients = self.ingredients.write();
            let ing = ingredients
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("ingredient {id}")))?;
            if let Some(name) = data.name {
                ing.name = name;
            }
            if let Some(unit) = data.unit {
                ing.unit = unit;
            }
            if let Some(stock) = data.stock {
                ing.stock = stock;
            }
            if let Some(min) = data.min_stock_level {
                ing.min_stock_level = min;
            }
            if let Some(cost) = data.cost_per_unit {
                ing.cost_per_unit = cost;
            }
            ing.clone()
        };
        self.notify(StoreChange::Ingredients);
        Ok(updated)
    }

    async fn delete_ingredient(&self, id: &str) -> StoreResult<()> {
        {
            let mut ingredients = self.ingredients.write();
            let before = ingredients.len();
            ingredients.retain(|i| i.id != id);
            if ingredients.len() == before {
                return Err(StoreError::NotFound(format!("ingredient {id}")));
            }
        }
        self.notify(StoreChange::Ingredients);
        Ok(())
    }

    async fn create_menu_item(&self, data: MenuItemCreate) -> StoreResult<MenuItem> {
        let item = MenuItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            category: data.category,
            price: data.price,
            cost: data.cost.unwrap_or(0.0),
            description: data.description,
            source: data.source,
        };
        self.menu.write().push(item.clone());
        self.notify(StoreChange::MenuItems);
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, data: MenuItemUpdate) -> StoreResult<MenuItem> {
        let updated = {
            let mut menu = self.menu.write();
            let item = menu
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("menu item {id}")))?;
            if let Some(name) = data.name {
                item.name = name;
            }
            if let Some(category) = data.category {
                item.category = category;
            }
            if let Some(price) = data.price {
                item.price = price;
            }
            if let Some(cost) = data.cost {
                item.cost = cost;
            }
            if let Some(description) = data.description {
                item.description = Some(description);
            }
            if let Some(source) = data.source {
                item.source = source;
            }
            item.clone()
        };
        self.notify(StoreChange::MenuItems);
        Ok(updated)
    }

    async fn delete_menu_item(&self, id: &str) -> StoreResult<()> {
        {
            let mut menu = self.menu.write();
            let before = menu.len();
            menu.retain(|m| m.id != id);
            if menu.len() == before {
                return Err(StoreError::NotFound(format!("menu item {id}")));
            }
        }
        self.notify(StoreChange::MenuItems);
        Ok(())
    }

    async fn probe(&self) -> Vec<TableProbe> {
        let started = Instant::now();
        let counts = [
            ("ingredients", self.ingredients.read().len() as u64),
            ("menu_items", self.menu.read().len() as u64),
            (
                "menu_item_ingredients",
                self.menu
                    .read()
                    .iter()
                    .map(|m| m.recipe().len() as u64)
                    .sum(),
            ),
            ("orders", self.orders.read().len() as u64),
            (
                "order_items",
                self.orders
                    .read()
                    .iter()
                    .map(|o| o.items.len() as u64)
                    .sum(),
            ),
        ];
        let latency_ms = started.elapsed().as_millis() as u64;
        counts
            .into_iter()
            .map(|(table, rows)| TableProbe {
                table: table.to_string(),
                ok: true,
                rows: Some(rows),
                latency_ms,
                error: None,
            })
            .collect()
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
