//! Data source abstraction
//!
//! Everything the till needs from the backing store, expressed as one
//! async trait. The binding is chosen once at startup: remote when the
//! store URL and key are configured, local otherwise. Both bindings
//! broadcast a [`StoreChange`] after their own writes so the sync loop
//! can refresh without waiting for the next poll.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use shared::models::{
    Ingredient, IngredientCreate, IngredientUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
    Order, OrderStatus,
};

/// Store layer errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which binding is live (reported by the health endpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Remote,
    Local,
}

/// Write notification emitted by a store after one of its own mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Ingredients,
    MenuItems,
    Orders,
}

/// Result of probing a single store table
#[derive(Debug, Clone, Serialize)]
pub struct TableProbe {
    pub table: String,
    pub ok: bool,
    pub rows: Option<u64>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The backing store for the till's working set
#[async_trait]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    // ========== Reads ==========
    async fn fetch_menu(&self) -> StoreResult<Vec<MenuItem>>;
    async fn fetch_inventory(&self) -> StoreResult<Vec<Ingredient>>;
    /// Most recent orders first
    async fn fetch_orders(&self, limit: usize) -> StoreResult<Vec<Order>>;

    // ========== Orders ==========
    /// Persist a completed order: header row first, then line rows. If a
    /// line insert fails the header is deleted again so the store never
    /// holds a half-written order.
    async fn insert_order(&self, order: &Order) -> StoreResult<()>;
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<()>;

    // ========== Inventory ==========
    async fn update_ingredient_stock(&self, id: &str, stock: f64) -> StoreResult<()>;
    async fn create_ingredient(&self, data: IngredientCreate) -> StoreResult<Ingredient>;
    async fn update_ingredient(&self, id: &str, data: IngredientUpdate) -> StoreResult<Ingredient>;
    async fn delete_ingredient(&self, id: &str) -> StoreResult<()>;

    // ========== Menu ==========
    async fn create_menu_item(&self, data: MenuItemCreate) -> StoreResult<MenuItem>;
    async fn update_menu_item(&self, id: &str, data: MenuItemUpdate) -> StoreResult<MenuItem>;
    async fn delete_menu_item(&self, id: &str) -> StoreResult<()>;

    // ========== Diagnostics ==========
    /// Per-table reachability, row count and latency
    async fn probe(&self) -> Vec<TableProbe>;

    /// Subscribe to write notifications from this store
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}
