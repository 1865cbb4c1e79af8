//! Snapshot cache backed by redb
//!
//! Persists the last known working set plus two till flags, so a
//! relaunch shows data instantly and an offline launch still has
//! yesterday's menu.
//!
//! # Table
//!
//! | Key | Value | Purpose |
//! |-----|-------|---------|
//! | `pos_db_menu` | `Vec<MenuItem>` | Menu snapshot |
//! | `pos_db_inventory` | `Vec<Ingredient>` | Inventory snapshot |
//! | `pos_db_orders` | `Vec<Order>` | Recent order history |
//! | `pos_sync_loaded` | `bool` | Warm flag (a first sync completed) |
//! | `pos_unlocked` | `bool` | Passcode gate state |
//!
//! redb commits with `Durability::Immediate`, so a snapshot written
//! before a power cut is still there on the next launch.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use shared::models::{Ingredient, MenuItem, Order};

const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

const KEY_MENU: &str = "pos_db_menu";
const KEY_INVENTORY: &str = "pos_db_inventory";
const KEY_ORDERS: &str = "pos_db_orders";
const KEY_WARM: &str = "pos_sync_loaded";
const KEY_UNLOCKED: &str = "pos_unlocked";

/// Snapshot cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Local snapshot cache
#[derive(Clone)]
pub struct SnapshotCache {
    db: Arc<Database>,
}

impl SnapshotCache {
    /// Open or create the cache database at the given path
    pub fn open(path: impl AsRef<Path>) -> CacheResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory cache (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> CacheResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> CacheResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SNAPSHOTS_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(SNAPSHOTS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    // ========== Snapshots ==========

    pub fn store_menu(&self, menu: &[MenuItem]) -> CacheResult<()> {
        self.put(KEY_MENU, &menu)
    }

    pub fn load_menu(&self) -> CacheResult<Option<Vec<MenuItem>>> {
        self.get(KEY_MENU)
    }

    pub fn store_inventory(&self, inventory: &[Ingredient]) -> CacheResult<()> {
        self.put(KEY_INVENTORY, &inventory)
    }

    pub fn load_inventory(&self) -> CacheResult<Option<Vec<Ingredient>>> {
        self.get(KEY_INVENTORY)
    }

    pub fn store_orders(&self, orders: &[Order]) -> CacheResult<()> {
        self.put(KEY_ORDERS, &orders)
    }

    pub fn load_orders(&self) -> CacheResult<Option<Vec<Order>>> {
        self.get(KEY_ORDERS)
    }

    // ========== Flags ==========

    /// Whether a full sync has ever completed against this cache
    pub fn is_warm(&self) -> bool {
        self.get(KEY_WARM).ok().flatten().unwrap_or(false)
    }

    pub fn set_warm(&self, warm: bool) -> CacheResult<()> {
        self.put(KEY_WARM, &warm)
    }

    /// Passcode gate: survives relaunch so the till only asks once per shift
    pub fn is_unlocked(&self) -> bool {
        self.get(KEY_UNLOCKED).ok().flatten().unwrap_or(false)
    }

    pub fn set_unlocked(&self, unlocked: bool) -> CacheResult<()> {
        self.put(KEY_UNLOCKED, &unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Ingredient, ItemSource, MenuItem};

    fn ingredient(id: &str, stock: f64) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: format!("Ingredient {id}"),
            unit: "pcs".to_string(),
            stock,
            min_stock_level: 5.0,
            cost_per_unit: 100.0,
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        assert!(cache.load_inventory().unwrap().is_none());

        let inventory = vec![ingredient("i1", 100.0), ingredient("i2", 2.5)];
        cache.store_inventory(&inventory).unwrap();
        assert_eq!(cache.load_inventory().unwrap().unwrap(), inventory);
    }

    #[test]
    fn test_warm_flag_defaults_to_cold() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        assert!(!cache.is_warm());
        cache.set_warm(true).unwrap();
        assert!(cache.is_warm());
    }

    #[test]
    fn test_menu_snapshot_keeps_source_kind() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        let menu = vec![MenuItem {
            id: "m6".to_string(),
            name: "Coca-Cola".to_string(),
            category: "Drinks".to_string(),
            price: 1500.0,
            cost: 800.0,
            description: None,
            source: ItemSource::ReadyMade {
                stock_id: "i7".to_string(),
            },
        }];
        cache.store_menu(&menu).unwrap();
        let loaded = cache.load_menu().unwrap().unwrap();
        assert!(loaded[0].is_ready_made());
    }
}
