//! Sync service
//!
//! Owns how the working set gets into the catalog and how it stays
//! fresh:
//!
//! - **Warmup** — on a warm cache the catalog is filled straight from
//!   snapshots and the network is never awaited on the launch path. On
//!   a cold cache one fetch is attempted with a hard timeout, falling
//!   back to snapshots and finally to the built-in seed data. Warmup
//!   always succeeds; the till opens with the freshest data it can get.
//! - **Refresh loop** — a fixed interval plus the store's own change
//!   notifications. Each refresh replaces catalog contents only when
//!   the data actually differs, then re-persists the snapshots.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use shared::models::{Ingredient, MenuItem, Order};

use crate::catalog::Catalog;
use crate::seed;
use crate::store::{DataSource, SnapshotCache, StoreError, StoreResult};

/// How much order history the till keeps around
const ORDER_FETCH_LIMIT: usize = 200;

pub struct SyncService {
    source: Arc<dyn DataSource>,
    catalog: Arc<Catalog>,
    cache: Arc<SnapshotCache>,
    interval: Duration,
    fetch_timeout: Duration,
}

impl SyncService {
    pub fn new(
        source: Arc<dyn DataSource>,
        catalog: Arc<Catalog>,
        cache: Arc<SnapshotCache>,
        interval: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            catalog,
            cache,
            interval,
            fetch_timeout,
        }
    }

    /// Fill the catalog at launch. Never fails and never blocks past
    /// the fetch timeout; worst case the till opens on seed data.
    pub async fn warmup(&self) {
        if self.cache.is_warm() {
            info!("⚡ Warm cache, loading snapshots");
            self.load_snapshots_or_seed();
            return;
        }

        match self.fetch_all().await {
            Ok((menu, inventory, orders)) => {
                info!("✅ First sync complete");
                self.install(menu, inventory, orders);
                if let Err(e) = self.cache.set_warm(true) {
                    warn!("Failed to set warm flag: {}", e);
                }
            }
            Err(e) => {
                warn!("⚠️ Store unreachable at launch ({}), falling back", e);
                self.load_snapshots_or_seed();
            }
        }
    }

    /// Fetch everything and swap it into the catalog. Returns whether
    /// anything changed.
    pub async fn refresh(&self) -> StoreResult<bool> {
        let (menu, inventory, orders) = self.fetch_all().await?;
        let changed = self.install(menu, inventory, orders);
        if !self.cache.is_warm()
            && let Err(e) = self.cache.set_warm(true)
        {
            warn!("Failed to set warm flag: {}", e);
        }
        Ok(changed)
    }

    /// Background loop: interval ticks plus store change notifications
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut changes = self.source.subscribe();

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                change = changes.recv() => match change {
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => {
                        warn!("Store change channel closed, polling only");
                        loop {
                            ticker.tick().await;
                            self.try_refresh().await;
                        }
                    }
                },
            }
            self.try_refresh().await;
        }
    }

    async fn try_refresh(&self) {
        match self.refresh().await {
            Ok(true) => info!("🔄 Sync refreshed the working set"),
            Ok(false) => {}
            // The catalog keeps serving the last good data
            Err(e) => warn!("Background sync failed: {}", e),
        }
    }

    async fn fetch_all(&self) -> StoreResult<(Vec<MenuItem>, Vec<Ingredient>, Vec<Order>)> {
        let fetch = async {
            let menu = self.source.fetch_menu().await?;
            let inventory = self.source.fetch_inventory().await?;
            let orders = self.source.fetch_orders(ORDER_FETCH_LIMIT).await?;
            Ok::<_, StoreError>((menu, inventory, orders))
        };
        tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| StoreError::Unavailable("fetch timed out".to_string()))?
    }

    fn install(&self, menu: Vec<MenuItem>, inventory: Vec<Ingredient>, orders: Vec<Order>) -> bool {
        let mut changed = false;
        if self.catalog.replace_menu(menu) {
            changed = true;
            if let Err(e) = self.cache.store_menu(&self.catalog.menu()) {
                warn!("Failed to cache menu: {}", e);
            }
        }
        if self.catalog.replace_inventory(inventory) {
            changed = true;
            if let Err(e) = self.cache.store_inventory(&self.catalog.inventory()) {
                warn!("Failed to cache inventory: {}", e);
            }
        }
        if self.catalog.replace_orders(orders) {
            changed = true;
            if let Err(e) = self.cache.store_orders(&self.catalog.orders()) {
                warn!("Failed to cache orders: {}", e);
            }
        }
        changed
    }

    /// Snapshot tier, then the built-in seed for whatever is missing
    fn load_snapshots_or_seed(&self) {
        let menu = self
            .cache
            .load_menu()
            .ok()
            .flatten()
            .unwrap_or_else(seed::initial_menu);
        let inventory = self
            .cache
            .load_inventory()
            .ok()
            .flatten()
            .unwrap_or_else(seed::initial_ingredients);
        let orders = self.cache.load_orders().ok().flatten().unwrap_or_default();
        self.install(menu, inventory, orders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LocalStore, SourceKind, StoreChange, TableProbe};
    use async_trait::async_trait;
    use shared::models::{
        IngredientCreate, IngredientUpdate, MenuItemCreate, MenuItemUpdate, OrderStatus,
    };
    use tokio::sync::broadcast;

    /// A store that is always down
    struct DeadStore {
        changes: broadcast::Sender<StoreChange>,
    }

    impl DeadStore {
        fn new() -> Self {
            let (changes, _) = broadcast::channel(1);
            Self { changes }
        }

        fn down<T>() -> StoreResult<T> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl DataSource for DeadStore {
        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }
        async fn fetch_menu(&self) -> StoreResult<Vec<MenuItem>> {
            Self::down()
        }
        async fn fetch_inventory(&self) -> StoreResult<Vec<Ingredient>> {
            Self::down()
        }
        async fn fetch_orders(&self, _limit: usize) -> StoreResult<Vec<Order>> {
            Self::down()
        }
        async fn insert_order(&self, _order: &Order) -> StoreResult<()> {
            Self::down()
        }
        async fn update_order_status(&self, _id: &str, _status: OrderStatus) -> StoreResult<()> {
            Self::down()
        }
        async fn update_ingredient_stock(&self, _id: &str, _stock: f64) -> StoreResult<()> {
            Self::down()
        }
        async fn create_ingredient(&self, _data: IngredientCreate) -> StoreResult<Ingredient> {
            Self::down()
        }
        async fn update_ingredient(
            &self,
            _id: &str,
            _data: IngredientUpdate,
        ) -> StoreResult<Ingredient> {
            Self::down()
        }
        async fn delete_ingredient(&self, _id: &str) -> StoreResult<()> {
            Self::down()
        }
        async fn create_menu_item(&self, _data: MenuItemCreate) -> StoreResult<MenuItem> {
            Self::down()
        }
        async fn update_menu_item(&self, _id: &str, _data: MenuItemUpdate) -> StoreResult<MenuItem> {
            Self::down()
        }
        async fn delete_menu_item(&self, _id: &str) -> StoreResult<()> {
            Self::down()
        }
        async fn probe(&self) -> Vec<TableProbe> {
            Vec::new()
        }
        fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
            self.changes.subscribe()
        }
    }

    fn service(source: Arc<dyn DataSource>, cache: SnapshotCache) -> (SyncService, Arc<Catalog>) {
        let catalog = Arc::new(Catalog::new());
        let sync = SyncService::new(
            source,
            catalog.clone(),
            Arc::new(cache),
            Duration::from_secs(30),
            Duration::from_secs(5),
        );
        (sync, catalog)
    }

    #[tokio::test]
    async fn test_cold_launch_syncs_and_sets_warm_flag() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        let (sync, catalog) = service(Arc::new(LocalStore::new_seeded()), cache);

        sync.warmup().await;
        assert_eq!(catalog.menu().len(), 9);
        assert_eq!(catalog.inventory().len(), 10);
        assert!(sync.cache.is_warm());
        assert!(sync.cache.load_menu().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_offline_launch_falls_back_to_snapshots() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        // Yesterday's snapshot has a price edit the seed does not
        let mut menu = seed::initial_menu();
        menu[0].price = 9999.0;
        cache.store_menu(&menu).unwrap();

        let (sync, catalog) = service(Arc::new(DeadStore::new()), cache);
        sync.warmup().await;

        assert_eq!(catalog.menu()[0].price, 9999.0);
        // Inventory had no snapshot, so the seed fills it in
        assert_eq!(catalog.inventory().len(), 10);
    }

    #[tokio::test]
    async fn test_offline_launch_with_empty_cache_seeds() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        let (sync, catalog) = service(Arc::new(DeadStore::new()), cache);
        sync.warmup().await;
        assert_eq!(catalog.menu().len(), 9);
        assert!(catalog.orders().is_empty());
    }

    #[tokio::test]
    async fn test_warm_launch_never_touches_the_store() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        cache.store_menu(&seed::initial_menu()).unwrap();
        cache.store_inventory(&seed::initial_ingredients()).unwrap();
        cache.set_warm(true).unwrap();

        // DeadStore would fail any fetch; warm launch must not care
        let (sync, catalog) = service(Arc::new(DeadStore::new()), cache);
        sync.warmup().await;
        assert_eq!(catalog.menu().len(), 9);
    }

    #[tokio::test]
    async fn test_refresh_reports_unchanged_data() {
        let cache = SnapshotCache::open_in_memory().unwrap();
        let (sync, _) = service(Arc::new(LocalStore::new_seeded()), cache);
        sync.warmup().await;
        assert!(!sync.refresh().await.unwrap());
    }
}
