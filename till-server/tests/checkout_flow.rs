//! End-to-end flow tests against the seeded local store: launch, cart
//! building, checkout with stock deduction, and relaunch from the
//! snapshot cache.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use shared::Location;
use shared::models::{MenuItemUpdate, OrderStatus, PaymentMethod};
use till_server::cart::CartManager;
use till_server::catalog::Catalog;
use till_server::checkout::CheckoutService;
use till_server::store::{DataSource, LocalStore, SnapshotCache};
use till_server::sync::SyncService;

struct Till {
    _dir: Option<TempDir>,
    source: Arc<LocalStore>,
    catalog: Arc<Catalog>,
    cache: Arc<SnapshotCache>,
    carts: Arc<CartManager>,
    checkout: Arc<CheckoutService>,
    sync: SyncService,
}

impl Till {
    async fn launch() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut till =
            Self::launch_at(dir.path(), Arc::new(LocalStore::new_seeded())).await;
        till._dir = Some(dir);
        till
    }

    /// Launch against an existing cache directory; the caller owns it
    async fn launch_at(dir: &std::path::Path, source: Arc<LocalStore>) -> Self {
        let cache = Arc::new(SnapshotCache::open(dir.join("cache.redb")).unwrap());
        let catalog = Arc::new(Catalog::new());
        let carts = Arc::new(CartManager::new());
        let checkout = Arc::new(CheckoutService::new(
            source.clone(),
            catalog.clone(),
            cache.clone(),
            carts.clone(),
            0.0,
            "Admin".to_string(),
        ));
        let sync = SyncService::new(
            source.clone(),
            catalog.clone(),
            cache.clone(),
            Duration::from_secs(30),
            Duration::from_secs(5),
        );
        sync.warmup().await;
        Till {
            _dir: None,
            source,
            catalog,
            cache,
            carts,
            checkout,
            sync,
        }
    }

    fn add(&self, location: Location, menu_item_id: &str) {
        let item = self.catalog.menu_item(menu_item_id).unwrap();
        self.carts
            .add_item(location, item, &self.catalog.inventory())
            .unwrap();
    }

    fn stock(&self, ingredient_id: &str) -> f64 {
        self.catalog
            .inventory()
            .into_iter()
            .find(|i| i.id == ingredient_id)
            .unwrap()
            .stock
    }
}

#[tokio::test]
async fn checkout_deducts_recipes_and_ready_made_stock() {
    let till = Till::launch().await;
    let loc = Location::Table(3);

    // 2 cheeseburgers and a Coca-Cola
    till.add(loc, "m1");
    till.add(loc, "m1");
    till.add(loc, "m6");

    let order = till
        .checkout
        .checkout(loc, PaymentMethod::Cash, None)
        .await
        .unwrap();

    assert_eq!(order.total, 19500.0);
    assert_eq!(order.subtotal, 19500.0);
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.location, Some(loc));

    // Recipe deductions: bun/patty/cheese -2, lettuce -40
    assert_eq!(till.stock("i1"), 98.0);
    assert_eq!(till.stock("i2"), 78.0);
    assert_eq!(till.stock("i3"), 198.0);
    assert_eq!(till.stock("i4"), 4960.0);
    // Ready-made: one can gone
    assert_eq!(till.stock("i7"), 49.0);

    // Cart is gone, order is in history and in the store
    assert!(till.carts.cart(loc).is_none());
    assert_eq!(till.catalog.orders().len(), 1);
    assert_eq!(till.source.fetch_orders(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn ready_made_items_cannot_oversell() {
    let till = Till::launch().await;
    let loc = Location::Parcel(1);

    // All 50 cans fit, the 51st does not
    for _ in 0..50 {
        till.add(loc, "m6");
    }
    let cola = till.catalog.menu_item("m6").unwrap();
    let err = till
        .carts
        .add_item(loc, cola, &till.catalog.inventory())
        .unwrap_err();
    assert!(matches!(
        err,
        till_server::cart::CartError::OutOfStock { available: 0, .. }
    ));
}

#[tokio::test]
async fn locations_check_out_independently() {
    let till = Till::launch().await;
    let table = Location::Table(1);
    let parcel = Location::Parcel(2);

    till.add(table, "m1");
    till.add(parcel, "m3");
    till.add(parcel, "m3");

    till.checkout
        .checkout(table, PaymentMethod::Cash, None)
        .await
        .unwrap();

    // The parcel cart is untouched
    let cart = till.carts.cart(parcel).unwrap();
    assert_eq!(cart.item_count(), 2);

    // Only the burger's ingredients moved; coffee is still full
    assert_eq!(till.stock("i5"), 2000.0);
    assert_eq!(till.stock("i1"), 99.0);
}

#[tokio::test]
async fn cart_lines_keep_their_price_when_the_menu_changes() {
    let till = Till::launch().await;
    let loc = Location::Table(2);
    till.add(loc, "m1");

    // Price hike lands between add and checkout
    till.source
        .update_menu_item(
            "m1",
            MenuItemUpdate {
                price: Some(12000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    till.sync.refresh().await.unwrap();
    assert_eq!(till.catalog.menu_item("m1").unwrap().price, 12000.0);

    let order = till
        .checkout
        .checkout(loc, PaymentMethod::KbzPay, None)
        .await
        .unwrap();
    assert_eq!(order.total, 9000.0);
    assert_eq!(order.items[0].item.price, 9000.0);
}

#[tokio::test]
async fn deductions_never_drive_stock_negative() {
    let till = Till::launch().await;
    let loc = Location::Table(4);

    // Two salads need 300g lettuce; leave only 100g
    till.source.update_ingredient_stock("i4", 100.0).await.unwrap();
    till.sync.refresh().await.unwrap();

    till.add(loc, "m5");
    till.add(loc, "m5");
    till.checkout
        .checkout(loc, PaymentMethod::Cash, None)
        .await
        .unwrap();

    assert_eq!(till.stock("i4"), 0.0);
}

#[tokio::test]
async fn relaunch_serves_cached_data_without_the_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let first = Till::launch_at(dir.path(), Arc::new(LocalStore::new_seeded())).await;
        let loc = Location::Table(1);
        first.add(loc, "m6");
        first
            .checkout
            .checkout(loc, PaymentMethod::Cash, None)
            .await
            .unwrap();
        assert!(first.cache.is_warm());
        // Dropping the till closes its cache handle
    }

    // Relaunch on the same cache against a store with nothing in it;
    // the warm path must serve yesterday's snapshots untouched
    let second = Till::launch_at(dir.path(), Arc::new(LocalStore::empty())).await;

    assert_eq!(second.catalog.menu().len(), 9);
    assert_eq!(second.stock("i7"), 49.0);
    assert_eq!(second.catalog.orders().len(), 1);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let till = Till::launch().await;
    let err = till
        .checkout
        .checkout(Location::Table(9), PaymentMethod::Cash, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        till_server::checkout::CheckoutError::EmptyCart(_)
    ));
}
