//! Checkout coordinator
//!
//! Drives the order placement flow: freeze the cart into an order,
//! persist it to the store, deduct stock, and update the local working
//! set. The store write is a saga, not a transaction, and stock
//! deductions are best effort: a failed deduction is logged and the
//! order stands. Money was taken at the counter; inventory drift is the
//! recoverable problem.

use std::sync::Arc;

use tracing::{error, info, warn};

use shared::Location;
use shared::models::{Order, OrderStatus, PaymentMethod, Voucher};
use shared::util::{now_rfc3339, order_code};

use crate::cart::{CartError, CartManager};
use crate::catalog::Catalog;
use crate::pricing::compute_totals;
use crate::store::{DataSource, SnapshotCache, StoreError};

use super::deduction::build_deduction_map;

/// Checkout errors
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Nothing to check out for {0}")]
    EmptyCart(Location),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Order placement service
pub struct CheckoutService {
    source: Arc<dyn DataSource>,
    catalog: Arc<Catalog>,
    cache: Arc<SnapshotCache>,
    carts: Arc<CartManager>,
    tax_rate: f64,
    cashier_name: String,
}

impl CheckoutService {
    pub fn new(
        source: Arc<dyn DataSource>,
        catalog: Arc<Catalog>,
        cache: Arc<SnapshotCache>,
        carts: Arc<CartManager>,
        tax_rate: f64,
        cashier_name: String,
    ) -> Self {
        Self {
            source,
            catalog,
            cache,
            carts,
            tax_rate,
            cashier_name,
        }
    }

    /// Finalize the cart at `location` into a completed order.
    ///
    /// The checkout succeeds from the till's point of view even when the
    /// store is unreachable; the order then exists locally and in the
    /// snapshot cache only.
    pub async fn checkout(
        &self,
        location: Location,
        payment_method: PaymentMethod,
        voucher: Option<Voucher>,
    ) -> Result<Order, CheckoutError> {
        let cart = self
            .carts
            .cart(location)
            .filter(|c| !c.items.is_empty())
            .ok_or(CheckoutError::EmptyCart(location))?;

        let now = now_rfc3339();
        let totals = compute_totals(&cart.items, voucher.as_ref(), self.tax_rate, &now);

        let mut order = Order {
            id: order_code(),
            items: cart.items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            payment_method,
            status: OrderStatus::Completed,
            created_at: now,
            cashier_name: self.cashier_name.clone(),
            location: Some(location),
            location_type: Some(location.location_type()),
        };

        self.persist_order(&mut order).await;
        self.apply_deductions(&order).await;

        self.catalog.push_order(order.clone());
        if let Err(e) = self.cache.store_orders(&self.catalog.orders()) {
            warn!("Failed to cache order history: {}", e);
        }

        self.carts.take(location);
        self.carts.release(location);

        info!(
            "🧾 Order {} completed at {}: {} items, total {}",
            order.id,
            location,
            order.items.len(),
            order.total
        );
        Ok(order)
    }

    /// Write the order to the store. A duplicate 6-digit code gets one
    /// regenerated retry; any other failure leaves the order local-only.
    async fn persist_order(&self, order: &mut Order) {
        match self.source.insert_order(order).await {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                order.id = order_code();
                warn!("Order code collision, retrying as {}", order.id);
                if let Err(e) = self.source.insert_order(order).await {
                    error!("Failed to persist order {}: {}", order.id, e);
                }
            }
            Err(e) => {
                error!("Failed to persist order {}: {}", order.id, e);
            }
        }
    }

    /// Apply each ingredient deduction independently. One failed write
    /// never blocks the others and nothing is rolled back.
    async fn apply_deductions(&self, order: &Order) {
        let inventory = self.catalog.inventory();
        let deductions = build_deduction_map(&order.items, &inventory);

        for (ingredient_id, consumed) in deductions {
            let Some(current) = inventory.iter().find(|i| i.id == ingredient_id) else {
                warn!("Deduction for unknown ingredient {}", ingredient_id);
                continue;
            };
            // Stock never goes negative, whatever the order claims
            let new_stock = (current.stock - consumed).max(0.0);

            if let Err(e) = self
                .source
                .update_ingredient_stock(&ingredient_id, new_stock)
                .await
            {
                error!(
                    "Failed to deduct {} (-{}) in the store: {}",
                    ingredient_id, consumed, e
                );
            }
            self.catalog.apply_stock(&ingredient_id, new_stock);
        }

        if let Err(e) = self.cache.store_inventory(&self.catalog.inventory()) {
            warn!("Failed to cache inventory after deduction: {}", e);
        }
    }
}
