//! Remote store binding
//!
//! Talks to the hosted relational store over its PostgREST surface.
//! Five tables: `ingredients`, `menu_items`, `menu_item_ingredients`,
//! `orders`, `order_items`. The store holds no transactional RPC for
//! order placement, so [`RemoteStore::insert_order`] writes the header
//! first and compensates with a delete if the line insert fails.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast;
use tracing::warn;

use shared::models::{
    Ingredient, IngredientCreate, IngredientUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
    Order, OrderStatus, PaymentMethod,
};
use shared::models::{CartItem, ItemSource, RecipeLine};
use shared::{Location, LocationType};

use super::source::{
    DataSource, SourceKind, StoreChange, StoreError, StoreResult, TableProbe,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const STORE_TABLES: [&str; 5] = [
    "ingredients",
    "menu_items",
    "menu_item_ingredients",
    "orders",
    "order_items",
];

/// PostgREST-backed store client
pub struct RemoteStore {
    base: String,
    api_key: String,
    client: reqwest::Client,
    changes: broadcast::Sender<StoreChange>,
}

// ========== Table row shapes ==========

#[derive(Debug, Serialize, Deserialize)]
struct MenuItemRow {
    id: String,
    name: String,
    category: String,
    price: f64,
    #[serde(default)]
    cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    is_ready_made: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ready_made_stock_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecipeRow {
    menu_item_id: String,
    ingredient_id: String,
    quantity: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderRow {
    id: String,
    subtotal: f64,
    tax: f64,
    discount: f64,
    total: f64,
    payment_method: PaymentMethod,
    status: OrderStatus,
    cashier_name: String,
    created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location_type: Option<LocationType>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderItemRow {
    order_id: String,
    menu_item_id: String,
    quantity: i64,
    price_each: f64,
}

impl MenuItemRow {
    fn into_item(self, recipe: Vec<RecipeLine>) -> MenuItem {
        let source = if self.is_ready_made {
            ItemSource::ReadyMade {
                stock_id: self.ready_made_stock_id.unwrap_or_default(),
            }
        } else {
            ItemSource::Recipe { lines: recipe }
        };
        MenuItem {
            id: self.id,
            name: self.name,
            category: self.category,
            price: self.price,
            cost: self.cost,
            description: self.description,
            source,
        }
    }

    fn from_item(item: &MenuItem) -> Self {
        let (is_ready_made, ready_made_stock_id) = match &item.source {
            ItemSource::ReadyMade { stock_id } => (true, Some(stock_id.clone())),
            ItemSource::Recipe { .. } => (false, None),
        };
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            cost: item.cost,
            description: item.description.clone(),
            is_ready_made,
            ready_made_stock_id,
        }
    }
}

impl RemoteStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            changes,
        }
    }

    // The junction and line tables have no id column, so the probe
    // selects whole rows rather than an id.
    fn probe_path(table: &str) -> String {
        format!("{table}?select=*&limit=1")
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
    }

    async fn check(resp: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(message)),
            StatusCode::CONFLICT => Err(StoreError::Conflict(message)),
            _ => Err(StoreError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn get_rows<T: serde::de::DeserializeOwned>(&self, path: &str) -> StoreResult<Vec<T>> {
        let resp = self.request(Method::GET, path).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    fn notify(&self, change: StoreChange) {
        let _ = self.changes.send(change);
    }

    async fn fetch_recipe_rows(&self, menu_item_id: Option<&str>) -> StoreResult<Vec<RecipeRow>> {
        let path = match menu_item_id {
            Some(id) => format!("menu_item_ingredients?select=*&menu_item_id=eq.{id}"),
            None => "menu_item_ingredients?select=*".to_string(),
        };
        self.get_rows(&path).await
    }

    async fn fetch_menu_item(&self, id: &str) -> StoreResult<MenuItem> {
        let rows: Vec<MenuItemRow> = self
            .get_rows(&format!("menu_items?select=*&id=eq.{id}"))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("menu item {id}")))?;
        let recipe = self
            .fetch_recipe_rows(Some(id))
            .await?
            .into_iter()
            .map(|r| RecipeLine {
                ingredient_id: r.ingredient_id,
                quantity: r.quantity,
            })
            .collect();
        Ok(row.into_item(recipe))
    }

    async fn insert_recipe_rows(&self, menu_item_id: &str, lines: &[RecipeLine]) -> StoreResult<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let rows: Vec<RecipeRow> = lines
            .iter()
            .map(|l| RecipeRow {
                menu_item_id: menu_item_id.to_string(),
                ingredient_id: l.ingredient_id.clone(),
                quantity: l.quantity,
            })
            .collect();
        let resp = self
            .request(Method::POST, "menu_item_ingredients")
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete_rows(&self, path: &str) -> StoreResult<()> {
        let resp = self.request(Method::DELETE, path).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// PATCH with only the set fields, returning the updated row
    async fn patch_one<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> StoreResult<T> {
        let resp = self
            .request(Method::PATCH, path)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = Self::check(resp).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}

/// Drop the `Null` entries so a partial update never nulls columns
fn compact(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        ),
        other => other,
    }
}

#[async_trait]
impl DataSource for RemoteStore {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn fetch_menu(&self) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = self.get_rows("menu_items?select=*&order=id").await?;
        let recipe_rows = self.fetch_recipe_rows(None).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let recipe = recipe_rows
                    .iter()
                    .filter(|r| r.menu_item_id == row.id)
                    .map(|r| RecipeLine {
                        ingredient_id: r.ingredient_id.clone(),
                        quantity: r.quantity,
                    })
                    .collect();
                row.into_item(recipe)
            })
            .collect())
    }

    async fn fetch_inventory(&self) -> StoreResult<Vec<Ingredient>> {
        self.get_rows("ingredients?select=*&order=id").await
    }

    async fn fetch_orders(&self, limit: usize) -> StoreResult<Vec<Order>> {
        let headers: Vec<OrderRow> = self
            .get_rows(&format!(
                "orders?select=*&order=created_at.desc&limit={limit}"
            ))
            .await?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = headers.iter().map(|h| h.id.as_str()).collect();
        let lines: Vec<OrderItemRow> = self
            .get_rows(&format!(
                "order_items?select=*&order_id=in.({})",
                ids.join(",")
            ))
            .await?;
        let menu_rows: Vec<MenuItemRow> = self.get_rows("menu_items?select=*").await?;

        Ok(headers
            .into_iter()
            .map(|h| {
                let items = lines
                    .iter()
                    .filter(|l| l.order_id == h.id)
                    .map(|l| {
                        // Rebuild a minimal snapshot from the line row;
                        // price_each preserves the price at sale time.
                        let item = menu_rows
                            .iter()
                            .find(|m| m.id == l.menu_item_id)
                            .map(|m| MenuItem {
                                id: m.id.clone(),
                                name: m.name.clone(),
                                category: m.category.clone(),
                                price: l.price_each,
                                cost: m.cost,
                                description: None,
                                source: ItemSource::Recipe { lines: Vec::new() },
                            })
                            .unwrap_or_else(|| MenuItem {
                                id: l.menu_item_id.clone(),
                                name: l.menu_item_id.clone(),
                                category: String::new(),
                                price: l.price_each,
                                cost: 0.0,
                                description: None,
                                source: ItemSource::Recipe { lines: Vec::new() },
                            });
                        CartItem {
                            item,
                            quantity: l.quantity,
                            notes: None,
                        }
                    })
                    .collect();
                Order {
                    id: h.id,
                    items,
                    subtotal: h.subtotal,
                    tax: h.tax,
                    discount: h.discount,
                    total: h.total,
                    payment_method: h.payment_method,
                    status: h.status,
                    created_at: h.created_at,
                    cashier_name: h.cashier_name,
                    location: h.location,
                    location_type: h.location_type,
                }
            })
            .collect())
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        let header = OrderRow {
            id: order.id.clone(),
            subtotal: order.subtotal,
            tax: order.tax,
            discount: order.discount,
            total: order.total,
            payment_method: order.payment_method,
            status: order.status,
            cashier_name: order.cashier_name.clone(),
            created_at: order.created_at.clone(),
            location: order.location,
            location_type: order.location_type,
        };
        let resp = self
            .request(Method::POST, "orders")
            .header("Prefer", "return=minimal")
            .json(&[header])
            .send()
            .await?;
        Self::check(resp).await?;

        let lines: Vec<OrderItemRow> = order
            .items
            .iter()
            .map(|ci| OrderItemRow {
                order_id: order.id.clone(),
                menu_item_id: ci.item.id.clone(),
                quantity: ci.quantity,
                price_each: ci.item.price,
            })
            .collect();
        let resp = self
            .request(Method::POST, "order_items")
            .header("Prefer", "return=minimal")
            .json(&lines)
            .send()
            .await?;
        if let Err(e) = Self::check(resp).await {
            // Compensate: never leave a header without its lines
            if let Err(del) = self.delete_rows(&format!("orders?id=eq.{}", order.id)).await {
                warn!("Failed to roll back order header {}: {}", order.id, del);
            }
            return Err(e);
        }

        self.notify(StoreChange::Orders);
        Ok(())
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<()> {
        let _: OrderRow = self
            .patch_one(&format!("orders?id=eq.{id}"), &json!({ "status": status }))
            .await?;
        self.notify(StoreChange::Orders);
        Ok(())
    }

    async fn update_ingredient_stock(&self, id: &str, stock: f64) -> StoreResult<()> {
        let _: Ingredient = self
            .patch_one(&format!("ingredients?id=eq.{id}"), &json!({ "stock": stock }))
            .await?;
        self.notify(StoreChange::Ingredients);
        Ok(())
    }

    async fn create_ingredient(&self, data: IngredientCreate) -> StoreResult<Ingredient> {
        let row = Ingredient {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            unit: data.unit,
            stock: data.stock,
            min_stock_level: data.min_stock_level.unwrap_or(0.0),
            cost_per_unit: data.cost_per_unit.unwrap_or(0.0),
        };
        let resp = self
            .request(Method::POST, "ingredients")
            .header("Prefer", "return=representation")
            .json(&[&row])
            .send()
            .await?;
        let mut rows: Vec<Ingredient> = Self::check(resp).await?.json().await?;
        let created = rows
            .pop()
            .ok_or_else(|| StoreError::NotFound("created ingredient".to_string()))?;
        self.notify(StoreChange::Ingredients);
        Ok(created)
    }

    async fn update_ingredient(&self, id: &str, data: IngredientUpdate) -> StoreResult<Ingredient> {
        let body = compact(serde_json::to_value(&data)?);
        let updated = self
            .patch_one(&format!("ingredients?id=eq.{id}"), &body)
            .await?;
        self.notify(StoreChange::Ingredients);
        Ok(updated)
    }

    async fn delete_ingredient(&self, id: &str) -> StoreResult<()> {
        self.delete_rows(&format!("ingredients?id=eq.{id}")).await?;
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
        let row = MenuItemRow::from_item(&item);
        let resp = self
            .request(Method::POST, "menu_items")
            .header("Prefer", "return=minimal")
            .json(&[&row])
            .send()
            .await?;
        Self::check(resp).await?;

        if let Err(e) = self.insert_recipe_rows(&item.id, item.recipe()).await {
            if let Err(del) = self
                .delete_rows(&format!("menu_items?id=eq.{}", item.id))
                .await
            {
                warn!("Failed to roll back menu item {}: {}", item.id, del);
            }
            return Err(e);
        }

        self.notify(StoreChange::MenuItems);
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, data: MenuItemUpdate) -> StoreResult<MenuItem> {
        let mut body = json!({
            "name": data.name,
            "category": data.category,
            "price": data.price,
            "cost": data.cost,
            "description": data.description,
        });
        if let Some(source) = &data.source {
            let (ready, stock_id) = match source {
                ItemSource::ReadyMade { stock_id } => (true, Some(stock_id.clone())),
                ItemSource::Recipe { .. } => (false, None),
            };
            body["is_ready_made"] = json!(ready);
            body["ready_made_stock_id"] = json!(stock_id);
        }
        let body = compact(body);
        if let Some(obj) = body.as_object()
            && !obj.is_empty()
        {
            let _: MenuItemRow = self.patch_one(&format!("menu_items?id=eq.{id}"), &body).await?;
        }

        if let Some(source) = data.source {
            self.delete_rows(&format!("menu_item_ingredients?menu_item_id=eq.{id}"))
                .await?;
            if let ItemSource::Recipe { lines } = &source {
                self.insert_recipe_rows(id, lines).await?;
            }
        }

        let updated = self.fetch_menu_item(id).await?;
        self.notify(StoreChange::MenuItems);
        Ok(updated)
    }

    async fn delete_menu_item(&self, id: &str) -> StoreResult<()> {
        self.delete_rows(&format!("menu_item_ingredients?menu_item_id=eq.{id}"))
            .await?;
        self.delete_rows(&format!("menu_items?id=eq.{id}")).await?;
        self.notify(StoreChange::MenuItems);
        Ok(())
    }

    async fn probe(&self) -> Vec<TableProbe> {
        let mut probes = Vec::with_capacity(STORE_TABLES.len());
        for table in STORE_TABLES {
            let started = Instant::now();
            let result = self
                .request(Method::GET, &Self::probe_path(table))
                .header("Prefer", "count=exact")
                .send()
                .await;
            let latency_ms = started.elapsed().as_millis() as u64;
            let probe = match result {
                Ok(resp) if resp.status().is_success() => {
                    let rows = resp
                        .headers()
                        .get("content-range")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.rsplit('/').next())
                        .and_then(|n| n.parse().ok());
                    TableProbe {
                        table: table.to_string(),
                        ok: true,
                        rows,
                        latency_ms,
                        error: None,
                    }
                }
                Ok(resp) => TableProbe {
                    table: table.to_string(),
                    ok: false,
                    rows: None,
                    latency_ms,
                    error: Some(format!("HTTP {}", resp.status())),
                },
                Err(e) => TableProbe {
                    table: table.to_string(),
                    ok: false,
                    rows: None,
                    latency_ms,
                    error: Some(e.to_string()),
                },
            };
            probes.push(probe);
        }
        probes
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_never_selects_an_id_column() {
        // menu_item_ingredients and order_items have no id column
        for table in STORE_TABLES {
            let path = RemoteStore::probe_path(table);
            assert!(path.contains("select=*"), "{path}");
            assert!(!path.contains("select=id"), "{path}");
        }
    }
}
