//! Seed an empty hosted store with the built-in demo data set.
//!
//! Idempotent: refuses to touch a store that already has ingredients,
//! unless `--force` is passed (which appends, never deletes).
//!
//! ```text
//! STORE_URL=... STORE_API_KEY=... cargo run --bin seed-store
//! ```

use std::collections::HashMap;

use anyhow::{Context, bail};

use shared::models::{IngredientCreate, ItemSource, MenuItemCreate, RecipeLine};
use till_server::seed;
use till_server::store::{DataSource, RemoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    till_server::init_logger();

    let url = std::env::var("STORE_URL").context("STORE_URL must be set")?;
    let key = std::env::var("STORE_API_KEY").context("STORE_API_KEY must be set")?;
    let force = std::env::args().any(|a| a == "--force");

    let store = RemoteStore::new(&url, &key);

    let existing = store
        .fetch_inventory()
        .await
        .context("fetching current inventory")?;
    if !existing.is_empty() && !force {
        bail!(
            "Store already has {} ingredients; pass --force to seed anyway",
            existing.len()
        );
    }

    // Ingredients first; menu recipes reference their created ids
    let mut id_map: HashMap<String, String> = HashMap::new();
    for ing in seed::initial_ingredients() {
        let created = store
            .create_ingredient(IngredientCreate {
                name: ing.name.clone(),
                unit: ing.unit,
                stock: ing.stock,
                min_stock_level: Some(ing.min_stock_level),
                cost_per_unit: Some(ing.cost_per_unit),
            })
            .await
            .with_context(|| format!("creating ingredient '{}'", ing.name))?;
        println!("  + ingredient {} ({})", created.name, created.id);
        id_map.insert(ing.id, created.id);
    }

    for item in seed::initial_menu() {
        let source = match item.source {
            ItemSource::Recipe { lines } => ItemSource::Recipe {
                lines: lines
                    .into_iter()
                    .map(|l| RecipeLine {
                        ingredient_id: id_map
                            .get(&l.ingredient_id)
                            .cloned()
                            .unwrap_or(l.ingredient_id),
                        quantity: l.quantity,
                    })
                    .collect(),
            },
            ItemSource::ReadyMade { stock_id } => ItemSource::ReadyMade {
                stock_id: id_map.get(&stock_id).cloned().unwrap_or(stock_id),
            },
        };
        let created = store
            .create_menu_item(MenuItemCreate {
                name: item.name.clone(),
                category: item.category,
                price: item.price,
                cost: Some(item.cost),
                description: item.description,
                source,
            })
            .await
            .with_context(|| format!("creating menu item '{}'", item.name))?;
        println!("  + menu item {} ({})", created.name, created.id);
    }

    println!("Done. Seeded {} ingredients and 9 menu items.", id_map.len());
    Ok(())
}
