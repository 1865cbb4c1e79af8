//! Built-in seed data
//!
//! The demo data set the till falls back to when it launches with no
//! reachable store and no cached snapshot. The `seed-store` binary also
//! uses it to populate an empty hosted store. Prices and costs are in
//! Kyat.

use shared::models::{Ingredient, ItemSource, MenuItem, RecipeLine};

fn ingredient(
    id: &str,
    name: &str,
    unit: &str,
    stock: f64,
    min_stock_level: f64,
    cost_per_unit: f64,
) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        stock,
        min_stock_level,
        cost_per_unit,
    }
}

fn line(ingredient_id: &str, quantity: f64) -> RecipeLine {
    RecipeLine {
        ingredient_id: ingredient_id.to_string(),
        quantity,
    }
}

fn recipe_item(
    id: &str,
    name: &str,
    category: &str,
    price: f64,
    cost: f64,
    description: &str,
    lines: Vec<RecipeLine>,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        cost,
        description: Some(description.to_string()),
        source: ItemSource::Recipe { lines },
    }
}

fn ready_made(
    id: &str,
    name: &str,
    price: f64,
    cost: f64,
    description: &str,
    stock_id: &str,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        category: "Drinks".to_string(),
        price,
        cost,
        description: Some(description.to_string()),
        source: ItemSource::ReadyMade {
            stock_id: stock_id.to_string(),
        },
    }
}

pub fn initial_ingredients() -> Vec<Ingredient> {
    vec![
        ingredient("i1", "Burger Bun", "pcs", 100.0, 20.0, 500.0),
        ingredient("i2", "Beef Patty", "pcs", 80.0, 20.0, 1500.0),
        ingredient("i3", "Cheese Slice", "pcs", 200.0, 50.0, 200.0),
        ingredient("i4", "Lettuce", "g", 5000.0, 1000.0, 10.0),
        ingredient("i5", "Coffee Beans", "g", 2000.0, 500.0, 50.0),
        ingredient("i6", "Milk", "ml", 10000.0, 2000.0, 2.0),
        // Ready-made drinks inventory
        ingredient("i7", "Coca-Cola Can", "cans", 50.0, 10.0, 800.0),
        ingredient("i8", "Sprite Can", "cans", 50.0, 10.0, 800.0),
        ingredient("i9", "Mineral Water Bottle", "bottles", 100.0, 20.0, 500.0),
        ingredient("i10", "Orange Juice Box", "boxes", 30.0, 5.0, 1200.0),
    ]
}

pub fn initial_menu() -> Vec<MenuItem> {
    vec![
        recipe_item(
            "m1",
            "Classic Cheeseburger",
            "Food",
            9000.0,
            3500.0,
            "Juicy beef patty with cheddar cheese.",
            vec![line("i1", 1.0), line("i2", 1.0), line("i3", 1.0), line("i4", 20.0)],
        ),
        recipe_item(
            "m2",
            "Double Bacon Burger",
            "Food",
            13000.0,
            5500.0,
            "Double patty, crispy bacon.",
            vec![line("i1", 1.0), line("i2", 2.0), line("i3", 2.0)],
        ),
        recipe_item(
            "m3",
            "Latte",
            "Drinks",
            4500.0,
            1200.0,
            "Steamed milk with espresso.",
            vec![line("i5", 18.0), line("i6", 200.0)],
        ),
        recipe_item(
            "m4",
            "Cappuccino",
            "Drinks",
            4500.0,
            1200.0,
            "Espresso with frothy milk.",
            vec![line("i5", 18.0), line("i6", 150.0)],
        ),
        recipe_item(
            "m5",
            "Caesar Salad",
            "Food",
            9500.0,
            2500.0,
            "Fresh romaine with croutons.",
            vec![line("i4", 150.0)],
        ),
        // Ready-made drinks sold straight from stock
        ready_made("m6", "Coca-Cola", 1500.0, 800.0, "Chilled Coca-Cola can.", "i7"),
        ready_made("m7", "Sprite", 1500.0, 800.0, "Chilled Sprite can.", "i8"),
        ready_made("m8", "Mineral Water", 1000.0, 500.0, "Pure mineral water bottle.", "i9"),
        ready_made("m9", "Orange Juice", 2500.0, 1200.0, "Fresh orange juice box.", "i10"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_recipes_reference_seed_ingredients() {
        let ingredients = initial_ingredients();
        for item in initial_menu() {
            for l in item.recipe() {
                assert!(
                    ingredients.iter().any(|i| i.id == l.ingredient_id),
                    "{} references unknown ingredient {}",
                    item.name,
                    l.ingredient_id
                );
            }
            if let ItemSource::ReadyMade { stock_id } = &item.source {
                assert!(ingredients.iter().any(|i| &i.id == stock_id));
            }
        }
    }
}
