//! Ready-made stock resolution
//!
//! A ready-made menu item points at its inventory row by `stock_id`,
//! but ids drift when inventory rows are recreated in the store. The
//! resolver therefore falls back to name matching, with a small alias
//! table translating menu names whose inventory name differs
//! ("Coca-Cola" sells from "Coca-Cola Can").
//!
//! The alias table is deliberately private to this module. Nothing else
//! in the crate may know that names are ever compared.

use shared::models::{Ingredient, ItemSource, MenuItem};

/// Menu name -> inventory name, for known packaging mismatches
const NAME_ALIASES: &[(&str, &str)] = &[
    ("Coca-Cola", "Coca-Cola Can"),
    ("Sprite", "Sprite Can"),
    ("Mineral Water", "Mineral Water Bottle"),
    ("Orange Juice", "Orange Juice Box"),
];

/// Find the inventory row a ready-made item sells from.
///
/// Resolution order: `stock_id`, then name match with the alias table
/// consulted first, so a "Coca-Cola" menu item sells from the
/// "Coca-Cola Can" row even when an inventory row named "Coca-Cola"
/// also exists. Returns `None` for recipe items and for ready-made
/// items whose stock row cannot be found (callers treat that as
/// unavailable).
pub fn resolve_stock<'a>(item: &MenuItem, inventory: &'a [Ingredient]) -> Option<&'a Ingredient> {
    let stock_id = match &item.source {
        ItemSource::ReadyMade { stock_id } => stock_id,
        ItemSource::Recipe { .. } => return None,
    };

    if let Some(found) = inventory.iter().find(|i| &i.id == stock_id) {
        return Some(found);
    }

    let stock_name = NAME_ALIASES
        .iter()
        .find(|(menu_name, _)| *menu_name == item.name)
        .map(|(_, stock_name)| *stock_name)
        .unwrap_or(&item.name);
    inventory.iter().find(|i| i.name == stock_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use shared::models::ItemSource;

    fn coca_cola() -> MenuItem {
        seed::initial_menu()
            .into_iter()
            .find(|m| m.name == "Coca-Cola")
            .unwrap()
    }

    #[test]
    fn test_resolves_by_stock_id() {
        let inventory = seed::initial_ingredients();
        let resolved = resolve_stock(&coca_cola(), &inventory).unwrap();
        assert_eq!(resolved.id, "i7");
    }

    #[test]
    fn test_falls_back_to_alias_when_id_is_stale() {
        // Simulate a store where inventory rows were recreated with
        // fresh ids, orphaning the menu item's stock_id.
        let inventory: Vec<_> = seed::initial_ingredients()
            .into_iter()
            .map(|mut i| {
                i.id = format!("new-{}", i.id);
                i
            })
            .collect();
        let resolved = resolve_stock(&coca_cola(), &inventory).unwrap();
        assert_eq!(resolved.name, "Coca-Cola Can");
    }

    #[test]
    fn test_alias_wins_over_exact_menu_name() {
        // Inventory holding both a "Coca-Cola" row and the canonical
        // "Coca-Cola Can" row must resolve to the canonical one.
        let mut inventory: Vec<_> = seed::initial_ingredients()
            .into_iter()
            .map(|mut i| {
                i.id = format!("new-{}", i.id);
                i
            })
            .collect();
        let mut shadow = inventory
            .iter()
            .find(|i| i.name == "Coca-Cola Can")
            .unwrap()
            .clone();
        shadow.id = "shadow".to_string();
        shadow.name = "Coca-Cola".to_string();
        inventory.insert(0, shadow);

        let resolved = resolve_stock(&coca_cola(), &inventory).unwrap();
        assert_eq!(resolved.name, "Coca-Cola Can");
    }

    #[test]
    fn test_recipe_items_never_resolve() {
        let inventory = seed::initial_ingredients();
        let latte = seed::initial_menu()
            .into_iter()
            .find(|m| m.name == "Latte")
            .unwrap();
        assert!(resolve_stock(&latte, &inventory).is_none());
    }

    #[test]
    fn test_unresolvable_ready_made_is_none() {
        let item = MenuItem {
            source: ItemSource::ReadyMade {
                stock_id: "ghost".to_string(),
            },
            name: "Mystery Drink".to_string(),
            ..coca_cola()
        };
        assert!(resolve_stock(&item, &seed::initial_ingredients()).is_none());
    }
}
