//! Stock deduction planning
//!
//! Turns an order's lines into one consumption total per ingredient.
//! Summing first matters: two menu items sharing an ingredient must
//! produce a single deduction, otherwise the second write clobbers the
//! first when the store applies absolute stock values.

use std::collections::BTreeMap;

use tracing::warn;

use shared::models::{CartItem, Ingredient};

use crate::stock::resolve_stock;

/// Total consumption per ingredient id for the given order lines.
///
/// Ready-made lines consume one unit of their resolved stock row per
/// item sold; lines whose stock row cannot be resolved are skipped with
/// a warning (there is nothing to deduct from). Recipe lines consume
/// `quantity * line quantity` of each referenced ingredient.
pub fn build_deduction_map(
    items: &[CartItem],
    inventory: &[Ingredient],
) -> BTreeMap<String, f64> {
    let mut deductions: BTreeMap<String, f64> = BTreeMap::new();

    for line in items {
        if line.item.is_ready_made() {
            match resolve_stock(&line.item, inventory) {
                Some(ing) => {
                    *deductions.entry(ing.id.clone()).or_insert(0.0) += line.quantity as f64;
                }
                None => {
                    warn!(
                        "No stock row resolves for ready-made item '{}', skipping deduction",
                        line.item.name
                    );
                }
            }
        } else {
            for recipe_line in line.item.recipe() {
                *deductions.entry(recipe_line.ingredient_id.clone()).or_insert(0.0) +=
                    recipe_line.quantity * line.quantity as f64;
            }
        }
    }

    deductions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use shared::models::CartItem;

    fn line(id: &str, quantity: i64) -> CartItem {
        let item = seed::initial_menu().into_iter().find(|m| m.id == id).unwrap();
        let mut l = CartItem::new(item);
        l.quantity = quantity;
        l
    }

    #[test]
    fn test_recipe_lines_scale_by_quantity() {
        let inventory = seed::initial_ingredients();
        // 2 cheeseburgers: bun 2, patty 2, cheese 2, lettuce 40
        let map = build_deduction_map(&[line("m1", 2)], &inventory);
        assert_eq!(map["i1"], 2.0);
        assert_eq!(map["i2"], 2.0);
        assert_eq!(map["i3"], 2.0);
        assert_eq!(map["i4"], 40.0);
    }

    #[test]
    fn test_shared_ingredients_sum_into_one_deduction() {
        let inventory = seed::initial_ingredients();
        // Cheeseburger (1 patty) + Double Bacon (2 patties) share i1/i2/i3
        let map = build_deduction_map(&[line("m1", 1), line("m2", 1)], &inventory);
        assert_eq!(map["i1"], 2.0);
        assert_eq!(map["i2"], 3.0);
        assert_eq!(map["i3"], 3.0);
    }

    #[test]
    fn test_ready_made_deducts_resolved_row() {
        let inventory = seed::initial_ingredients();
        let map = build_deduction_map(&[line("m6", 3)], &inventory);
        assert_eq!(map["i7"], 3.0);
    }

    #[test]
    fn test_unresolvable_ready_made_is_skipped() {
        let map = build_deduction_map(&[line("m6", 1)], &[]);
        assert!(map.is_empty());
    }
}
