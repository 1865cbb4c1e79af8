//! Availability checks for ready-made items
//!
//! Fail closed: a ready-made item whose stock row cannot be resolved is
//! treated as sold out, never as unlimited.

use shared::models::{ActiveCart, Ingredient, MenuItem};

use super::resolver::resolve_stock;

/// How many more units of `item` the given cart can take.
///
/// `None` means unlimited (recipe items are not gated at add time).
/// Ready-made items return on-hand stock minus what the cart already
/// holds, floored at zero.
pub fn available_quantity(
    item: &MenuItem,
    inventory: &[Ingredient],
    cart: Option<&ActiveCart>,
) -> Option<i64> {
    if !item.is_ready_made() {
        return None;
    }
    let on_hand = resolve_stock(item, inventory)
        .map(|ing| ing.stock.floor() as i64)
        .unwrap_or(0);
    let in_cart = cart.map(|c| c.quantity_of(&item.id)).unwrap_or(0);
    Some((on_hand - in_cart).max(0))
}

/// Whether one more unit of `item` fits in the cart
pub fn can_add_one(item: &MenuItem, inventory: &[Ingredient], cart: Option<&ActiveCart>) -> bool {
    match available_quantity(item, inventory, cart) {
        None => true,
        Some(remaining) => remaining >= 1,
    }
}
