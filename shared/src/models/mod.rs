//! Domain models
//!
//! Serde entities shared between the server, the store layer and the
//! diagnostic binaries. Create/Update payload structs accompany the
//! entities that are managed over the HTTP API.

mod ingredient;
mod menu_item;
mod order;
mod report;
mod voucher;

pub use ingredient::{Ingredient, IngredientCreate, IngredientUpdate};
pub use menu_item::{ItemSource, MenuItem, MenuItemCreate, MenuItemUpdate, RecipeLine};
pub use order::{ActiveCart, CartItem, Order, OrderStatus, PaymentMethod};
pub use report::SalesReport;
pub use voucher::{Voucher, VoucherType};
