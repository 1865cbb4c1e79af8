//! Stock resolution and availability
//!
//! Maps ready-made menu items to the inventory row that tracks them and
//! answers "how many more can this cart take".

pub mod availability;
pub mod resolver;

pub use availability::{available_quantity, can_add_one};
pub use resolver::resolve_stock;
