pub mod grocery;
pub mod stock;

pub use grocery::grocery_list;
pub use stock::{expiring_items, inventory_by_location, StockItem};
