pub mod orders;
pub mod products;

pub use orders::{Order, OrderDetail, OrderRecord};
pub use products::Product;
