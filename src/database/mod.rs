pub mod manager;
pub mod products;

pub use manager::{DatabaseError, DatabaseManager};
pub use products::ProductStore;
