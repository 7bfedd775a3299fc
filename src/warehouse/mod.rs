mod catalog;
mod connection;
mod models;
mod schema;

pub use catalog::SchemaCatalog;
pub use connection::{bootstrap_warehouse, open_warehouse};
pub use models::*;
pub use schema::{Entity, WAREHOUSE_SCHEMA};
