//! Sparkify ETL Library
//!
//! Loads the raw song metadata and user activity logs into a SQLite star
//! schema. The binaries are thin wrappers around these modules.

pub mod cli;
pub mod config;
pub mod etl;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use etl::{process_data, EtlError, FileOrder, LoadStats, RecordKind};
pub use warehouse::{bootstrap_warehouse, open_warehouse, SchemaCatalog};
