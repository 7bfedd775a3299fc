//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestWarehouse, SONG_A_JSON};
//!
//! #[test]
//! fn test_load_song() {
//!     let warehouse = TestWarehouse::new();
//!     warehouse.write_song("A/A/A/song_a.json", SONG_A_JSON);
//!     let stats = warehouse.run_etl().unwrap();
//!     assert_eq!(stats.songs_inserted, 1);
//! }
//! ```

#![allow(dead_code)]

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::TestWarehouse;
