mod table;

pub use table::{Column, OnConflict, Schema, SqlType, Table, BASE_DB_VERSION};
