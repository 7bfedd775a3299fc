//! Opening the warehouse database file.

use super::catalog::SchemaCatalog;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::info;

/// Open an existing, already bootstrapped warehouse. The file is never
/// created here; a missing file is reported as an error.
pub fn open_warehouse(db_path: &Path, catalog: &SchemaCatalog) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| {
        format!(
            "Failed to open warehouse database {:?}, run create-tables first",
            db_path
        )
    })?;

    catalog.validate(&conn)?;
    info!("Opened warehouse database {:?}", db_path);
    Ok(conn)
}

/// Drop and recreate every warehouse table, creating the database file if
/// needed. With `recreate_database` the existing file is deleted first.
pub fn bootstrap_warehouse(
    db_path: &Path,
    catalog: &SchemaCatalog,
    recreate_database: bool,
) -> Result<Connection> {
    if recreate_database && db_path.exists() {
        std::fs::remove_file(db_path)
            .with_context(|| format!("Failed to delete database file {:?}", db_path))?;
        info!("Deleted database file {:?}", db_path);
    }

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to create warehouse database {:?}", db_path))?;

    catalog.drop_all(&conn)?;
    catalog.create_all(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::Entity;
    use tempfile::TempDir;

    #[test]
    fn open_requires_an_existing_file() {
        let dir = TempDir::new().unwrap();
        let catalog = SchemaCatalog::new();
        let err = open_warehouse(&dir.path().join("sparkify.db"), &catalog).unwrap_err();
        assert!(format!("{:#}", err).contains("run create-tables first"));
        assert!(!dir.path().join("sparkify.db").exists());
    }

    #[test]
    fn open_rejects_a_database_without_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparkify.db");
        Connection::open(&path).unwrap();

        let catalog = SchemaCatalog::new();
        let err = open_warehouse(&path, &catalog).unwrap_err();
        assert!(format!("{:#}", err).contains("run create-tables first"));
    }

    #[test]
    fn bootstrap_then_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparkify.db");
        let catalog = SchemaCatalog::new();

        drop(bootstrap_warehouse(&path, &catalog, false).unwrap());
        let conn = open_warehouse(&path, &catalog).unwrap();
        for entity in Entity::ALL {
            assert_eq!(catalog.count_rows(&conn, entity).unwrap(), 0);
        }
    }

    #[test]
    fn bootstrap_clears_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparkify.db");
        let catalog = SchemaCatalog::new();

        let conn = bootstrap_warehouse(&path, &catalog, false).unwrap();
        conn.execute(
            "INSERT INTO users (user_id, level) VALUES ('U1', 'free')",
            [],
        )
        .unwrap();
        drop(conn);

        let conn = bootstrap_warehouse(&path, &catalog, false).unwrap();
        assert_eq!(catalog.count_rows(&conn, Entity::User).unwrap(), 0);
    }

    #[test]
    fn recreate_deletes_unrelated_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparkify.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE leftovers (id INTEGER)", []).unwrap();
        drop(conn);

        let catalog = SchemaCatalog::new();
        let conn = bootstrap_warehouse(&path, &catalog, true).unwrap();
        let leftovers: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'leftovers'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(leftovers, 0);
    }
}
