//! Test fixture creation for the warehouse and its input directories

use anyhow::Result;
use rusqlite::Connection;
use sparkify_etl::etl::{process_data, FileOrder, LoadStats, RecordKind};
use sparkify_etl::warehouse::{bootstrap_warehouse, open_warehouse, Entity, SchemaCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A bootstrapped warehouse file plus empty song and log data directories,
/// all living in one temporary directory.
pub struct TestWarehouse {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub catalog: SchemaCatalog,
}

impl TestWarehouse {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("sparkify.db");
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).unwrap();
        fs::create_dir_all(&log_data).unwrap();

        let catalog = SchemaCatalog::new();
        bootstrap_warehouse(&db_path, &catalog, false).unwrap();

        TestWarehouse {
            _dir: dir,
            db_path,
            song_data,
            log_data,
            catalog,
        }
    }

    pub fn write_song(&self, relative: &str, json: &str) -> PathBuf {
        write_file(&self.song_data, relative, json)
    }

    pub fn write_log(&self, relative: &str, lines: &[&str]) -> PathBuf {
        let mut text = lines.join("\n");
        text.push('\n');
        write_file(&self.log_data, relative, &text)
    }

    pub fn open(&self) -> Connection {
        open_warehouse(&self.db_path, &self.catalog).unwrap()
    }

    /// Load the song directory, then the log directory, the way the
    /// `sparkify-etl` binary does.
    pub fn run_etl(&self) -> Result<LoadStats> {
        let mut conn = self.open();
        let mut stats = process_data(
            &mut conn,
            &self.catalog,
            &self.song_data,
            RecordKind::Song,
            FileOrder::Sorted,
            |_| {},
        )?;
        stats += process_data(
            &mut conn,
            &self.catalog,
            &self.log_data,
            RecordKind::Log,
            FileOrder::Sorted,
            |_| {},
        )?;
        Ok(stats)
    }

    pub fn count(&self, entity: Entity) -> i64 {
        self.catalog.count_rows(&self.open(), entity).unwrap()
    }
}

fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
