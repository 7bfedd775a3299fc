//! Input discovery and the per-file load loop.

use super::error::EtlError;
use super::log::process_log_file;
use super::song::process_song_file;
use super::stats::LoadStats;
use crate::warehouse::SchemaCatalog;
use clap::ValueEnum;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Order in which discovered files are loaded.
///
/// Users and time rows loaded from different files can depend on this order,
/// since the last user row seen decides its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FileOrder {
    /// File names sorted within each directory, depth first.
    #[default]
    Sorted,
    /// Whatever order the directory walk yields.
    Filesystem,
}

/// Which transformer a directory of files goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Song,
    Log,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Song => "song",
            RecordKind::Log => "log",
        }
    }

    pub fn process_file(
        &self,
        conn: &Connection,
        catalog: &SchemaCatalog,
        path: &Path,
    ) -> Result<LoadStats, EtlError> {
        match self {
            RecordKind::Song => process_song_file(conn, catalog, path),
            RecordKind::Log => process_log_file(conn, catalog, path),
        }
    }
}

/// Progress of a load, reported after each committed file.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index of the file just committed.
    pub index: usize,
    pub total: usize,
    pub path: &'a Path,
}

fn is_json_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| !n.starts_with('.'))
        .unwrap_or(false);
    visible && path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Recursively list every `.json` file under `root`.
pub fn discover_json_files(root: &Path, order: FileOrder) -> Result<Vec<PathBuf>, EtlError> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if order == FileOrder::Sorted {
        walker = walker.sort_by_file_name();
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_json_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Load every file under `root` through the transformer of `kind`.
///
/// Each file is committed in its own transaction before the next one starts.
/// The first error aborts the walk: files committed so far stay committed,
/// the failing file is rolled back and the rest are never read.
pub fn process_data(
    conn: &mut Connection,
    catalog: &SchemaCatalog,
    root: &Path,
    kind: RecordKind,
    order: FileOrder,
    mut on_progress: impl FnMut(&Progress),
) -> Result<LoadStats, EtlError> {
    let files = discover_json_files(root, order)?;
    let total = files.len();
    info!("{} files found in {}", total, root.display());
    if total == 0 {
        warn!("No {} files to load under {}", kind.label(), root.display());
    }

    let mut stats = LoadStats::default();
    for (position, path) in files.iter().enumerate() {
        let tx = conn.transaction()?;
        let file_stats = kind.process_file(&tx, catalog, path)?;
        tx.commit()?;

        stats += file_stats;
        stats.files_processed += 1;

        let progress = Progress {
            index: position + 1,
            total,
            path,
        };
        info!("{}/{} files processed.", progress.index, progress.total);
        on_progress(&progress);
    }

    info!(
        "Loaded {} {} files from {}",
        stats.files_processed,
        kind.label(),
        root.display()
    );
    Ok(stats)
}
