//! Song metadata files: one song and its artist per file.

use super::error::{EtlError, RecordLocation};
use super::records::SongRecord;
use super::stats::LoadStats;
use crate::warehouse::SchemaCatalog;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

pub fn read_song_file(path: &Path) -> Result<SongRecord, EtlError> {
    let text = std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))?;
    SongRecord::parse(RecordLocation::file(path), &text)
}

/// Write the song and artist rows of one record. Both are ignored when their
/// key already exists.
pub fn insert_song_record(
    conn: &Connection,
    catalog: &SchemaCatalog,
    record: &SongRecord,
) -> Result<LoadStats, EtlError> {
    let mut stats = LoadStats::default();
    stats.songs_inserted += catalog.insert_song(conn, &record.song_row())?;
    stats.artists_inserted += catalog.insert_artist(conn, &record.artist_row())?;
    debug!(
        "Song {} by {}: {} song rows, {} artist rows written",
        record.song_id, record.artist_id, stats.songs_inserted, stats.artists_inserted
    );
    Ok(stats)
}

pub fn process_song_file(
    conn: &Connection,
    catalog: &SchemaCatalog,
    path: &Path,
) -> Result<LoadStats, EtlError> {
    let record = read_song_file(path)?;
    insert_song_record(conn, catalog, &record)
}
