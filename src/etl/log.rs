//! Event log files: newline-delimited user activity, of which only played
//! songs reach the warehouse.

use super::error::{EtlError, RecordLocation};
use super::records::{parse_log_line, PlayEvent};
use super::stats::LoadStats;
use crate::warehouse::SchemaCatalog;
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// The `NextSong` events of one log file, in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogBatch {
    pub events: Vec<PlayEvent>,
    /// Non-blank lines dropped by the page filter.
    pub skipped: usize,
}

pub fn read_log_file(path: &Path) -> Result<LogBatch, EtlError> {
    let text = std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))?;
    parse_log_text(path, &text)
}

pub fn parse_log_text(path: &Path, text: &str) -> Result<LogBatch, EtlError> {
    let mut batch = LogBatch::default();
    for (index, line) in text.lines().enumerate() {
        match parse_log_line(RecordLocation::line(path, index + 1), line)? {
            Some(event) => batch.events.push(event),
            None if !line.trim().is_empty() => batch.skipped += 1,
            None => {}
        }
    }
    Ok(batch)
}

/// Write the time, user and songplay rows of a batch, in that order.
///
/// Time rows are written once per distinct timestamp. Users are written per
/// event so the last event of a user decides its level. Every event yields
/// exactly one songplay, with song and artist ids only when the lookup on
/// (title, artist name, length) finds a match.
pub fn insert_play_events(
    conn: &Connection,
    catalog: &SchemaCatalog,
    events: &[PlayEvent],
) -> Result<LoadStats, EtlError> {
    let mut stats = LoadStats::default();

    let mut seen_start_times = HashSet::new();
    for event in events {
        if seen_start_times.insert(event.start_time) {
            stats.time_rows_inserted += catalog.insert_time(conn, &event.time_row())?;
        }
    }

    for event in events {
        stats.users_written += catalog.insert_user(conn, &event.user_row())?;
    }

    for event in events {
        let found = catalog.find_song(conn, &event.song, &event.artist, event.length)?;
        if found.is_some() {
            stats.songplays_matched += 1;
        } else {
            debug!(
                "No song matches {:?} by {:?} ({}s)",
                event.song, event.artist, event.length
            );
        }
        stats.songplays_inserted += catalog.insert_songplay(conn, &event.songplay_row(found))?;
    }

    Ok(stats)
}

pub fn process_log_file(
    conn: &Connection,
    catalog: &SchemaCatalog,
    path: &Path,
) -> Result<LoadStats, EtlError> {
    let batch = read_log_file(path)?;
    let mut stats = insert_play_events(conn, catalog, &batch.events)?;
    stats.events_skipped = batch.skipped;
    Ok(stats)
}
