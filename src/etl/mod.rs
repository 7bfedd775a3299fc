//! Extraction and transformation of the raw song and log datasets.

mod error;
mod log;
mod records;
mod song;
mod stats;
mod walker;

pub use error::{EtlError, RecordLocation};
pub use log::{insert_play_events, parse_log_text, process_log_file, read_log_file, LogBatch};
pub use records::{parse_log_line, PlayEvent, SongRecord, NEXT_SONG_PAGE};
pub use song::{insert_song_record, process_song_file, read_song_file};
pub use stats::LoadStats;
pub use walker::{discover_json_files, process_data, FileOrder, Progress, RecordKind};
