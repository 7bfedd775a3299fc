//! Typed input records.
//!
//! Song files hold one JSON object each. Log files hold one JSON object per
//! line, and only `NextSong` events are typed past their `page` field.

use super::error::{EtlError, RecordLocation};
use crate::warehouse::{ArtistRow, SongMatch, SongRow, SongplayRow, TimeRow, UserRow};
use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

/// The only log page that describes a played song.
pub const NEXT_SONG_PAGE: &str = "NextSong";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
    pub artist_name: String,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default)]
    pub artist_latitude: Option<f64>,
    #[serde(default)]
    pub artist_longitude: Option<f64>,
}

impl SongRecord {
    pub fn parse(location: RecordLocation, text: &str) -> Result<Self, EtlError> {
        let record: SongRecord = serde_json::from_str(text)
            .map_err(|e| EtlError::malformed(location.clone(), e.to_string()))?;
        if record.song_id.is_empty() {
            return Err(EtlError::malformed(location, "empty `song_id`"));
        }
        if record.artist_id.is_empty() {
            return Err(EtlError::malformed(location, "empty `artist_id`"));
        }
        Ok(record)
    }

    pub fn song_row(&self) -> SongRow {
        SongRow {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    pub fn artist_row(&self) -> ArtistRow {
        ArtistRow {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

/// A `NextSong` log event.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayEvent {
    #[serde(rename = "ts", deserialize_with = "epoch_millis")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "string_or_integer")]
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub length: f64,
    #[serde(deserialize_with = "string_or_integer")]
    pub session_id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl PlayEvent {
    fn check(&self) -> Result<(), String> {
        if self.user_id.is_empty() {
            return Err("empty `userId`".to_string());
        }
        if let Some(gender) = &self.gender {
            if gender.chars().count() > 1 {
                return Err(format!("`gender` must be a single character, got {:?}", gender));
            }
        }
        Ok(())
    }

    pub fn time_row(&self) -> TimeRow {
        TimeRow::from_start_time(self.start_time)
    }

    pub fn user_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    pub fn songplay_row(&self, song: Option<SongMatch>) -> SongplayRow {
        let (song_id, artist_id) = match song {
            Some(found) => (Some(found.song_id), Some(found.artist_id)),
            None => (None, None),
        };
        SongplayRow {
            start_time: self.start_time,
            user_id: self.user_id.clone(),
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id.clone(),
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Parse one log line. Returns `None` for blank lines and for events of any
/// page other than `NextSong`.
pub fn parse_log_line(location: RecordLocation, line: &str) -> Result<Option<PlayEvent>, EtlError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| EtlError::malformed(location.clone(), format!("invalid JSON: {}", e)))?;

    let page = match value.get("page").and_then(|p| p.as_str()) {
        Some(page) => page,
        None => return Err(EtlError::malformed(location, "missing string field `page`")),
    };
    if page != NEXT_SONG_PAGE {
        return Ok(None);
    }

    let event: PlayEvent = serde_json::from_value(value)
        .map_err(|e| EtlError::malformed(location.clone(), e.to_string()))?;
    event
        .check()
        .map_err(|reason| EtlError::malformed(location, reason))?;
    Ok(Some(event))
}

fn epoch_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let millis = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| de::Error::custom(format!("timestamp {} is out of range", millis)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInteger {
    String(String),
    Integer(i64),
}

fn string_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::String(s) => s,
        StringOrInteger::Integer(n) => n.to_string(),
    })
}
