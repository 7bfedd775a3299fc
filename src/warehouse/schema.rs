//! SQLite schema of the listening-activity warehouse.
//!
//! Four dimension tables (songs, artists, users, time) around one fact table
//! (songplays). Column names and nullability are consumed by downstream
//! queries and must not drift.

use crate::sqlite_column;
use crate::sqlite_persistence::{OnConflict, Schema, SqlType, Table};

// =============================================================================
// Fact Table
// =============================================================================

/// One row per played song, never deduplicated.
const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!(
            "songplay_id",
            &SqlType::Integer,
            is_primary_key = true,
            auto_increment = true
        ),
        sqlite_column!("start_time", &SqlType::Timestamp, non_null = true),
        sqlite_column!("user_id", &SqlType::Text, non_null = true),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text), // NULL when the lookup missed
        sqlite_column!("artist_id", &SqlType::Text), // NULL when the lookup missed
        sqlite_column!("session_id", &SqlType::Text),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    on_conflict: OnConflict::Append,
};

// =============================================================================
// Dimension Tables
// =============================================================================

/// Users, the subscription level follows the latest event seen.
const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Text, is_primary_key = true, non_null = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text), // single character
        sqlite_column!("level", &SqlType::Text),
    ],
    on_conflict: OnConflict::Update {
        target: &["user_id"],
        set: &["level"],
    },
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist_id", &SqlType::Text),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration", &SqlType::Real),
    ],
    on_conflict: OnConflict::Ignore,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    on_conflict: OnConflict::Ignore,
};

/// Calendar breakdown of every distinct play timestamp.
const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!(
            "start_time",
            &SqlType::Timestamp,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("hour", &SqlType::Integer),
        sqlite_column!("day", &SqlType::Integer),
        sqlite_column!("week", &SqlType::Integer),
        sqlite_column!("month", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("weekday", &SqlType::Integer), // Monday = 0
    ],
    on_conflict: OnConflict::Ignore,
};

// =============================================================================
// Schema Definition
// =============================================================================

/// Tables in creation (and drop) order.
pub const WAREHOUSE_SCHEMA: Schema = Schema {
    version: 0,
    tables: &[
        SONGPLAYS_TABLE,
        USERS_TABLE,
        SONGS_TABLE,
        ARTISTS_TABLE,
        TIME_TABLE,
    ],
};

/// The five persisted entities, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Songplay = 0,
    User = 1,
    Song = 2,
    Artist = 3,
    TimeBucket = 4,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::Songplay,
        Entity::User,
        Entity::Song,
        Entity::Artist,
        Entity::TimeBucket,
    ];

    pub fn table(&self) -> &'static Table {
        match self {
            Entity::Songplay => &SONGPLAYS_TABLE,
            Entity::User => &USERS_TABLE,
            Entity::Song => &SONGS_TABLE,
            Entity::Artist => &ARTISTS_TABLE,
            Entity::TimeBucket => &TIME_TABLE,
        }
    }

    pub fn table_name(&self) -> &'static str {
        self.table().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    #[test]
    fn test_schema_creates_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        WAREHOUSE_SCHEMA.create(&conn).unwrap();
        WAREHOUSE_SCHEMA.validate(&conn).unwrap();
    }

    #[test]
    fn test_entities_follow_schema_order() {
        assert_eq!(WAREHOUSE_SCHEMA.tables.len(), Entity::ALL.len());
        for (position, entity) in Entity::ALL.iter().enumerate() {
            assert_eq!(*entity as usize, position);
            assert_eq!(WAREHOUSE_SCHEMA.tables[position].name, entity.table_name());
        }
    }

    #[test]
    fn test_songplay_id_is_assigned() {
        let conn = Connection::open_in_memory().unwrap();
        WAREHOUSE_SCHEMA.create(&conn).unwrap();

        for _ in 0..2 {
            conn.execute(
                "INSERT INTO songplays (start_time, user_id) VALUES (?1, ?2)",
                params!["2018-11-12 02:37:38.796", "10"],
            )
            .unwrap();
        }

        let ids: Vec<i64> = conn
            .prepare("SELECT songplay_id FROM songplays ORDER BY songplay_id")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_songplay_requires_user() {
        let conn = Connection::open_in_memory().unwrap();
        WAREHOUSE_SCHEMA.create(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO songplays (start_time, user_id) VALUES (?1, NULL)",
            params!["2018-11-12 02:37:38.796"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_text_primary_keys_reject_null() {
        let conn = Connection::open_in_memory().unwrap();
        WAREHOUSE_SCHEMA.create(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO songs (song_id, title) VALUES (NULL, 'Untitled')",
            [],
        );
        assert!(result.is_err());
    }
}
