//! Rendered statements for every warehouse table.
//!
//! `SchemaCatalog` is built once at startup from [`WAREHOUSE_SCHEMA`] and
//! handed by reference to whoever needs to talk to the database.

use super::models::*;
use super::schema::{Entity, WAREHOUSE_SCHEMA};
use crate::sqlite_persistence::{Schema, Table};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::info;

/// Looks up the song/artist pair of a play event. Duration is an exact
/// equality key, so ties are possible but rare; the first row wins.
const SONG_SELECT_SQL: &str = "SELECT s.song_id, a.artist_id \
FROM songs s \
INNER JOIN artists a ON s.artist_id = a.artist_id \
WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3 \
LIMIT 1;";

pub struct SchemaCatalog {
    schema: &'static Schema,
    drop_statements: Vec<String>,
    create_statements: Vec<String>,
    /// Indexed by `Entity as usize`.
    insert_statements: [String; 5],
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCatalog {
    pub fn new() -> Self {
        let schema = &WAREHOUSE_SCHEMA;
        SchemaCatalog {
            schema,
            drop_statements: schema.tables.iter().map(Table::drop_sql).collect(),
            create_statements: schema.tables.iter().map(Table::create_sql).collect(),
            insert_statements: Entity::ALL.map(|entity| entity.table().insert_sql()),
        }
    }

    /// DROP statements in schema order.
    pub fn drop_statements(&self) -> impl Iterator<Item = &str> {
        self.drop_statements.iter().map(String::as_str)
    }

    /// CREATE statements in schema order.
    pub fn create_statements(&self) -> impl Iterator<Item = &str> {
        self.create_statements.iter().map(String::as_str)
    }

    pub fn insert_sql(&self, entity: Entity) -> &str {
        &self.insert_statements[entity as usize]
    }

    pub fn song_select_sql(&self) -> &'static str {
        SONG_SELECT_SQL
    }

    // =========================================================================
    // Schema Lifecycle
    // =========================================================================

    pub fn drop_all(&self, conn: &Connection) -> Result<()> {
        self.schema.drop_all(conn)?;
        info!("Dropped {} warehouse tables", self.drop_statements.len());
        Ok(())
    }

    pub fn create_all(&self, conn: &Connection) -> Result<()> {
        self.schema.create(conn)?;
        info!(
            "Created warehouse tables at version {}",
            self.schema.version
        );
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        self.schema
            .validate(conn)
            .context("Warehouse schema is missing or out of date, run create-tables first")
    }

    // =========================================================================
    // Writes
    // =========================================================================
    //
    // Each write returns the number of rows the statement changed, so an
    // ignored conflict reports 0.

    pub fn insert_song(&self, conn: &Connection, song: &SongRow) -> rusqlite::Result<usize> {
        conn.prepare_cached(self.insert_sql(Entity::Song))?
            .execute(params![
                &song.song_id,
                &song.title,
                &song.artist_id,
                song.year,
                song.duration
            ])
    }

    pub fn insert_artist(&self, conn: &Connection, artist: &ArtistRow) -> rusqlite::Result<usize> {
        conn.prepare_cached(self.insert_sql(Entity::Artist))?
            .execute(params![
                &artist.artist_id,
                &artist.name,
                &artist.location,
                artist.latitude,
                artist.longitude
            ])
    }

    pub fn insert_user(&self, conn: &Connection, user: &UserRow) -> rusqlite::Result<usize> {
        conn.prepare_cached(self.insert_sql(Entity::User))?
            .execute(params![
                &user.user_id,
                &user.first_name,
                &user.last_name,
                &user.gender,
                &user.level
            ])
    }

    pub fn insert_time(&self, conn: &Connection, time: &TimeRow) -> rusqlite::Result<usize> {
        conn.prepare_cached(self.insert_sql(Entity::TimeBucket))?
            .execute(params![
                time.start_time,
                time.hour,
                time.day,
                time.week,
                time.month,
                time.year,
                time.weekday
            ])
    }

    pub fn insert_songplay(
        &self,
        conn: &Connection,
        songplay: &SongplayRow,
    ) -> rusqlite::Result<usize> {
        conn.prepare_cached(self.insert_sql(Entity::Songplay))?
            .execute(params![
                songplay.start_time,
                &songplay.user_id,
                &songplay.level,
                &songplay.song_id,
                &songplay.artist_id,
                &songplay.session_id,
                &songplay.location,
                &songplay.user_agent
            ])
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Find the song/artist pair matching a play event exactly.
    pub fn find_song(
        &self,
        conn: &Connection,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> rusqlite::Result<Option<SongMatch>> {
        let mut stmt = conn.prepare_cached(SONG_SELECT_SQL)?;
        match stmt.query_row(params![title, artist_name, duration], |r| {
            Ok(SongMatch {
                song_id: r.get(0)?,
                artist_id: r.get(1)?,
            })
        }) {
            Ok(found) => Ok(Some(found)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn count_rows(&self, conn: &Connection, entity: Entity) -> rusqlite::Result<i64> {
        conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", entity.table_name()),
            [],
            |r| r.get(0),
        )
    }
}
