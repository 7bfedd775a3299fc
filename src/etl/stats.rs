use std::ops::AddAssign;

/// Row counters of a load. Dimension counters only count rows the database
/// actually changed, so re-loading the same input leaves them at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub files_processed: usize,
    pub songs_inserted: usize,
    pub artists_inserted: usize,
    pub time_rows_inserted: usize,
    pub users_written: usize,
    pub songplays_inserted: usize,
    /// Songplays whose song/artist lookup found a match.
    pub songplays_matched: usize,
    /// Log events dropped because their page is not `NextSong`.
    pub events_skipped: usize,
}

impl AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.files_processed += other.files_processed;
        self.songs_inserted += other.songs_inserted;
        self.artists_inserted += other.artists_inserted;
        self.time_rows_inserted += other.time_rows_inserted;
        self.users_written += other.users_written;
        self.songplays_inserted += other.songplays_inserted;
        self.songplays_matched += other.songplays_matched;
        self.events_skipped += other.events_skipped;
    }
}
