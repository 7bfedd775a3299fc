use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where in the input tree a record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocation {
    pub path: PathBuf,
    /// 1-based, only set for line-delimited files.
    pub line: Option<usize>,
}

impl RecordLocation {
    pub fn file(path: &Path) -> Self {
        RecordLocation {
            path: path.to_path_buf(),
            line: None,
        }
    }

    pub fn line(path: &Path, line: usize) -> Self {
        RecordLocation {
            path: path.to_path_buf(),
            line: Some(line),
        }
    }
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Errors that abort a load run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Malformed record at {location}: {reason}")]
    MalformedRecord {
        location: RecordLocation,
        reason: String,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl EtlError {
    pub fn malformed(location: RecordLocation, reason: impl Into<String>) -> Self {
        EtlError::MalformedRecord {
            location,
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        EtlError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_file_and_line() {
        let err = EtlError::malformed(
            RecordLocation::line(Path::new("/data/log.json"), 3),
            "missing field `ts`",
        );
        assert_eq!(
            err.to_string(),
            "Malformed record at /data/log.json:3: missing field `ts`"
        );

        let err = EtlError::malformed(RecordLocation::file(Path::new("/data/song.json")), "bad");
        assert_eq!(err.to_string(), "Malformed record at /data/song.json: bad");
    }
}
