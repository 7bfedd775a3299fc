use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub db_path: Option<String>,
    pub song_data_path: Option<String>,
    pub log_data_path: Option<String>,
    /// "sorted" or "filesystem"
    pub file_order: Option<String>,
    pub show_progress: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
db_path = "/var/lib/sparkify/sparkify.db"
song_data_path = "/data/song_data"
log_data_path = "/data/log_data"
file_order = "filesystem"
show_progress = false
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(
            config.db_path.as_deref(),
            Some("/var/lib/sparkify/sparkify.db")
        );
        assert_eq!(config.song_data_path.as_deref(), Some("/data/song_data"));
        assert_eq!(config.log_data_path.as_deref(), Some("/data/log_data"));
        assert_eq!(config.file_order.as_deref(), Some("filesystem"));
        assert_eq!(config.show_progress, Some(false));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"log_data_path = "logs""#).unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.db_path.is_none());
        assert_eq!(config.log_data_path.as_deref(), Some("logs"));
        assert!(config.show_progress.is_none());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"database = "typo.db""#).unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/sparkify.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
