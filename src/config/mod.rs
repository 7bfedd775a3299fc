mod file_config;

pub use file_config::FileConfig;

use crate::etl::FileOrder;
use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_SONG_DATA_PATH: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_PATH: &str = "data/log_data";

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data_path: PathBuf,
    pub log_data_path: PathBuf,
    pub file_order: FileOrder,
    pub show_progress: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            song_data_path: PathBuf::from(DEFAULT_SONG_DATA_PATH),
            log_data_path: PathBuf::from(DEFAULT_LOG_DATA_PATH),
            file_order: FileOrder::default(),
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_path: PathBuf,
    pub log_data_path: PathBuf,
    pub file_order: FileOrder,
    pub show_progress: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| anyhow!("db_path must be specified via --db or in config file"))?;

        let song_data_path = file
            .song_data_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data_path.clone());
        let log_data_path = file
            .log_data_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data_path.clone());

        let file_order = match file.file_order {
            Some(s) => parse_file_order(&s)
                .ok_or_else(|| anyhow!("Unknown file_order {:?} in config file", s))?,
            None => cli.file_order,
        };

        let show_progress = file.show_progress.unwrap_or(cli.show_progress);

        Ok(Self {
            db_path,
            song_data_path,
            log_data_path,
            file_order,
            show_progress,
        })
    }
}

/// Parses a file order string, case insensitive.
/// Uses clap's ValueEnum trait for parsing.
fn parse_file_order(s: &str) -> Option<FileOrder> {
    FileOrder::from_str(s, true).ok()
}
