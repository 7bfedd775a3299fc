use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rusqlite::Connection;
use sparkify_etl::cli::{init_tracing, parse_path};
use sparkify_etl::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_LOG_DATA_PATH, DEFAULT_SONG_DATA_PATH,
};
use sparkify_etl::etl::{process_data, FileOrder, LoadStats, RecordKind};
use sparkify_etl::warehouse::{open_warehouse, Entity, SchemaCatalog};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Load song metadata and user activity logs into the Sparkify warehouse")]
struct CliArgs {
    /// Path to the SQLite warehouse database, created by `create-tables`.
    #[clap(long, value_parser = parse_path)]
    pub db: Option<PathBuf>,

    /// Directory holding the song metadata files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_SONG_DATA_PATH)]
    pub song_data: PathBuf,

    /// Directory holding the user activity log files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_LOG_DATA_PATH)]
    pub log_data: PathBuf,

    /// Order in which files of a directory are loaded.
    #[clap(long, value_enum, default_value_t = FileOrder::Sorted)]
    pub file_order: FileOrder,

    /// Path to a TOML config file. Its values override command line values.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Disable the progress bar.
    #[clap(long)]
    pub no_progress: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db.clone(),
            song_data_path: self.song_data.clone(),
            log_data_path: self.log_data.clone(),
            file_order: self.file_order,
            show_progress: !self.no_progress,
        }
    }
}

fn create_progress_bar(kind: RecordKind, visible: bool) -> Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    if visible {
        pb.set_style(
            ProgressStyle::with_template(
                "{msg} {bar:40.cyan/blue} {pos}/{len} files [{elapsed_precise}]",
            )?
            .progress_chars("##-"),
        );
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_message(kind.label());
    Ok(pb)
}

fn load_directory(
    conn: &mut Connection,
    catalog: &SchemaCatalog,
    root: &Path,
    kind: RecordKind,
    order: FileOrder,
    show_progress: bool,
) -> Result<LoadStats> {
    info!("Processing {} files in {:?}...", kind.label(), root);
    let pb = create_progress_bar(kind, show_progress)?;
    let stats = process_data(conn, catalog, root, kind, order, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.index as u64);
    });
    pb.finish_and_clear();
    stats.with_context(|| format!("Failed to load {} files from {:?}", kind.label(), root))
}

fn run(config: &AppConfig) -> Result<()> {
    let start = Instant::now();
    let catalog = SchemaCatalog::new();

    info!("Opening warehouse database at {:?}...", config.db_path);
    let mut conn = open_warehouse(&config.db_path, &catalog)?;

    let show_progress = config.show_progress && std::io::stderr().is_terminal();

    let mut stats = load_directory(
        &mut conn,
        &catalog,
        &config.song_data_path,
        RecordKind::Song,
        config.file_order,
        show_progress,
    )?;
    stats += load_directory(
        &mut conn,
        &catalog,
        &config.log_data_path,
        RecordKind::Log,
        config.file_order,
        show_progress,
    )?;

    info!("=== ETL Complete ===");
    info!("Files processed: {}", stats.files_processed);
    info!("Songs inserted: {}", stats.songs_inserted);
    info!("Artists inserted: {}", stats.artists_inserted);
    info!("Time rows inserted: {}", stats.time_rows_inserted);
    info!("User rows written: {}", stats.users_written);
    info!(
        "Songplays inserted: {} ({} matched a known song)",
        stats.songplays_inserted, stats.songplays_matched
    );
    info!("Log events skipped: {}", stats.events_skipped);
    for entity in Entity::ALL {
        info!(
            "Table {}: {} rows",
            entity.table_name(),
            catalog.count_rows(&conn, entity)?
        );
    }
    info!("Duration: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    if let Err(e) = run(&config) {
        error!("ETL failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
