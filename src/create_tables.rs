use anyhow::Result;
use clap::Parser;
use sparkify_etl::cli::{init_tracing, parse_path};
use sparkify_etl::warehouse::{bootstrap_warehouse, SchemaCatalog};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Create (or reset) the tables of the Sparkify warehouse")]
struct CliArgs {
    /// Path to the SQLite warehouse database. Created if missing.
    #[clap(value_parser = parse_path)]
    pub db: PathBuf,

    /// Delete the database file before creating the tables.
    #[clap(long)]
    pub recreate_database: bool,

    /// Print the DROP and CREATE statements instead of running them.
    #[clap(long)]
    pub print_sql: bool,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let catalog = SchemaCatalog::new();

    if cli_args.print_sql {
        for statement in catalog.drop_statements().chain(catalog.create_statements()) {
            println!("{}", statement);
        }
        return Ok(());
    }

    info!("Creating warehouse tables in {:?}...", cli_args.db);
    if let Err(e) = bootstrap_warehouse(&cli_args.db, &catalog, cli_args.recreate_database) {
        error!("Failed to create warehouse tables: {:#}", e);
        return Err(e);
    }
    info!("Warehouse ready at {:?}", cli_args.db);
    Ok(())
}
