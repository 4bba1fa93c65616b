use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use carga_core::RateConfiguration;
use carga_data::{SimulationLoader, load_rates};
use carga_db_sqlite::SqliteRepository;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Load simulation scenarios from a CSV file into the database.
///
/// Required columns: company_name, cnpj, current_regime, annex, activity,
/// gross_revenue, variable_costs, operating_expenses, payroll. The cost and
/// percentage columns that follow may be left empty.
#[derive(Parser, Debug)]
#[command(name = "carga-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:carga.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:carga.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// TOML file with rate overrides to save alongside each scenario
    #[arg(short, long)]
    rates: Option<PathBuf>,
}

/// Honours `RUST_LOG`, falling back to `info`, without timestamps or
/// targets so the loader's output stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let rates = match &args.rates {
        Some(path) => load_rates(path)
            .with_context(|| format!("Failed to load rates: {}", path.display()))?,
        None => RateConfiguration::default(),
    };

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    println!("Loading simulations from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = SimulationLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = SimulationLoader::load(&repo, &records, &rates)
        .await
        .context("Failed to load simulations into database")?;

    println!("Successfully loaded {inserted} simulations into the database.");

    Ok(())
}
