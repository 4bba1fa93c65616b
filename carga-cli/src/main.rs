use std::path::PathBuf;

use carga_cli::{app, logging};
use carga_core::{Annex, DbConfig, SimulationRepository};
use clap::{Parser, Subcommand};
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the annual tax burden of a Brazilian company under Simples
/// Nacional, Lucro Presumido and Lucro Real.
#[derive(Debug, Parser)]
#[command(name = "carga", version)]
struct Cli {
    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `carga.db`) or `:memory:`.
    #[arg(long, global = true, default_value = "carga.db")]
    db: String,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the three regimes for one scenario from a CSV file.
    Compare {
        /// CSV file with one scenario per row.
        #[arg(short, long)]
        file: PathBuf,

        /// 1-based data row to compare.
        #[arg(long, default_value_t = 1)]
        row: usize,

        /// TOML file overriding the Lucro Presumido / Lucro Real rates.
        #[arg(long)]
        rates: Option<PathBuf>,

        /// Save the scenario and its rates.
        #[arg(long)]
        save: bool,

        /// Print the comparison as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Recompute and print a saved simulation.
    Show {
        id: i64,

        /// Recompute with these rates instead of the saved ones.
        #[arg(long)]
        rates: Option<PathBuf>,

        /// Save the rates given with `--rates` into the simulation.
        #[arg(long, requires = "rates")]
        update: bool,

        /// Print the comparison as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List saved simulations, most recently updated first.
    List {
        /// Only companies whose name contains this text.
        #[arg(long)]
        company: Option<String>,
    },
    /// Delete a saved simulation.
    Delete { id: i64 },
    /// Print a Simples Nacional annex table.
    Table {
        /// I, II, III, IV or V.
        #[arg(long, value_parser = parse_annex)]
        annex: Annex,
    },
}

fn parse_annex(s: &str) -> Result<Annex, String> {
    Annex::parse(s).ok_or_else(|| format!("unknown annex '{s}'; expected I, II, III, IV or V"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

async fn open_repository(cli: &Cli) -> anyhow::Result<Box<dyn SimulationRepository>> {
    let db_config = DbConfig::new(cli.backend.as_str(), cli.db.as_str());
    debug!("connecting to {} backend", db_config.backend);
    let registry = app::build_registry();
    Ok(registry.create(&db_config).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let output = match &cli.command {
        Command::Compare {
            file,
            row,
            rates,
            save,
            json,
        } => {
            let rates = app::load_rate_config(rates.as_deref())?;
            let record = app::read_scenario(file, *row)?;
            let mut output = app::compare_scenario(&record, &rates, *json)?;
            if *save {
                let repo = open_repository(&cli).await?;
                let saved = app::save_scenario(&*repo, &record, &rates).await?;
                if !*json {
                    output.push_str(&format!("\nSimulação salva com id {}.\n", saved.id));
                }
            }
            output
        }
        Command::Show {
            id,
            rates,
            update,
            json,
        } => {
            let rates = match rates {
                Some(path) => Some(app::load_rate_config(Some(path.as_path()))?),
                None => None,
            };
            let repo = open_repository(&cli).await?;
            app::show_simulation(&*repo, *id, rates, *update, *json).await?
        }
        Command::List { company } => {
            let repo = open_repository(&cli).await?;
            app::list_simulations(&*repo, company.as_deref()).await?
        }
        Command::Delete { id } => {
            let repo = open_repository(&cli).await?;
            app::delete_simulation(&*repo, *id).await?
        }
        Command::Table { annex } => app::bracket_table(*annex),
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
