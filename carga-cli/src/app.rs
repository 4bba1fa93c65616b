//! Command implementations shared by the binary and its tests.
//!
//! Every command returns the text to print so callers decide where it
//! goes.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use carga_core::{
    Annex, RateConfiguration, RepositoryRegistry, SavedSimulation, SimulationRepository,
    run_calculations,
};
use carga_data::{SimulationLoader, SimulationRecord, load_rates};
use carga_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::report;

/// Build a [`RepositoryRegistry`] with every backend compiled into this
/// binary.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Rates from `path`, or the defaults when no file is given.
pub fn load_rate_config(path: Option<&Path>) -> Result<RateConfiguration> {
    match path {
        Some(path) => {
            load_rates(path).with_context(|| format!("Failed to load rates: {}", path.display()))
        }
        None => Ok(RateConfiguration::default()),
    }
}

/// The scenario on 1-based data row `row` of the CSV at `path`.
pub fn read_scenario(
    path: &Path,
    row: usize,
) -> Result<SimulationRecord> {
    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut records = SimulationLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

    if row == 0 || row > records.len() {
        bail!(
            "row {row} does not exist; {} has {} scenario(s)",
            path.display(),
            records.len()
        );
    }
    debug!(row, company = %records[row - 1].company_name, "scenario selected");
    Ok(records.swap_remove(row - 1))
}

/// Compares the three regimes for `record`, as a text report or as JSON.
pub fn compare_scenario(
    record: &SimulationRecord,
    rates: &RateConfiguration,
    json: bool,
) -> Result<String> {
    let comparison = run_calculations(&record.input, rates);
    if json {
        return serde_json::to_string_pretty(&comparison).context("Failed to serialize comparison");
    }

    let mut out = format!(
        "{} ({}), enquadramento atual: {}\n\n",
        record.company_name, record.cnpj, record.current_regime
    );
    out.push_str(&report::render_comparison(
        &comparison,
        Some(record.current_regime),
    ));
    Ok(out)
}

pub async fn save_scenario(
    repo: &dyn SimulationRepository,
    record: &SimulationRecord,
    rates: &RateConfiguration,
) -> Result<SavedSimulation> {
    let saved = repo
        .create_simulation(record.to_new_simulation(rates))
        .await
        .context("Failed to save simulation")?;
    info!(id = saved.id, "simulation saved");
    Ok(saved)
}

/// Recomputes a saved simulation. With `rates`, the comparison uses them
/// instead of the stored ones, and `update` writes them back.
pub async fn show_simulation(
    repo: &dyn SimulationRepository,
    id: i64,
    rates: Option<RateConfiguration>,
    update: bool,
    json: bool,
) -> Result<String> {
    if update && rates.is_none() {
        bail!("--update needs --rates");
    }

    let mut simulation = repo
        .get_simulation(id)
        .await
        .with_context(|| format!("Failed to load simulation {id}"))?;

    if let Some(rates) = rates {
        simulation.rates = rates;
        if update {
            repo.update_simulation(&simulation)
                .await
                .with_context(|| format!("Failed to update simulation {id}"))?;
            simulation = repo
                .get_simulation(id)
                .await
                .with_context(|| format!("Failed to reload simulation {id}"))?;
            info!(id, "simulation rates updated");
        }
    }

    let comparison = run_calculations(&simulation.input, &simulation.rates);
    if json {
        return serde_json::to_string_pretty(&comparison).context("Failed to serialize comparison");
    }

    let mut out = report::render_simulation_header(&simulation);
    out.push('\n');
    out.push_str(&report::render_comparison(
        &comparison,
        Some(simulation.current_regime),
    ));
    Ok(out)
}

pub async fn list_simulations(
    repo: &dyn SimulationRepository,
    company: Option<&str>,
) -> Result<String> {
    let simulations = repo
        .list_simulations(company)
        .await
        .context("Failed to list simulations")?;
    Ok(report::render_simulation_list(&simulations))
}

pub async fn delete_simulation(
    repo: &dyn SimulationRepository,
    id: i64,
) -> Result<String> {
    repo.delete_simulation(id)
        .await
        .with_context(|| format!("Failed to delete simulation {id}"))?;
    Ok(format!("Simulação {id} excluída.\n"))
}

pub fn bracket_table(annex: Annex) -> String {
    report::render_bracket_table(annex)
}
