//! Integration tests for scenario loading against the SQLite backend.

use std::path::Path;

use carga_core::{Annex, RateConfiguration, Regime, SimulationRepository, run_calculations};
use carga_data::{SimulationLoader, SimulationLoaderError, load_rates};
use carga_db_sqlite::SqliteRepository;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const TEST_CSV: &str = include_str!("../test-data/simulations.csv");

async fn setup_test_db() -> SqliteRepository {
    let repo = SqliteRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");
    repo
}

fn test_rates() -> RateConfiguration {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/rates.toml");
    load_rates(&path).expect("Failed to load rates fixture")
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_load_all_scenarios() {
    let repo = setup_test_db().await;

    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = SimulationLoader::load(&repo, &records, &RateConfiguration::default())
        .await
        .expect("Failed to load simulations");

    assert_eq!(inserted, 4);
    assert_eq!(repo.list_simulations(None).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_loaded_scenario_round_trips_input() {
    let repo = setup_test_db().await;

    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    SimulationLoader::load(&repo, &records, &RateConfiguration::default())
        .await
        .expect("Failed to load simulations");

    let saved = repo
        .list_simulations(Some("NORTE"))
        .await
        .expect("Failed to list simulations");

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].company_name, "Metalúrgica Norte");
    assert_eq!(saved[0].current_regime, Regime::LucroReal);
    assert_eq!(saved[0].input, records[1].input);
    assert_eq!(saved[0].input.annex, Annex::II);
    assert_eq!(saved[0].input.substitution_purchases_pct, dec!(25));
}

#[tokio::test]
async fn test_load_saves_rates_with_each_scenario() {
    let repo = setup_test_db().await;
    let rates = test_rates();

    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    SimulationLoader::load(&repo, &records, &rates)
        .await
        .expect("Failed to load simulations");

    for saved in repo.list_simulations(None).await.unwrap() {
        assert_eq!(saved.rates, rates);
        assert_eq!(saved.rates.lucro_presumido.icms, dec!(0.12));
        assert_eq!(saved.rates.lucro_real.cofins, dec!(0.076));
    }
}

#[tokio::test]
async fn test_load_is_not_idempotent() {
    let repo = setup_test_db().await;

    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    SimulationLoader::load(&repo, &records, &RateConfiguration::default())
        .await
        .unwrap();
    SimulationLoader::load(&repo, &records, &RateConfiguration::default())
        .await
        .unwrap();

    assert_eq!(repo.list_simulations(None).await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_load_nothing() {
    let repo = setup_test_db().await;

    let inserted = SimulationLoader::load(&repo, &[], &RateConfiguration::default())
        .await
        .unwrap();

    assert_eq!(inserted, 0);
}

#[tokio::test]
async fn test_load_without_migrations_fails() {
    let repo = SqliteRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let err = SimulationLoader::load(&repo, &records, &RateConfiguration::default())
        .await
        .expect_err("Should fail without the simulation table");

    assert!(matches!(err, SimulationLoaderError::Repository(_)), "{err:?}");
}

// ============================================================================
// Fixture scenarios through the engine
// ============================================================================

#[test]
fn test_bakery_fixture_prefers_simples() {
    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    let comparison = run_calculations(&records[0].input, &RateConfiguration::default());

    assert_eq!(comparison.best(), Regime::SimplesNacional);
    assert_eq!(
        comparison.results.simples_nacional.total.amount,
        dec!(40040)
    );
}

#[test]
fn test_rates_fixture_lowers_presumido_total() {
    let records = SimulationLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let input = &records[2].input;

    let defaults = run_calculations(input, &RateConfiguration::default());
    let custom = run_calculations(input, &test_rates());

    // ICMS 18% to 12% and ISS 5% to 2%, both on 900,000.
    assert_eq!(
        defaults.results.lucro_presumido.total.amount - custom.results.lucro_presumido.total.amount,
        dec!(81000)
    );
    assert_eq!(
        defaults.results.simples_nacional,
        custom.results.simples_nacional
    );
}
