//! Bulk scenario loading from CSV.
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column | Required | Notes |
//! |--------|----------|-------|
//! | `company_name` | yes | |
//! | `cnpj` | yes | `NN.NNN.NNN/NNNN-NN` or 14 digits |
//! | `current_regime` | yes | `simples`, `presumido`, `real`, or the full name |
//! | `annex` | yes | `I`…`V`, `1`…`5` or `ANEXO I`… |
//! | `activity` | yes | `comercio`, `industria`, `servicos-iii`, `servicos-iv`, `servicos-v` |
//! | `gross_revenue` | yes | annual, decimal point |
//! | `variable_costs` | yes | |
//! | `operating_expenses` | yes | |
//! | `payroll` | yes | |
//! | `property_rent` … `third_party_services` | no | empty or missing ⇒ 0 |
//! | `*_pct` | no | whole percentages 0–100, empty or missing ⇒ 0 |
//!
//! ```csv
//! company_name,cnpj,current_regime,annex,activity,gross_revenue,variable_costs,operating_expenses,payroll
//! Padaria Central,12.345.678/0001-90,simples,I,comercio,500000,250000,60000,80000
//! ```

use std::io::Read;
use std::sync::LazyLock;

use carga_core::{
    Annex, BusinessActivity, FinancialInput, NewSimulation, RateConfiguration, Regime,
    RepositoryError, SimulationRepository,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading simulation scenarios.
///
/// Row numbers are 1-based and do not count the header.
#[derive(Debug, Error)]
pub enum SimulationLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised annex '{value}' on row {row}")]
    InvalidAnnex { value: String, row: usize },

    #[error("unrecognised activity '{value}' on row {row}")]
    InvalidActivity { value: String, row: usize },

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },

    #[error("invalid CNPJ '{value}' on row {row}")]
    InvalidCnpj { value: String, row: usize },

    #[error("{column} must be between 0 and 100 on row {row}, got {value}")]
    PercentageOutOfRange {
        column: &'static str,
        value: Decimal,
        row: usize,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for SimulationLoaderError {
    fn from(err: csv::Error) -> Self {
        SimulationLoaderError::CsvParse(err.to_string())
    }
}

static CNPJ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}|\d{14})$").expect("CNPJ pattern is valid")
});

/// Whether `cnpj` is shaped like a CNPJ, punctuated or bare. Check digits
/// are not verified.
pub fn is_valid_cnpj(cnpj: &str) -> bool {
    CNPJ.is_match(cnpj)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    company_name: String,
    cnpj: String,
    current_regime: String,
    annex: String,
    activity: String,
    gross_revenue: Decimal,
    variable_costs: Decimal,
    operating_expenses: Decimal,
    payroll: Decimal,
    property_rent: Option<Decimal>,
    equipment_lease: Option<Decimal>,
    electricity: Option<Decimal>,
    machinery_depreciation: Option<Decimal>,
    building_depreciation: Option<Decimal>,
    third_party_services: Option<Decimal>,
    single_phase_sales_pct: Option<Decimal>,
    substitution_sales_pct: Option<Decimal>,
    single_phase_purchases_pct: Option<Decimal>,
    substitution_purchases_pct: Option<Decimal>,
}

/// One validated scenario from the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRecord {
    pub company_name: String,
    pub cnpj: String,
    pub current_regime: Regime,
    pub input: FinancialInput,
}

impl SimulationRecord {
    /// Pairs the scenario with the rates it should be saved under.
    pub fn to_new_simulation(
        &self,
        rates: &RateConfiguration,
    ) -> NewSimulation {
        NewSimulation {
            company_name: self.company_name.clone(),
            cnpj: self.cnpj.clone(),
            current_regime: self.current_regime,
            input: self.input.clone(),
            rates: rates.clone(),
        }
    }
}

fn percentage(
    column: &'static str,
    value: Option<Decimal>,
    row: usize,
) -> Result<Decimal, SimulationLoaderError> {
    let value = value.unwrap_or_default();
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(SimulationLoaderError::PercentageOutOfRange { column, value, row });
    }
    Ok(value)
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<SimulationRecord, SimulationLoaderError> {
    let annex = Annex::parse(&row.annex).ok_or_else(|| SimulationLoaderError::InvalidAnnex {
        value: row.annex.clone(),
        row: row_number,
    })?;
    let activity = BusinessActivity::parse(&row.activity).ok_or_else(|| {
        SimulationLoaderError::InvalidActivity {
            value: row.activity.clone(),
            row: row_number,
        }
    })?;
    let current_regime = Regime::parse(&row.current_regime).ok_or_else(|| {
        SimulationLoaderError::InvalidRegime {
            value: row.current_regime.clone(),
            row: row_number,
        }
    })?;
    if !is_valid_cnpj(&row.cnpj) {
        return Err(SimulationLoaderError::InvalidCnpj {
            value: row.cnpj,
            row: row_number,
        });
    }

    let input = FinancialInput {
        annex,
        activity,
        gross_revenue: row.gross_revenue,
        variable_costs: row.variable_costs,
        operating_expenses: row.operating_expenses,
        payroll: row.payroll,
        property_rent: row.property_rent.unwrap_or_default(),
        equipment_lease: row.equipment_lease.unwrap_or_default(),
        electricity: row.electricity.unwrap_or_default(),
        machinery_depreciation: row.machinery_depreciation.unwrap_or_default(),
        building_depreciation: row.building_depreciation.unwrap_or_default(),
        third_party_services: row.third_party_services.unwrap_or_default(),
        single_phase_sales_pct: percentage(
            "single_phase_sales_pct",
            row.single_phase_sales_pct,
            row_number,
        )?,
        substitution_sales_pct: percentage(
            "substitution_sales_pct",
            row.substitution_sales_pct,
            row_number,
        )?,
        single_phase_purchases_pct: percentage(
            "single_phase_purchases_pct",
            row.single_phase_purchases_pct,
            row_number,
        )?,
        substitution_purchases_pct: percentage(
            "substitution_purchases_pct",
            row.substitution_purchases_pct,
            row_number,
        )?,
    };

    Ok(SimulationRecord {
        company_name: row.company_name,
        cnpj: row.cnpj,
        current_regime,
        input,
    })
}

/// Loader for simulation scenarios from CSV files.
///
/// Works against any [`SimulationRepository`], so the same CSV can seed
/// whichever backend is configured.
pub struct SimulationLoader;

impl SimulationLoader {
    /// Parses and validates every row of `reader`, in file order.
    ///
    /// Stops at the first invalid row.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SimulationRecord>, SimulationLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "parsed simulation records");
        Ok(records)
    }

    /// Saves each record as a new simulation under `rates` and returns how
    /// many were inserted.
    ///
    /// Loading is not idempotent: running it twice saves every scenario
    /// twice.
    pub async fn load<R: SimulationRepository + ?Sized>(
        repo: &R,
        records: &[SimulationRecord],
        rates: &RateConfiguration,
    ) -> Result<usize, SimulationLoaderError> {
        let mut inserted = 0;

        for record in records {
            let saved = repo.create_simulation(record.to_new_simulation(rates)).await?;
            debug!(id = saved.id, company = %saved.company_name, "loaded simulation");
            inserted += 1;
        }

        info!(inserted, "simulations loaded");
        Ok(inserted)
    }
}
