use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use carga_core::{
    FinancialInput, NewSimulation, RateConfiguration, Regime, RepositoryError, SavedSimulation,
    SimulationRepository,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to a sqlx SQLite URL such as `sqlite:carga.db?mode=rwc` or
    /// `sqlite::memory:`.
    ///
    /// An in-memory database lives only as long as its connection, so it
    /// gets a single connection that is never recycled.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {database_url}"))?;

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await
        } else {
            SqlitePoolOptions::new().connect_with(options).await
        }
        .with_context(|| format!("Failed to connect to database: {database_url}"))?;

        debug!(database_url, "connected");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn to_json<T: Serialize>(
    value: &T,
    what: &str,
) -> Result<String, RepositoryError> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to encode {what}: {e}")))
}

fn from_json<T: DeserializeOwned>(
    json: &str,
    what: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_str(json)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to decode {what}: {e}")))
}

#[derive(FromRow)]
struct SimulationRow {
    id: i64,
    company_name: String,
    cnpj: String,
    current_regime: String,
    input_json: String,
    rates_json: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SimulationRow> for SavedSimulation {
    type Error = RepositoryError;

    fn try_from(row: SimulationRow) -> Result<Self, Self::Error> {
        let current_regime = Regime::parse(&row.current_regime).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid regime: {}", row.current_regime))
        })?;
        let input: FinancialInput = from_json(&row.input_json, "input")?;
        let rates: RateConfiguration = from_json(&row.rates_json, "rates")?;

        Ok(SavedSimulation {
            id: row.id,
            company_name: row.company_name,
            cnpj: row.cnpj,
            current_regime,
            input,
            rates,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_SIMULATION: &str = "SELECT id, company_name, cnpj, current_regime, input_json,
        rates_json, created_at, updated_at
     FROM simulation";

#[async_trait]
impl SimulationRepository for SqliteRepository {
    async fn create_simulation(
        &self,
        simulation: NewSimulation,
    ) -> Result<SavedSimulation, RepositoryError> {
        let now = Utc::now();
        let input_json = to_json(&simulation.input, "input")?;
        let rates_json = to_json(&simulation.rates, "rates")?;

        let result = sqlx::query(
            "INSERT INTO simulation (
                company_name, cnpj, current_regime, input_json, rates_json,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&simulation.company_name)
        .bind(&simulation.cnpj)
        .bind(simulation.current_regime.as_str())
        .bind(input_json)
        .bind(rates_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        let id = result.last_insert_rowid();
        info!(id, company = %simulation.company_name, "simulation saved");
        self.get_simulation(id).await
    }

    async fn get_simulation(
        &self,
        id: i64,
    ) -> Result<SavedSimulation, RepositoryError> {
        let row = sqlx::query_as::<_, SimulationRow>(&format!("{SELECT_SIMULATION} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn update_simulation(
        &self,
        simulation: &SavedSimulation,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE simulation SET
                company_name = ?, cnpj = ?, current_regime = ?,
                input_json = ?, rates_json = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&simulation.company_name)
        .bind(&simulation.cnpj)
        .bind(simulation.current_regime.as_str())
        .bind(to_json(&simulation.input, "input")?)
        .bind(to_json(&simulation.rates, "rates")?)
        .bind(now)
        .bind(simulation.id)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_simulation(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM simulation WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!(id, "simulation deleted");
        Ok(())
    }

    async fn list_simulations(
        &self,
        company_filter: Option<&str>,
    ) -> Result<Vec<SavedSimulation>, RepositoryError> {
        let rows = match company_filter {
            Some(company) => {
                sqlx::query_as::<_, SimulationRow>(&format!(
                    "{SELECT_SIMULATION} WHERE instr(lower(company_name), lower(?)) > 0
                     ORDER BY updated_at DESC, id DESC"
                ))
                .bind(company)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, SimulationRow>(&format!(
                    "{SELECT_SIMULATION} ORDER BY updated_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(database_error)?;

        rows.into_iter().map(SavedSimulation::try_from).collect()
    }
}
