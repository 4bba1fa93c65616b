use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSimulation, SavedSimulation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A stored input or rate record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for named simulations.
///
/// `update_simulation` and `delete_simulation` report
/// [`RepositoryError::NotFound`] when no row has the given id.
#[async_trait]
pub trait SimulationRepository: Send + Sync {
    async fn create_simulation(
        &self,
        simulation: NewSimulation,
    ) -> Result<SavedSimulation, RepositoryError>;

    async fn get_simulation(&self, id: i64) -> Result<SavedSimulation, RepositoryError>;

    /// Overwrites every field but `id` and `created_at`, and refreshes
    /// `updated_at`.
    async fn update_simulation(
        &self,
        simulation: &SavedSimulation,
    ) -> Result<(), RepositoryError>;

    async fn delete_simulation(&self, id: i64) -> Result<(), RepositoryError>;

    /// Most recently updated first. `company_filter` matches company names
    /// containing it, ignoring ASCII case.
    async fn list_simulations(
        &self,
        company_filter: Option<&str>,
    ) -> Result<Vec<SavedSimulation>, RepositoryError>;
}
