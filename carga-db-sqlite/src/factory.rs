use async_trait::async_trait;
use carga_core::{DbConfig, RepositoryError, RepositoryFactory, SimulationRepository};

use crate::repository::SqliteRepository;

/// Maps a `sqlite` connection string to a sqlx URL.
///
/// * `:memory:` → an in-memory database.
/// * A URL already starting with `sqlite:` is used as is.
/// * Anything else is a file path, created when missing.
pub fn database_url(connection_string: &str) -> String {
    match connection_string {
        ":memory:" => "sqlite::memory:".to_string(),
        url if url.starts_with("sqlite:") => url.to_string(),
        path => format!("sqlite:{path}?mode=rwc"),
    }
}

/// [`RepositoryFactory`] for the `"sqlite"` backend.
///
/// ```rust,no_run
/// use carga_core::RepositoryRegistry;
/// use carga_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn SimulationRepository>, RepositoryError> {
        let url = database_url(&config.connection_string);
        let repo = SqliteRepository::new(&url)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use carga_core::{DbConfig, RepositoryError, RepositoryFactory};
    use pretty_assertions::assert_eq;

    use super::{SqliteRepositoryFactory, database_url};

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    #[test]
    fn database_url_maps_memory_paths_and_urls() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url("carga.db"), "sqlite:carga.db?mode=rwc");
        assert_eq!(database_url("/var/lib/carga/sim.db"), "sqlite:/var/lib/carga/sim.db?mode=rwc");
        assert_eq!(database_url("sqlite:other.db?mode=ro"), "sqlite:other.db?mode=ro");
    }

    #[tokio::test]
    async fn creates_migrated_in_memory_repository() {
        let repo = SqliteRepositoryFactory
            .create(&DbConfig::default())
            .await
            .expect("failed to create in-memory repository");

        assert_eq!(repo.list_simulations(None).await, Ok(Vec::new()));
        assert_eq!(repo.get_simulation(1).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn unreachable_file_is_a_connection_error() {
        let config = DbConfig::new("sqlite", "/nonexistent-dir/nested/carga.db");

        let result = SqliteRepositoryFactory.create(&config).await;

        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }
}
