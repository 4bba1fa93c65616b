pub mod calculations;
pub mod db;
pub mod models;

pub use calculations::{Comparison, RegimeSet, bracket_table, lookup_bracket, run_calculations};
pub use db::{DbConfig, RepositoryError, RepositoryFactory, RepositoryRegistry, SimulationRepository};
pub use models::*;
