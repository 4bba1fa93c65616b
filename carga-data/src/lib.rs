mod loader;
mod rates;

pub use loader::{SimulationLoader, SimulationLoaderError, SimulationRecord, is_valid_cnpj};
pub use rates::{RatesConfigError, load_rates, parse_rates};
