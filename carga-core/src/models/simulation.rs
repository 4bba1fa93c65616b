use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FinancialInput, RateConfiguration, Regime};

/// A named simulation persisted by a [`crate::SimulationRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSimulation {
    pub id: i64,
    pub company_name: String,
    pub cnpj: String,
    /// Regime the company is currently registered under.
    pub current_regime: Regime,
    pub input: FinancialInput,
    pub rates: RateConfiguration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new simulations (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSimulation {
    pub company_name: String,
    pub cnpj: String,
    pub current_regime: Regime,
    pub input: FinancialInput,
    pub rates: RateConfiguration,
}
