mod annex;
mod bracket;
mod business_activity;
mod financial_input;
mod income_statement;
mod regime;
mod regime_result;
mod simulation;
mod tax_kind;
mod tax_rates;

pub use annex::Annex;
pub use bracket::{Bracket, Distribution};
pub use business_activity::{BusinessActivity, Presumption};
pub use financial_input::FinancialInput;
pub use income_statement::IncomeStatement;
pub use regime::Regime;
pub use regime_result::{RegimeResult, TaxAmount, TaxBreakdown};
pub use simulation::{NewSimulation, SavedSimulation};
pub use tax_kind::TaxKind;
pub use tax_rates::{RateConfiguration, TaxRates};
