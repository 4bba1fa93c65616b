//! Tax burden calculations for the three Brazilian corporate regimes.
//!
//! Every function in this module is pure: results depend only on the
//! inputs and on the static Simples Nacional tables in [`brackets`].

pub mod brackets;
pub mod common;
pub mod comparison;
pub mod regimes;
pub mod statement;

pub use brackets::{bracket_table, lookup_bracket};
pub use comparison::{Comparison, RegimeSet, run_calculations};
pub use regimes::{
    calculate_lucro_presumido, calculate_lucro_real, calculate_simples_nacional,
    unified_collection,
};
pub use statement::derive_statement;
