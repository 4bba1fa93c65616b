//! One calculator per regime. They share no state and no abstraction
//! beyond the [`RegimeResult`](crate::RegimeResult) they produce.

mod lucro_presumido;
mod lucro_real;
mod simples_nacional;

pub use lucro_presumido::calculate_lucro_presumido;
pub use lucro_real::calculate_lucro_real;
pub use simples_nacional::{
    ANNEX_IV_CPP_RATE, ANNEX_IV_RAT_RATE, ANNEX_IV_THIRD_PARTY_RATE, SIMPLES_FGTS_RATE,
    calculate_simples_nacional, unified_collection,
};
