//! Simples Nacional: one progressive payment split among sub-taxes.
//!
//! # Method
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | RBT12 = annual revenue |
//! | 2 | Bracket = lookup(annex, RBT12) |
//! | 3 | Effective rate = (RBT12 × nominal − deduction) / RBT12 |
//! | 4 | Unified payment = RBT12 × effective rate |
//! | 5 | Split the payment by the bracket's partilha |
//! | 6 | Remove single-phase PIS/COFINS and ICMS-ST shares of sales |
//! | 7 | Annex IV: CPP, INSS terceiros and RAT on payroll, outside the payment |
//! | 8 | FGTS on payroll, always outside the payment |
//!
//! RBT12 should be the trailing twelve months of revenue. The input model
//! only carries one annual figure, which stands in for it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::brackets::lookup_bracket;
use crate::models::{Annex, FinancialInput, Regime, RegimeResult, TaxBreakdown, TaxKind};

/// Employer CPP on payroll for Annex IV companies.
pub const ANNEX_IV_CPP_RATE: Decimal = dec!(0.20);
/// Third-party (INSS terceiros) contribution for Annex IV companies.
pub const ANNEX_IV_THIRD_PARTY_RATE: Decimal = dec!(0.058);
/// Workplace-accident insurance for Annex IV companies.
pub const ANNEX_IV_RAT_RATE: Decimal = dec!(0.02);
/// FGTS deposit on payroll, owed by every Simples company.
pub const SIMPLES_FGTS_RATE: Decimal = dec!(0.08);

/// Calculates the Simples Nacional burden for `input`.
///
/// Only the bracket tables are consulted; no rate configuration applies.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::{Annex, BusinessActivity, FinancialInput};
/// use carga_core::calculations::calculate_simples_nacional;
///
/// let input = FinancialInput {
///     gross_revenue: dec!(500000),
///     ..FinancialInput::new(Annex::I, BusinessActivity::Commerce)
/// };
///
/// let result = calculate_simples_nacional(&input);
///
/// // effective rate (47,500 − 13,860) / 500,000 = 6.728%, CPP share 42%
/// assert_eq!(result.cpp.amount, dec!(14128.80));
/// ```
pub fn calculate_simples_nacional(input: &FinancialInput) -> RegimeResult {
    let rbt12 = input.gross_revenue;
    let bracket = lookup_bracket(input.annex, rbt12);
    let effective_rate = bracket.effective_rate(rbt12);
    let unified_payment = rbt12 * effective_rate;

    let share = |kind: TaxKind| unified_payment * bracket.distribution.share(kind);
    let outside_single_phase = Decimal::ONE - input.single_phase_sales_fraction();
    let outside_substitution = Decimal::ONE - input.substitution_sales_fraction();

    let payroll = input.payroll;
    let (cpp, inss_terceiros, rat) = if input.annex == Annex::IV {
        (
            payroll * ANNEX_IV_CPP_RATE,
            payroll * ANNEX_IV_THIRD_PARTY_RATE,
            payroll * ANNEX_IV_RAT_RATE,
        )
    } else {
        (share(TaxKind::Cpp), Decimal::ZERO, Decimal::ZERO)
    };

    let breakdown = TaxBreakdown {
        pis_pasep: share(TaxKind::PisPasep) * outside_single_phase,
        cofins: share(TaxKind::Cofins) * outside_single_phase,
        irpj: share(TaxKind::Irpj),
        adicional_irpj: Decimal::ZERO,
        csll: share(TaxKind::Csll),
        ipi: share(TaxKind::Ipi),
        iss: share(TaxKind::Iss),
        icms: share(TaxKind::Icms) * outside_substitution,
        rat,
        cpp,
        inss_terceiros,
        fgts: payroll * SIMPLES_FGTS_RATE,
    };

    let result = RegimeResult::from_breakdown(Regime::SimplesNacional, &breakdown, rbt12);
    debug!(
        annex = input.annex.as_str(),
        %rbt12,
        nominal_rate = %bracket.nominal_rate,
        %effective_rate,
        unified = %unified_collection(input.annex, &result),
        total = %result.total.amount,
        "simples nacional calculated"
    );
    result
}

/// The part of a Simples Nacional result paid through the unified
/// collection (DAS). Everything else in the total is paid separately.
pub fn unified_collection(
    annex: Annex,
    result: &RegimeResult,
) -> Decimal {
    result.sum_where(|kind| match kind {
        TaxKind::PisPasep
        | TaxKind::Cofins
        | TaxKind::Irpj
        | TaxKind::Csll
        | TaxKind::Ipi
        | TaxKind::Iss
        | TaxKind::Icms => true,
        TaxKind::Cpp => annex != Annex::IV,
        TaxKind::AdicionalIrpj | TaxKind::Rat | TaxKind::InssTerceiros | TaxKind::Fgts => false,
    })
}
