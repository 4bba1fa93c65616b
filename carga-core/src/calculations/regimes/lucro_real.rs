//! Lucro Real: non-cumulative PIS/COFINS and ICMS with input credits, and
//! income taxes on the accounting profit.
//!
//! # Method
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | PIS/COFINS debit on revenue outside single-phase sales |
//! | 2 | PIS/COFINS credit on taxable purchases plus credit-eligible expenses |
//! | 3 | ICMS debit on revenue outside substitution, credit on taxable purchases |
//! | 4 | IPI, ISS on revenue; payroll charges on payroll |
//! | 5 | Profit = revenue − revenue taxes − costs − payroll − payroll charges |
//! | 6 | IRPJ, adicional and CSLL on the profit, floored at zero |
//!
//! A non-cumulative tax whose credits exceed its debits is zero; the
//! surplus credit is not carried anywhere.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{additional_irpj, max};
use crate::models::{FinancialInput, Regime, RegimeResult, TaxBreakdown, TaxRates};

/// Debit minus credit at the same rate, floored at zero.
fn net_of_credits(
    taxable: Decimal,
    creditable: Decimal,
    rate: Decimal,
) -> Decimal {
    max(taxable * rate - creditable * rate, Decimal::ZERO)
}

/// Calculates the Lucro Real burden for `input` under `rates`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::{Annex, BusinessActivity, FinancialInput, TaxRates};
/// use carga_core::calculations::calculate_lucro_real;
///
/// let input = FinancialInput {
///     gross_revenue: dec!(100000),
///     variable_costs: dec!(200000),
///     ..FinancialInput::new(Annex::I, BusinessActivity::Commerce)
/// };
///
/// let result = calculate_lucro_real(&input, &TaxRates::lucro_real_defaults());
///
/// // credits exceed debits and the company runs a loss
/// assert_eq!(result.cofins.amount, dec!(0));
/// assert_eq!(result.irpj.amount, dec!(0));
/// ```
pub fn calculate_lucro_real(
    input: &FinancialInput,
    rates: &TaxRates,
) -> RegimeResult {
    let revenue = input.gross_revenue;

    let pis_cofins_taxable = revenue * (Decimal::ONE - input.single_phase_sales_fraction());
    let pis_cofins_credit_base = input.variable_costs
        * (Decimal::ONE - input.single_phase_purchases_fraction())
        + input.credit_eligible_expenses();
    let pis_pasep = net_of_credits(pis_cofins_taxable, pis_cofins_credit_base, rates.pis_pasep);
    let cofins = net_of_credits(pis_cofins_taxable, pis_cofins_credit_base, rates.cofins);

    let icms_taxable = revenue * (Decimal::ONE - input.substitution_sales_fraction());
    let icms_creditable =
        input.variable_costs * (Decimal::ONE - input.substitution_purchases_fraction());
    let icms = net_of_credits(icms_taxable, icms_creditable, rates.icms);

    let ipi = revenue * rates.ipi;
    let iss = revenue * rates.iss;

    let payroll = input.payroll;
    let cpp = payroll * rates.cpp;
    let inss_terceiros = payroll * rates.inss_terceiros;
    let rat = payroll * rates.rat;
    let fgts = payroll * rates.fgts;

    let revenue_taxes = pis_pasep + cofins + icms + iss;
    let costs_and_expenses = input.variable_costs
        + input.operating_expenses
        + payroll
        + cpp
        + inss_terceiros
        + rat
        + fgts;
    let profit = revenue - revenue_taxes - costs_and_expenses;
    let taxable_profit = max(profit, Decimal::ZERO);

    let breakdown = TaxBreakdown {
        pis_pasep,
        cofins,
        irpj: taxable_profit * rates.irpj,
        adicional_irpj: additional_irpj(taxable_profit, rates.adicional_irpj),
        csll: taxable_profit * rates.csll,
        ipi,
        iss,
        icms,
        rat,
        cpp,
        inss_terceiros,
        fgts,
    };

    let result = RegimeResult::from_breakdown(Regime::LucroReal, &breakdown, revenue);
    debug!(
        %pis_cofins_credit_base,
        %icms_creditable,
        %profit,
        total = %result.total.amount,
        "lucro real calculated"
    );
    result
}
