//! Lucro Presumido: income taxes on a presumed profit margin, everything
//! else as flat rates on revenue or payroll.
//!
//! # Method
//!
//! | Tax | Base |
//! |-----|------|
//! | IRPJ, adicional | revenue × IRPJ presumption |
//! | CSLL | revenue × CSLL presumption |
//! | PIS, COFINS | revenue outside single-phase sales, no credits |
//! | ICMS | revenue outside tax substitution, no credits |
//! | IPI, ISS | revenue |
//! | CPP, INSS terceiros, RAT, FGTS | payroll |

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::additional_irpj;
use crate::models::{FinancialInput, Regime, RegimeResult, TaxBreakdown, TaxRates};

/// Calculates the Lucro Presumido burden for `input` under `rates`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::{Annex, BusinessActivity, FinancialInput, TaxRates};
/// use carga_core::calculations::calculate_lucro_presumido;
///
/// let input = FinancialInput {
///     gross_revenue: dec!(1000000),
///     ..FinancialInput::new(Annex::I, BusinessActivity::Commerce)
/// };
///
/// let result = calculate_lucro_presumido(&input, &TaxRates::lucro_presumido_defaults());
///
/// // 8% presumption → 80,000 base at 15%
/// assert_eq!(result.irpj.amount, dec!(12000));
/// ```
pub fn calculate_lucro_presumido(
    input: &FinancialInput,
    rates: &TaxRates,
) -> RegimeResult {
    let revenue = input.gross_revenue;
    let presumption = input.activity.presumption();

    let irpj_base = revenue * presumption.irpj;
    let csll_base = revenue * presumption.csll;

    let pis_cofins_base = revenue * (Decimal::ONE - input.single_phase_sales_fraction());
    let icms_base = revenue * (Decimal::ONE - input.substitution_sales_fraction());

    let payroll = input.payroll;
    let breakdown = TaxBreakdown {
        pis_pasep: pis_cofins_base * rates.pis_pasep,
        cofins: pis_cofins_base * rates.cofins,
        irpj: irpj_base * rates.irpj,
        adicional_irpj: additional_irpj(irpj_base, rates.adicional_irpj),
        csll: csll_base * rates.csll,
        ipi: revenue * rates.ipi,
        iss: revenue * rates.iss,
        icms: icms_base * rates.icms,
        rat: payroll * rates.rat,
        cpp: payroll * rates.cpp,
        inss_terceiros: payroll * rates.inss_terceiros,
        fgts: payroll * rates.fgts,
    };

    let result = RegimeResult::from_breakdown(Regime::LucroPresumido, &breakdown, revenue);
    debug!(
        activity = input.activity.as_str(),
        %irpj_base,
        %csll_base,
        total = %result.total.amount,
        "lucro presumido calculated"
    );
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Annex, BusinessActivity, TaxKind};

    fn input(
        activity: BusinessActivity,
        revenue: Decimal,
    ) -> FinancialInput {
        FinancialInput {
            gross_revenue: revenue,
            variable_costs: dec!(400000),
            operating_expenses: dec!(100000),
            payroll: dec!(200000),
            ..FinancialInput::new(Annex::I, activity)
        }
    }

    // =========================================================================
    // Presumption tests
    // =========================================================================

    #[test]
    fn commerce_presumes_eight_and_twelve_percent() {
        let result = calculate_lucro_presumido(
            &input(BusinessActivity::Commerce, dec!(1000000)),
            &TaxRates::lucro_presumido_defaults(),
        );

        assert_eq!(result.irpj.amount, dec!(12000));
        assert_eq!(result.csll.amount, dec!(10800));
        assert_eq!(result.adicional_irpj.amount, Decimal::ZERO);
    }

    #[test]
    fn services_presume_thirty_two_percent() {
        let result = calculate_lucro_presumido(
            &input(BusinessActivity::ServicesIii, dec!(1000000)),
            &TaxRates::lucro_presumido_defaults(),
        );

        // base 320,000 → 26,666.67/month → 6,666.67 over the threshold
        assert_eq!(result.irpj.amount, dec!(48000));
        assert_eq!(result.csll.amount, dec!(28800));
        assert_eq!(result.adicional_irpj.amount.round_dp(2), dec!(8000));
    }

    #[test]
    fn industry_shares_the_commerce_presumption() {
        let rates = TaxRates::lucro_presumido_defaults();
        let commerce =
            calculate_lucro_presumido(&input(BusinessActivity::Commerce, dec!(2000000)), &rates);
        let industry =
            calculate_lucro_presumido(&input(BusinessActivity::Industry, dec!(2000000)), &rates);

        assert_eq!(commerce.irpj, industry.irpj);
        assert_eq!(commerce.csll, industry.csll);
        assert_eq!(commerce.adicional_irpj, industry.adicional_irpj);
    }

    // =========================================================================
    // Flat tax tests
    // =========================================================================

    #[test]
    fn default_rates_on_one_million_of_commerce() {
        let result = calculate_lucro_presumido(
            &input(BusinessActivity::Commerce, dec!(1000000)),
            &TaxRates::lucro_presumido_defaults(),
        );

        assert_eq!(result.pis_pasep.amount, dec!(6500));
        assert_eq!(result.cofins.amount, dec!(30000));
        assert_eq!(result.icms.amount, dec!(180000));
        assert_eq!(result.iss.amount, dec!(50000));
        assert_eq!(result.ipi.amount, Decimal::ZERO);
        assert_eq!(result.cpp.amount, dec!(40000));
        assert_eq!(result.inss_terceiros.amount, dec!(11600));
        assert_eq!(result.rat.amount, dec!(4000));
        assert_eq!(result.fgts.amount, dec!(16000));
        assert_eq!(result.total.amount, dec!(360900));
        assert_eq!(result.total.percentage, dec!(0.3609));
    }

    #[test]
    fn exemptions_shrink_pis_cofins_and_icms_bases() {
        let mut data = input(BusinessActivity::Commerce, dec!(1000000));
        data.single_phase_sales_pct = dec!(40);
        data.substitution_sales_pct = dec!(25);

        let result = calculate_lucro_presumido(&data, &TaxRates::lucro_presumido_defaults());

        assert_eq!(result.pis_pasep.amount, dec!(3900));
        assert_eq!(result.cofins.amount, dec!(18000));
        assert_eq!(result.icms.amount, dec!(135000));
        // income taxes still presume on full revenue
        assert_eq!(result.irpj.amount, dec!(12000));
    }

    #[test]
    fn purchase_exemptions_do_not_apply() {
        let mut data = input(BusinessActivity::Commerce, dec!(1000000));
        let rates = TaxRates::lucro_presumido_defaults();
        let before = calculate_lucro_presumido(&data, &rates);

        data.single_phase_purchases_pct = dec!(100);
        data.substitution_purchases_pct = dec!(100);
        data.property_rent = dec!(50000);

        assert_eq!(calculate_lucro_presumido(&data, &rates), before);
    }

    #[test]
    fn custom_rates_are_honored() {
        let mut rates = TaxRates::lucro_presumido_defaults();
        rates.set_rate(TaxKind::Iss, dec!(0.02));
        rates.set_rate(TaxKind::Ipi, dec!(0.10));

        let result =
            calculate_lucro_presumido(&input(BusinessActivity::Industry, dec!(500000)), &rates);

        assert_eq!(result.iss.amount, dec!(10000));
        assert_eq!(result.ipi.amount, dec!(50000));
    }

    #[test]
    fn zero_revenue_keeps_payroll_taxes_with_zero_percentages() {
        let result = calculate_lucro_presumido(
            &input(BusinessActivity::ServicesV, Decimal::ZERO),
            &TaxRates::lucro_presumido_defaults(),
        );

        assert_eq!(result.cpp.amount, dec!(40000));
        assert_eq!(result.irpj.amount, Decimal::ZERO);
        assert_eq!(result.total.amount, dec!(71600));
        assert_eq!(result.cpp.percentage, Decimal::ZERO);
        assert_eq!(result.total.percentage, Decimal::ZERO);
    }
}
