//! Side-by-side evaluation of the three regimes for one input.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::calculations::brackets::{bracket_table, lookup_bracket};
use crate::calculations::regimes::{
    calculate_lucro_presumido, calculate_lucro_real, calculate_simples_nacional,
};
use crate::calculations::statement::derive_statement;
use crate::models::{Bracket, FinancialInput, IncomeStatement, RateConfiguration, Regime, RegimeResult};

/// One value per regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeSet<T> {
    pub simples_nacional: T,
    pub lucro_presumido: T,
    pub lucro_real: T,
}

impl<T> RegimeSet<T> {
    pub fn get(
        &self,
        regime: Regime,
    ) -> &T {
        match regime {
            Regime::SimplesNacional => &self.simples_nacional,
            Regime::LucroPresumido => &self.lucro_presumido,
            Regime::LucroReal => &self.lucro_real,
        }
    }

    /// Values in [`Regime::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Regime, &T)> + '_ {
        Regime::ALL.into_iter().map(move |regime| (regime, self.get(regime)))
    }

    pub fn map<U>(
        &self,
        mut f: impl FnMut(Regime, &T) -> U,
    ) -> RegimeSet<U> {
        RegimeSet {
            simples_nacional: f(Regime::SimplesNacional, &self.simples_nacional),
            lucro_presumido: f(Regime::LucroPresumido, &self.lucro_presumido),
            lucro_real: f(Regime::LucroReal, &self.lucro_real),
        }
    }
}

/// Everything needed to present a comparison: per-regime results and
/// statements, plus the Simples Nacional table and bracket that applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub results: RegimeSet<RegimeResult>,
    pub statements: RegimeSet<IncomeStatement>,
    pub bracket_table: &'static [Bracket],
    pub bracket: &'static Bracket,
}

impl Comparison {
    /// Regimes ordered by total burden, cheapest first. Ties keep
    /// [`Regime::ALL`] order.
    pub fn ranking(&self) -> Vec<(Regime, &RegimeResult)> {
        let mut ranking: Vec<_> = self.results.iter().collect();
        ranking.sort_by(|(_, a), (_, b)| a.total.amount.cmp(&b.total.amount));
        ranking
    }

    /// The cheapest regime.
    pub fn best(&self) -> Regime {
        self.ranking()[0].0
    }

    /// How much the cheapest regime saves over the runner-up. Zero on a tie.
    pub fn savings(&self) -> Decimal {
        let ranking = self.ranking();
        ranking[1].1.total.amount - ranking[0].1.total.amount
    }

    /// How much switching from `current` to the cheapest regime saves.
    pub fn savings_over(
        &self,
        current: Regime,
    ) -> Decimal {
        self.results.get(current).total.amount - self.results.get(self.best()).total.amount
    }
}

/// Runs all three calculators and derives an income statement for each.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::{Annex, BusinessActivity, FinancialInput, RateConfiguration, Regime};
/// use carga_core::run_calculations;
///
/// let input = FinancialInput {
///     gross_revenue: dec!(500000),
///     variable_costs: dec!(250000),
///     operating_expenses: dec!(60000),
///     payroll: dec!(80000),
///     ..FinancialInput::new(Annex::I, BusinessActivity::Commerce)
/// };
///
/// let comparison = run_calculations(&input, &RateConfiguration::default());
///
/// assert_eq!(comparison.best(), Regime::SimplesNacional);
/// assert_eq!(comparison.bracket.nominal_rate, dec!(0.095));
/// ```
pub fn run_calculations(
    input: &FinancialInput,
    rates: &RateConfiguration,
) -> Comparison {
    let results = RegimeSet {
        simples_nacional: calculate_simples_nacional(input),
        lucro_presumido: calculate_lucro_presumido(input, &rates.lucro_presumido),
        lucro_real: calculate_lucro_real(input, &rates.lucro_real),
    };
    let statements = results.map(|_, result| derive_statement(input, result));

    let comparison = Comparison {
        results,
        statements,
        bracket_table: bracket_table(input.annex),
        bracket: lookup_bracket(input.annex, input.gross_revenue),
    };
    info!(
        revenue = %input.gross_revenue,
        best = comparison.best().as_str(),
        savings = %comparison.savings(),
        "regimes compared"
    );
    comparison
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Annex, BusinessActivity, TaxBreakdown};

    fn default_scenario() -> FinancialInput {
        FinancialInput {
            gross_revenue: dec!(500000),
            variable_costs: dec!(250000),
            operating_expenses: dec!(60000),
            payroll: dec!(80000),
            ..FinancialInput::new(Annex::I, BusinessActivity::Commerce)
        }
    }

    fn result_with_total(
        regime: Regime,
        fgts: Decimal,
    ) -> RegimeResult {
        let breakdown = TaxBreakdown {
            fgts,
            ..Default::default()
        };
        RegimeResult::from_breakdown(regime, &breakdown, dec!(100000))
    }

    fn comparison_with_totals(
        simples: Decimal,
        presumido: Decimal,
        real: Decimal,
    ) -> Comparison {
        let results = RegimeSet {
            simples_nacional: result_with_total(Regime::SimplesNacional, simples),
            lucro_presumido: result_with_total(Regime::LucroPresumido, presumido),
            lucro_real: result_with_total(Regime::LucroReal, real),
        };
        let input = FinancialInput::default();
        Comparison {
            statements: results.map(|_, result| derive_statement(&input, result)),
            results,
            bracket_table: bracket_table(Annex::I),
            bracket: lookup_bracket(Annex::I, Decimal::ZERO),
        }
    }

    // =========================================================================
    // RegimeSet tests
    // =========================================================================

    #[test]
    fn regime_set_iterates_in_declaration_order() {
        let set = RegimeSet {
            simples_nacional: 1,
            lucro_presumido: 2,
            lucro_real: 3,
        };

        let collected: Vec<_> = set.iter().map(|(regime, v)| (regime, *v)).collect();

        assert_eq!(
            collected,
            vec![
                (Regime::SimplesNacional, 1),
                (Regime::LucroPresumido, 2),
                (Regime::LucroReal, 3),
            ]
        );
        assert_eq!(set.map(|_, v| v * 10).lucro_real, 30);
    }

    // =========================================================================
    // Ranking tests
    // =========================================================================

    #[test]
    fn ranking_sorts_by_total_ascending() {
        let comparison = comparison_with_totals(dec!(300), dec!(100), dec!(200));

        let order: Vec<_> = comparison.ranking().into_iter().map(|(r, _)| r).collect();

        assert_eq!(
            order,
            vec![Regime::LucroPresumido, Regime::LucroReal, Regime::SimplesNacional]
        );
        assert_eq!(comparison.best(), Regime::LucroPresumido);
        assert_eq!(comparison.savings(), dec!(100));
    }

    #[test]
    fn ties_keep_declaration_order_and_save_nothing() {
        let comparison = comparison_with_totals(dec!(500), dec!(100), dec!(100));

        assert_eq!(comparison.best(), Regime::LucroPresumido);
        assert_eq!(comparison.ranking()[1].0, Regime::LucroReal);
        assert_eq!(comparison.savings(), Decimal::ZERO);
    }

    #[test]
    fn savings_over_current_regime() {
        let comparison = comparison_with_totals(dec!(300), dec!(100), dec!(200));

        assert_eq!(comparison.savings_over(Regime::SimplesNacional), dec!(200));
        assert_eq!(comparison.savings_over(Regime::LucroPresumido), Decimal::ZERO);
    }

    // =========================================================================
    // run_calculations tests
    // =========================================================================

    #[test]
    fn run_calculations_reports_the_applied_bracket() {
        let comparison = run_calculations(&default_scenario(), &RateConfiguration::default());

        assert_eq!(comparison.bracket_table.len(), 6);
        assert_eq!(comparison.bracket, &comparison.bracket_table[2]);
        assert_eq!(comparison.bracket.lower_bound, dec!(360000.01));
    }

    #[test]
    fn run_calculations_builds_one_statement_per_result() {
        let input = default_scenario();
        let comparison = run_calculations(&input, &RateConfiguration::default());

        for (regime, result) in comparison.results.iter() {
            assert_eq!(result.regime, regime);
            assert_eq!(
                comparison.statements.get(regime),
                &derive_statement(&input, result)
            );
        }
    }

    #[test]
    fn default_scenario_favors_simples() {
        let comparison = run_calculations(&default_scenario(), &RateConfiguration::default());

        assert_eq!(comparison.results.simples_nacional.total.amount, dec!(40040));
        assert_eq!(comparison.best(), Regime::SimplesNacional);
        assert!(comparison.savings() > Decimal::ZERO);
    }

    #[test]
    fn comparison_serializes_to_json() {
        let comparison = run_calculations(&default_scenario(), &RateConfiguration::default());

        let json = serde_json::to_value(&comparison).unwrap();

        assert_eq!(json["results"]["simples_nacional"]["regime"], "simples-nacional");
        assert_eq!(json["bracket_table"].as_array().map(Vec::len), Some(6));
        assert!(json["statements"]["lucro_real"]["net_profit"].is_string());
    }
}
