use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Annex, BusinessActivity};

/// Annualized company figures fed to every regime calculator.
///
/// Amounts are non-negative currency values. The four `*_pct` fields are
/// whole-number percentages (0–100); use the `*_fraction` helpers to read
/// them as fractions. Nothing here is validated: coercing missing or
/// malformed input is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInput {
    /// Simples Nacional annex used for the bracket lookup.
    pub annex: Annex,
    /// Activity category driving the Lucro Presumido presumption.
    pub activity: BusinessActivity,

    pub gross_revenue: Decimal,
    /// Cost of goods or services sold.
    pub variable_costs: Decimal,
    pub operating_expenses: Decimal,
    pub payroll: Decimal,

    // PIS/COFINS credit-eligible expenses (Lucro Real)
    pub property_rent: Decimal,
    pub equipment_lease: Decimal,
    pub electricity: Decimal,
    pub machinery_depreciation: Decimal,
    pub building_depreciation: Decimal,
    pub third_party_services: Decimal,

    /// Share of sales taxed under single-phase PIS/COFINS.
    pub single_phase_sales_pct: Decimal,
    /// Share of sales under ICMS tax substitution.
    pub substitution_sales_pct: Decimal,
    /// Share of purchases taxed under single-phase PIS/COFINS.
    pub single_phase_purchases_pct: Decimal,
    /// Share of purchases under ICMS tax substitution.
    pub substitution_purchases_pct: Decimal,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

impl FinancialInput {
    /// An all-zero input for the given annex and activity.
    pub fn new(
        annex: Annex,
        activity: BusinessActivity,
    ) -> Self {
        Self {
            annex,
            activity,
            ..Default::default()
        }
    }

    /// Sum of the six expense categories that generate PIS/COFINS credits
    /// at face value.
    pub fn credit_eligible_expenses(&self) -> Decimal {
        self.property_rent
            + self.equipment_lease
            + self.electricity
            + self.machinery_depreciation
            + self.building_depreciation
            + self.third_party_services
    }

    pub fn single_phase_sales_fraction(&self) -> Decimal {
        self.single_phase_sales_pct / HUNDRED
    }

    pub fn substitution_sales_fraction(&self) -> Decimal {
        self.substitution_sales_pct / HUNDRED
    }

    pub fn single_phase_purchases_fraction(&self) -> Decimal {
        self.single_phase_purchases_pct / HUNDRED
    }

    pub fn substitution_purchases_fraction(&self) -> Decimal {
        self.substitution_purchases_pct / HUNDRED
    }
}
