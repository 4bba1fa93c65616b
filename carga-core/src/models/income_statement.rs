use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Simplified annual income statement ("DRE") under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub gross_revenue: Decimal,
    /// PIS + COFINS + ICMS + ISS.
    pub revenue_deductions: Decimal,
    pub net_revenue: Decimal,
    /// CMV / CSP / CSV.
    pub cost_of_sales: Decimal,
    pub gross_profit: Decimal,
    pub salaries: Decimal,
    /// CPP + INSS terceiros + RAT + FGTS.
    pub payroll_charges: Decimal,
    pub operating_expenses: Decimal,
    pub profit_before_income_taxes: Decimal,
    /// IRPJ + adicional + CSLL.
    pub income_taxes: Decimal,
    pub net_profit: Decimal,
    pub monthly_profit: Decimal,
    /// Net profit over gross revenue; zero without revenue.
    pub margin_over_revenue: Decimal,
    /// Net profit over gross profit; zero unless gross profit is positive.
    pub margin_over_gross_profit: Decimal,
}
