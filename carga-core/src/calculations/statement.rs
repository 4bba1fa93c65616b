//! Simplified income statement (DRE) derived from a regime result.

use rust_decimal::Decimal;

use crate::calculations::common::{MONTHS_PER_YEAR, ratio};
use crate::models::{FinancialInput, IncomeStatement, RegimeResult, TaxKind};

/// Walks `input` down from gross revenue to net profit, deducting the
/// taxes in `result` at the line they belong to.
///
/// The two margins guard their denominators differently: the revenue
/// margin is zero only without revenue, while the gross-profit margin is
/// zero whenever gross profit is not positive.
pub fn derive_statement(
    input: &FinancialInput,
    result: &RegimeResult,
) -> IncomeStatement {
    let gross_revenue = input.gross_revenue;
    let revenue_deductions = result.sum_where(|kind| kind.is_revenue_deduction());
    let net_revenue = gross_revenue - revenue_deductions;
    let cost_of_sales = input.variable_costs;
    let gross_profit = net_revenue - cost_of_sales;

    let salaries = input.payroll;
    let payroll_charges = result.sum_where(|kind| kind.is_payroll_charge());
    let operating_expenses = input.operating_expenses;
    let profit_before_income_taxes = gross_profit - salaries - payroll_charges - operating_expenses;

    let income_taxes = result.sum_where(|kind| kind.is_income_tax());
    let net_profit = profit_before_income_taxes - income_taxes;

    IncomeStatement {
        gross_revenue,
        revenue_deductions,
        net_revenue,
        cost_of_sales,
        gross_profit,
        salaries,
        payroll_charges,
        operating_expenses,
        profit_before_income_taxes,
        income_taxes,
        net_profit,
        monthly_profit: net_profit / MONTHS_PER_YEAR,
        margin_over_revenue: ratio(net_profit, gross_revenue),
        margin_over_gross_profit: ratio(net_profit, gross_profit),
    }
}

/// IPI is part of the total burden but no statement line carries it.
pub fn unallocated_taxes(result: &RegimeResult) -> Decimal {
    result.amount(TaxKind::Ipi)
}
