//! Plain-text rendering of comparisons, bracket tables and saved
//! simulations.
//!
//! Amounts are shown in Brazilian notation (`R$ 1.234.567,89`) and
//! rounded half-up to cents only here; the engine keeps full precision.

use std::fmt::Write;

use carga_core::calculations::common::round_half_up;
use carga_core::calculations::statement::unallocated_taxes;
use carga_core::{
    Annex, Comparison, IncomeStatement, Regime, RegimeSet, SavedSimulation, TaxKind, bracket_table,
};
use rust_decimal::Decimal;

const LABEL_WIDTH: usize = 34;
const COLUMN_WIDTH: usize = 30;

/// Groups the integer part of an already-rounded, non-negative amount
/// with `.` and uses `,` before the cents.
fn brazilian_digits(value: Decimal) -> String {
    let text = format!("{value:.2}");
    let (integer, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("{grouped},{cents}")
}

/// `R$ 1.234.567,89`; negative amounts get a leading `-`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}R$ {}", brazilian_digits(rounded.abs()))
}

/// A fraction as a percentage with two places: `0.1234` becomes `12,34%`.
pub fn format_percent(fraction: Decimal) -> String {
    let rounded = round_half_up(fraction * Decimal::ONE_HUNDRED);
    // -0.001% would otherwise print as -0,00%
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{rounded:.2}%").replace('.', ",")
}

fn header_row(
    out: &mut String,
    title: &str,
) {
    let _ = write!(out, "{title:<LABEL_WIDTH$}");
    for regime in Regime::ALL {
        let _ = write!(out, "{:>COLUMN_WIDTH$}", regime.as_str());
    }
    out.push('\n');
    out.push_str(&"-".repeat(LABEL_WIDTH + COLUMN_WIDTH * Regime::ALL.len()));
    out.push('\n');
}

fn value_row(
    out: &mut String,
    label: &str,
    cells: impl IntoIterator<Item = String>,
) {
    let _ = write!(out, "{label:<LABEL_WIDTH$}");
    for cell in cells {
        let _ = write!(out, "{cell:>COLUMN_WIDTH$}");
    }
    out.push('\n');
}

fn render_bracket_summary(
    out: &mut String,
    comparison: &Comparison,
) {
    let revenue = comparison.statements.simples_nacional.gross_revenue;
    let bracket = comparison.bracket;
    let position = comparison
        .bracket_table
        .iter()
        .position(|candidate| candidate == bracket)
        .map_or(0, |index| index + 1);

    let _ = writeln!(
        out,
        "Simples Nacional: faixa {position} ({} a {}), alíquota nominal {}, efetiva {}",
        format_currency(bracket.lower_bound),
        format_currency(bracket.upper_bound),
        format_percent(bracket.nominal_rate),
        format_percent(bracket.effective_rate(revenue)),
    );
}

fn render_tax_table(
    out: &mut String,
    comparison: &Comparison,
) {
    let results = &comparison.results;
    header_row(out, "Tributo");
    for kind in TaxKind::ALL {
        value_row(
            out,
            kind.label(),
            results.iter().map(|(_, result)| {
                let tax = result.get(kind);
                format!("{} ({})", format_currency(tax.amount), format_percent(tax.percentage))
            }),
        );
    }
    value_row(
        out,
        "Total",
        results.iter().map(|(_, result)| {
            format!(
                "{} ({})",
                format_currency(result.total.amount),
                format_percent(result.total.percentage)
            )
        }),
    );
}

fn statement_rows(
    out: &mut String,
    statements: &RegimeSet<IncomeStatement>,
    label: &str,
    field: impl Fn(&IncomeStatement) -> Decimal,
) {
    value_row(
        out,
        label,
        statements.iter().map(|(_, statement)| format_currency(field(statement))),
    );
}

fn render_statements(
    out: &mut String,
    comparison: &Comparison,
) {
    let statements = &comparison.statements;
    header_row(out, "DRE");
    statement_rows(out, statements, "Receita bruta", |s| s.gross_revenue);
    statement_rows(out, statements, "(-) Deduções da receita", |s| s.revenue_deductions);
    statement_rows(out, statements, "Receita líquida", |s| s.net_revenue);
    statement_rows(out, statements, "(-) Custo das vendas", |s| s.cost_of_sales);
    statement_rows(out, statements, "Lucro bruto", |s| s.gross_profit);
    statement_rows(out, statements, "(-) Salários", |s| s.salaries);
    statement_rows(out, statements, "(-) Encargos sobre a folha", |s| s.payroll_charges);
    statement_rows(out, statements, "(-) Despesas operacionais", |s| s.operating_expenses);
    statement_rows(out, statements, "Lucro antes do IRPJ/CSLL", |s| {
        s.profit_before_income_taxes
    });
    statement_rows(out, statements, "(-) IRPJ e CSLL", |s| s.income_taxes);
    statement_rows(out, statements, "Lucro líquido", |s| s.net_profit);
    statement_rows(out, statements, "Lucro mensal", |s| s.monthly_profit);
    value_row(
        out,
        "Margem sobre a receita",
        statements
            .iter()
            .map(|(_, s)| format_percent(s.margin_over_revenue)),
    );
    value_row(
        out,
        "Margem sobre o lucro bruto",
        statements
            .iter()
            .map(|(_, s)| format_percent(s.margin_over_gross_profit)),
    );

    if comparison
        .results
        .iter()
        .any(|(_, result)| unallocated_taxes(result) > Decimal::ZERO)
    {
        value_row(
            out,
            "IPI (fora da DRE)",
            comparison
                .results
                .iter()
                .map(|(_, result)| format_currency(unallocated_taxes(result))),
        );
    }
}

fn render_summary(
    out: &mut String,
    comparison: &Comparison,
    current: Option<Regime>,
) {
    out.push_str("Resumo\n");
    for (rank, (regime, result)) in comparison.ranking().into_iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<20}{:>20} ({})",
            rank + 1,
            regime.as_str(),
            format_currency(result.total.amount),
            format_percent(result.total.percentage)
        );
    }

    let best = comparison.best();
    let _ = writeln!(out, "Melhor opção: {best}");

    let savings = comparison.savings();
    if savings > Decimal::ZERO {
        let _ = writeln!(
            out,
            "Economia sobre a segunda opção: {}",
            format_currency(savings)
        );
    }

    if let Some(current) = current.filter(|current| *current != best) {
        let savings = comparison.savings_over(current);
        if savings > Decimal::ZERO {
            let _ = writeln!(
                out,
                "Economia ao migrar de {current}: {}",
                format_currency(savings)
            );
        }
    }
}

/// Full comparison report: bracket, per-tax table, income statements and
/// ranking. `current` is the regime the company is enrolled in, if known.
pub fn render_comparison(
    comparison: &Comparison,
    current: Option<Regime>,
) -> String {
    let mut out = String::new();
    render_bracket_summary(&mut out, comparison);
    out.push('\n');
    render_tax_table(&mut out, comparison);
    out.push('\n');
    render_statements(&mut out, comparison);
    out.push('\n');
    render_summary(&mut out, comparison, current);
    out
}

pub fn render_bracket_table(annex: Annex) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{annex}");
    let _ = writeln!(
        out,
        "{:<6}{:>20}{:>20}{:>12}{:>20}",
        "Faixa", "De", "Até", "Alíquota", "Dedução"
    );
    for (index, bracket) in bracket_table(annex).iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<6}{:>20}{:>20}{:>12}{:>20}",
            index + 1,
            format_currency(bracket.lower_bound),
            format_currency(bracket.upper_bound),
            format_percent(bracket.nominal_rate),
            format_currency(bracket.deduction),
        );
    }
    out
}

/// One-line header shown above a saved simulation's comparison.
pub fn render_simulation_header(simulation: &SavedSimulation) -> String {
    format!(
        "#{} {} ({}), enquadramento atual: {}, {} {}\n",
        simulation.id,
        simulation.company_name,
        simulation.cnpj,
        simulation.current_regime,
        simulation.input.annex,
        simulation.input.activity,
    )
}

pub fn render_simulation_list(simulations: &[SavedSimulation]) -> String {
    if simulations.is_empty() {
        return "Nenhuma simulação salva.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<32}{:<20}{:<18}{:>20}  {}",
        "ID", "Empresa", "CNPJ", "Regime atual", "Receita bruta", "Atualizada em"
    );
    for simulation in simulations {
        let _ = writeln!(
            out,
            "{:>6}  {:<32}{:<20}{:<18}{:>20}  {}",
            simulation.id,
            simulation.company_name,
            simulation.cnpj,
            simulation.current_regime.as_str(),
            format_currency(simulation.input.gross_revenue),
            simulation
                .updated_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M"),
        );
    }
    out
}
