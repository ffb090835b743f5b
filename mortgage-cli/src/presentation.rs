//! Console rendering of projection results.

use std::fmt::Write;

use mortgage_core::calculations::common::round_half_up;
use mortgage_core::calculations::{ProjectionResult, ProjectionSeries, ProjectionSummary, ProjectionYear};
use rust_decimal::Decimal;

/// Number of values shown at each end of a series preview.
const PREVIEW_LEN: usize = 5;

const BANNER_WIDTH: usize = 50;

/// Formats a value with exactly two decimal places, rounding half up.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// `label: value` with two decimal places.
pub fn format_scalar(
    label: &str,
    value: Decimal,
) -> String {
    format!("{label}: {}", format_amount(value))
}

/// The first and last five values of a series, comma-joined with an ellipsis
/// between them. Series of ten or fewer values are shown in full.
pub fn format_series_preview(values: &[Decimal]) -> String {
    let join = |part: &[Decimal]| {
        part.iter()
            .map(|v| format_amount(*v))
            .collect::<Vec<_>>()
            .join(", ")
    };

    if values.len() <= PREVIEW_LEN * 2 {
        return join(values);
    }
    format!(
        "{} ... {}",
        join(&values[..PREVIEW_LEN]),
        join(&values[values.len() - PREVIEW_LEN..])
    )
}

pub fn format_summary(summary: &ProjectionSummary) -> String {
    summary
        .entries()
        .into_iter()
        .map(|(label, value)| format_scalar(label, value) + "\n")
        .collect()
}

pub fn format_series(series: &ProjectionSeries) -> String {
    series
        .entries()
        .into_iter()
        .map(|(label, values)| format!("{label}: {}\n", format_series_preview(values)))
        .collect()
}

/// A fixed-width table with one row per loan year, annual amounts.
pub fn format_yearly_table(yearly: &[ProjectionYear]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>12} {:>11} {:>11} {:>11} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "year",
        "income",
        "writeoff",
        "tax",
        "savings",
        "takehome",
        "house costs",
        "leftover",
        "home value",
        "balance",
    );
    for row in yearly {
        let _ = writeln!(
            out,
            "{:>4} {:>12} {:>11} {:>11} {:>11} {:>12} {:>12} {:>12} {:>12} {:>12}",
            row.year,
            format_amount(row.stated_income),
            format_amount(row.interest_writeoff),
            format_amount(row.income_tax),
            format_amount(row.tax_savings),
            format_amount(row.takehome),
            format_amount(row.house_costs),
            format_amount(row.leftover),
            format_amount(row.home_value),
            format_amount(row.loan_balance),
        );
    }
    out
}

/// Full console report: banner, summary, series previews and optionally the
/// yearly table.
pub fn render(
    result: &ProjectionResult,
    include_yearly: bool,
) -> String {
    let banner = "*".repeat(BANNER_WIDTH);
    let mut out = format!("\n{banner}\n");
    out.push_str(&format_summary(&result.summary));
    out.push_str(&format!("{banner}\n"));
    out.push_str(&format_series(&result.series));
    if include_yearly {
        out.push_str(&format!("{banner}\n"));
        out.push_str(&format_yearly_table(&result.yearly));
    }
    out
}
