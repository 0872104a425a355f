//! Plain-text rendering of an estimate.

use std::fmt;

use progtax_core::calculations::Estimate;
use progtax_core::calculations::common::{rate_as_percent, round_half_up};
use rust_decimal::Decimal;

/// Formats a money amount with two decimals and comma thousands separators.
pub fn format_amount(value: Decimal) -> String {
    let rounded = format!("{:.2}", round_half_up(value));
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{fraction}")
}

/// Formats a rate in [0, 1] as a percentage rounded half-up to two decimals.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate_as_percent(rate)))
}

/// Summary block followed by the per-bracket table.
pub struct Report<'a>(pub &'a Estimate);

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let estimate = self.0;
        let figures = &estimate.figures;

        writeln!(f, "Summary")?;
        writeln!(f, "  Annual income:     {:>16}", format_amount(figures.annual_gross_income))?;
        writeln!(f, "  Total deductions:  {:>16}", format_amount(figures.total_deductions))?;
        writeln!(f, "    dependents       {:>16}", format_amount(figures.deductions.dependents))?;
        writeln!(f, "    withholding      {:>16}", format_amount(figures.deductions.withholding))?;
        writeln!(f, "    other            {:>16}", format_amount(figures.deductions.other))?;
        writeln!(f, "  Taxable base:      {:>16}", format_amount(figures.taxable_income))?;
        writeln!(f, "  Estimated tax:     {:>16}", format_amount(estimate.tax.total_tax))?;
        writeln!(f, "  Effective rate:    {:>16}", format_rate(estimate.effective_rate()))?;
        writeln!(f)?;

        writeln!(f, "Breakdown by bracket")?;
        writeln!(f, "  {:>16}  {:>8}  {:>16}", "Amount", "Rate", "Tax")?;
        for allocation in &estimate.tax.allocations {
            writeln!(
                f,
                "  {:>16}  {:>8}  {:>16}",
                format_amount(allocation.amount),
                format_rate(allocation.rate),
                format_amount(allocation.tax),
            )?;
        }

        Ok(())
    }
}

/// Renders the summary block followed by the per-bracket table.
pub fn render(estimate: &Estimate) -> String {
    Report(estimate).to_string()
}
