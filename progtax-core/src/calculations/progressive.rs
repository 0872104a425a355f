//! Progressive bracket tax engine.
//!
//! Taxable income is split across the brackets of a [`BracketTable`] in
//! ascending order. Each bracket only taxes the slice of income that lies
//! between its lower bound (the previous bracket's upper bound) and its own
//! upper bound; the open-ended top bracket takes whatever is left.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use progtax_core::BracketTable;
//! use progtax_core::calculations::ProgressiveTax;
//!
//! let table = BracketTable::default();
//! let result = ProgressiveTax::new(&table).calculate(dec!(30000));
//!
//! // 22847.76 at 0% + 7152.24 at 7.5%
//! assert_eq!(result.total_tax, dec!(536.418));
//! assert_eq!(result.allocations[1].amount, dec!(7152.24));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::models::{BracketAllocation, BracketTable, TaxCalculation};

/// Calculator bound to one bracket table.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTax<'a> {
    table: &'a BracketTable,
}

impl<'a> ProgressiveTax<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Allocates `taxable_income` across the table and sums the tax.
    ///
    /// Income at or below zero allocates nothing. Every bracket gets an
    /// allocation entry, zero-valued when the income does not reach it.
    /// No rounding is applied.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> TaxCalculation {
        let mut remaining = taxable_income;
        let mut lower_bound = Decimal::ZERO;
        let mut total_tax = Decimal::ZERO;
        let mut allocations = Vec::with_capacity(self.table.len());

        for bracket in self.table.iter() {
            let amount = if remaining <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                self.bracket_amount(lower_bound, bracket.upper_bound, remaining)
            };
            let tax = amount * bracket.rate;

            allocations.push(BracketAllocation {
                lower_bound,
                upper_bound: bracket.upper_bound,
                amount,
                rate: bracket.rate,
                tax,
            });

            total_tax += tax;
            remaining -= amount;
            if let Some(upper_bound) = bracket.upper_bound {
                lower_bound = upper_bound;
            }
        }

        debug!(
            taxable_income = %taxable_income,
            total_tax = %total_tax,
            brackets = allocations.len(),
            "progressive tax calculated"
        );

        TaxCalculation {
            total_tax,
            allocations,
        }
    }

    /// Portion of `remaining` that fits in the bracket `[lower_bound, upper_bound)`.
    fn bracket_amount(
        &self,
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        remaining: Decimal,
    ) -> Decimal {
        let fits = match upper_bound {
            Some(upper_bound) => (upper_bound - lower_bound).min(remaining),
            None => remaining,
        };
        non_negative(fits)
    }
}

/// Computes total tax and per-bracket breakdown for `taxable_income`.
///
/// Shorthand for `ProgressiveTax::new(brackets).calculate(taxable_income)`.
pub fn compute_tax(
    taxable_income: Decimal,
    brackets: &BracketTable,
) -> TaxCalculation {
    ProgressiveTax::new(brackets).calculate(taxable_income)
}
