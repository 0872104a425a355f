use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The share of taxable income that fell into one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAllocation {
    /// Where the bracket starts (previous bracket's upper bound, or zero).
    pub lower_bound: Decimal,
    /// Where the bracket ends; `None` for the open-ended top bracket.
    pub upper_bound: Option<Decimal>,
    /// Income taxed at this bracket's rate.
    pub amount: Decimal,
    pub rate: Decimal,
    /// `amount × rate`, unrounded.
    pub tax: Decimal,
}

/// Result of running the progressive engine once.
///
/// `allocations` has one entry per bracket of the table it was computed
/// against, in table order. Brackets the income never reached carry a zero
/// amount, so the breakdown keeps the same shape between recalculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub total_tax: Decimal,
    pub allocations: Vec<BracketAllocation>,
}

impl TaxCalculation {
    /// Sum of income allocated across all brackets.
    pub fn taxed_income(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Rate of the highest bracket that received income, or zero if none did.
    pub fn marginal_rate(&self) -> Decimal {
        self.touched()
            .last()
            .map(|a| a.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Allocations that received a positive amount.
    pub fn touched(&self) -> impl DoubleEndedIterator<Item = &BracketAllocation> {
        self.allocations
            .iter()
            .filter(|a| a.amount > Decimal::ZERO)
    }
}
