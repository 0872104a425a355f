use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The individual deductions that make up [`IncomeFigures::total_deductions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Dependents × monthly allowance × 12.
    pub dependents: Decimal,
    /// Annual gross income × payroll withholding rate.
    pub withholding: Decimal,
    /// Caller supplied annual deductions.
    pub other: Decimal,
}

impl DeductionBreakdown {
    pub fn total(&self) -> Decimal {
        self.dependents
            .saturating_add(self.withholding)
            .saturating_add(self.other)
    }
}

/// Output of the deduction aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeFigures {
    pub annual_gross_income: Decimal,
    pub total_deductions: Decimal,
    /// Never negative.
    pub taxable_income: Decimal,
    pub deductions: DeductionBreakdown,
}
