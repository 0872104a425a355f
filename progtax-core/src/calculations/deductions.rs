//! Deduction aggregator.
//!
//! Reduces gross income to the taxable base handed to the progressive engine.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual gross income (gross × 12 when the figure is monthly) |
//! | 2    | Dependents deduction: dependents × monthly allowance × 12 |
//! | 3    | Withholding deduction: Step 1 × payroll withholding rate |
//! | 4    | Other deductions (already annual) |
//! | 5    | Total deductions: Step 2 + Step 3 + Step 4 |
//! | 6    | Taxable income: Step 1 - Step 5, minimum 0 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use progtax_core::DeductionConfig;
//! use progtax_core::calculations::{DeductionAggregator, DeductionInput};
//!
//! let aggregator = DeductionAggregator::new(DeductionConfig::default());
//! let figures = aggregator.calculate(&DeductionInput {
//!     gross_income: dec!(5000),
//!     is_monthly: true,
//!     dependent_count: dec!(0),
//!     other_annual_deductions: dec!(0),
//! });
//!
//! assert_eq!(figures.annual_gross_income, dec!(60000));
//! assert_eq!(figures.total_deductions, dec!(6600));
//! assert_eq!(figures.taxable_income, dec!(53400));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::models::{DeductionBreakdown, DeductionConfig, IncomeFigures};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Per-calculation inputs to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionInput {
    /// Gross income, monthly or annual depending on `is_monthly`.
    pub gross_income: Decimal,
    pub is_monthly: bool,
    /// Number of dependents. Kept as a decimal because it arrives through the
    /// same lenient coercion as every other form field.
    pub dependent_count: Decimal,
    pub other_annual_deductions: Decimal,
}

/// Applies the fixed deduction formula with the configured constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeductionAggregator {
    config: DeductionConfig,
}

impl DeductionAggregator {
    pub fn new(config: DeductionConfig) -> Self {
        Self { config }
    }

    /// Runs every step of the formula and returns the resulting figures.
    pub fn calculate(
        &self,
        input: &DeductionInput,
    ) -> IncomeFigures {
        let annual_gross_income = self.annual_gross_income(input.gross_income, input.is_monthly);
        if annual_gross_income < Decimal::ZERO {
            warn!(
                annual_gross_income = %annual_gross_income,
                "annual gross income is negative; taxable income will be zero"
            );
        }

        let deductions = DeductionBreakdown {
            dependents: self.dependents_deduction(input.dependent_count),
            withholding: self.withholding_deduction(annual_gross_income),
            other: input.other_annual_deductions,
        };
        let total_deductions = deductions.total();
        let taxable_income = self.taxable_income(annual_gross_income, total_deductions);

        debug!(
            annual_gross_income = %annual_gross_income,
            total_deductions = %total_deductions,
            taxable_income = %taxable_income,
            "deductions aggregated"
        );

        IncomeFigures {
            annual_gross_income,
            total_deductions,
            taxable_income,
            deductions,
        }
    }

    fn annual_gross_income(
        &self,
        gross_income: Decimal,
        is_monthly: bool,
    ) -> Decimal {
        if is_monthly {
            gross_income.saturating_mul(MONTHS_PER_YEAR)
        } else {
            gross_income
        }
    }

    fn dependents_deduction(
        &self,
        dependent_count: Decimal,
    ) -> Decimal {
        dependent_count
            .saturating_mul(self.config.per_dependent_monthly_deduction)
            .saturating_mul(MONTHS_PER_YEAR)
    }

    fn withholding_deduction(
        &self,
        annual_gross_income: Decimal,
    ) -> Decimal {
        annual_gross_income.saturating_mul(self.config.payroll_withholding_rate)
    }

    /// Clamped at zero; deductions never make taxable income negative.
    fn taxable_income(
        &self,
        annual_gross_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        let difference = annual_gross_income.saturating_sub(total_deductions);
        if difference < Decimal::ZERO && annual_gross_income > Decimal::ZERO {
            warn!(
                annual_gross_income = %annual_gross_income,
                total_deductions = %total_deductions,
                "deductions exceed income; taxable income clamped to zero"
            );
        }
        non_negative(difference)
    }
}

/// Reduces gross income to taxable income.
///
/// Free-function form of [`DeductionAggregator::calculate`] taking every
/// constant explicitly.
pub fn compute_taxable_income(
    gross_income: Decimal,
    is_monthly: bool,
    dependent_count: Decimal,
    per_dependent_monthly_deduction: Decimal,
    payroll_withholding_rate: Decimal,
    other_annual_deductions: Decimal,
) -> IncomeFigures {
    let aggregator = DeductionAggregator::new(DeductionConfig {
        per_dependent_monthly_deduction,
        payroll_withholding_rate,
    });
    aggregator.calculate(&DeductionInput {
        gross_income,
        is_monthly,
        dependent_count,
        other_annual_deductions,
    })
}
