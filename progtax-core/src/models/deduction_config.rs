use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when deduction constants are out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionConfigError {
    /// The withholding rate must be between 0 and 1.
    #[error("payroll withholding rate must be between 0 and 1, got {0}")]
    InvalidWithholdingRate(Decimal),

    /// The per-dependent allowance must be non-negative.
    #[error("per-dependent monthly deduction must be non-negative, got {0}")]
    NegativeDependentDeduction(Decimal),
}

/// Constants used by the deduction aggregator.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use progtax_core::DeductionConfig;
///
/// let config = DeductionConfig::default();
///
/// assert_eq!(config.per_dependent_monthly_deduction, dec!(189.59));
/// assert_eq!(config.payroll_withholding_rate, dec!(0.11));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    /// Monthly allowance per dependent, annualised by the aggregator.
    pub per_dependent_monthly_deduction: Decimal,

    /// Flat share of annual gross income deducted as payroll withholding.
    pub payroll_withholding_rate: Decimal,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            per_dependent_monthly_deduction: Decimal::new(18959, 2),
            payroll_withholding_rate: Decimal::new(11, 2),
        }
    }
}

impl DeductionConfig {
    /// Checks that both constants are in range.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionConfigError`] if:
    /// - `payroll_withholding_rate` is not in [0, 1]
    /// - `per_dependent_monthly_deduction` is negative
    pub fn validate(&self) -> Result<(), DeductionConfigError> {
        if self.payroll_withholding_rate < Decimal::ZERO
            || self.payroll_withholding_rate > Decimal::ONE
        {
            return Err(DeductionConfigError::InvalidWithholdingRate(
                self.payroll_withholding_rate,
            ));
        }
        if self.per_dependent_monthly_deduction < Decimal::ZERO {
            return Err(DeductionConfigError::NegativeDependentDeduction(
                self.per_dependent_monthly_deduction,
            ));
        }
        Ok(())
    }
}
