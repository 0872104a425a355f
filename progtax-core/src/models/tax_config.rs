use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::bracket_table::default_brackets;
use crate::models::{Bracket, BracketTable, DeductionConfig, DeductionConfigError, InvalidBracketTable};

/// Errors raised while turning a [`TaxConfig`] into a [`TaxProfile`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConfigError {
    #[error("invalid bracket table: {0}")]
    Brackets(#[from] InvalidBracketTable),

    #[error("invalid deduction settings: {0}")]
    Deductions(#[from] DeductionConfigError),
}

/// Externally tunable parameters, as read from a config file.
///
/// Every field falls back to its built-in default when omitted, so an empty
/// document yields the default schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    pub brackets: Vec<Bracket>,
    pub per_dependent_monthly_deduction: Decimal,
    pub payroll_withholding_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        let deductions = DeductionConfig::default();
        Self {
            brackets: default_brackets(),
            per_dependent_monthly_deduction: deductions.per_dependent_monthly_deduction,
            payroll_withholding_rate: deductions.payroll_withholding_rate,
        }
    }
}

impl TaxConfig {
    /// Validates the configuration once and returns the checked profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaxConfigError`] if the bracket table or the deduction
    /// constants are invalid.
    pub fn build(self) -> Result<TaxProfile, TaxConfigError> {
        let deductions = DeductionConfig {
            per_dependent_monthly_deduction: self.per_dependent_monthly_deduction,
            payroll_withholding_rate: self.payroll_withholding_rate,
        };
        deductions.validate()?;
        let brackets = BracketTable::new(self.brackets)?;

        Ok(TaxProfile {
            brackets,
            deductions,
        })
    }
}

/// Validated configuration shared by every recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxProfile {
    pub brackets: BracketTable,
    pub deductions: DeductionConfig,
}
