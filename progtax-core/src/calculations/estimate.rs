//! Recomputation of a full estimate from form state.
//!
//! Taxable income and tax are pure functions of the current form. The
//! presentation layer calls [`TaxEstimator::recompute`] whenever any field
//! changes; nothing is cached between calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{DeductionAggregator, DeductionInput, ProgressiveTax};
use crate::models::{BracketTable, IncomeFigures, TaxCalculation, TaxProfile};
use crate::parse::parse_lenient_number;

/// Raw form state, exactly as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateForm {
    pub gross_income: String,
    /// `true` when `gross_income` is a monthly figure.
    pub is_monthly: bool,
    pub dependents: String,
    /// Annual amount.
    pub other_deductions: String,
    /// Use the built-in schedule instead of the profile's bracket table.
    pub use_default_brackets: bool,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            gross_income: "5000".to_string(),
            is_monthly: true,
            dependents: "0".to_string(),
            other_deductions: "0".to_string(),
            use_default_brackets: true,
        }
    }
}

impl EstimateForm {
    /// Coerces the text fields into aggregator input.
    pub fn to_input(&self) -> DeductionInput {
        DeductionInput {
            gross_income: parse_lenient_number(&self.gross_income),
            is_monthly: self.is_monthly,
            dependent_count: parse_lenient_number(&self.dependents),
            other_annual_deductions: parse_lenient_number(&self.other_deductions),
        }
    }
}

/// Everything the presentation layer displays for one form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub figures: IncomeFigures,
    pub tax: TaxCalculation,
}

impl Estimate {
    /// Total tax as a share of taxable income; zero when there is no taxable income.
    pub fn effective_rate(&self) -> Decimal {
        if self.figures.taxable_income > Decimal::ZERO {
            self.tax.total_tax / self.figures.taxable_income
        } else {
            Decimal::ZERO
        }
    }
}

/// Runs the aggregator and the engine against a validated profile.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use progtax_core::TaxProfile;
/// use progtax_core::calculations::{EstimateForm, TaxEstimator};
///
/// let profile = TaxProfile::default();
/// let estimate = TaxEstimator::new(&profile).recompute(&EstimateForm::default());
///
/// assert_eq!(estimate.figures.taxable_income, dec!(53400));
/// assert_eq!(estimate.tax.total_tax, dec!(4381.488));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxEstimator<'a> {
    profile: &'a TaxProfile,
}

impl<'a> TaxEstimator<'a> {
    pub fn new(profile: &'a TaxProfile) -> Self {
        Self { profile }
    }

    /// Recomputes the estimate for the given form state.
    pub fn recompute(
        &self,
        form: &EstimateForm,
    ) -> Estimate {
        let figures = DeductionAggregator::new(self.profile.deductions).calculate(&form.to_input());

        let tax = if form.use_default_brackets {
            ProgressiveTax::new(&BracketTable::default()).calculate(figures.taxable_income)
        } else {
            ProgressiveTax::new(&self.profile.brackets).calculate(figures.taxable_income)
        };

        Estimate { figures, tax }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Bracket, DeductionConfig};

    fn flat_profile() -> TaxProfile {
        TaxProfile {
            brackets: BracketTable::new(vec![Bracket::unbounded(dec!(0.10))]).unwrap(),
            deductions: DeductionConfig::default(),
        }
    }

    #[test]
    fn default_form_is_monthly_5000_without_deductions() {
        let form = EstimateForm::default();

        assert_eq!(form.gross_income, "5000");
        assert!(form.is_monthly);
        assert_eq!(form.dependents, "0");
        assert_eq!(form.other_deductions, "0");
        assert!(form.use_default_brackets);
    }

    #[test]
    fn to_input_coerces_text_fields() {
        let form = EstimateForm {
            gross_income: "R$ 7.500".to_string(),
            dependents: "two".to_string(),
            other_deductions: "1,200".to_string(),
            ..Default::default()
        };

        assert_eq!(
            form.to_input(),
            DeductionInput {
                gross_income: dec!(7.500),
                is_monthly: true,
                dependent_count: dec!(0),
                other_annual_deductions: dec!(1200),
            }
        );
    }

    #[test]
    fn recompute_uses_default_brackets_when_requested() {
        let profile = flat_profile();
        let form = EstimateForm::default();

        let estimate = TaxEstimator::new(&profile).recompute(&form);

        assert_eq!(estimate.tax.allocations.len(), 5);
        assert_eq!(estimate.tax.total_tax, dec!(4381.488));
    }

    #[test]
    fn recompute_uses_profile_brackets_otherwise() {
        let profile = flat_profile();
        let form = EstimateForm {
            use_default_brackets: false,
            ..Default::default()
        };

        let estimate = TaxEstimator::new(&profile).recompute(&form);

        assert_eq!(estimate.tax.allocations.len(), 1);
        assert_eq!(estimate.tax.total_tax, dec!(5340));
    }

    #[test]
    fn recompute_reflects_each_form_change() {
        let profile = TaxProfile::default();
        let estimator = TaxEstimator::new(&profile);
        let mut form = EstimateForm::default();

        let monthly = estimator.recompute(&form);
        form.is_monthly = false;
        let annual = estimator.recompute(&form);

        assert_eq!(monthly.figures.annual_gross_income, dec!(60000));
        assert_eq!(annual.figures.annual_gross_income, dec!(5000));
        assert_eq!(annual.tax.total_tax, dec!(0));
    }

    #[test]
    fn oversized_income_saturates_instead_of_vanishing() {
        let profile = TaxProfile::default();
        let form = EstimateForm {
            gross_income: "123456789012345678901234567890".to_string(),
            ..Default::default()
        };

        let estimate = TaxEstimator::new(&profile).recompute(&form);

        assert_eq!(estimate.figures.annual_gross_income, Decimal::MAX);
        assert!(estimate.figures.taxable_income > Decimal::ZERO);
        assert!(estimate.tax.total_tax > Decimal::ZERO);
    }

    #[test]
    fn effective_rate_divides_tax_by_taxable_income() {
        let profile = flat_profile();
        let form = EstimateForm {
            use_default_brackets: false,
            ..Default::default()
        };

        let estimate = TaxEstimator::new(&profile).recompute(&form);

        assert_eq!(estimate.effective_rate(), dec!(0.1));
    }

    #[test]
    fn effective_rate_is_zero_without_taxable_income() {
        let profile = TaxProfile::default();
        let form = EstimateForm {
            gross_income: "0".to_string(),
            ..Default::default()
        };

        let estimate = TaxEstimator::new(&profile).recompute(&form);

        assert_eq!(estimate.effective_rate(), dec!(0));
    }
}
