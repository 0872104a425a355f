//! Tax calculation modules.
//!
//! The deduction aggregator turns gross income into a taxable base, the
//! progressive engine allocates that base across a bracket table, and the
//! estimator chains both for one form state.

pub mod common;
pub mod deductions;
pub mod estimate;
pub mod progressive;

pub use deductions::{DeductionAggregator, DeductionInput, compute_taxable_income};
pub use estimate::{Estimate, EstimateForm, TaxEstimator};
pub use progressive::{ProgressiveTax, compute_tax};
