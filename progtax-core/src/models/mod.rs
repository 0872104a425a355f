mod bracket;
mod bracket_table;
mod deduction_config;
mod income_figures;
mod tax_calculation;
mod tax_config;

pub use bracket::Bracket;
pub use bracket_table::{BracketTable, InvalidBracketTable, default_brackets};
pub use deduction_config::{DeductionConfig, DeductionConfigError};
pub use income_figures::{DeductionBreakdown, IncomeFigures};
pub use tax_calculation::{BracketAllocation, TaxCalculation};
pub use tax_config::{TaxConfig, TaxConfigError, TaxProfile};
