use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use progtax_cli::{config, logging, report};
use progtax_core::calculations::{EstimateForm, TaxEstimator};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax estimator.
///
/// Reduces gross income by dependents, payroll withholding and other
/// deductions, then applies a progressive bracket table and prints the
/// estimated tax with a per-bracket breakdown. Numeric arguments are read
/// leniently: anything that is not a number counts as 0.
#[derive(Debug, Parser)]
#[command(name = "progtax", version, about)]
struct Cli {
    /// Gross income (monthly unless --annual is given).
    #[arg(long, default_value = "5000", allow_hyphen_values = true)]
    income: String,

    /// Treat --income as an annual figure.
    #[arg(long)]
    annual: bool,

    /// Number of dependents.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    dependents: String,

    /// Other annual deductions.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    other_deductions: String,

    /// TOML file with brackets and deduction constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV bracket table (columns: upper_bound,rate); overrides the config's brackets.
    #[arg(long)]
    brackets: Option<PathBuf>,

    /// Use the configured bracket table instead of the built-in one.
    #[arg(long)]
    custom_brackets: bool,

    /// Log filter, e.g. `debug` or `warn,progtax_core=trace`. Defaults to RUST_LOG or `warn`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn form(&self) -> EstimateForm {
        EstimateForm {
            gross_income: self.income.clone(),
            is_monthly: !self.annual,
            dependents: self.dependents.clone(),
            other_deductions: self.other_deductions.clone(),
            use_default_brackets: !self.custom_brackets && self.brackets.is_none(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;

    let profile = config::load_profile(cli.config.as_deref(), cli.brackets.as_deref())
        .context("failed to load tax configuration")?;

    let form = cli.form();
    debug!(?form, "recomputing estimate");
    let estimate = TaxEstimator::new(&profile).recompute(&form);

    print!("{}", report::render(&estimate));

    Ok(())
}
