//! Loading of the tax profile from disk.
//!
//! ## TOML format
//!
//! Every key is optional; omitted keys keep their built-in defaults. Decimal
//! values are written as strings so they are read exactly.
//!
//! ```toml
//! per_dependent_monthly_deduction = "189.59"
//! payroll_withholding_rate = "0.11"
//!
//! [[brackets]]
//! upper_bound = "22847.76"
//! rate = "0"
//!
//! [[brackets]]   # no upper_bound: open-ended top bracket
//! rate = "0.075"
//! ```
//!
//! A bracket CSV (see `progtax-data`) replaces the TOML bracket list when given.

use std::fs;
use std::path::Path;

use progtax_core::{TaxConfig, TaxConfigError, TaxProfile};
use progtax_data::{BracketTableLoader, BracketTableLoaderError};
use tracing::{debug, info};

/// Errors that can occur while loading the profile.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] TaxConfigError),

    #[error(transparent)]
    Brackets(#[from] BracketTableLoaderError),
}

/// Parses a TOML document into a [`TaxConfig`].
pub fn parse_config(
    text: &str,
    origin: &str,
) -> Result<TaxConfig, ConfigLoadError> {
    toml::from_str(text).map_err(|source| ConfigLoadError::Parse {
        path: origin.to_string(),
        source,
    })
}

/// Reads a TOML config file.
pub fn read_config(path: &Path) -> Result<TaxConfig, ConfigLoadError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&text, &path.display().to_string())
}

/// Builds the validated profile from an optional TOML config and an optional
/// bracket CSV. Without either, the built-in defaults are used.
pub fn load_profile(
    config_path: Option<&Path>,
    brackets_path: Option<&Path>,
) -> Result<TaxProfile, ConfigLoadError> {
    let config = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "reading config");
            read_config(path)?
        }
        None => TaxConfig::default(),
    };

    let mut profile = config.build()?;

    if let Some(path) = brackets_path {
        profile.brackets = BracketTableLoader::load_from_file(path)?;
        info!(path = %path.display(), brackets = profile.brackets.len(), "loaded bracket table");
    }

    Ok(profile)
}
