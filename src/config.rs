//! Planner configuration

use std::{fs, path::Path};

use clap::Args;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A seller set size limit of zero can never find a cover.
    #[error("max seller set size must be at least 1")]
    ZeroSearchLimit,

    /// IO error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Planner settings.
#[derive(Clone, Debug, PartialEq, Eq, Args, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// ISO currency code offerings are priced in
    #[arg(long, env = "CARTPLAN_CURRENCY", default_value = "EUR")]
    pub currency: String,

    /// Largest seller set the minimum-seller-set search explores (unbounded when omitted)
    #[arg(long, env = "CARTPLAN_MAX_SELLER_SET_SIZE")]
    pub max_seller_set_size: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            currency: iso::EUR.iso_alpha_code.to_string(),
            max_seller_set_size: None,
        }
    }
}

impl PlannerConfig {
    /// Parse configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_norway::from_str(contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or a zero search limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.currency()?;

        if self.max_seller_set_size == Some(0) {
            return Err(ConfigError::ZeroSearchLimit);
        }

        Ok(())
    }

    /// The planning currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not an ISO currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency).ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}
