//! Engine configuration.
//!
//! Defaults reproduce the reference behavior: a ramp threshold of `1000` checked
//! across the whole log. Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional `fraud-engine.toml` in the working directory
//! 3. environment variables prefixed with `FRAUD_`:
//!    - `FRAUD_PATTERN_THRESHOLD`: integer threshold for ingestion-time ramp detection
//!    - `FRAUD_PATTERN_SCOPE`: `global` or `account`

use crate::amount::Amount;
use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "FRAUD";

/// Optional config file, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "fraud-engine";

/// Which part of the log ingestion-time ramp detection looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternScope {
    /// Every entry in the log, regardless of account.
    #[default]
    Global,
    /// Only entries belonging to the candidate's account.
    Account,
}

impl FromStr for PatternScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(PatternScope::Global),
            "account" => Ok(PatternScope::Account),
            other => Err(format!("expected `global` or `account`, got `{}`", other)),
        }
    }
}

impl<'de> Deserialize<'de> for PatternScope {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatternScope::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PatternScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternScope::Global => f.write_str("global"),
            PatternScope::Account => f.write_str("account"),
        }
    }
}

/// Tunables for [`TransactionEngine`](crate::TransactionEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Threshold every term of a ramp must strictly exceed during ingestion.
    pub pattern_threshold: Amount,

    pub pattern_scope: PatternScope,
}

impl EngineConfig {
    /// Threshold used when none is configured.
    pub const DEFAULT_PATTERN_THRESHOLD: Amount = Amount::new(1000);

    pub fn with_pattern_threshold(mut self, threshold: Amount) -> Self {
        self.pattern_threshold = threshold;
        self
    }

    pub fn with_pattern_scope(mut self, scope: PatternScope) -> Self {
        self.pattern_scope = scope;
        self
    }

    /// Loads configuration from the optional config file and the process
    /// environment, falling back to defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`](crate::EngineError::InvalidConfig)
    /// if a value cannot be interpreted.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pattern_threshold: Self::DEFAULT_PATTERN_THRESHOLD,
            pattern_scope: PatternScope::Global,
        }
    }
}
