//! Error types for the batch layer around the engine.
//!
//! The scoring operations themselves never fail; these cover I/O, CSV input and
//! configuration.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while driving the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file or environment value could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] config::ConfigError),

    #[error("Unknown flag {0}. Usage: fraud-engine [--baselines] <input.csv>")]
    UnknownFlag(String),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: fraud-engine [--baselines] <input.csv>")]
    MissingArgument,
}
