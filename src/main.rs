//! Fraud Engine CLI
//!
//! Streams a CSV of transactions through the engine and writes one assessment
//! per row, or the per-account baselines, to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > assessments.csv
//! cargo run -- --baselines transactions.csv > baselines.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity
//! - `FRAUD_PATTERN_THRESHOLD`: Ramp threshold used during ingestion (default 1000)
//! - `FRAUD_PATTERN_SCOPE`: `global` (default) or `account`
//!
//! The same keys (`pattern_threshold`, `pattern_scope`) may also be set in an
//! optional `fraud-engine.toml` in the working directory.

use fraud_engine::{
    write_assessments, write_baselines, EngineConfig, EngineError, Result, TransactionEngine,
};
use log::debug;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut baselines = false;
    let mut input_path = None;

    for arg in env::args().skip(1) {
        if arg == "--baselines" {
            baselines = true;
        } else if arg.starts_with("--") {
            return Err(EngineError::UnknownFlag(arg));
        } else {
            input_path = Some(arg);
        }
    }
    let input_path = input_path.ok_or(EngineError::MissingArgument)?;

    let config = EngineConfig::load()?;
    debug!(
        "Pattern threshold {}, scope {}",
        config.pattern_threshold, config.pattern_scope
    );

    let file = File::open(&input_path)?;
    let reader = BufReader::new(file);

    let mut engine = TransactionEngine::with_config(config);
    let assessments = engine.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    if baselines {
        write_baselines(handle, &engine.baselines())?;
    } else {
        write_assessments(handle, &assessments)?;
    }

    Ok(())
}
