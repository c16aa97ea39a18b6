//! # Fraud Engine
//!
//! A transaction ingestion engine that keeps an ordered history, computes
//! per-account spending baselines, flags debits far above an account's average
//! and detects ramping sequences of large transactions.
//!
//! ## Design Principles
//!
//! - **Identity by id**: transactions are deduplicated on their id alone
//! - **Advisory flags**: flagged transactions are still recorded
//! - **Defined zeros**: no data and no anomaly both score `0`, never an error
//! - **Ordered history**: ramp detection follows insertion order
//!
//! ## Example
//!
//! ```
//! use fraud_engine::{Amount, Transaction, TransactionEngine};
//!
//! let mut engine = TransactionEngine::new();
//! engine.add_transaction_and_detect_fraud(Transaction::debit(0, 1, 500));
//!
//! let score = engine.add_transaction_and_detect_fraud(Transaction::debit(1, 1, 2000));
//! assert_eq!(score, Amount::new(1000));
//! ```

pub mod amount;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod pattern;
pub mod report;
pub mod shared;
pub mod transaction;

pub use amount::Amount;
pub use config::{EngineConfig, PatternScope};
pub use engine::{Outcome, TransactionEngine};
pub use error::{EngineError, Result};
pub use history::TransactionLog;
pub use report::{write_assessments, write_baselines, AccountBaseline, Assessment};
pub use shared::SharedEngine;
pub use transaction::{AccountId, Transaction, TransactionRecord, TxId};
