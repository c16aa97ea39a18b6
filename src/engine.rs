//! Core transaction engine.
//!
//! Owns the transaction log and scores each candidate before committing it.
//! Every scoring operation is a pure read of the log; [`TransactionEngine::ingest`]
//! is the only way entries get appended.

use crate::amount::Amount;
use crate::config::{EngineConfig, PatternScope};
use crate::error::Result;
use crate::history::TransactionLog;
use crate::pattern::ramp_step;
use crate::report::{AccountBaseline, Assessment};
use crate::transaction::{AccountId, Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

/// Result of ingesting one candidate transaction.
///
/// Every accepting variant appended the candidate exactly once; `Duplicate`
/// left the log untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A transaction with the same id was already logged.
    Duplicate,

    /// Appended and flagged: debit exceeds twice the account's average by `score`.
    Fraud(Amount),

    /// Appended and flagged: the log now forms a ramp with this step.
    Pattern(Amount),

    /// Appended without a flag.
    Accepted,
}

impl Outcome {
    /// Collapses the outcome to a single anomaly score; zero means no anomaly.
    pub fn score(self) -> Amount {
        match self {
            Outcome::Fraud(score) | Outcome::Pattern(score) => score,
            Outcome::Duplicate | Outcome::Accepted => Amount::ZERO,
        }
    }

    pub fn is_flagged(self) -> bool {
        matches!(self, Outcome::Fraud(_) | Outcome::Pattern(_))
    }

    /// Short lowercase label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Duplicate => "duplicate",
            Outcome::Fraud(_) => "fraud",
            Outcome::Pattern(_) => "pattern",
            Outcome::Accepted => "accepted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Fraud(score) | Outcome::Pattern(score) => {
                write!(f, "{} ({})", self.label(), score)
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// The anomaly-scoring engine.
///
/// Holds the transaction log and an immutable configuration; nothing else.
#[derive(Debug, Default)]
pub struct TransactionEngine {
    history: TransactionLog,
    config: EngineConfig,
}

impl TransactionEngine {
    /// Creates an engine with an empty log and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        TransactionEngine {
            history: TransactionLog::new(),
            config,
        }
    }

    /// Read-only view of the log.
    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    /// Mean amount over every logged transaction of `account`, debits and
    /// credits alike. Zero when the account has no transactions.
    pub fn average_transaction_amount_by_account(&self, account: AccountId) -> Amount {
        let (sum, count) = self
            .history
            .iter_account(account)
            .fold((0i128, 0u64), |(sum, count), tx| {
                (sum + i128::from(tx.amount().value()), count + 1)
            });
        Amount::mean(sum, count)
    }

    /// Step of the ramp formed by the whole log, in insertion order, with every
    /// amount strictly above `threshold`. Zero when there is no such ramp.
    pub fn transaction_pattern_above_threshold(&self, threshold: Amount) -> Amount {
        ramp_step(self.history.iter().map(Transaction::amount), threshold)
    }

    /// Same as [`transaction_pattern_above_threshold`](Self::transaction_pattern_above_threshold)
    /// restricted to one account's entries.
    pub fn account_pattern_above_threshold(&self, account: AccountId, threshold: Amount) -> Amount {
        ramp_step(
            self.history.iter_account(account).map(Transaction::amount),
            threshold,
        )
    }

    /// Fraud score of a candidate that has not been logged yet.
    ///
    /// Credits always score zero. A debit scores by how much it exceeds twice
    /// its account's current average, clamped at zero.
    pub fn detect_fraudulent_transaction(&self, candidate: &Transaction) -> Amount {
        if !candidate.is_debit() {
            return Amount::ZERO;
        }
        let average = self.average_transaction_amount_by_account(candidate.account_id());
        (candidate.amount() - average.doubled()).clamp_non_negative()
    }

    /// Records `candidate` and returns its anomaly score.
    ///
    /// Zero means either no anomaly or an already-logged id; see [`ingest`](Self::ingest)
    /// to tell them apart.
    pub fn add_transaction_and_detect_fraud(&mut self, candidate: Transaction) -> Amount {
        self.ingest(candidate).score()
    }

    /// Deduplicates, scores and appends `candidate`.
    ///
    /// Checks run in order: duplicate id, fraud score against the log before
    /// insertion, then ramp detection over the log including the candidate.
    pub fn ingest(&mut self, candidate: Transaction) -> Outcome {
        let id = candidate.identity();
        if self.history.contains(id) {
            debug!("Transaction {} already logged, ignoring", id);
            return Outcome::Duplicate;
        }

        let fraud_score = self.detect_fraudulent_transaction(&candidate);
        let account = candidate.account_id();
        let appended = self.history.append(candidate);
        debug_assert!(appended, "id {} checked absent before append", id);

        if fraud_score.is_positive() {
            debug!(
                "Transaction {} for account {} flagged as fraud, score {}",
                id, account, fraud_score
            );
            return Outcome::Fraud(fraud_score);
        }

        let step = self.ingestion_pattern(account);
        if step.is_positive() {
            debug!(
                "Transaction {} for account {} completes a ramp with step {}",
                id, account, step
            );
            return Outcome::Pattern(step);
        }

        debug!("Transaction {} for account {} accepted", id, account);
        Outcome::Accepted
    }

    /// Ramp check run during ingestion, honoring the configured threshold and scope.
    fn ingestion_pattern(&self, account: AccountId) -> Amount {
        let threshold = self.config.pattern_threshold;
        match self.config.pattern_scope {
            PatternScope::Global => self.transaction_pattern_above_threshold(threshold),
            PatternScope::Account => self.account_pattern_above_threshold(account, threshold),
        }
    }

    /// Per-account transaction count and average, sorted by account.
    pub fn baselines(&self) -> Vec<AccountBaseline> {
        let mut totals: BTreeMap<AccountId, (i128, u64)> = BTreeMap::new();
        for tx in self.history.iter() {
            let entry = totals.entry(tx.account_id()).or_insert((0, 0));
            entry.0 += i128::from(tx.amount().value());
            entry.1 += 1;
        }

        totals
            .into_iter()
            .map(|(account, (sum, count))| AccountBaseline {
                account,
                transactions: count,
                average: Amount::mean(sum, count),
            })
            .collect()
    }

    /// Ingests transactions from a CSV reader in streaming fashion.
    ///
    /// Returns one assessment per ingested row, in input order. Invalid records
    /// are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<Vec<Assessment>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut assessments = Vec::new();
        let mut skipped = 0usize;

        for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(tx) = record.parse() {
                        let tx_id = tx.identity();
                        let account = tx.account_id();
                        let outcome = self.ingest(tx);
                        assessments.push(Assessment {
                            tx: tx_id,
                            account,
                            outcome,
                        });
                    } else {
                        warn!("Row {}: Failed to parse transaction record", row_num);
                        skipped += 1;
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    skipped += 1;
                }
            }
        }

        let flagged = assessments.iter().filter(|a| a.outcome.is_flagged()).count();
        let duplicates = assessments
            .iter()
            .filter(|a| a.outcome == Outcome::Duplicate)
            .count();
        info!(
            "Processed {} rows: {} flagged, {} duplicates, {} skipped",
            assessments.len() + skipped,
            flagged,
            duplicates,
            skipped
        );

        Ok(assessments)
    }
}
