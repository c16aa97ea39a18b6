//! Thread-safe handle around a [`TransactionEngine`].
//!
//! Ingestion holds the write lock for the whole dedupe-score-append sequence, so
//! two concurrent submissions of the same id can never both be appended.
//! Queries share the read lock and never see a half-finished append.

use crate::amount::Amount;
use crate::engine::{Outcome, TransactionEngine};
use crate::report::AccountBaseline;
use crate::transaction::{AccountId, Transaction};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, shareable engine handle.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<TransactionEngine>>,
}

impl SharedEngine {
    pub fn new(engine: TransactionEngine) -> Self {
        SharedEngine {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    // A panic while scoring cannot leave the log half-appended, so a poisoned
    // lock still guards a consistent engine.
    fn read(&self) -> RwLockReadGuard<'_, TransactionEngine> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TransactionEngine> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn average_transaction_amount_by_account(&self, account: AccountId) -> Amount {
        self.read().average_transaction_amount_by_account(account)
    }

    pub fn transaction_pattern_above_threshold(&self, threshold: Amount) -> Amount {
        self.read().transaction_pattern_above_threshold(threshold)
    }

    pub fn detect_fraudulent_transaction(&self, candidate: &Transaction) -> Amount {
        self.read().detect_fraudulent_transaction(candidate)
    }

    pub fn add_transaction_and_detect_fraud(&self, candidate: Transaction) -> Amount {
        self.ingest(candidate).score()
    }

    pub fn ingest(&self, candidate: Transaction) -> Outcome {
        self.write().ingest(candidate)
    }

    pub fn baselines(&self) -> Vec<AccountBaseline> {
        self.read().baselines()
    }

    /// Number of logged transactions.
    pub fn len(&self) -> usize {
        self.read().history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_duplicate_submissions_append_once() {
        let engine = SharedEngine::default();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                thread::spawn(move || engine.ingest(Transaction::credit(42, 1, 100)))
            })
            .collect();

        let outcomes: Vec<Outcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(engine.len(), 1);
        let accepted = outcomes.iter().filter(|o| **o != Outcome::Duplicate).count();
        assert_eq!(accepted, 1);
    }

    #[test]
    fn test_concurrent_distinct_submissions_all_logged() {
        let engine = SharedEngine::default();

        let handles: Vec<_> = (0..16u64)
            .map(|id| {
                let engine = engine.clone();
                thread::spawn(move || {
                    engine.add_transaction_and_detect_fraud(Transaction::credit(id, 1, 10))
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Amount::ZERO);
        }

        assert_eq!(engine.len(), 16);
        assert_eq!(engine.average_transaction_amount_by_account(1), Amount::new(10));
    }

    #[test]
    fn test_queries_delegate() {
        let engine = SharedEngine::new(TransactionEngine::new());
        assert!(engine.is_empty());
        engine.ingest(Transaction::credit(0, 1, 1200));
        engine.ingest(Transaction::credit(1, 1, 1800));

        assert_eq!(
            engine.transaction_pattern_above_threshold(Amount::new(1000)),
            Amount::new(600)
        );
        assert_eq!(
            engine.detect_fraudulent_transaction(&Transaction::debit(2, 1, 4000)),
            Amount::new(1000)
        );
        assert_eq!(engine.baselines().len(), 1);
    }
}
