//! Append-only transaction log.

use crate::transaction::{AccountId, Transaction, TxId};
use std::collections::HashSet;

/// Ordered, append-only record of accepted transactions.
///
/// # Invariants
///
/// - Insertion order is preserved; pattern detection depends on it
/// - No two entries share a [`TxId`]
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
    ids: HashSet<TxId>,
}

impl TransactionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry with this id has been appended.
    pub fn contains(&self, id: TxId) -> bool {
        self.ids.contains(&id)
    }

    /// Appends a transaction.
    ///
    /// Returns `false`, leaving the log unchanged, if an entry with the same id
    /// is already present.
    pub fn append(&mut self, tx: Transaction) -> bool {
        if !self.ids.insert(tx.identity()) {
            return false;
        }
        self.entries.push(tx);
        true
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter()
    }

    /// Entries belonging to `account`, in insertion order.
    pub fn iter_account(&self, account: AccountId) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries
            .iter()
            .filter(move |tx| tx.account_id() == account)
    }
}
