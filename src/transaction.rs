//! Transaction models for CSV parsing and internal representation.

use crate::amount::Amount;
use serde::Deserialize;
use std::fmt;

/// Account identifier.
pub type AccountId = u32;

/// Caller-assigned transaction identifier.
///
/// This is the sole identity key of a [`Transaction`]; deduplication compares
/// `TxId`s and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxId(pub u64);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single account transaction.
///
/// Fields are fixed at construction. `Transaction` deliberately does not
/// implement `PartialEq`: use [`Transaction::identity`] or
/// [`Transaction::same_identity`] to compare by id.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: TxId,
    account_id: AccountId,
    amount: Amount,
    is_debit: bool,
}

impl Transaction {
    pub fn new(id: TxId, account_id: AccountId, amount: Amount, is_debit: bool) -> Self {
        Transaction {
            id,
            account_id,
            amount,
            is_debit,
        }
    }

    /// Creates a debit (spend) from raw values.
    pub fn debit(id: u64, account_id: AccountId, amount: i64) -> Self {
        Self::new(TxId(id), account_id, Amount::new(amount), true)
    }

    /// Creates a credit (deposit) from raw values.
    pub fn credit(id: u64, account_id: AccountId, amount: i64) -> Self {
        Self::new(TxId(id), account_id, Amount::new(amount), false)
    }

    /// The identity key.
    pub fn identity(&self) -> TxId {
        self.id
    }

    /// Returns `true` if both transactions carry the same id, whatever their other fields.
    pub fn same_identity(&self, other: &Transaction) -> bool {
        self.id == other.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_debit(&self) -> bool {
        self.is_debit
    }
}

/// Raw transaction record as read from CSV.
///
/// The amount is kept as a string so a malformed value skips the row instead of
/// failing the whole deserializer.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Transaction type: debit or credit (withdrawal/deposit accepted as aliases)
    #[serde(rename = "type")]
    pub tx_type: String,

    /// Owning account
    pub account: AccountId,

    /// Transaction id
    pub tx: u64,

    pub amount: Option<String>,
}

impl TransactionRecord {
    /// Parses the raw CSV record into a [`Transaction`].
    ///
    /// Returns `None` for an unknown type or a missing or non-integer amount.
    pub fn parse(&self) -> Option<Transaction> {
        let is_debit = match self.tx_type.trim().to_lowercase().as_str() {
            "debit" | "withdrawal" => true,
            "credit" | "deposit" => false,
            _ => return None,
        };
        let amount = self.parse_amount()?;
        Some(Transaction::new(TxId(self.tx), self.account, amount, is_debit))
    }

    fn parse_amount(&self) -> Option<Amount> {
        let amount_str = self.amount.as_ref()?;
        let trimmed = amount_str.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }
}
