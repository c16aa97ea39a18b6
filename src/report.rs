//! CSV reports produced from an engine run.

use crate::amount::Amount;
use crate::engine::Outcome;
use crate::error::Result;
use crate::transaction::{AccountId, TxId};
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// Outcome of one ingested CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub tx: TxId,
    pub account: AccountId,
    pub outcome: Outcome,
}

/// Spending baseline of one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountBaseline {
    pub account: AccountId,

    /// Number of logged transactions, debits and credits.
    pub transactions: u64,

    /// Mean amount, truncated toward zero.
    pub average: Amount,
}

/// Writes assessments as CSV with header `tx,account,status,score`, in the
/// order given.
pub fn write_assessments<W: Write>(writer: W, assessments: &[Assessment]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(["tx", "account", "status", "score"])?;

    for assessment in assessments {
        csv_writer.write_record([
            assessment.tx.to_string(),
            assessment.account.to_string(),
            assessment.outcome.label().to_string(),
            assessment.outcome.score().to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes baselines as CSV with header `account,transactions,average`.
pub fn write_baselines<W: Write>(writer: W, baselines: &[AccountBaseline]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    if baselines.is_empty() {
        csv_writer.write_record(["account", "transactions", "average"])?;
    }
    for baseline in baselines {
        csv_writer.serialize(baseline)?;
    }
    csv_writer.flush()?;
    Ok(())
}
