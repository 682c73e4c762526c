//! Types that represent the core data model, such as `Record` and `RecordSet`.
mod amount;
mod record;
mod record_set;

pub use amount::{Amount, AmountError};
pub use record::{Record, DATE_FORMAT};
pub use record_set::{RecordKind, RecordSet, HEADERS};
use serde::{Deserialize, Serialize};

/// Both record sets of the ledger, as loaded from the external store.
///
/// The two sets are independent; they share only the record shape.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LedgerData {
    /// Rows of data from the Income sheet.
    pub income: RecordSet,
    /// Rows of data from the Expenses sheet.
    pub expenses: RecordSet,
}

impl LedgerData {
    /// The record set for `kind`, mutably.
    pub fn set_mut(&mut self, kind: RecordKind) -> &mut RecordSet {
        match kind {
            RecordKind::Income => &mut self.income,
            RecordKind::Expense => &mut self.expenses,
        }
    }

    /// The record set for `kind`.
    pub fn set(&self, kind: RecordKind) -> &RecordSet {
        match kind {
            RecordKind::Income => &self.income,
            RecordKind::Expense => &self.expenses,
        }
    }
}
