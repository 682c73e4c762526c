//! The external store: where the ledger's Income and Expenses sheets live.
//!
//! The core pipeline only ever sees `Vec<Vec<String>>` grids; everything about
//! the remote service (auth, ranges, value rendering) stays behind the `Store`
//! trait.

mod google;
mod test_store;

use crate::model::{LedgerData, RecordKind, RecordSet};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub(crate) use test_store::TestStore;

/// The environment variable that switches the program into test mode.
const TEST_MODE_VAR: &str = "FUNDBOOK_IN_TEST_MODE";

/// Read and overwrite whole sheets of text cells.
///
/// Writes are full-sheet overwrites with last-writer-wins semantics; there is
/// no partial patch and no optimistic concurrency control.
#[async_trait::async_trait]
pub trait Store {
    /// Returns the raw rows of the named sheet. Rows may be ragged and may
    /// contain blank gaps; normalization is the caller's concern.
    async fn read_rows(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>>;

    /// Clears the named sheet and writes `rows` starting at A1.
    async fn write_rows(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()>;
}

/// Selects the `Store` implementation. This allows for exercising the program
/// without hitting the Google APIs: when `FUNDBOOK_IN_TEST_MODE` is set and
/// non-zero in length the mode is `Test`, otherwise `Google`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Google,
    Test,
}

serde_plain::derive_display_from_serialize!(Mode);
serde_plain::derive_fromstr_from_deserialize!(Mode);

impl Mode {
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_VAR) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Google,
        }
    }
}

/// Creates the `Store` for the given mode.
pub async fn store(config: &Config, mode: Mode) -> Result<Box<dyn Store + Send>> {
    debug!("Creating {mode} store");
    match mode {
        Mode::Google => Ok(Box::new(google::GoogleStore::new(config).await?)),
        Mode::Test => Ok(Box::new(TestStore::default())),
    }
}

/// Loads both record sets from the store.
///
/// A sheet that cannot be read degrades to an empty record set with a logged
/// warning; a missing or broken sheet must never take the session down.
pub async fn load_ledger(store: &mut (dyn Store + Send)) -> LedgerData {
    LedgerData {
        income: fetch_records(store, RecordKind::Income).await,
        expenses: fetch_records(store, RecordKind::Expense).await,
    }
}

/// Writes one record set back to its sheet in full: header row plus every
/// record, overwriting whatever the sheet held before.
pub async fn save_records(
    store: &mut (dyn Store + Send),
    kind: RecordKind,
    set: &RecordSet,
) -> Result<()> {
    store.write_rows(kind.sheet_name(), &set.to_rows()).await
}

async fn fetch_records(store: &mut (dyn Store + Send), kind: RecordKind) -> RecordSet {
    match store.read_rows(kind.sheet_name()).await {
        Ok(rows) => {
            let set = RecordSet::from_raw(rows);
            debug!("Loaded {} records from the {} sheet", set.len(), kind.sheet_name());
            set
        }
        Err(e) => {
            warn!(
                "Failed to read the {} sheet, continuing with no records: {e:#}",
                kind.sheet_name()
            );
            RecordSet::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_ledger_from_seeded_store() {
        let mut store = TestStore::default();
        let ledger = load_ledger(&mut store).await;
        assert!(!ledger.income.is_empty());
        assert!(!ledger.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_load_ledger_degrades_to_empty_on_missing_sheet() {
        let mut store = TestStore::empty();
        let ledger = load_ledger(&mut store).await;
        assert!(ledger.income.is_empty());
        assert!(ledger.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let mut store = TestStore::empty();
        let mut set = RecordSet::default();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        set.append(date, "Dues", rust_decimal::Decimal::from(100));

        save_records(&mut store, RecordKind::Income, &set)
            .await
            .unwrap();
        let ledger = load_ledger(&mut store).await;
        assert_eq!(ledger.income, set);
    }
}
