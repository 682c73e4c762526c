//! Implements the `Store` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so that
//! the whole program can run top-to-bottom without touching Google Sheets.

use crate::api::Store;
use crate::model::RecordKind;
use crate::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Cursor;

/// An implementation of the `Store` trait that does not use Google Sheets. It
/// holds sheets in memory and, by default, is seeded with some existing data.
pub(crate) struct TestStore {
    pub(crate) data: HashMap<String, Vec<Vec<String>>>,
}

impl TestStore {
    /// Create a new `TestStore` using `data`. The map key is the sheet name
    /// and the map value is the rows of the sheet.
    pub(crate) fn new(data: HashMap<String, Vec<Vec<String>>>) -> Self {
        Self { data }
    }

    /// A store with no sheets at all; reads fail like an unreachable service.
    pub(crate) fn empty() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait::async_trait]
impl Store for TestStore {
    async fn read_rows(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        self.data
            .get(sheet_name)
            .with_context(|| format!("Sheet '{sheet_name}' not found"))
            .cloned()
    }

    async fn write_rows(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()> {
        self.data.insert(sheet_name.to_string(), rows.to_vec());
        Ok(())
    }
}

impl Default for TestStore {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(default_data())
    }
}

/// Provides the seed data from this module.
fn default_data() -> HashMap<String, Vec<Vec<String>>> {
    let mut map = HashMap::new();
    let income = load_csv(INCOME_DATA).unwrap();
    map.insert(RecordKind::Income.sheet_name().to_string(), income);
    let expenses = load_csv(EXPENSE_DATA).unwrap();
    map.insert(RecordKind::Expense.sheet_name().to_string(), expenses);
    map
}

/// Loads data from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let bytes = csv_data.as_bytes();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false) // Ensure headers are treated as part of the data
        .flexible(true)
        .from_reader(Cursor::new(bytes));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Seed income data. Includes a blank gap row like real sheets tend to have.
const INCOME_DATA: &str = r##"Sr,Date,Name,Amount
1,2024-01-05,Membership Dues,100.00
2,2024-01-20,Hall Rental Income,250.00
3,2024-02-03,Membership Dues,100.00
4,,,
5,2024-02-14,Fundraiser Proceeds,425.50
"##;

/// Seed expense data.
const EXPENSE_DATA: &str = r##"Sr,Date,Name,Amount
1,2024-01-10,Meeting Refreshments,32.75
2,2024-01-28,Printing and Flyers,18.00
3,2024-02-09,Hall Cleaning,60.00
"##;
