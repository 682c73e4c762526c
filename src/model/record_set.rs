//! An ordered collection of ledger records and the normalization that builds
//! one from raw sheet rows.

use crate::model::Record;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The canonical column names, in fixed order. Source header labels are
/// ignored; column identity is positional.
pub const HEADERS: [&str; 4] = ["Sr", "Date", "Name", "Amount"];

/// Which of the two ledger sheets a record set belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(RecordKind);
serde_plain::derive_fromstr_from_deserialize!(RecordKind);

impl RecordKind {
    /// The name of the sheet tab that stores records of this kind.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expenses",
        }
    }

    /// The value written to the `Type` column of the combined CSV export.
    pub fn type_label(&self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }
}

/// An ordered sequence of records. Insertion order is significant and matches
/// the Sr ordering of the sheet.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordSet {
    data: Vec<Record>,
}

impl RecordSet {
    pub fn new(data: Vec<Record>) -> Self {
        Self { data }
    }

    /// Normalizes raw sheet rows into a clean `RecordSet`.
    ///
    /// Row 0 is a header row whose labels are discarded. Every row is
    /// right-padded with empty cells to a common width of at least 4, only the
    /// first four columns are kept, and rows whose Date, Name, and Amount are
    /// all empty are dropped as sheet gaps. Header-only or empty input yields
    /// an empty set. Normalization never fails.
    pub fn from_raw<S, R>(raw: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        let rows: Vec<Vec<String>> = raw
            .into_iter()
            .map(|row| row.into_iter().map(|s| s.into()).collect())
            .collect();

        if rows.len() < 2 {
            return Self::default();
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(4);
        let data = rows
            .into_iter()
            .skip(1) // header row
            .map(|mut row| {
                row.resize(width, String::new());
                Record::new(
                    row[0].clone(),
                    row[1].clone(),
                    row[2].clone(),
                    row[3].clone(),
                )
            })
            .filter(|record| !record.is_blank())
            .collect();

        Self { data }
    }

    /// Appends a new record with Sr assigned from the current length.
    pub fn append(&mut self, date: NaiveDate, name: impl Into<String>, amount: Decimal) -> &Record {
        let record = Record::new(
            (self.data.len() + 1).to_string(),
            date.format(crate::model::DATE_FORMAT).to_string(),
            name,
            amount.to_string(),
        );
        let index = self.data.len();
        self.data.push(record);
        &self.data[index]
    }

    /// Materializes the full sheet grid for a write-through save: the
    /// canonical header row followed by every record's cells.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![HEADERS.iter().map(|h| h.to_string()).collect()];
        rows.extend(self.data.iter().map(Record::to_row));
        rows
    }

    pub fn records(&self) -> &[Record] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
