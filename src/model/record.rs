//! A single ledger line item.

use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The date format used everywhere in the ledger, e.g. `2024-01-05`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One income or expense line item.
///
/// All four fields are held as canonical text, exactly as they appear in a
/// sheet cell. Empty strings are permitted; fields are never absent. Numeric
/// and date interpretation happen only where a number or month key is actually
/// needed, falling back rather than failing.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    /// Ordinal position within its record set, as text, starting at "1".
    pub sr: String,
    /// Calendar date as `YYYY-MM-DD` text.
    pub date: String,
    /// Free-text description.
    pub name: String,
    /// Amount as text; interpreted leniently (zero on parse failure).
    pub amount: String,
}

impl Record {
    pub fn new(
        sr: impl Into<String>,
        date: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            sr: sr.into(),
            date: date.into(),
            name: name.into(),
            amount: amount.into(),
        }
    }

    /// The amount as a number, with non-numeric text coerced to zero.
    pub fn amount_value(&self) -> Amount {
        Amount::lenient(&self.amount)
    }

    /// The `YYYY-MM` month key of the record's date, or `None` when the date
    /// does not parse. Records without a month key are excluded from monthly
    /// grouping but still count toward totals.
    pub fn month_key(&self) -> Option<String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()?;
        Some(date.format("%Y-%m").to_string())
    }

    /// Returns true when Date, Name, and Amount are all empty. Such rows are
    /// spreadsheet gaps, not data.
    pub fn is_blank(&self) -> bool {
        self.date.is_empty() && self.name.is_empty() && self.amount.is_empty()
    }

    /// The record as a row of cells in canonical column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.sr.clone(),
            self.date.clone(),
            self.name.clone(),
            self.amount.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_amount_value_numeric() {
        let record = Record::new("1", "2024-01-05", "Dues", "100.00");
        assert_eq!(
            record.amount_value().value(),
            Decimal::from_str("100.00").unwrap()
        );
    }

    #[test]
    fn test_amount_value_garbage_is_zero() {
        let record = Record::new("1", "2024-01-05", "Dues", "n/a");
        assert!(record.amount_value().is_zero());
    }

    #[test]
    fn test_month_key() {
        let record = Record::new("1", "2024-01-05", "Dues", "100.00");
        assert_eq!(record.month_key().as_deref(), Some("2024-01"));
    }

    #[test]
    fn test_month_key_unparseable_date() {
        let record = Record::new("1", "January 5th", "Dues", "100.00");
        assert_eq!(record.month_key(), None);
        let record = Record::new("1", "", "Dues", "100.00");
        assert_eq!(record.month_key(), None);
    }

    #[test]
    fn test_is_blank_ignores_sr() {
        let record = Record::new("7", "", "", "");
        assert!(record.is_blank());
        let record = Record::new("", "", "Rent", "");
        assert!(!record.is_blank());
    }
}
