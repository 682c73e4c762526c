//! CSV exports: one file per record set, or a combined file with a `Type`
//! discriminator column.
//!
//! Cell text is written verbatim (no currency symbol, no reformatting), so a
//! combined export re-parses to the same Sr/Date/Name/Amount values.

use crate::model::{RecordKind, RecordSet, HEADERS};
use crate::Result;
use anyhow::Context;

/// Serializes one record set as `Sr,Date,Name,Amount` CSV text, header row
/// included even when the set is empty.
pub fn record_set_csv(set: &RecordSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;
    for record in set.records() {
        writer
            .write_record(record.to_row())
            .context("Failed to write CSV record")?;
    }
    finish(writer)
}

/// Serializes both record sets as one CSV payload with columns
/// `Sr,Date,Name,Amount,Type`, income rows first. When both sets are empty the
/// output is the header row alone.
pub fn combined_csv(income: &RecordSet, expenses: &RecordSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let header: Vec<&str> = HEADERS.iter().copied().chain(["Type"]).collect();
    writer
        .write_record(&header)
        .context("Failed to write CSV header")?;

    for (kind, set) in [
        (RecordKind::Income, income),
        (RecordKind::Expense, expenses),
    ] {
        for record in set.records() {
            let mut row = record.to_row();
            row.push(kind.type_label().to_string());
            writer
                .write_record(&row)
                .context("Failed to write CSV record")?;
        }
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
