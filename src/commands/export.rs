use crate::api::{self, Store};
use crate::args::ExportFormat;
use crate::commands::Out;
use crate::{export, utils, Result};
use anyhow::Context;
use std::path::Path;

/// Produces the requested artifact from the current ledger snapshot and writes
/// it to `out`. Unlike reads, a failure here is a hard error: there is no safe
/// degraded output for a broken export.
pub async fn export(
    store: &mut (dyn Store + Send),
    format: ExportFormat,
    out: &Path,
) -> Result<Out<()>> {
    let ledger = api::load_ledger(store).await;
    let bytes: Vec<u8> = match format {
        ExportFormat::Workbook => export::workbook_report(&ledger.income, &ledger.expenses)
            .context("Failed to produce the workbook report")?,
        ExportFormat::IncomeCsv => export::record_set_csv(&ledger.income)?.into_bytes(),
        ExportFormat::ExpensesCsv => export::record_set_csv(&ledger.expenses)?.into_bytes(),
        ExportFormat::CombinedCsv => {
            export::combined_csv(&ledger.income, &ledger.expenses)?.into_bytes()
        }
    };
    utils::write(out, &bytes).await?;
    Ok(Out::new_message(format!(
        "Wrote {format} export ({} bytes) to '{}'",
        bytes.len(),
        out.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_workbook() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xlsx");
        let mut store = TestStore::default();

        let out = export(&mut store, ExportFormat::Workbook, &path)
            .await
            .unwrap();
        assert!(out.message().contains("report.xlsx"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_export_combined_csv() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("combined.csv");
        let mut store = TestStore::default();

        export(&mut store, ExportFormat::CombinedCsv, &path)
            .await
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Sr,Date,Name,Amount,Type"));
        assert!(text.contains(",Income"));
        assert!(text.contains(",Expense"));
    }

    #[tokio::test]
    async fn test_export_from_empty_ledger_is_header_only() {
        // Empty record sets are never an export failure.
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("income.csv");
        let mut store = TestStore::empty();

        export(&mut store, ExportFormat::IncomeCsv, &path)
            .await
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "Sr,Date,Name,Amount");
    }

    #[tokio::test]
    async fn test_export_to_bad_path_fails() {
        let mut store = TestStore::default();
        let result = export(
            &mut store,
            ExportFormat::Workbook,
            Path::new("/nonexistent-dir/report.xlsx"),
        )
        .await;
        assert!(result.is_err());
    }
}
