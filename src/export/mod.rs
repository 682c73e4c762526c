//! Renders record sets into downloadable artifacts: a multi-sheet XLSX
//! workbook or CSV text. Serialization failures are hard errors here; the
//! caller cannot download a partial artifact.

mod csv;
mod workbook;

pub use csv::{combined_csv, record_set_csv};
pub use workbook::workbook_report;
