//! These structs provide the CLI interface for the fundbook CLI.

use crate::model::RecordKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fundbook: A command-line tool for keeping an income/expense ledger.
///
/// The purpose of this program is to record income and expense line items in a
/// Google Sheet, view totals and monthly summaries, and export the ledger to
/// XLSX or CSV files.
///
/// You will need a Google Sheets API credential for this; `fundbook init`
/// copies your downloaded credentials file into the fundbook home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration files.
    ///
    /// This is the first command you should run. You need two things ready
    /// beforehand: the URL of the Google Sheet that will hold the ledger
    /// (passed as --sheet-url), and a downloaded Google API credentials JSON
    /// file (passed as --credentials; it will be moved into the fundbook home
    /// directory).
    Init(InitArgs),
    /// Append an income or expense record and save it to the sheet.
    Add(AddArgs),
    /// Print all income and expense records.
    Show,
    /// Print totals, net balance, and the monthly breakdown.
    Summary,
    /// Export the ledger to an XLSX workbook or CSV file.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fundbook data and configuration is held.
    /// Defaults to ~/fundbook
    #[arg(long, env = "FUNDBOOK_HOME", default_value_t = default_fundbook_home())]
    fundbook_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fundbook_home: PathBuf) -> Self {
        Self {
            log_level,
            fundbook_home: fundbook_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fundbook_home(&self) -> &DisplayPath {
        &self.fundbook_home
    }
}

/// Args for the `fundbook init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The URL of the ledger's Google sheet. It looks like this:
    /// https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    #[arg(long)]
    sheet_url: String,

    /// The path to your downloaded Google API credentials JSON. This file will
    /// be moved to the secrets location in the main data directory.
    #[arg(long)]
    credentials: PathBuf,
}

impl InitArgs {
    pub fn new(sheet_url: impl Into<String>, credentials: impl Into<PathBuf>) -> Self {
        Self {
            sheet_url: sheet_url.into(),
            credentials: credentials.into(),
        }
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub fn credentials(&self) -> &Path {
        &self.credentials
    }
}

/// Args for the `fundbook add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Which ledger the record belongs to: "income" or "expense"
    kind: RecordKind,

    /// A short description of the record.
    #[arg(long)]
    name: String,

    /// The amount, a non-negative decimal, e.g. 100.00
    #[arg(long)]
    amount: Decimal,

    /// The record date as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn new(kind: RecordKind, name: impl Into<String>, amount: Decimal, date: Option<NaiveDate>) -> Self {
        Self {
            kind,
            name: name.into(),
            amount,
            date,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The provided date, or today when none was given.
    pub fn date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// The artifact produced by `fundbook export`.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// The full XLSX report: Income, Expenses, and Summary sheets.
    #[default]
    Workbook,
    /// The Income records as CSV.
    IncomeCsv,
    /// The Expense records as CSV.
    ExpensesCsv,
    /// Both record sets as one CSV with a Type column.
    CombinedCsv,
}

serde_plain::derive_display_from_serialize!(ExportFormat);
serde_plain::derive_fromstr_from_deserialize!(ExportFormat);

/// Args for the `fundbook export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The artifact to produce: "workbook", "income-csv", "expenses-csv" or
    /// "combined-csv"
    format: ExportFormat,

    /// The file to write the artifact to.
    #[arg(long)]
    out: PathBuf,
}

impl ExportArgs {
    pub fn new(format: ExportFormat, out: impl Into<PathBuf>) -> Self {
        Self {
            format,
            out: out.into(),
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn out(&self) -> &Path {
        &self.out
    }
}

fn default_fundbook_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fundbook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fundbook-home or FUNDBOOK_HOME instead of relying on the \
                default fundbook home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("fundbook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("income".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!("expense".parse::<RecordKind>().unwrap(), RecordKind::Expense);
        assert!("other".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(
            "workbook".parse::<ExportFormat>().unwrap(),
            ExportFormat::Workbook
        );
        assert_eq!(
            "combined-csv".parse::<ExportFormat>().unwrap(),
            ExportFormat::CombinedCsv
        );
    }

    #[test]
    fn test_parse_add_command() {
        let args = Args::parse_from([
            "fundbook",
            "add",
            "income",
            "--name",
            "Dues",
            "--amount",
            "100.00",
            "--date",
            "2024-01-05",
        ]);
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.kind(), RecordKind::Income);
                assert_eq!(add.name(), "Dues");
                assert_eq!(add.amount().to_string(), "100.00");
                assert_eq!(add.date().to_string(), "2024-01-05");
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_command() {
        let args = Args::parse_from(["fundbook", "export", "workbook", "--out", "report.xlsx"]);
        match args.command() {
            Command::Export(export) => {
                assert_eq!(export.format(), ExportFormat::Workbook);
                assert_eq!(export.out(), Path::new("report.xlsx"));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }
}
