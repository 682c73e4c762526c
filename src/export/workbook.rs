//! The XLSX workbook report: Income, Expenses, and Summary sheets with
//! currency formatting, produced as an in-memory byte buffer.

use crate::aggregate;
use crate::model::{RecordSet, HEADERS};
use crate::Result;
use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// Currency number format applied to Amount cells in the workbook.
const MONEY_FORMAT: &str = "Rs #,##0.00";

/// Fill color for header cells.
const HEADER_FILL: Color = Color::RGB(0xD7E4BC);

/// Column display widths for the record sheets: narrow Sr, medium Date, wide
/// Name, medium Amount.
const RECORD_COLUMN_WIDTHS: [f64; 4] = [5.0, 12.0, 25.0, 15.0];

/// Builds the complete workbook report as XLSX bytes.
///
/// Three sheets are always present, in order: `Income`, `Expenses`, `Summary`.
/// Record sheets carry an empty set as a header-only sheet; the summary sheet
/// always has its three metric rows.
pub fn workbook_report(income: &RecordSet, expenses: &RecordSet) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin);
    let money_format = Format::new().set_num_format(MONEY_FORMAT);

    write_record_sheet(workbook.add_worksheet(), "Income", income, &header_format, &money_format)
        .context("Failed to build the Income sheet")?;
    write_record_sheet(
        workbook.add_worksheet(),
        "Expenses",
        expenses,
        &header_format,
        &money_format,
    )
    .context("Failed to build the Expenses sheet")?;
    write_summary_sheet(
        workbook.add_worksheet(),
        income,
        expenses,
        &header_format,
        &money_format,
    )
    .context("Failed to build the Summary sheet")?;

    workbook
        .save_to_buffer()
        .context("Failed to serialize the workbook")
}

fn write_record_sheet(
    sheet: &mut Worksheet,
    name: &str,
    set: &RecordSet,
    header_format: &Format,
    money_format: &Format,
) -> Result<()> {
    sheet.set_name(name)?;
    for (col, width) in RECORD_COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }
    for (ix, record) in set.records().iter().enumerate() {
        let row = (ix + 1) as u32;
        sheet.write_string(row, 0, &record.sr)?;
        sheet.write_string(row, 1, &record.date)?;
        sheet.write_string(row, 2, &record.name)?;
        sheet.write_number_with_format(row, 3, to_f64(record.amount_value().value()), money_format)?;
    }
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    income: &RecordSet,
    expenses: &RecordSet,
    header_format: &Format,
    money_format: &Format,
) -> Result<()> {
    let total_income = aggregate::total(income);
    let total_expenses = aggregate::total(expenses);
    let net_balance = total_income - total_expenses;

    sheet.set_name("Summary")?;
    sheet.set_column_width(0, 20)?;
    sheet.set_column_width(1, 15)?;
    sheet.write_string_with_format(0, 0, "Metric", header_format)?;
    sheet.write_string_with_format(0, 1, "Amount", header_format)?;

    let rows = [
        ("Total Income", total_income),
        ("Total Expenses", total_expenses),
        ("Net Balance", net_balance),
    ];
    for (ix, (metric, value)) in rows.iter().enumerate() {
        let row = (ix + 1) as u32;
        sheet.write_string(row, 0, *metric)?;
        sheet.write_number_with_format(row, 1, to_f64(*value), money_format)?;
    }
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
