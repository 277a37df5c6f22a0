use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use serde::Deserialize;
use thiserror::Error;

use crate::expenses::columns::Column;
use crate::expenses::enrich::{ExpenseRow, Transaction};
use crate::expenses::{Cell, OutputColumn};

const AMOUNT_COLUMN: &str = "Amount";
const TEXT_COLUMNS: [&str; 3] = ["Date", "Description", "Card Member"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open input CSV {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },
    #[error("failed to parse input CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("input CSV missing '{0}' column")]
    MissingColumn(String),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported output file {0}, expected an .xlsx path")]
    UnsupportedExtension(PathBuf),
    #[error("failed to write spreadsheet {path}: {source}")]
    Write { path: PathBuf, source: XlsxError },
    #[error("failed to build spreadsheet: {0}")]
    Sheet(#[from] XlsxError),
    #[error("amount {0} cannot be written as a spreadsheet number")]
    NumberOutOfRange(Decimal),
}

#[derive(Debug, PartialEq, Error)]
pub enum RecordError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Card Member")]
    pub card_member: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = RecordError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&record.amount)
            .or_else(|_| Decimal::from_scientific(&record.amount))
            .map_err(|_| RecordError::InvalidAmount(record.amount.clone()))?;

        Ok(Transaction {
            date: record.date,
            description: record.description,
            card_member: record.card_member,
            amount,
        })
    }
}

/// Reads every statement row from the CSV at `file_path`.
///
/// The header must name `Amount`, `Date`, `Description` and `Card Member`; other
/// columns are ignored. Rows with an unparseable amount or with fewer fields than
/// the header are logged and skipped. A row with more fields than the header fails.
pub fn load_transactions(file_path: &Path) -> Result<Vec<Transaction>, InputError> {
    let file = File::open(file_path).map_err(|source| InputError::Open {
        path: file_path.to_path_buf(),
        source,
    })?;
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let headers = csv_reader.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|header| header == name);
    if !has_column(AMOUNT_COLUMN) {
        return Err(InputError::MissingColumn(AMOUNT_COLUMN.to_string()));
    }
    if let Some(missing) = TEXT_COLUMNS.iter().find(|name| !has_column(name)) {
        return Err(InputError::MissingColumn(missing.to_string()));
    }

    let mut transactions = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => match short_row(&err) {
                Some((line, expected, len)) => {
                    warn!("skipping row on line {}, err=expected {} fields, found {}", line, expected, len);
                    continue;
                },
                None => return Err(err.into()),
            },
        };

        let line = record.position().map_or(0, |position| position.line());
        match Transaction::try_from(record.deserialize::<TransactionRecord>(Some(&headers))?) {
            Ok(transaction) => transactions.push(transaction),
            Err(err) => warn!("skipping row on line {}, err={}", line, err),
        }
    }

    info!("loaded {} transactions from {}", transactions.len(), file_path.display());

    Ok(transactions)
}

/// Line, expected field count and actual field count of a row shorter than the header.
fn short_row(err: &csv::Error) -> Option<(u64, u64, u64)> {
    match err.kind() {
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } if len < expected_len => {
            Some((pos.as_ref().map_or(0, |position| position.line()), *expected_len, *len))
        },
        _ => None,
    }
}

/// Writes `rows` as a single-sheet workbook with one column per entry of `columns`.
pub fn export_xlsx(rows: &[ExpenseRow], columns: &[Column], file_path: &Path) -> Result<(), OutputError> {
    let is_xlsx = file_path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        return Err(OutputError::UnsupportedExtension(file_path.to_path_buf()));
    }

    let mut workbook = build_workbook(rows, columns)?;
    workbook.save(file_path).map_err(|source| OutputError::Write {
        path: file_path.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn header_format() -> Format {
    Format::new().set_bold()
}

fn build_workbook(rows: &[ExpenseRow], columns: &[Column]) -> Result<Workbook, OutputError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = header_format();

    for (col, column) in (0 as ColNum..).zip(columns) {
        worksheet.write_string_with_format(0, col, column.header(), &bold)?;
    }

    for (row_num, row) in (1 as RowNum..).zip(rows) {
        for (col, column) in (0 as ColNum..).zip(columns) {
            write_cell(worksheet, row_num, col, column.cell(row))?;
        }
    }

    Ok(workbook)
}

fn write_cell(worksheet: &mut Worksheet, row: RowNum, col: ColNum, cell: Cell) -> Result<(), OutputError> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string(row, col, text.as_str())?;
        },
        Cell::Number(number) => {
            let value = number.to_f64().ok_or(OutputError::NumberOutOfRange(number))?;
            worksheet.write_number(row, col, value)?;
        },
        Cell::Blank => {},
    }

    Ok(())
}
