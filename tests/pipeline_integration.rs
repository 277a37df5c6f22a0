use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use expense_split::config::Config;
use expense_split::data::{InputError, OutputError};
use expense_split::expenses::pipeline::ExpensePipeline;
use expense_split::expenses::ExpenseError;

const ACTIVITY: &str = "\
Date,Date Processed,Description,Card Member,Account #,Amount
2024-01-05,2024-01-06,SAFEWAY #123,TAYLOR CURRAN,-41004,45.20
2024-01-06,2024-01-06,PAYMENT RECEIVED,TAYLOR CURRAN,-41004,-200.00
2024-01-07,2024-01-08,NETFLIX.COM,ANVITA AKKUR,-41012,16.99
2024-01-08,2024-01-08,AMZN MKTP #12345 http://amzn.to/x 1-800-555-0199,ANVITA AKKUR,-41012,30
";

fn write_input(dir: &TempDir, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("activity.csv");
    fs::write(&path, content)?;
    Ok(path)
}

/// Numbers render with two decimals so float conversion noise does not matter.
fn render(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Float(number) => format!("{:.2}", number),
        Data::Int(number) => format!("{:.2}", *number as f64),
        Data::Empty => String::new(),
        other => format!("{:?}", other),
    }
}

fn read_sheet(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook.worksheet_range("Sheet1")?;
    Ok(range.rows().map(|row| row.iter().map(render).collect()).collect())
}

#[test]
fn test_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, ACTIVITY)?;
    let output = dir.path().join("expenses.xlsx");

    let count = ExpensePipeline::new(&Config::default())?.run(&input, &output)?;
    assert_eq!(count, 3);

    let rows = read_sheet(&output)?;
    assert_eq!(
        rows,
        vec![
            vec!["Date", "Source", "Expense", "Taylor Paid", "Anvita Paid", "Taylor Portion"],
            vec!["2024-01-05", "American Express Cobalt", "SAFEWAY", "45.20", "0.00", "0.60"],
            vec!["2024-01-07", "American Express Cobalt", "NETFLIX.COM", "0.00", "16.99", ""],
            vec!["2024-01-08", "American Express Cobalt", "AMZN MKTP", "0.00", "30.00", ""],
        ]
    );

    Ok(())
}

#[test]
fn test_rerun_produces_same_cells() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, ACTIVITY)?;
    let output = dir.path().join("expenses.xlsx");
    let pipeline = ExpensePipeline::new(&Config::default())?;

    pipeline.run(&input, &output)?;
    let first = read_sheet(&output)?;
    pipeline.run(&input, &output)?;
    let second = read_sheet(&output)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_only_credits_gives_header_only() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(
        &dir,
        "Date,Description,Card Member,Amount\n2024-01-06,PAYMENT RECEIVED,TAYLOR CURRAN,-200.00\n",
    )?;
    let output = dir.path().join("expenses.xlsx");

    let count = ExpensePipeline::new(&Config::default())?.run(&input, &output)?;

    assert_eq!(count, 0);
    assert_eq!(read_sheet(&output)?.len(), 1);

    Ok(())
}

#[test]
fn test_short_row_is_skipped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(
        &dir,
        "Date,Description,Card Member,Amount\n2024-01-05,SAFEWAY #123,TAYLOR CURRAN,45.20\n2024-01-07,TRAILER\n",
    )?;
    let output = dir.path().join("expenses.xlsx");

    let count = ExpensePipeline::new(&Config::default())?.run(&input, &output)?;

    assert_eq!(count, 1);
    let rows = read_sheet(&output)?;
    assert_eq!(rows[1], vec!["2024-01-05", "American Express Cobalt", "SAFEWAY", "45.20", "0.00", "0.60"]);

    Ok(())
}

#[test]
fn test_missing_amount_column() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "Date,Description,Card Member\n2024-01-05,SAFEWAY,TAYLOR\n")?;
    let output = dir.path().join("expenses.xlsx");

    match ExpensePipeline::new(&Config::default())?.run(&input, &output) {
        Err(ExpenseError::Input(InputError::MissingColumn(column))) => assert_eq!(column, "Amount"),
        other => bail!("expected missing Amount column, got {:?}", other),
    }
    assert!(!output.exists());

    Ok(())
}

#[test]
fn test_unsupported_output_extension() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, ACTIVITY)?;
    let output = dir.path().join("expenses.txt");

    match ExpensePipeline::new(&Config::default())?.run(&input, &output) {
        Err(ExpenseError::Output(OutputError::UnsupportedExtension(_))) => {},
        other => bail!("expected unsupported extension, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_cli_success() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, ACTIVITY)?;
    let output = dir.path().join("expenses.xlsx");

    let result = Command::new(env!("CARGO_BIN_EXE_expense-split"))
        .arg("--input")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()?;

    assert_eq!(result.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&result.stdout).contains("Successfully processed 3 expenses"));
    assert!(output.exists());

    Ok(())
}

#[test]
fn test_cli_missing_amount_exits_with_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(&dir, "Date,Description,Card Member\n2024-01-05,SAFEWAY,TAYLOR\n")?;
    let output = dir.path().join("expenses.xlsx");

    let result = Command::new(env!("CARGO_BIN_EXE_expense-split"))
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()?;

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Amount"), "stderr was: {}", stderr);

    Ok(())
}

#[test]
fn test_cli_missing_input_file_exits_with_error() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let result = Command::new(env!("CARGO_BIN_EXE_expense-split"))
        .arg("-i")
        .arg(dir.path().join("missing.csv"))
        .arg("-o")
        .arg(dir.path().join("expenses.xlsx"))
        .output()?;

    assert_eq!(result.status.code(), Some(1));

    Ok(())
}
