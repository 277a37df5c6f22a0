use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use thiserror::Error;

pub mod cleaning;
pub mod columns;
pub mod enrich;
pub mod grocery;
pub mod pipeline;


use crate::data::{InputError, OutputError};
use columns::{Column, DateColumn, ExpenseColumn, PaidColumn, PortionColumn, SourceColumn};
use enrich::ExpenseRow;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Value of one spreadsheet cell. `Blank` is distinct from a numeric zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Blank,
}

#[enum_dispatch]
pub trait OutputColumn {
    fn header(&self) -> &str;

    fn cell(&self, row: &ExpenseRow) -> Cell;
}
