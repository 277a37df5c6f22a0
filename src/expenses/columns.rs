use enum_dispatch::enum_dispatch;

use super::enrich::ExpenseRow;
use super::{Cell, OutputColumn};
use crate::config::Config;

#[enum_dispatch(OutputColumn)]
#[derive(Debug, Clone)]
pub enum Column {
    DateColumn,
    SourceColumn,
    ExpenseColumn,
    PaidColumn,
    PortionColumn,
}

/// The output layout for a configuration: date, source, expense, one paid
/// column per payer, then the portion column.
pub fn columns_for(config: &Config) -> Vec<Column> {
    let mut columns: Vec<Column> = vec![DateColumn.into(), SourceColumn.into(), ExpenseColumn.into()];

    for (index, payer) in config.payers.iter().enumerate() {
        columns.push(PaidColumn::new(index, &payer.name).into());
    }

    columns.push(PortionColumn::new(&config.portion.payer).into());

    columns
}

#[derive(Debug, Clone)]
pub struct DateColumn;

impl OutputColumn for DateColumn {
    fn header(&self) -> &str {
        "Date"
    }

    fn cell(&self, row: &ExpenseRow) -> Cell {
        Cell::Text(row.date().clone())
    }
}

#[derive(Debug, Clone)]
pub struct SourceColumn;

impl OutputColumn for SourceColumn {
    fn header(&self) -> &str {
        "Source"
    }

    fn cell(&self, row: &ExpenseRow) -> Cell {
        Cell::Text(row.source().clone())
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseColumn;

impl OutputColumn for ExpenseColumn {
    fn header(&self) -> &str {
        "Expense"
    }

    fn cell(&self, row: &ExpenseRow) -> Cell {
        Cell::Text(row.expense().clone())
    }
}

#[derive(Debug, Clone)]
pub struct PaidColumn {
    payer_index: usize,
    header: String,
}

impl PaidColumn {
    pub fn new(payer_index: usize, payer_name: &str) -> PaidColumn {
        PaidColumn {
            payer_index,
            header: format!("{} Paid", payer_name),
        }
    }
}

impl OutputColumn for PaidColumn {
    fn header(&self) -> &str {
        &self.header
    }

    fn cell(&self, row: &ExpenseRow) -> Cell {
        match row.paid().get(self.payer_index) {
            Some(amount) => Cell::Number(*amount),
            None => Cell::Blank,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortionColumn {
    header: String,
}

impl PortionColumn {
    pub fn new(payer_name: &str) -> PortionColumn {
        PortionColumn {
            header: format!("{} Portion", payer_name),
        }
    }
}

impl OutputColumn for PortionColumn {
    fn header(&self) -> &str {
        &self.header
    }

    fn cell(&self, row: &ExpenseRow) -> Cell {
        match row.portion() {
            Some(share) => Cell::Number(*share),
            None => Cell::Blank,
        }
    }
}
