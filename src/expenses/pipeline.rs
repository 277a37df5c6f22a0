use std::path::Path;

use log::{debug, info};

use super::columns::{columns_for, Column};
use super::enrich::{Enricher, ExpenseRow, Transaction};
use super::ExpenseError;
use crate::config::{Config, ConfigError};
use crate::data;

/// Load, filter, enrich and write a card statement in a single pass.
pub struct ExpensePipeline {
    enricher: Enricher,
    columns: Vec<Column>,
}

impl ExpensePipeline {
    pub fn new(config: &Config) -> Result<ExpensePipeline, ConfigError> {
        Ok(ExpensePipeline {
            enricher: Enricher::new(config)?,
            columns: columns_for(config),
        })
    }

    /// Drops credits and enriches the remaining rows, keeping input order.
    pub fn process(&self, transactions: Vec<Transaction>) -> Vec<ExpenseRow> {
        let total = transactions.len();
        let rows: Vec<ExpenseRow> = transactions
            .into_iter()
            .filter(Transaction::is_debit)
            .map(|transaction| self.enricher.enrich(transaction))
            .collect();

        debug!("dropped {} credit rows", total - rows.len());

        rows
    }

    /// Returns the number of expense rows written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize, ExpenseError> {
        let transactions = data::load_transactions(input)?;
        let rows = self.process(transactions);
        data::export_xlsx(&rows, &self.columns, output)?;

        info!("wrote {} expenses to {}", rows.len(), output.display());

        Ok(rows.len())
    }
}
