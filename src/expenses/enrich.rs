use getset::Getters;
use rust_decimal::Decimal;

use super::cleaning::clean_description;
use super::grocery::GroceryClassifier;
use crate::config::{Config, ConfigError, Payer};

/// One row of the card statement with its amount parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub card_member: String,
    pub amount: Decimal,
}

impl Transaction {
    /// Positive amounts are charges; payments and refunds are negative.
    pub fn is_debit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// A debit transaction with the derived fields filled in. Built once by
/// [`Enricher::enrich`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ExpenseRow {
    date: String,
    source: String,
    expense: String,
    /// Paid amount per configured payer, in configuration order.
    paid: Vec<Decimal>,
    portion: Option<Decimal>,
}

#[derive(Debug, Clone)]
struct PayerMatcher {
    fragment: String,
}

impl PayerMatcher {
    fn new(payer: &Payer) -> PayerMatcher {
        PayerMatcher {
            fragment: payer.fragment.to_uppercase(),
        }
    }

    /// Payers are matched independently, so a card member naming two payers
    /// credits the full amount to both.
    fn paid(&self, transaction: &Transaction) -> Decimal {
        if transaction.card_member.to_uppercase().contains(&self.fragment) {
            transaction.amount
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enricher {
    source_label: String,
    payers: Vec<PayerMatcher>,
    groceries: GroceryClassifier,
    grocery_share: Decimal,
}

impl Enricher {
    pub fn new(config: &Config) -> Result<Enricher, ConfigError> {
        config.validate()?;

        Ok(Enricher {
            source_label: config.source_label.clone(),
            payers: config.payers.iter().map(PayerMatcher::new).collect(),
            groceries: GroceryClassifier::new(&config.grocery_patterns)?,
            grocery_share: config.portion.share,
        })
    }

    pub fn enrich(&self, transaction: Transaction) -> ExpenseRow {
        let expense = clean_description(&transaction.description);
        let paid = self.payers.iter().map(|payer| payer.paid(&transaction)).collect();
        let portion = self.groceries.is_grocery(&expense).then_some(self.grocery_share);

        ExpenseRow {
            date: transaction.date,
            source: self.source_label.clone(),
            expense,
            paid,
            portion,
        }
    }
}
