use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one payer must be configured")]
    NoPayers,
    #[error("portion payer '{0}' is not a configured payer")]
    UnknownPortionPayer(String),
    #[error("invalid grocery pattern: {0}")]
    InvalidGroceryPattern(#[from] regex::Error),
}

/// A person who can be credited with an expense. A row is credited to the payer
/// when `fragment` occurs, ignoring case, anywhere in the row's card member text.
#[derive(Debug, Clone, PartialEq)]
pub struct Payer {
    pub name: String,
    pub fragment: String,
}

impl Payer {
    pub fn new(name: &str, fragment: &str) -> Payer {
        Payer {
            name: name.to_string(),
            fragment: fragment.to_string(),
        }
    }
}

/// Share of a grocery expense attributed to one payer.
#[derive(Debug, Clone, PartialEq)]
pub struct Portion {
    pub payer: String,
    pub share: Decimal,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub payers: Vec<Payer>,
    pub source_label: String,
    /// Case-insensitive regular expressions matched against the cleaned description.
    pub grocery_patterns: Vec<String>,
    pub portion: Portion,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            payers: vec![Payer::new("Taylor", "TAYLOR"), Payer::new("Anvita", "ANVITA")],
            source_label: "American Express Cobalt".to_string(),
            grocery_patterns: [
                r"\bSAVE[-\s]?ON\b",
                r"\bWHOLE[-\s]?FOODS\b",
                r"\bSAFEWAY\b",
                r"\bNO[-\s]?FRILLS\b",
                r"\bSUPERSTORE\b",
                r"\bTHRIFTY\b",
                r"\bWALMART\b",
                r"\b7\sELEVEN\b",
                r"\bCOSTCO\b",
                r"\bIGA\b",
            ]
            .iter()
            .map(|pattern| pattern.to_string())
            .collect(),
            portion: Portion {
                payer: "Taylor".to_string(),
                share: dec!(0.6),
            },
        }
    }
}

impl Config {
    /// Grocery patterns are compiled later by the classifier, which reports
    /// invalid ones through the same error type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payers.is_empty() {
            return Err(ConfigError::NoPayers);
        }

        if !self.payers.iter().any(|payer| payer.name == self.portion.payer) {
            return Err(ConfigError::UnknownPortionPayer(self.portion.payer.clone()));
        }

        Ok(())
    }
}
