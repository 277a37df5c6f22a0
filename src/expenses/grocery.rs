use regex::{RegexSet, RegexSetBuilder};

use crate::config::ConfigError;

/// Flags descriptions belonging to known grocery chains.
#[derive(Debug, Clone)]
pub struct GroceryClassifier {
    patterns: RegexSet,
}

impl GroceryClassifier {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<GroceryClassifier, ConfigError> {
        let patterns = RegexSetBuilder::new(patterns).case_insensitive(true).build()?;

        Ok(GroceryClassifier { patterns })
    }

    /// Any single matching pattern is enough.
    pub fn is_grocery(&self, description: &str) -> bool {
        self.patterns.is_match(description)
    }
}
