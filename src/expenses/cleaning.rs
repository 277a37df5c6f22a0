use once_cell::sync::Lazy;
use regex::Regex;

static STORE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\d+").expect("store number pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)http\S+").expect("url pattern"));
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s\(\)]{6,}").expect("phone number pattern"));
static LONG_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{7,}\b").expect("digit run pattern"));

/// Simplifies a merchant description by stripping store numbers, URLs, phone
/// numbers and long digit runs, then collapsing whitespace.
///
/// The removals run in a fixed order, each on the output of the previous one.
/// The phone number rule is broad and must run before the digit run rule.
pub fn clean_description(description: &str) -> String {
    let cleaned = STORE_NUMBER.replace_all(description, "");
    let cleaned = URL.replace_all(&cleaned, "");
    let cleaned = PHONE_NUMBER.replace_all(&cleaned, "");
    let cleaned = LONG_DIGIT_RUN.replace_all(&cleaned, "");

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
