//! Fluent rule builder.

use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;

use crate::edit::ValidateFn;
use crate::model::{Record, Value, DATE_FORMAT};

type Rule = Arc<dyn Fn(&Value, &Record) -> bool + Send + Sync>;

/// Ordered list of validation rules. The first failing rule wins.
///
/// Format rules (`email`, `pattern`, `date`, `number`) accept an empty value;
/// combine them with [`Rules::required`] to reject it.
#[derive(Clone, Default)]
pub struct Rules {
    rules: Vec<(Rule, String)>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules").field("len", &self.rules.len()).finish()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Numeric view of a value; numeric text counts.
fn number_of(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_text().and_then(|s| s.trim().parse::<f64>().ok()))
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule over the value alone.
    pub fn rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rule_with_row(move |value, _| f(value), msg)
    }

    /// Add a custom rule that can look at the rest of the row.
    pub fn rule_with_row<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&Value, &Record) -> bool + Send + Sync + 'static,
    {
        self.rules.push((Arc::new(f), msg.into()));
        self
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Reject null and blank text.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !is_empty(v), msg)
    }

    /// Require at least `min` characters of the displayed value.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.display().chars().count() >= min, msg)
    }

    /// Allow at most `max` characters of the displayed value.
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.display().chars().count() <= max, msg)
    }

    /// Require the displayed value to match `re`.
    pub fn pattern(self, re: Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| is_empty(v) || re.is_match(&v.display()), msg)
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| is_empty(v) || email_address::EmailAddress::is_valid(v.display().trim()),
            msg,
        )
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Require a numeric value.
    pub fn number(self, msg: impl Into<String>) -> Self {
        self.rule(|v| is_empty(v) || number_of(v).is_some(), msg)
    }

    /// Reject numbers below `min`. Non-numeric values pass.
    pub fn min(self, min: f64, msg: impl Into<String>) -> Self {
        self.rule(move |v| number_of(v).is_none_or(|n| n >= min), msg)
    }

    /// Reject numbers above `max`. Non-numeric values pass.
    pub fn max(self, max: f64, msg: impl Into<String>) -> Self {
        self.rule(move |v| number_of(v).is_none_or(|n| n <= max), msg)
    }

    /// `min` and `max` with the standard messages.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min, format!("Must be at least {}", min))
            .max(max, format!("Must be at most {}", max))
    }

    /// Reject negative numbers. Zero passes.
    pub fn positive(self, msg: impl Into<String>) -> Self {
        self.min(0.0, msg)
    }

    // =========================================================================
    // Dates
    // =========================================================================

    /// Require a date or `YYYY-MM-DD` text.
    pub fn date(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| match v {
                Value::Date(_) => true,
                Value::Text(s) => s.trim().is_empty() || NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).is_ok(),
                other => is_empty(other),
            },
            msg,
        )
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Message of the first failing rule.
    pub fn check(&self, value: &Value, row: &Record) -> Option<String> {
        self.rules
            .iter()
            .find(|(rule, _)| !rule(value, row))
            .map(|(_, msg)| msg.clone())
    }

    /// Messages of every failing rule, in order.
    pub fn errors(&self, value: &Value, row: &Record) -> Vec<String> {
        self.rules
            .iter()
            .filter(|(rule, _)| !rule(value, row))
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Turn the rules into a column validator.
    pub fn into_fn(self) -> ValidateFn {
        Arc::new(move |value: &Value, row: &Record| self.check(value, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(rules: &Rules, value: impl Into<Value>) -> Option<String> {
        rules.check(&value.into(), &Record::new())
    }

    #[test]
    fn test_required() {
        let rules = Rules::new().required("This field is required");
        assert_eq!(check(&rules, "  ").as_deref(), Some("This field is required"));
        assert_eq!(check(&rules, Value::Null).as_deref(), Some("This field is required"));
        assert_eq!(check(&rules, "x"), None);
        assert_eq!(check(&rules, false), None);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let rules = Rules::new()
            .required("required")
            .min_length(2, "too short")
            .max_length(4, "too long");
        assert_eq!(check(&rules, "").as_deref(), Some("required"));
        assert_eq!(check(&rules, "J").as_deref(), Some("too short"));
        assert_eq!(check(&rules, "Janet").as_deref(), Some("too long"));
        assert_eq!(check(&rules, "Jane"), None);
        assert_eq!(rules.errors(&Value::from(""), &Record::new()).len(), 2);
    }

    #[test]
    fn test_length_counts_chars() {
        let rules = Rules::new().max_length(3, "too long");
        assert_eq!(check(&rules, "äöü"), None);
    }

    #[test]
    fn test_email() {
        let rules = Rules::new().email("Invalid email format");
        assert_eq!(check(&rules, "john@example.com"), None);
        assert_eq!(check(&rules, ""), None);
        assert_eq!(check(&rules, "john@").as_deref(), Some("Invalid email format"));
    }

    #[test]
    fn test_pattern() {
        let rules = Rules::new().pattern(Regex::new(r"^[A-Z]{3}$").unwrap(), "three capitals");
        assert_eq!(check(&rules, "ABC"), None);
        assert_eq!(check(&rules, "abc").as_deref(), Some("three capitals"));
    }

    #[test]
    fn test_numbers() {
        let rules = Rules::new().number("Must be a number").range(0.0, 100.0);
        assert_eq!(check(&rules, 50), None);
        assert_eq!(check(&rules, 100.0), None);
        assert_eq!(check(&rules, -1).as_deref(), Some("Must be at least 0"));
        assert_eq!(check(&rules, "101").as_deref(), Some("Must be at most 100"));
        assert_eq!(check(&rules, "abc").as_deref(), Some("Must be a number"));

        let positive = Rules::new().positive("Must be positive");
        assert_eq!(check(&positive, 0), None);
        assert_eq!(check(&positive, -5).as_deref(), Some("Must be positive"));
    }

    #[test]
    fn test_date() {
        let rules = Rules::new().date("Invalid date");
        assert_eq!(check(&rules, "2024-02-29"), None);
        assert_eq!(check(&rules, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), None);
        assert_eq!(check(&rules, "2023-02-29").as_deref(), Some("Invalid date"));
        assert_eq!(check(&rules, 5).as_deref(), Some("Invalid date"));
    }

    #[test]
    fn test_rule_with_row() {
        let rules = Rules::new().rule_with_row(
            |v, row| v.as_f64() <= row.get("budget").and_then(Value::as_f64),
            "Over budget",
        );
        let row = Record::new().set("budget", 100);
        assert_eq!(rules.check(&Value::from(90), &row), None);
        assert_eq!(rules.check(&Value::from(120), &row).as_deref(), Some("Over budget"));
    }

    #[test]
    fn test_into_fn() {
        let validate = Rules::new().min(18.0, "Age must be at least 18").into_fn();
        assert_eq!(validate(&Value::from(17), &Record::new()).as_deref(), Some("Age must be at least 18"));
        assert_eq!(validate(&Value::from(18), &Record::new()), None);
    }
}
