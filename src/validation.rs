//! Field-keyed validation rule accumulator.
//!
//! Payloads are checked rule by rule without short-circuiting, so clients see
//! every violation in one response instead of fixing them one at a time.

use std::collections::{HashMap, HashSet};

/// Accumulates validation failures keyed by field name.
///
/// The first failing rule for a given field wins; later failures for the same
/// field are ignored so each field carries exactly one message.
#[derive(Debug, Default)]
pub struct Validator {
    errors: HashMap<String, String>,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no rule has failed so far.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `field` unless the field already has one.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_owned())
            .or_insert_with(|| message.to_owned());
    }

    /// Record a failure for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Consume the validator, handing the field→message map to the caller.
    pub fn into_errors(self) -> HashMap<String, String> {
        self.errors
    }
}

/// Whether `value` is one of the safelisted entries.
pub fn permitted(value: &str, safelist: &[&str]) -> bool {
    safelist.iter().any(|entry| *entry == value)
}

/// Whether all entries in `values` are pairwise distinct.
pub fn unique(values: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_validator_is_valid() {
        assert!(Validator::new().valid());
    }

    #[test]
    fn failed_check_records_message() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        assert!(!v.valid());
        assert_eq!(
            v.into_errors().get("title").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn passing_check_records_nothing() {
        let mut v = Validator::new();
        v.check(true, "title", "must be provided");
        assert!(v.valid());
    }

    #[test]
    fn first_failure_per_field_wins() {
        let mut v = Validator::new();
        v.check(false, "tags", "must be provided");
        v.check(false, "tags", "must contain at least 1 tag");
        let errors = v.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("tags").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn failures_on_distinct_fields_accumulate() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        v.check(false, "score", "must be provided");
        assert_eq!(v.into_errors().len(), 2);
    }

    #[test]
    fn permitted_matches_exact_entries() {
        let safelist = &["id", "-id", "title"];
        assert!(permitted("id", safelist));
        assert!(permitted("-id", safelist));
        assert!(!permitted("created_at", safelist));
        assert!(!permitted("", safelist));
    }

    #[test]
    fn unique_detects_duplicates() {
        let distinct = vec!["math".to_owned(), "logic".to_owned()];
        let repeated = vec!["math".to_owned(), "math".to_owned()];
        assert!(unique(&distinct));
        assert!(unique(&[]));
        assert!(!unique(&repeated));
    }
}
