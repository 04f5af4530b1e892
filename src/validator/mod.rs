//! Soft, hard and batch validation of loosely-typed values.
//!
//! `validate_optional` reports failure through `None`, `validate_required`
//! through [`ValidationError`], and `validate_batch` collects per-item
//! failures next to the successes.

pub mod rules;
pub mod stats;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::store::datatype::DataType;
use rules::Rule;
use stats::Counters;
pub use stats::ValidationStats;

pub type Result<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Soft,
    Hard,
}

/// One rejected batch item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub index: usize,
    pub item: DataType,
    pub error: String,
}

#[derive(Debug)]
pub struct DataValidator {
    counters: Counters,
    batch_field: String,
    batch_rules: Vec<String>,
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::from_config(&ValidatorConfig::default())
    }
}

impl DataValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        info!(
            batch_field = %config.batch_field,
            batch_rules = ?config.batch_rules,
            "DataValidator initialized"
        );
        Self {
            counters: Counters::default(),
            batch_field: config.batch_field.clone(),
            batch_rules: config.batch_rules.clone(),
        }
    }

    /// Validate a value whose absence is acceptable.
    ///
    /// Returns the cleaned string, or `None` if `rules` is not a list, the
    /// value has no string form, or any rule fails.
    pub fn validate_optional(
        &mut self,
        value: impl Into<DataType>,
        rules: impl Into<DataType>,
    ) -> Option<String> {
        let (value, rules) = (value.into(), rules.into());
        self.counters.optional_attempts += 1;

        let rules = match rules {
            DataType::List(rules) => rules,
            other => {
                warn!(found = other.kind(), "Invalid rules for optional validation");
                self.counters.optional_failures += 1;
                return None;
            }
        };

        let Some(cleaned) = value.coerce_to_string() else {
            debug!(kind = value.kind(), "Could not convert value to string");
            self.counters.optional_failures += 1;
            return None;
        };

        if let Some(rule) = first_failing_rule(&cleaned, &rules, Severity::Soft) {
            warn!(rule = %rule, value = %cleaned, "Optional validation failed");
            self.counters.optional_failures += 1;
            return None;
        }

        debug!(value = %cleaned, "Optional validation passed");
        Some(cleaned)
    }

    /// Validate a value that must be present and pass every rule.
    pub fn validate_required(
        &mut self,
        value: impl Into<DataType>,
        rules: impl Into<DataType>,
    ) -> Result<String> {
        let (value, rules) = (value.into(), rules.into());
        self.counters.required_attempts += 1;

        let rules = match rules {
            DataType::List(rules) => rules,
            other => {
                error!(found = other.kind(), "Invalid rules for required validation");
                return Err(ValidationError::InvalidRuleSpec { found: other.kind() });
            }
        };

        let cleaned = match self.clean_required(&value) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                self.counters.required_failures += 1;
                error!(error = %e, "Required validation failed");
                return Err(e);
            }
        };

        if let Some(rule) = first_failing_rule(&cleaned, &rules, Severity::Hard) {
            self.counters.required_failures += 1;
            error!(rule = %rule, value = %cleaned, "Required validation failed");
            return Err(ValidationError::RuleViolation { rule });
        }

        debug!(value = %cleaned, "Required validation passed");
        Ok(cleaned)
    }

    /// Soft-validate the configured field of every record in `items`.
    ///
    /// Never fails: anything other than a list yields two empty vectors.
    pub fn validate_batch(
        &mut self,
        items: impl Into<DataType>,
    ) -> (Vec<DataType>, Vec<BatchFailure>) {
        let DataType::List(items) = items.into() else {
            error!("Batch validation failed: expected a list");
            return (Vec::new(), Vec::new());
        };

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        let batch_rules = DataType::from(self.batch_rules.clone());

        for (index, item) in items.iter().enumerate() {
            let Some(field) = item.as_map().and_then(|record| record.get(&self.batch_field)) else {
                failures.push(BatchFailure {
                    index,
                    item: item.clone(),
                    error: format!("missing {} field", self.batch_field),
                });
                continue;
            };

            match self.validate_optional(field.clone(), batch_rules.clone()) {
                Some(cleaned) if !cleaned.is_empty() => {
                    successes.push(self.with_field(item, cleaned));
                }
                _ => failures.push(BatchFailure {
                    index,
                    item: item.clone(),
                    error: format!("invalid {}", self.batch_field),
                }),
            }
        }

        self.counters.batch_processed += items.len() as u64;
        info!(
            successes = successes.len(),
            failures = failures.len(),
            "Batch validation completed"
        );
        (successes, failures)
    }

    pub fn stats(&self) -> ValidationStats {
        let stats = self.counters.snapshot();
        info!(?stats, "Validation statistics requested");
        stats
    }

    fn clean_required(&self, value: &DataType) -> Result<String> {
        if value.is_null() {
            return Err(ValidationError::RequiredValueMissing);
        }
        let cleaned = value
            .coerce_to_string()
            .ok_or(ValidationError::Uncoercible { kind: value.kind() })?;
        if cleaned.is_empty() {
            return Err(ValidationError::RequiredValueEmpty);
        }
        Ok(cleaned)
    }

    fn with_field(&self, item: &DataType, cleaned: String) -> DataType {
        let mut record: BTreeMap<String, DataType> = item.as_map().cloned().unwrap_or_default();
        record.insert(self.batch_field.clone(), DataType::String(cleaned));
        DataType::Map(record)
    }
}

/// Name of the first rule `value` does not satisfy. Unknown names, including
/// non-string entries, always fail.
fn first_failing_rule(value: &str, rules: &[DataType], severity: Severity) -> Option<String> {
    rules.iter().find_map(|entry| {
        let label = entry.as_str().map_or_else(|| format!("{entry:?}"), str::to_string);
        let passed = match entry.as_str().and_then(Rule::from_name) {
            Some(rule) => rule.check(value),
            None => {
                match severity {
                    Severity::Soft => warn!(rule = %label, "Unknown validation rule"),
                    Severity::Hard => error!(rule = %label, "Unknown validation rule"),
                }
                false
            }
        };
        (!passed).then_some(label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture;

    fn record(pairs: &[(&str, DataType)]) -> DataType {
        DataType::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn optional_returns_cleaned_value() {
        let mut v = DataValidator::new();
        assert_eq!(
            v.validate_optional("  test@example.com ", ["email"]).as_deref(),
            Some("test@example.com")
        );
        assert_eq!(v.validate_optional(25i64, ["age"]).as_deref(), Some("25"));
        assert_eq!(v.validate_optional(None::<&str>, Vec::<&str>::new()).as_deref(), Some(""));
    }

    #[test]
    fn optional_failures_are_none() {
        let mut v = DataValidator::new();
        assert_eq!(v.validate_optional("not-an-email", ["email"]), None);
        assert_eq!(v.validate_optional("x@example.com", "email"), None);
        assert_eq!(v.validate_optional("x", ["nonexistent"]), None);
        assert_eq!(v.validate_optional(vec![1i64, 2], ["required"]), None);
        assert_eq!(v.validate_optional("123", DataType::from(vec![7i64])), None);

        let stats = v.stats();
        assert_eq!(stats.optional_attempts, 5);
        assert_eq!(stats.optional_failures, 5);
    }

    #[test]
    fn required_error_kinds() {
        let mut v = DataValidator::new();
        assert_eq!(
            v.validate_required(None::<&str>, ["required"]),
            Err(ValidationError::RequiredValueMissing)
        );
        assert_eq!(
            v.validate_required("   ", ["required"]),
            Err(ValidationError::RequiredValueEmpty)
        );
        assert_eq!(
            v.validate_required("bad", ["email"]),
            Err(ValidationError::RuleViolation { rule: "email".to_string() })
        );
        assert_eq!(
            v.validate_required(DataType::Map(BTreeMap::new()), ["required"]),
            Err(ValidationError::Uncoercible { kind: "map" })
        );
        assert_eq!(
            v.validate_required("x", "required"),
            Err(ValidationError::InvalidRuleSpec { found: "string" })
        );
    }

    #[test]
    fn invalid_rule_spec_counts_attempt_only() {
        let mut v = DataValidator::new();
        let _ = v.validate_required("x", 5i64);
        let stats = v.stats();
        assert_eq!(stats.required_attempts, 1);
        assert_eq!(stats.required_failures, 0);
    }

    #[test]
    fn required_unknown_rule_is_a_violation() {
        let mut v = DataValidator::new();
        assert_eq!(
            v.validate_required("text", ["required", "zip"]),
            Err(ValidationError::RuleViolation { rule: "zip".to_string() })
        );
    }

    #[test]
    fn stats_after_mixed_operations() {
        let mut v = DataValidator::new();
        v.validate_optional("test@example.com", ["email"]);
        v.validate_optional("invalid", ["email"]);
        let _ = v.validate_required("valid@example.com", ["email"]);
        let _ = v.validate_required("invalid", ["email"]);
        v.validate_batch(vec![record(&[("email", "test@example.com".into())])]);

        let stats = v.stats();
        // the batch item goes through the optional path too
        assert_eq!(stats.optional_attempts, 3);
        assert_eq!(stats.optional_failures, 1);
        assert_eq!(stats.required_attempts, 2);
        assert_eq!(stats.required_failures, 1);
        assert_eq!(stats.batch_processed, 1);
        assert_eq!(stats.required_success_rate, 0.5);
    }

    #[test]
    fn batch_splits_successes_and_failures() {
        let mut v = DataValidator::new();
        let items = vec![
            record(&[("email", " valid@example.com ".into()), ("name", "a".into())]),
            record(&[("email", "broken".into())]),
            record(&[("name", "no email".into())]),
            DataType::from("not a record"),
            record(&[("email", "another@valid.com".into())]),
        ];

        let (successes, failures) = v.validate_batch(items);

        assert_eq!(successes.len(), 2);
        assert_eq!(
            successes[0],
            record(&[("email", "valid@example.com".into()), ("name", "a".into())])
        );
        let indexes: Vec<usize> = failures.iter().map(|f| f.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(failures[0].error, "invalid email");
        assert_eq!(failures[1].error, "missing email field");
        assert_eq!(v.stats().batch_processed, 5);
    }

    #[test]
    fn batch_rejects_non_list_quietly() {
        let mut v = DataValidator::new();
        assert_eq!(v.validate_batch("not a list"), (vec![], vec![]));
        assert_eq!(v.validate_batch(DataType::Null), (vec![], vec![]));
        assert_eq!(v.validate_batch(Vec::<DataType>::new()), (vec![], vec![]));
        assert_eq!(v.stats().batch_processed, 0);
    }

    #[test]
    fn batch_uses_configured_field() {
        let config = ValidatorConfig {
            batch_field: "phone".to_string(),
            batch_rules: vec!["phone".to_string()],
        };
        let mut v = DataValidator::from_config(&config);
        let (successes, failures) = v.validate_batch(vec![
            record(&[("phone", "(123) 456-7890".into())]),
            record(&[("phone", "12".into())]),
        ]);
        assert_eq!(successes.len(), 1);
        assert_eq!(failures[0].error, "invalid phone");
    }

    #[test]
    fn unknown_rule_level_follows_severity() {
        let mut v = DataValidator::new();

        let (result, events) = capture::events(|| v.validate_optional("x", ["zip"]));
        assert_eq!(result, None);
        assert_eq!(capture::level_of(&events, "Unknown validation rule"), Some("WARN"));
        assert!(events.iter().all(|e| e.level != "ERROR"));

        let (result, events) = capture::events(|| v.validate_required("x", ["zip"]));
        assert!(result.is_err());
        assert_eq!(capture::level_of(&events, "Unknown validation rule"), Some("ERROR"));
        assert_eq!(events.last().map(|e| e.level.as_str()), Some("ERROR"));
    }

    #[test]
    fn required_errors_are_logged_before_returning() {
        let mut v = DataValidator::new();
        for (value, rules) in [
            (DataType::Null, DataType::from(["required"])),
            (DataType::from(""), DataType::from(["required"])),
            (DataType::from("x"), DataType::from("required")),
        ] {
            let (result, events) = capture::events(|| v.validate_required(value, rules));
            assert!(result.is_err());
            assert_eq!(events.last().map(|e| e.level.as_str()), Some("ERROR"));
        }
    }
}
