// Validation errors

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Internal error raised by a rule.
///
/// These describe a mismatch between a rule's contract and the value or
/// configuration it was given, never a data-driven rejection.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("the value is not string")]
    NotAString,

    #[error("cannot compile pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("the {rule} rule limit must not be negative while validating arrays")]
    NegativeLimit { rule: &'static str },

    /// A step of a composite rule failed internally
    #[error("cannot validate {check}: {source}")]
    Check {
        check: String,
        #[source]
        source: Box<RuleError>,
    },

    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    /// Wrap this error with the name of the composite step that raised it.
    pub fn in_check(self, check: impl Into<String>) -> Self {
        RuleError::Check {
            check: check.into(),
            source: Box::new(self),
        }
    }
}

/// Outcome of a single rule: a failure message, nothing, or an internal error.
pub type RuleResult = Result<Option<String>, RuleError>;

/// Error that aborted a validation run.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("cannot validate the {field} field: {source}")]
    Field {
        field: String,
        #[source]
        source: RuleError,
    },
}

impl ValidatorError {
    /// Field whose rule chain raised the error
    pub fn field(&self) -> &str {
        match self {
            ValidatorError::Field { field, .. } => field,
        }
    }

    pub fn rule_error(&self) -> &RuleError {
        match self {
            ValidatorError::Field { source, .. } => source,
        }
    }
}

/// Error decoding a record from a request body.
#[cfg(feature = "json")]
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("the record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("cannot decode the record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field to message mapping produced by a validation run.
///
/// Holds at most one message per field. Serializes as a flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Set the message for a field, replacing any previous one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Convert to JSON representation
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.errors
                .iter()
                .map(|(field, message)| (field.clone(), serde_json::Value::from(message.as_str())))
                .collect(),
        )
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_message() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "The email field is required");
        errors.add("email", "The email field is already taken");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("The email field is already taken"));
    }

    #[test]
    fn test_check_wrapping_message() {
        let error = RuleError::NotAString.in_check("lower case symbols");
        assert_eq!(
            error.to_string(),
            "cannot validate lower case symbols: the value is not string"
        );
    }

    #[test]
    fn test_validator_error_message() {
        let error = ValidatorError::Field {
            field: "items".to_string(),
            source: RuleError::NegativeLimit { rule: "max" },
        };
        assert_eq!(error.field(), "items");
        assert_eq!(
            error.to_string(),
            "cannot validate the items field: the max rule limit must not be negative while validating arrays"
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_serializes_as_flat_object() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "The name field is required" }));
        assert_eq!(errors.to_json(), json);
    }
}
