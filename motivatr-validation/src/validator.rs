// Validation orchestrator

use crate::{Record, RuleSet, ValidationErrors, ValidatorError};
use motivatr_log::{debug, error};

/// Runs a [`RuleSet`] against one [`Record`].
///
/// Build one per validation attempt, call [`Validator::validate`] once, then
/// read [`Validator::errors`].
///
/// Fields are visited in sorted order. The first internal error aborts the
/// run; fields visited before it keep their messages, later fields are never
/// checked.
#[derive(Debug)]
pub struct Validator<'a> {
    record: &'a Record,
    rules: &'a RuleSet,
    errors: ValidationErrors,
}

impl<'a> Validator<'a> {
    pub fn new(record: &'a Record, rules: &'a RuleSet) -> Self {
        Self {
            record,
            rules,
            errors: ValidationErrors::new(),
        }
    }

    /// Evaluate every field's rule chain.
    ///
    /// Each failing field gets the message of the first rule that rejected it.
    pub fn validate(&mut self) -> Result<(), ValidatorError> {
        let (record, rules) = (self.record, self.rules);
        for (field, chain) in rules.iter() {
            match chain.evaluate(record, field) {
                Ok(Some(message)) => {
                    debug!("field {} failed validation: {}", field, message);
                    self.add_error(field, message);
                }
                Ok(None) => {}
                Err(source) => {
                    let err = ValidatorError::Field {
                        field: field.to_string(),
                        source,
                    };
                    error!("{}", err);
                    return Err(err);
                }
            }
        }

        debug!(
            "validated {} fields, {} failed",
            rules.len(),
            self.errors.len()
        );
        Ok(())
    }

    /// Whether any field has a message
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Record a message for a field, e.g. from a uniqueness check against storage.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
