// Validation traits

use crate::{Record, RuleResult};
use std::sync::Arc;

/// A field-level rule.
///
/// `evaluate` looks the field up in the record itself, so a rule decides how
/// to treat an absent field. Returning `Ok(Some(message))` rejects the field;
/// `Err` means the rule could not be applied at all.
pub trait Rule: Send + Sync {
    /// Evaluate the rule for one field of the record
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult;

    /// Get rule name
    fn name(&self) -> &'static str;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        (**self).evaluate(record, field)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        (**self).evaluate(record, field)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Rule backed by a closure.
pub struct FnRule<F> {
    name: &'static str,
    func: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Record, &str) -> RuleResult + Send + Sync,
{
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        (self.func)(record, field)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Wrap a closure as a named rule.
///
/// ```
/// use motivatr_validation::{rule_fn, Record, Rule};
///
/// let not_admin = rule_fn("not_admin", |record: &Record, field: &str| {
///     Ok(match record.get(field).and_then(|v| v.as_str()) {
///         Some("admin") => Some(format!("The {} field is reserved", field)),
///         _ => None,
///     })
/// });
///
/// let record = Record::new().with("username", "admin");
/// assert!(not_admin.evaluate(&record, "username").unwrap().is_some());
/// ```
pub fn rule_fn<F>(name: &'static str, func: F) -> FnRule<F>
where
    F: Fn(&Record, &str) -> RuleResult + Send + Sync,
{
    FnRule { name, func }
}
