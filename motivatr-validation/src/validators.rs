// Built-in rules

use crate::{Record, Rule, RuleError, RuleResult, Value};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::OnceCell;

/// Canonical patterns for [`Regex`]. Each carries its own anchors.
///
/// Character classes are ASCII only: whitespace is `[\t\n\f\r ]` and word
/// characters are `[0-9A-Za-z_]`.
pub mod patterns {
    /// Letters only
    pub const ALPHA: &str = r"^[a-zA-Z]+$";
    /// Letters and digits
    pub const ALPHA_NUM: &str = r"^[a-zA-Z0-9]+$";
    /// Letters, digits and whitespace
    pub const SAN: &str = r"^[a-zA-Z0-9\t\n\f\r ]+$";
    /// Letters, digits, whitespace and dashes
    pub const SAND: &str = r"^[a-zA-Z0-9\t\n\f\r -]+$";
    pub const EMAIL: &str = r"^[0-9A-Za-z_.+-]+@[0-9A-Za-z_.+-]+\.[a-zA-Z]{1,10}$";
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const FIRST_YEAR: i32 = 2000;
const LAST_YEAR: i32 = 2099;

fn format_invalid(field: &str) -> String {
    format!("The {} field format is invalid", field)
}

// Presence

/// Fails when the field is absent, null, or holds the zero/empty value of its type.
///
/// Negative numbers and booleans (even `false`) are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        let empty = match record.get(field) {
            None | Some(Value::Null) => true,
            Some(value) => {
                if let Some(scalar) = value.as_scalar() {
                    scalar.is_zero()
                } else if let Some(items) = value.as_lengthable() {
                    items.item_count() == 0
                } else {
                    false
                }
            }
        };

        if empty {
            Ok(Some(format!("The {} field is required", field)))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

// Bounds

#[derive(Debug, Clone, Copy)]
enum Bound {
    Upper,
    Lower,
}

impl Bound {
    fn rule(self) -> &'static str {
        match self {
            Bound::Upper => "max",
            Bound::Lower => "min",
        }
    }

    fn scalar_phrase(self) -> &'static str {
        match self {
            Bound::Upper => "be greater than",
            Bound::Lower => "be less than",
        }
    }

    fn items_phrase(self) -> &'static str {
        match self {
            Bound::Upper => "have more than",
            Bound::Lower => "have less than",
        }
    }

    fn violated(self, ordering: std::cmp::Ordering) -> bool {
        match self {
            Bound::Upper => ordering.is_gt(),
            Bound::Lower => ordering.is_lt(),
        }
    }

    fn check(self, limit: i64, record: &Record, field: &str) -> RuleResult {
        let Some(value) = record.get(field) else {
            return Ok(None);
        };

        if let Some(scalar) = value.as_scalar() {
            let violated = scalar
                .compare_to(limit)
                .is_some_and(|ordering| self.violated(ordering));
            if !violated {
                return Ok(None);
            }
            let unit = if scalar.is_text() { " characters" } else { "" };
            return Ok(Some(format!(
                "The {} field must not {} {}{}",
                field,
                self.scalar_phrase(),
                limit,
                unit
            )));
        }

        if let Some(items) = value.as_lengthable() {
            if limit < 0 {
                return Err(RuleError::NegativeLimit { rule: self.rule() });
            }
            let count = items.item_count() as u64;
            if self.violated(count.cmp(&(limit as u64))) {
                return Ok(Some(format!(
                    "The {} field must not {} {} items",
                    field,
                    self.items_phrase(),
                    limit
                )));
            }
        }

        Ok(None)
    }
}

/// Upper bound on character count, numeric value or item count.
///
/// Absent fields and non-comparable values pass.
#[derive(Debug, Clone, Copy)]
pub struct Max(pub i64);

impl Rule for Max {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        Bound::Upper.check(self.0, record, field)
    }

    fn name(&self) -> &'static str {
        "max"
    }
}

/// Lower bound on character count, numeric value or item count.
#[derive(Debug, Clone, Copy)]
pub struct Min(pub i64);

impl Rule for Min {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        Bound::Lower.check(self.0, record, field)
    }

    fn name(&self) -> &'static str {
        "min"
    }
}

// Dates

/// `YYYY-MM-DD` calendar date between 2000-01-01 and 2099-12-31.
///
/// The value must be a string; anything else (absent included) is an
/// internal error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl Date {
    fn parse(value: &str) -> Option<NaiveDate> {
        let bytes = value.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let digits = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits {
            return None;
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
    }
}

impl Rule for Date {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        let value = record
            .get(field)
            .and_then(Value::as_str)
            .ok_or(RuleError::NotAString)?;

        match Self::parse(value) {
            Some(date) if (FIRST_YEAR..=LAST_YEAR).contains(&date.year()) => Ok(None),
            _ => Ok(Some(format_invalid(field))),
        }
    }

    fn name(&self) -> &'static str {
        "date"
    }
}

// Patterns

/// Pattern match on a string value.
///
/// Empty strings pass without matching. The pattern is compiled on first use
/// and the result (including a compile failure) is kept for the lifetime of
/// the rule.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    compiled: OnceCell<Result<regex::Regex, regex::Error>>,
}

impl Regex {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: OnceCell::new(),
        }
    }

    pub fn alpha() -> Self {
        Self::new(patterns::ALPHA)
    }

    pub fn alpha_num() -> Self {
        Self::new(patterns::ALPHA_NUM)
    }

    pub fn san() -> Self {
        Self::new(patterns::SAN)
    }

    pub fn sand() -> Self {
        Self::new(patterns::SAND)
    }

    pub fn email() -> Self {
        Self::new(patterns::EMAIL)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn compiled(&self) -> Result<&regex::Regex, RuleError> {
        self.compiled
            .get_or_init(|| regex::Regex::new(&self.pattern))
            .as_ref()
            .map_err(|source| RuleError::InvalidPattern {
                pattern: self.pattern.clone(),
                source: source.clone(),
            })
    }
}

impl Rule for Regex {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        let value = record
            .get(field)
            .and_then(Value::as_str)
            .ok_or(RuleError::NotAString)?;

        if value.is_empty() {
            return Ok(None);
        }

        if self.compiled()?.is_match(value) {
            Ok(None)
        } else {
            Ok(Some(format_invalid(field)))
        }
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

// Passwords

#[derive(Debug, Clone)]
struct CharacterCheck {
    check: String,
    pattern: Regex,
    requirement: String,
}

/// Composite password strength rule.
///
/// Runs a minimum length check, then each character check in order, and
/// reports the first failure. The default requires 8 characters and at least
/// one lower case letter, one upper case letter and one digit.
///
/// ```
/// use motivatr_validation::{Password, Record, Rule};
///
/// let rule = Password::builder()
///     .min_length(12)
///     .require_digit()
///     .build();
///
/// let record = Record::new().with("password", "longenoughpass");
/// assert_eq!(
///     rule.evaluate(&record, "password").unwrap().as_deref(),
///     Some("The password field must contain at least one number"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Password {
    min: Min,
    checks: Vec<CharacterCheck>,
}

impl Password {
    pub fn new() -> Self {
        Self::builder()
            .require_lowercase()
            .require_uppercase()
            .require_digit()
            .build()
    }

    pub fn builder() -> PasswordBuilder {
        PasswordBuilder::new()
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Password {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        if let Some(message) = self
            .min
            .evaluate(record, field)
            .map_err(|e| e.in_check("min length"))?
        {
            return Ok(Some(message));
        }

        for step in &self.checks {
            let failed = step
                .pattern
                .evaluate(record, field)
                .map_err(|e| e.in_check(step.check.as_str()))?
                .is_some();
            if failed {
                return Ok(Some(format!("The {} field {}", field, step.requirement)));
            }
        }

        Ok(None)
    }

    fn name(&self) -> &'static str {
        "password"
    }
}

/// Builder for [`Password`]
#[derive(Debug, Clone)]
pub struct PasswordBuilder {
    min_length: i64,
    checks: Vec<CharacterCheck>,
}

impl PasswordBuilder {
    pub fn new() -> Self {
        Self {
            min_length: 8,
            checks: Vec::new(),
        }
    }

    pub fn min_length(mut self, min_length: i64) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn require_lowercase(self) -> Self {
        self.require(
            "lower case symbols",
            "[a-z]+",
            "must contain at least one lower case letter",
        )
    }

    pub fn require_uppercase(self) -> Self {
        self.require(
            "upper case symbols",
            "[A-Z]+",
            "must contain at least one upper case letter",
        )
    }

    pub fn require_digit(self) -> Self {
        self.require("numbers", "[0-9]+", "must contain at least one number")
    }

    /// Add a character check.
    ///
    /// `check` names the step in internal errors, `requirement` completes the
    /// sentence "The <field> field ..." when the pattern does not match.
    pub fn require(
        mut self,
        check: impl Into<String>,
        pattern: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        self.checks.push(CharacterCheck {
            check: check.into(),
            pattern: Regex::new(pattern),
            requirement: requirement.into(),
        });
        self
    }

    pub fn build(self) -> Password {
        Password {
            min: Min(self.min_length),
            checks: self.checks,
        }
    }
}

impl Default for PasswordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Cross-field

/// Requires the field to equal another field of the same record.
///
/// An absent reference field is always a mismatch.
#[derive(Debug, Clone)]
pub struct Same {
    field_to_match: String,
}

impl Same {
    pub fn new(field_to_match: impl Into<String>) -> Self {
        Self {
            field_to_match: field_to_match.into(),
        }
    }
}

impl Rule for Same {
    fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        let message = format!("The {} field must match {}", field, self.field_to_match);

        let Some(expected) = record.get(&self.field_to_match) else {
            return Ok(Some(message));
        };

        if record.get(field) == Some(expected) {
            Ok(None)
        } else {
            Ok(Some(message))
        }
    }

    fn name(&self) -> &'static str {
        "same"
    }
}
