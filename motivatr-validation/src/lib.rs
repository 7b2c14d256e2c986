//! Field-level record validation
//!
//! A [`Validator`] runs a [`RuleSet`] (field name to ordered [`RuleChain`])
//! against a [`Record`] (field name to untyped [`Value`]) and collects at most
//! one message per field into [`ValidationErrors`].
//!
//! Rules report two kinds of outcome:
//!
//! - a failure message, when the data is wrong (too long, badly formatted,
//!   missing). The chain for that field stops there.
//! - a [`RuleError`], when the rule itself cannot be applied (a string rule
//!   given a number, a pattern that does not compile, a negative item limit).
//!   The whole run stops and [`Validator::validate`] returns the error.
//!
//! # Examples
//!
//! ```
//! use motivatr_validation::*;
//!
//! let record = Record::new()
//!     .with("name", "Merlin")
//!     .with("email", "not-an-email")
//!     .with("password", "Abcdefg1")
//!     .with("password_confirmation", "Abcdefg2");
//!
//! let rules = RuleSet::new()
//!     .field("name", rule_chain![Required, Max(10), Regex::alpha()])
//!     .field("email", rule_chain![Required, Regex::email()])
//!     .field("password", rule_chain![Required, Password::new()])
//!     .field("password_confirmation", rule_chain![Same::new("password")]);
//!
//! let mut validator = Validator::new(&record, &rules);
//! validator.validate().expect("rules are well-formed");
//!
//! assert!(validator.failed());
//! assert_eq!(validator.errors().get("email"), Some("The email field format is invalid"));
//! assert_eq!(
//!     validator.errors().get("password_confirmation"),
//!     Some("The password_confirmation field must match password"),
//! );
//! assert!(!validator.errors().contains("name"));
//! ```
//!
//! ## Internal errors
//!
//! ```
//! use motivatr_validation::*;
//!
//! let record = Record::new().with("birthday", 20240101);
//! let rules = RuleSet::new().field("birthday", rule_chain![Date]);
//!
//! let mut validator = Validator::new(&record, &rules);
//! let err = validator.validate().unwrap_err();
//! assert_eq!(err.to_string(), "cannot validate the birthday field: the value is not string");
//! ```

mod errors;
#[cfg(feature = "json")]
mod json;
mod rules;
mod traits;
mod validator;
mod validators;
mod value;

pub use errors::*;
pub use rules::*;
pub use traits::*;
pub use validator::*;
pub use validators::*;
pub use value::*;
