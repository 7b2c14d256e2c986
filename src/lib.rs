// Motivatr - shared building blocks for motivatr services
//
// Field-level validation of decoded request records, plus the logging the
// validation layer reports through.

// Re-export logging
pub use motivatr_log as log;

// Re-export optional crates
#[cfg(feature = "validation")]
pub use motivatr_validation as validation;

// Prelude for common imports
#[cfg(feature = "validation")]
pub mod prelude {
    pub use motivatr_validation::{
        Date, Max, Min, Password, Record, Regex, Required, Rule, RuleChain, RuleError, RuleSet,
        Same, ValidationErrors, Validator, ValidatorError, Value, patterns, rule_chain, rule_fn,
    };
}
