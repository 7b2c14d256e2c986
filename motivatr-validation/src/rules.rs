// Rule chains and rule sets

use crate::{Record, Rule, RuleResult};
use motivatr_log::trace;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type RuleRef = Arc<dyn Rule>;

/// Ordered rules for one field.
///
/// Evaluation stops at the first rule that reports a message, so the order
/// decides which single message a field gets.
#[derive(Clone, Default)]
pub struct RuleChain {
    rules: Vec<RuleRef>,
}

impl RuleChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append an already shared rule
    pub fn push(&mut self, rule: RuleRef) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Run the chain for `field`, returning the first failure message.
    pub fn evaluate(&self, record: &Record, field: &str) -> RuleResult {
        for rule in &self.rules {
            let outcome = rule.evaluate(record, field)?;
            trace!(
                "rule {} on field {}: {}",
                rule.name(),
                field,
                if outcome.is_some() { "failed" } else { "passed" }
            );
            if outcome.is_some() {
                return Ok(outcome);
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|rule| rule.name())).finish()
    }
}

/// Build a [`RuleChain`] from a list of rules.
///
/// ```
/// use motivatr_validation::{rule_chain, Max, Required};
///
/// let chain = rule_chain![Required, Max(255)];
/// assert_eq!(chain.len(), 2);
/// ```
#[macro_export]
macro_rules! rule_chain {
    ($($rule:expr),* $(,)?) => {{
        let chain = $crate::RuleChain::new();
        $(let chain = chain.add($rule);)*
        chain
    }};
}

/// Field name to rule chain mapping.
///
/// Fields are kept in sorted order, which is the order a validator visits
/// them in.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    chains: BTreeMap<String, RuleChain>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the chain for a field, replacing any previous one
    pub fn field(mut self, name: impl Into<String>, chain: RuleChain) -> Self {
        self.insert(name, chain);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, chain: RuleChain) -> Option<RuleChain> {
        self.chains.insert(name.into(), chain)
    }

    pub fn get(&self, name: &str) -> Option<&RuleChain> {
        self.chains.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleChain)> {
        self.chains.iter().map(|(name, chain)| (name.as_str(), chain))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RuleChain)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, RuleChain)>>(iter: I) -> Self {
        Self {
            chains: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
