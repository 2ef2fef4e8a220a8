//! Ordered "first match wins" rule chains.
//!
//! A chain is a list of `(predicate, value, confidence)` rules plus a terminal
//! fallback. Rules are tried in declaration order and the first one that
//! matches fixes both the value and its confidence. Two rules with equal
//! confidence never compete: the earlier one always wins.

use serde::{Deserialize, Serialize};

/// A classified value with the confidence of the rule that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classified<T> {
    pub value: T,
    /// Confidence in [0,1].
    pub confidence: f32,
    /// Name of the rule that fixed the value.
    #[serde(default)]
    pub rule: String,
}

impl<T> Classified<T> {
    pub fn new(value: T, confidence: f32, rule: impl Into<String>) -> Self {
        Self {
            value,
            confidence: confidence.clamp(0.0, 1.0),
            rule: rule.into(),
        }
    }
}

enum Matcher<I: ?Sized, V> {
    /// Fixed value when the predicate holds.
    When(fn(&I) -> bool, V),
    /// Value extracted from the input (table lookups).
    Extract(fn(&I) -> Option<V>),
}

/// One entry in a [`RuleChain`].
pub struct Rule<I: ?Sized, V> {
    name: &'static str,
    confidence: f32,
    matcher: Matcher<I, V>,
}

impl<I: ?Sized, V: Clone> Rule<I, V> {
    /// Rule yielding `value` whenever `predicate` holds.
    pub fn when(name: &'static str, predicate: fn(&I) -> bool, value: V, confidence: f32) -> Self {
        Self {
            name,
            confidence,
            matcher: Matcher::When(predicate, value),
        }
    }

    /// Rule whose value is derived from the input; `None` means "no match".
    pub fn extract(name: &'static str, extract: fn(&I) -> Option<V>, confidence: f32) -> Self {
        Self {
            name,
            confidence,
            matcher: Matcher::Extract(extract),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    fn apply(&self, input: &I) -> Option<V> {
        match &self.matcher {
            Matcher::When(pred, value) => pred(input).then(|| value.clone()),
            Matcher::Extract(f) => f(input),
        }
    }
}

/// Ordered rules with a terminal default.
pub struct RuleChain<I: ?Sized, V> {
    rules: Vec<Rule<I, V>>,
    fallback_name: &'static str,
    fallback: V,
    fallback_confidence: f32,
}

impl<I: ?Sized, V: Clone> RuleChain<I, V> {
    pub fn new(fallback_name: &'static str, fallback: V, fallback_confidence: f32) -> Self {
        Self {
            rules: Vec::new(),
            fallback_name,
            fallback,
            fallback_confidence,
        }
    }

    /// Append a rule after the existing ones (lower priority).
    pub fn rule(mut self, rule: Rule<I, V>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule<I, V>] {
        &self.rules
    }

    /// Evaluate rules in order; the first match wins.
    pub fn resolve(&self, input: &I) -> Classified<V> {
        for rule in &self.rules {
            if let Some(value) = rule.apply(input) {
                log::trace!("rule '{}' matched", rule.name);
                return Classified::new(value, rule.confidence, rule.name);
            }
        }
        Classified::new(
            self.fallback.clone(),
            self.fallback_confidence,
            self.fallback_name,
        )
    }
}
