//! Choreography validator.
//!
//! Runs six guardrail tiers over a proposed primitive set and folds every
//! finding into one [`Verdict`]. Tiers never short-circuit each other, so a
//! single call reports every problem. Unknown ids are findings, not errors.

pub mod tiers;
pub mod verdict;

pub use verdict::{Code, Finding, Severity, Status, Verdict};

use serde::{Deserialize, Serialize};

use crate::error::{ChoreographyError, Result};
use crate::registry::{Primitive, Registry};

/// Optional numeric overrides checked by the speed and lens tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perspective: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_blur: Option<f64>,
    /// Stretches every primitive's duration before the speed check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_multiplier: Option<f64>,
}

impl Overrides {
    /// The multiplier to apply; invalid values fall back to 1.
    pub fn effective_multiplier(&self) -> f64 {
        match self.duration_multiplier {
            Some(m) if m.is_finite() && m > 0.0 => m,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub primitives: Vec<String>,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Overrides>,
}

impl ValidationRequest {
    pub fn new<I, S>(primitives: I, style: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primitives: primitives.into_iter().map(Into::into).collect(),
            style: style.into(),
            intent: None,
            overrides: None,
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// Validate a primitive set against a style. Only a blank primitive id is an error.
pub fn validate(request: &ValidationRequest, registry: &Registry) -> Result<Verdict> {
    let mut ids: Vec<&str> = Vec::with_capacity(request.primitives.len());
    for raw in &request.primitives {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ChoreographyError::malformed("primitive ids must be non-empty"));
        }
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    let style = registry.style(request.style.trim());
    let known: Vec<&Primitive> = ids.iter().filter_map(|id| registry.primitive(id)).collect();
    let overrides = request.overrides.unwrap_or_default();
    let guardrails = registry.guardrails();

    let mut findings = Vec::new();
    tiers::existence(&ids, registry, &mut findings);
    tiers::style_compatibility(&known, style, &request.style, &mut findings);
    tiers::forbidden_features(&known, style, registry, &mut findings);
    tiers::speed_limits(&known, guardrails, overrides.effective_multiplier(), &mut findings);
    tiers::lens_bounds(&overrides, guardrails, &mut findings);
    let intent = request.intent.as_deref();
    tiers::intent_reference(
        intent,
        intent.and_then(|slug| registry.intent(slug)),
        style,
        &ids,
        &mut findings,
    );

    let verdict = Verdict::from_findings(findings);
    if verdict.is_blocked() {
        log::warn!(
            "choreography blocked for style '{}': {} block(s), {} warning(s)",
            request.style,
            verdict.blocks.len(),
            verdict.warnings.len()
        );
    } else {
        log::debug!(
            "choreography {} for style '{}' ({} primitive(s))",
            verdict.status,
            request.style,
            ids.len()
        );
    }
    Ok(verdict)
}
