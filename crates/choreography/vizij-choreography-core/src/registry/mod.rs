//! Read-only reference registry: primitives, styles, intent mappings and
//! guardrail bounds.
//!
//! A `Registry` is built once from a JSON catalog and then only handed out by
//! shared reference. There is no global instance; every entry point takes the
//! registry as an argument.

pub mod catalog;
pub mod duration;

use hashbrown::HashMap;

pub use catalog::{
    Amplitude, Bounds, CameraBehavior, Catalog, DurationTiers, EasingCurves, Feature, Guardrails,
    IntentMapping, LensBounds, Pacing, Parallax, PhaseTiming, Primitive, PrimitiveCategory,
    SpeedLimit, Style, TransitionKind, TransitionVocabulary, UNIVERSAL,
};

use crate::error::{ChoreographyError, Result};
use duration::parse_duration_ms;

const BUILTIN_CATALOG: &str = include_str!("../../data/registry.json");

#[derive(Debug, Clone)]
pub struct Registry {
    catalog: Catalog,
    primitive_index: HashMap<String, usize>,
    style_index: HashMap<String, usize>,
    intent_index: HashMap<String, usize>,
}

impl Registry {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| ChoreographyError::RegistryParse(e.to_string()))?;
        Self::from_catalog(catalog)
    }

    /// Validate a catalog and index it.
    pub fn from_catalog(mut catalog: Catalog) -> Result<Self> {
        for primitive in &mut catalog.primitives {
            primitive.duration_ms = parse_duration_ms(&primitive.duration).ok_or_else(|| {
                ChoreographyError::malformed(format!(
                    "primitive '{}' has unparsable duration '{}'",
                    primitive.id, primitive.duration
                ))
            })?;
            check_primitive(primitive)?;
        }
        for style in &catalog.styles {
            check_style(style)?;
        }
        check_guardrails(&catalog.guardrails)?;

        let primitive_index = index_by(catalog.primitives.iter().map(|p| p.id.as_str()), "primitive")?;
        let style_index = index_by(catalog.styles.iter().map(|s| s.slug.as_str()), "style")?;
        let intent_index = index_by(catalog.intents.iter().map(|i| i.slug.as_str()), "intent")?;

        log::debug!(
            "registry {} loaded: {} primitives, {} styles, {} intents",
            catalog.version,
            catalog.primitives.len(),
            catalog.styles.len(),
            catalog.intents.len()
        );

        Ok(Self {
            catalog,
            primitive_index,
            style_index,
            intent_index,
        })
    }

    pub fn version(&self) -> &str {
        &self.catalog.version
    }

    pub fn primitive(&self, id: &str) -> Option<&Primitive> {
        self.primitive_index
            .get(id)
            .map(|&i| &self.catalog.primitives[i])
    }

    pub fn style(&self, slug: &str) -> Option<&Style> {
        self.style_index.get(slug).map(|&i| &self.catalog.styles[i])
    }

    pub fn intent(&self, slug: &str) -> Option<&IntentMapping> {
        self.intent_index
            .get(slug)
            .map(|&i| &self.catalog.intents[i])
    }

    pub fn guardrails(&self) -> &Guardrails {
        &self.catalog.guardrails
    }

    /// Primitives in catalog order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.catalog.primitives.iter()
    }

    /// Styles in catalog order.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.catalog.styles.iter()
    }

    pub fn intents(&self) -> impl Iterator<Item = &IntentMapping> {
        self.catalog.intents.iter()
    }

    /// Style record features plus any guardrail-level additions, sorted and deduplicated.
    pub fn forbidden_features(&self, style: &Style) -> Vec<Feature> {
        let mut out = style.forbidden_features.clone();
        if let Some(extra) = self.catalog.guardrails.style_forbidden.get(&style.slug) {
            out.extend(extra.iter().copied());
        }
        out.sort();
        out.dedup();
        out
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.catalog)
            .map_err(|e| ChoreographyError::RegistryParse(e.to_string()))
    }
}

fn index_by<'a>(
    keys: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, key) in keys.enumerate() {
        if key.trim().is_empty() {
            return Err(ChoreographyError::malformed(format!(
                "{kind} at position {i} has an empty id"
            )));
        }
        if index.insert(key.to_string(), i).is_some() {
            return Err(ChoreographyError::malformed(format!(
                "duplicate {kind} id '{key}'"
            )));
        }
    }
    Ok(index)
}

fn check_primitive(p: &Primitive) -> Result<()> {
    if p.style_affinity.is_empty() {
        return Err(ChoreographyError::malformed(format!(
            "primitive '{}' has an empty style_affinity",
            p.id
        )));
    }
    if let Some(amp) = &p.amplitude {
        if amp.property.trim().is_empty() {
            return Err(ChoreographyError::malformed(format!(
                "primitive '{}' amplitude has no property",
                p.id
            )));
        }
        if !amp.max_displacement.is_finite() || amp.max_displacement < 0.0 {
            return Err(ChoreographyError::malformed(format!(
                "primitive '{}' amplitude max_displacement must be finite and >= 0",
                p.id
            )));
        }
    }
    Ok(())
}

fn check_style(s: &Style) -> Result<()> {
    let fail = |what: &str| {
        Err(ChoreographyError::malformed(format!(
            "style '{}': {what}",
            s.slug
        )))
    };
    let grammar = s.shot_grammar();
    if grammar.sizes.is_empty() || grammar.angles.is_empty() || grammar.framings.is_empty() {
        return fail("shot_grammar allowed sets must be non-empty");
    }
    if !grammar.admits_fallbacks() {
        return fail("shot_grammar must admit medium / eye_level / center");
    }
    let t = &s.phase_timing;
    if t.hold_ms == 0 || t.min_hold_ms > t.hold_ms || t.hold_ms > t.max_hold_ms {
        return fail("phase_timing must satisfy 0 < min_hold_ms <= hold_ms <= max_hold_ms");
    }
    let d = &s.duration_tiers;
    if d.fast == 0 || d.fast > d.medium || d.medium > d.slow {
        return fail("duration_tiers must satisfy 0 < fast <= medium <= slow");
    }
    if s.transitions.vocabulary.is_empty() {
        return fail("transition vocabulary must be non-empty");
    }
    let max = s.camera_behavior.max_intensity;
    if !max.is_finite() || !(0.0..=1.0).contains(&max) {
        return fail("camera_behavior.max_intensity must be in [0,1]");
    }
    Ok(())
}

fn check_guardrails(g: &Guardrails) -> Result<()> {
    for (property, limit) in &g.speed_limits {
        if !limit.max_velocity.is_finite() || limit.max_velocity <= 0.0 {
            return Err(ChoreographyError::malformed(format!(
                "speed limit for '{property}' must be finite and > 0"
            )));
        }
    }
    for (name, b) in [
        ("perspective", g.lens_bounds.perspective),
        ("max_blur", g.lens_bounds.max_blur),
    ] {
        if !(b.min.is_finite() && b.max.is_finite()) || b.min > b.max {
            return Err(ChoreographyError::malformed(format!(
                "lens bound '{name}' must have finite min <= max"
            )));
        }
    }
    Ok(())
}
