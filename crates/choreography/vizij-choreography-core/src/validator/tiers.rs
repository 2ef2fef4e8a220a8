//! The six guardrail tiers. Each tier is a pure function that appends its
//! findings; none of them stop the others from running.

use crate::registry::{Feature, Guardrails, IntentMapping, Primitive, PrimitiveCategory, Registry, Style};

use super::verdict::{Code, Finding};
use super::Overrides;

/// Tier 1: every id must exist in the registry.
pub fn existence(ids: &[&str], registry: &Registry, out: &mut Vec<Finding>) {
    for &id in ids {
        if registry.primitive(id).is_none() {
            out.push(Finding::new(
                Code::UnknownPrimitive,
                Some(id),
                format!("primitive '{id}' is not in the registry"),
            ));
        }
    }
}

/// Tier 2: affinity must name the style or `universal`.
pub fn style_compatibility(
    primitives: &[&Primitive],
    style: Option<&Style>,
    requested: &str,
    out: &mut Vec<Finding>,
) {
    let Some(style) = style else {
        out.push(Finding::new(
            Code::UnknownStyle,
            None,
            format!("style '{requested}' is not in the registry"),
        ));
        return;
    };
    for p in primitives {
        if !p.supports_style(&style.slug) {
            out.push(Finding::new(
                Code::StyleIncompatible,
                Some(p.id.as_str()),
                format!(
                    "primitive '{}' has no affinity for style '{}' (affinity: {})",
                    p.id,
                    style.slug,
                    p.style_affinity.join(", ")
                ),
            ));
        }
    }
}

/// Features a primitive exercises, derived from its animated property and category.
pub fn primitive_features(primitive: &Primitive, guardrails: &Guardrails) -> Vec<Feature> {
    let mut out: Vec<Feature> = primitive
        .amplitude
        .as_ref()
        .map(|a| guardrails.features_for(&a.property).to_vec())
        .unwrap_or_default();
    if primitive.category == PrimitiveCategory::Entrance && out.contains(&Feature::Blur) {
        out.push(Feature::BlurEntrance);
    }
    if primitive.category == PrimitiveCategory::Camera {
        out.push(Feature::CameraMovement);
    }
    out.sort();
    out.dedup();
    out
}

/// Tier 3: no primitive may exercise a feature the style forbids.
pub fn forbidden_features(
    primitives: &[&Primitive],
    style: Option<&Style>,
    registry: &Registry,
    out: &mut Vec<Finding>,
) {
    let Some(style) = style else {
        return;
    };
    let forbidden = registry.forbidden_features(style);
    for p in primitives {
        for feature in primitive_features(p, registry.guardrails()) {
            if forbidden.contains(&feature) {
                out.push(Finding::new(
                    Code::ForbiddenFeature,
                    Some(p.id.as_str()),
                    format!(
                        "primitive '{}' uses {feature}, which style '{}' forbids",
                        p.id, style.slug
                    ),
                ));
            }
        }
    }
}

/// Effective velocity in the amplitude's unit per second.
pub fn effective_velocity(primitive: &Primitive, multiplier: f64) -> Option<f64> {
    let amplitude = primitive.amplitude.as_ref()?;
    let seconds = primitive.duration_ms() / 1000.0 * multiplier;
    (seconds > 0.0).then(|| amplitude.max_displacement.abs() / seconds)
}

/// Tier 4: velocity strictly above the property's limit is a warning.
pub fn speed_limits(
    primitives: &[&Primitive],
    guardrails: &Guardrails,
    multiplier: f64,
    out: &mut Vec<Finding>,
) {
    for p in primitives {
        let Some(amplitude) = &p.amplitude else {
            continue;
        };
        let Some(limit) = guardrails.speed_limit(&amplitude.property) else {
            continue;
        };
        let Some(velocity) = effective_velocity(p, multiplier) else {
            continue;
        };
        if velocity > limit.max_velocity {
            out.push(Finding::new(
                Code::SpeedLimit,
                Some(p.id.as_str()),
                format!(
                    "primitive '{}' moves {} at {:.2} {}/s, above the limit of {} {}/s",
                    p.id, amplitude.property, velocity, limit.unit, limit.max_velocity, limit.unit
                ),
            ));
        }
    }
}

/// Tier 5: lens overrides against fixed bounds, plus override sanity.
pub fn lens_bounds(overrides: &Overrides, guardrails: &Guardrails, out: &mut Vec<Finding>) {
    let bounds = &guardrails.lens_bounds;
    if let Some(p) = overrides.perspective {
        if !bounds.perspective.contains(p) {
            out.push(Finding::new(
                Code::LensBounds,
                None,
                format!(
                    "perspective {p} outside [{}, {}]",
                    bounds.perspective.min, bounds.perspective.max
                ),
            ));
        }
    }
    if let Some(b) = overrides.max_blur {
        if !bounds.max_blur.contains(b) {
            out.push(Finding::new(
                Code::LensBounds,
                None,
                format!(
                    "max_blur {b} outside [{}, {}]",
                    bounds.max_blur.min, bounds.max_blur.max
                ),
            ));
        }
    }
    if let Some(m) = overrides.duration_multiplier {
        if !(m.is_finite() && m > 0.0) {
            out.push(Finding::new(
                Code::InvalidOverride,
                None,
                format!("duration_multiplier {m} ignored; must be positive and finite"),
            ));
        }
    }
}

/// Tier 6: intent cross-reference. Informational only.
pub fn intent_reference(
    intent: Option<&str>,
    mapping: Option<&IntentMapping>,
    style: Option<&Style>,
    ids: &[&str],
    out: &mut Vec<Finding>,
) {
    let Some(slug) = intent else {
        return;
    };
    let Some(mapping) = mapping else {
        out.push(Finding::new(
            Code::UnknownIntent,
            None,
            format!("intent '{slug}' is not in the registry"),
        ));
        return;
    };
    if let Some(style) = style {
        if !mapping.style_support.iter().any(|s| s == &style.slug) {
            out.push(Finding::new(
                Code::IntentStyleUnsupported,
                None,
                format!(
                    "intent '{}' is not tuned for style '{}' (supports: {})",
                    mapping.slug,
                    style.slug,
                    mapping.style_support.join(", ")
                ),
            ));
        }
    }
    let missing: Vec<&str> = mapping
        .expected_primitives()
        .filter(|expected| !ids.contains(expected))
        .collect();
    if !missing.is_empty() {
        out.push(Finding::new(
            Code::IntentPrimitivesMissing,
            None,
            format!(
                "intent '{}' usually includes: {}",
                mapping.slug,
                missing.join(", ")
            ),
        ));
    }
}
