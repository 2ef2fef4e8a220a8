//! Shot grammar to CSS transform parameters.
//!
//! Static framing comes from a fixed table per axis. `compose` folds a camera
//! move on top: scale multiplies, rotation comes only from the static framing,
//! translation comes only from the move, and origins come only from the
//! static framing. The emitted order is always
//! `scale -> rotateX -> rotateZ -> translate`.

use serde::{Deserialize, Serialize};

use super::camera::CameraMotion;
use super::grammar::{Angle, Framing, ShotGrammar, ShotSize};

/// Static CSS parameters for one shot grammar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCss {
    pub scale: f32,
    /// Degrees.
    pub rotate_x: f32,
    /// Degrees.
    pub rotate_z: f32,
    pub transform_origin: String,
    pub perspective_origin: String,
}

fn size_scale(size: ShotSize) -> f32 {
    match size {
        ShotSize::ExtremeWide => 0.85,
        ShotSize::Wide => 0.92,
        ShotSize::Medium => 1.0,
        ShotSize::CloseUp => 1.2,
        ShotSize::ExtremeCloseUp => 1.45,
    }
}

/// (rotateX, rotateZ) in degrees.
fn angle_rotation(angle: Angle) -> (f32, f32) {
    match angle {
        Angle::EyeLevel => (0.0, 0.0),
        Angle::High => (8.0, 0.0),
        Angle::Low => (-8.0, 0.0),
        Angle::Dutch => (0.0, 6.0),
        Angle::BirdsEye => (24.0, 0.0),
    }
}

/// (transform-origin, perspective-origin).
fn framing_origins(framing: Framing) -> (&'static str, &'static str) {
    match framing {
        Framing::Center => ("50% 50%", "50% 50%"),
        Framing::RuleOfThirdsLeft => ("33.333% 50%", "33.333% 45%"),
        Framing::RuleOfThirdsRight => ("66.667% 50%", "66.667% 45%"),
        Framing::LowerThird => ("50% 66.667%", "50% 60%"),
    }
}

/// Table lookup; total over every grammar value.
pub fn resolve_css(grammar: &ShotGrammar) -> StaticCss {
    let (rotate_x, rotate_z) = angle_rotation(grammar.angle);
    let (origin, perspective) = framing_origins(grammar.framing);
    StaticCss {
        scale: size_scale(grammar.size),
        rotate_x,
        rotate_z,
        transform_origin: origin.to_string(),
        perspective_origin: perspective.to_string(),
    }
}

/// Numeric components of a composed transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformComponents {
    pub scale: f32,
    pub rotate_x: f32,
    pub rotate_z: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedTransform {
    /// `scale(..) rotateX(..) rotateZ(..) translate(..)`
    pub transform: String,
    pub transform_origin: String,
    pub perspective_origin: String,
    pub components: TransformComponents,
}

/// Compose static framing with a camera move sampled at `progress`.
pub fn compose<E>(
    static_css: &StaticCss,
    camera: &CameraMotion,
    progress: f32,
    easing: E,
) -> ComposedTransform
where
    E: Fn(f32) -> f32,
{
    let eased = easing(progress.clamp(0.0, 1.0));
    let frame = camera.sample(eased);
    let components = TransformComponents {
        scale: static_css.scale * frame.scale,
        rotate_x: static_css.rotate_x,
        rotate_z: static_css.rotate_z,
        translate_x: frame.translate_x,
        translate_y: frame.translate_y,
    };
    ComposedTransform {
        transform: format!(
            "scale({}) rotateX({}deg) rotateZ({}deg) translate({}%, {}%)",
            fmt_num(components.scale),
            fmt_num(components.rotate_x),
            fmt_num(components.rotate_z),
            fmt_num(components.translate_x),
            fmt_num(components.translate_y),
        ),
        // Static framing wins over the move's default origin.
        transform_origin: static_css.transform_origin.clone(),
        perspective_origin: static_css.perspective_origin.clone(),
        components,
    }
}

/// Up to four decimals, no trailing zeros, no negative zero.
fn fmt_num(v: f32) -> String {
    if !v.is_finite() || v.abs() < 5e-5 {
        return "0".to_string();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
