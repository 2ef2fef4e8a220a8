//! Catalog records: primitives, styles, intent mappings, guardrail bounds.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::shot::{AllowedShotGrammar, CameraMove, Framing};

/// Affinity entry that makes a primitive compatible with every style.
pub const UNIVERSAL: &str = "universal";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "3d_transforms")]
    ThreeDTransforms,
    #[serde(rename = "blur")]
    Blur,
    #[serde(rename = "blur_entrance")]
    BlurEntrance,
    #[serde(rename = "camera_movement")]
    CameraMovement,
    #[serde(rename = "camera_shake")]
    CameraShake,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::ThreeDTransforms => "3d_transforms",
            Feature::Blur => "blur",
            Feature::BlurEntrance => "blur_entrance",
            Feature::CameraMovement => "camera_movement",
            Feature::CameraShake => "camera_shake",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveCategory {
    Entrance,
    Exit,
    Emphasis,
    Camera,
    Ambient,
    Transition,
}

/// Motion amplitude used for speed and feature checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Amplitude {
    /// Animated property, e.g. `translateX`, `rotateY`, `filter.blur`.
    pub property: String,
    pub max_displacement: f64,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: String,
    pub category: PrimitiveCategory,
    /// Raw catalog duration (`"400ms"`, `"1.2s"`, `"250"`).
    pub duration: String,
    pub style_affinity: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<Amplitude>,
    /// Parsed from `duration` when the registry is built.
    #[serde(skip)]
    pub(crate) duration_ms: f64,
}

impl Primitive {
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn supports_style(&self, style: &str) -> bool {
        self.style_affinity
            .iter()
            .any(|s| s == style || s == UNIVERSAL)
    }
}

/// How a style paces its cuts; drives the default transition choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    HighEnergy,
    Dramatic,
    ContentForward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    HardCut,
    Whip,
    Wipe,
    Crossfade,
    /// Neutral entrance from black.
    Fade,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::HardCut => "hard_cut",
            TransitionKind::Whip => "whip",
            TransitionKind::Wipe => "wipe",
            TransitionKind::Crossfade => "crossfade",
            TransitionKind::Fade => "fade",
        }
    }

    /// Cuts are instantaneous and carry no duration.
    pub fn is_instant(self) -> bool {
        self == TransitionKind::HardCut
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTiers {
    pub fast: u32,
    pub medium: u32,
    pub slow: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasingCurves {
    pub enter: String,
    pub exit: String,
    pub emphasis: String,
    pub camera: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraBehavior {
    pub allowed_movements: Vec<CameraMove>,
    #[serde(default)]
    pub forbidden_movements: Vec<CameraMove>,
    pub parallax: bool,
    pub depth_of_field: bool,
    pub ambient_motion: bool,
    pub shake: bool,
    /// Upper bound on camera intensity, in [0,1].
    pub max_intensity: f32,
    #[serde(default)]
    pub speed_tiers: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl CameraBehavior {
    pub fn allows(&self, movement: CameraMove) -> bool {
        self.allowed_movements.contains(&movement) && !self.forbidden_movements.contains(&movement)
    }
}

/// Hold-duration guide for one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTiming {
    pub hold_ms: u32,
    pub min_hold_ms: u32,
    pub max_hold_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionVocabulary {
    /// First entry is the style default.
    pub vocabulary: Vec<TransitionKind>,
    pub duration_ms: u32,
}

/// A named creative configuration ("personality").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub slug: String,
    pub name: String,
    pub pacing: Pacing,
    pub duration_tiers: DurationTiers,
    pub easing: EasingCurves,
    pub camera_behavior: CameraBehavior,
    #[serde(default)]
    pub forbidden_features: Vec<Feature>,
    pub shot_grammar: AllowedShotGrammar,
    pub phase_timing: PhaseTiming,
    pub transitions: TransitionVocabulary,
}

impl Style {
    pub fn shot_grammar(&self) -> &AllowedShotGrammar {
        &self.shot_grammar
    }

    pub fn forbids(&self, feature: Feature) -> bool {
        self.forbidden_features.contains(&feature)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub strength: f32,
    pub layers: u32,
}

/// A named choreographic goal and the motion it expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentMapping {
    pub slug: String,
    #[serde(default)]
    pub camera_primitives: Vec<String>,
    pub speed_tier: String,
    #[serde(default)]
    pub parallax: Parallax,
    #[serde(default)]
    pub depth_of_field: bool,
    #[serde(default)]
    pub ambient_primitives: Vec<String>,
    #[serde(default)]
    pub companion_primitives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framing: Option<Framing>,
    pub style_support: Vec<String>,
}

impl IntentMapping {
    /// Primitives a choreography for this intent is expected to contain.
    pub fn expected_primitives(&self) -> impl Iterator<Item = &str> {
        self.camera_primitives
            .iter()
            .chain(&self.ambient_primitives)
            .chain(&self.companion_primitives)
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimit {
    /// Maximum displacement per second, in `unit`.
    pub max_velocity: f64,
    pub unit: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LensBounds {
    pub perspective: Bounds,
    pub max_blur: Bounds,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guardrails {
    /// Animated property -> features it implies.
    pub property_features: HashMap<String, Vec<Feature>>,
    /// Animated property -> speed limit.
    pub speed_limits: HashMap<String, SpeedLimit>,
    pub lens_bounds: LensBounds,
    /// Extra per-style forbidden features layered over the style record.
    #[serde(default)]
    pub style_forbidden: HashMap<String, Vec<Feature>>,
}

impl Guardrails {
    pub fn features_for(&self, property: &str) -> &[Feature] {
        self.property_features
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn speed_limit(&self, property: &str) -> Option<&SpeedLimit> {
        self.speed_limits.get(property)
    }
}

/// Serialized catalog shape accepted by `Registry::from_json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub primitives: Vec<Primitive>,
    pub styles: Vec<Style>,
    #[serde(default)]
    pub intents: Vec<IntentMapping>,
    pub guardrails: Guardrails,
}
