//! Scene input model (external authoring format) and the metadata the
//! analyzer attaches to it.

use serde::{Deserialize, Serialize};

use crate::error::{ChoreographyError, Result};
use crate::rules::Classified;
use crate::shot::{Angle, Framing, ShotGrammar, ShotSize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Authored camera intent for a scene. `move` is kept as a raw string so
/// unknown moves survive parsing and simply fall back during planning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneCamera {
    #[serde(rename = "move")]
    pub movement: String,
    #[serde(default)]
    pub intensity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub template: String,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

impl Layout {
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthClass {
    Background,
    Midground,
    Foreground,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    /// `text`, `image`, `chart`, `device`, `screenshot`, `progress`, `shape`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_class: Option<DepthClass>,
    /// Entrance primitive id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(default)]
    pub style: serde_json::Map<String, serde_json::Value>,
}

impl Layer {
    /// Layers without a depth class count as foreground.
    pub fn is_foreground(&self) -> bool {
        matches!(self.depth_class, None | Some(DepthClass::Foreground))
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Typography,
    Portrait,
    Product,
    DataVisualization,
    Interface,
    Gallery,
    Progress,
    Generic,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Typography => "typography",
            ContentType::Portrait => "portrait",
            ContentType::Product => "product",
            ContentType::DataVisualization => "data_visualization",
            ContentType::Interface => "interface",
            ContentType::Gallery => "gallery",
            ContentType::Progress => "progress",
            ContentType::Generic => "generic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualWeight {
    Light,
    Balanced,
    Heavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionEnergy {
    Calm,
    Moderate,
    Energetic,
}

/// Raw (unclamped) shot classification, one confidence per axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotClassification {
    pub shot_size: Classified<ShotSize>,
    pub angle: Classified<Angle>,
    pub framing: Classified<Framing>,
}

impl ShotClassification {
    pub fn grammar(&self) -> ShotGrammar {
        ShotGrammar::new(self.shot_size.value, self.angle.value, self.framing.value)
    }
}

/// Analyzer output attached to a scene. Every field carries exactly one confidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub content_type: Classified<ContentType>,
    pub visual_weight: Classified<VisualWeight>,
    pub motion_energy: Classified<MotionEnergy>,
    pub intent_tags: Classified<Vec<String>>,
    pub shot_grammar: ShotClassification,
}

impl SceneMetadata {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.intent_tags.value.iter().any(|t| t == tag)
    }

    /// (field name, confidence) for every classified field, in a fixed order.
    pub fn confidences(&self) -> [(&'static str, f32); 7] {
        [
            ("content_type", self.content_type.confidence),
            ("visual_weight", self.visual_weight.confidence),
            ("motion_energy", self.motion_energy.confidence),
            ("intent_tags", self.intent_tags.confidence),
            ("shot_size", self.shot_grammar.shot_size.confidence),
            ("angle", self.shot_grammar.angle.confidence),
            ("framing", self.shot_grammar.framing.confidence),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub canvas: Canvas,
    /// Authored duration in milliseconds.
    pub duration: f64,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<SceneCamera>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Authoring intent hints (`hero`, `opening`, `detail`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intent: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SceneMetadata>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene =
            serde_json::from_str(json).map_err(|e| ChoreographyError::SceneParse(e.to_string()))?;
        scene.check_shape()?;
        Ok(scene)
    }

    /// Basic shape checks; a failure is a caller contract violation.
    pub fn check_shape(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ChoreographyError::malformed("scene id must be non-empty"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ChoreographyError::malformed(format!(
                "scene '{}' canvas must have non-zero dimensions",
                self.id
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ChoreographyError::malformed(format!(
                "scene '{}' duration must be finite and >= 0",
                self.id
            )));
        }
        if let Some(cam) = &self.camera {
            if !cam.intensity.is_finite() {
                return Err(ChoreographyError::malformed(format!(
                    "scene '{}' camera intensity must be finite",
                    self.id
                )));
            }
        }
        Ok(())
    }

    pub fn template(&self) -> Option<&str> {
        self.layout.as_ref().map(|l| l.template.as_str())
    }

    pub fn foreground_layers(&self) -> usize {
        self.layers.iter().filter(|l| l.is_foreground()).count()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.layers.iter().filter(|l| l.is_kind(kind)).count()
    }
}
