//! Planner request and output shapes. The manifest is consumed as-is by an
//! external renderer; every entry is fully resolved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::TransitionKind;
use crate::scene::Scene;
use crate::shot::{CameraMotion, ShotGrammar};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub sequence_id: String,
    pub scenes: Vec<Scene>,
    /// Style slug (style pack).
    pub style: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

impl Transition {
    pub fn cut() -> Self {
        Self {
            kind: TransitionKind::HardCut,
            duration_ms: None,
        }
    }

    pub fn timed(kind: TransitionKind, duration_ms: u32) -> Self {
        if kind.is_instant() {
            return Self::cut();
        }
        Self {
            kind,
            duration_ms: Some(duration_ms),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Scene id.
    pub scene: String,
    /// Hold duration in milliseconds.
    pub duration: u32,
    /// Transition into this entry.
    pub transition: Transition,
    pub camera_override: CameraMotion,
    pub shot_grammar: ShotGrammar,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceManifest {
    pub sequence_id: String,
    pub style: String,
    pub entries: Vec<ManifestEntry>,
}

impl SequenceManifest {
    pub fn total_duration_ms(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.duration)).sum()
    }

    pub fn scene_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.scene.as_str()).collect()
    }
}

/// Editorial notes emitted next to the manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanNotes {
    pub ordering_rationale: String,
    /// Transition type -> number of entries using it.
    pub transition_summary: BTreeMap<String, usize>,
    /// One line per variety repair (swap or reframe).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repairs: Vec<String>,
    /// Scene id -> low-confidence fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub low_confidence: BTreeMap<String, Vec<String>>,
    /// Shot grammar axes clamped to the style, and camera moves replaced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
    /// Set when the requested style was unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_fallback: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanOutput {
    pub manifest: SequenceManifest,
    pub notes: PlanNotes,
}
