//! Scene analyzer.
//!
//! Each metadata field is resolved by its own ordered [`RuleChain`]; the first
//! matching rule fixes both value and confidence. Analysis never fails: a
//! scene with no layers and no layout simply lands on every chain's default,
//! each of which carries a confidence below the flagging threshold.
//!
//! [`RuleChain`]: crate::rules::RuleChain

pub mod content;
pub mod shot;
pub mod signals;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::scene::{Scene, SceneMetadata, ShotClassification};
use shot::ShotInput;

/// Result of analyzing one scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Copy of the input scene with `metadata` filled in.
    pub scene: Scene,
    pub metadata: SceneMetadata,
    /// Mean confidence over all classified fields.
    pub confidence: f32,
    /// Fields whose confidence fell below the configured threshold.
    pub low_confidence: Vec<String>,
}

impl Analysis {
    pub fn is_flagged(&self) -> bool {
        !self.low_confidence.is_empty()
    }
}

/// Classify a scene with the default configuration.
pub fn analyze(scene: &Scene) -> Analysis {
    analyze_with(scene, &Config::default())
}

pub fn analyze_with(scene: &Scene, config: &Config) -> Analysis {
    let metadata = classify(scene);

    let confidences = metadata.confidences();
    let confidence =
        confidences.iter().map(|(_, c)| c).sum::<f32>() / confidences.len() as f32;
    let low_confidence: Vec<String> = confidences
        .iter()
        .filter(|(_, c)| config.is_low_confidence(*c))
        .map(|(name, _)| name.to_string())
        .collect();

    if !low_confidence.is_empty() {
        log::warn!(
            "scene '{}': low-confidence classification for {}",
            scene.id,
            low_confidence.join(", ")
        );
    }
    log::debug!(
        "scene '{}': content={} size={} angle={} framing={} (confidence {:.2})",
        scene.id,
        metadata.content_type.value.as_str(),
        metadata.shot_grammar.shot_size.value,
        metadata.shot_grammar.angle.value,
        metadata.shot_grammar.framing.value,
        confidence
    );

    let mut enriched = scene.clone();
    enriched.metadata = Some(metadata.clone());
    Analysis {
        scene: enriched,
        metadata,
        confidence,
        low_confidence,
    }
}

/// Classify every scene independently. Order of the output matches the input.
#[cfg(not(feature = "parallel"))]
pub fn analyze_all(scenes: &[Scene], config: &Config) -> Vec<Analysis> {
    scenes.iter().map(|s| analyze_with(s, config)).collect()
}

/// Classify every scene independently on the rayon pool. Order of the output matches the input.
#[cfg(feature = "parallel")]
pub fn analyze_all(scenes: &[Scene], config: &Config) -> Vec<Analysis> {
    use rayon::prelude::*;
    scenes.par_iter().map(|s| analyze_with(s, config)).collect()
}

fn classify(scene: &Scene) -> SceneMetadata {
    let content_type = content::content_type_rules().resolve(scene);
    let visual_weight = signals::visual_weight_rules().resolve(scene);
    let motion_energy = signals::motion_energy_rules().resolve(scene);
    let intent_tags = signals::intent_tag_rules().resolve(scene);

    let input = ShotInput {
        scene,
        content_type: content_type.value,
        intent_tags: &intent_tags.value,
    };
    let shot_grammar = ShotClassification {
        shot_size: shot::shot_size_rules().resolve(&input),
        angle: shot::angle_rules().resolve(&input),
        framing: shot::framing_rules().resolve(&input),
    };

    SceneMetadata {
        content_type,
        visual_weight,
        motion_energy,
        intent_tags,
        shot_grammar,
    }
}
