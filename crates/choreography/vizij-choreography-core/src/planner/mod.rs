//! Sequence planner.
//!
//! Turns analyzed scenes plus a style into a [`SequenceManifest`]. Per-scene
//! work (duration, shot grammar, camera override) has no cross-scene
//! dependency and runs first; ordering, the variety repair and transition
//! assignment then run sequentially over the resolved entries.

pub mod manifest;
pub mod timing;
pub mod transition;
pub mod variety;

pub use manifest::{ManifestEntry, PlanNotes, PlanOutput, PlanRequest, SequenceManifest, Transition};
pub use variety::{enforce_variety, longest_run, Repair, ShotSlot};

use std::collections::BTreeMap;

use hashbrown::HashSet;

use crate::config::Config;
use crate::error::{ChoreographyError, Result};
use crate::registry::{Registry, Style};
use crate::scene::{Scene, SceneMetadata};
use crate::shot::{
    grammar_corrections, validate_shot_grammar, CameraMotion, CameraMove, ShotGrammar, ShotSize,
};

/// Tag that pins a scene to the end of the sequence.
pub const CLOSING_TAG: &str = "closing";

/// One scene after per-scene resolution, before ordering.
#[derive(Clone, Debug)]
struct Planned<'a> {
    scene: &'a Scene,
    metadata: &'a SceneMetadata,
    duration: u32,
    grammar: ShotGrammar,
    camera: CameraMotion,
    corrections: Vec<String>,
}

impl ShotSlot for Planned<'_> {
    fn shot_size(&self) -> ShotSize {
        self.grammar.size
    }

    fn set_shot_size(&mut self, size: ShotSize) {
        self.grammar.size = size;
    }

    fn label(&self) -> &str {
        &self.scene.id
    }

    fn pinned(&self) -> bool {
        self.metadata.has_tag(transition::OPENING_TAG) || self.metadata.has_tag(CLOSING_TAG)
    }
}

/// Plan a sequence. Every scene must already carry analyzer metadata.
pub fn plan_sequence(request: &PlanRequest, registry: &Registry, config: &Config) -> Result<PlanOutput> {
    let metadata = check_request(request)?;
    let (style, style_fallback) = resolve_style(&request.style, registry, config)?;

    let planned = resolve_scenes(&request.scenes, &metadata, style, config);

    let mut ordered = order_scenes(planned);
    let repairs = enforce_variety(
        &mut ordered,
        &style.shot_grammar().sizes,
        config.max_shot_size_run,
        config.variety_lookahead,
    );

    let mut entries = Vec::with_capacity(ordered.len());
    let mut prev: Option<&SceneMetadata> = None;
    for p in &ordered {
        let transition =
            transition::choose_transition(style, prev, p.metadata, config.entrance_transition_ms);
        entries.push(ManifestEntry {
            scene: p.scene.id.clone(),
            duration: p.duration,
            transition,
            camera_override: p.camera,
            shot_grammar: p.grammar,
        });
        prev = Some(p.metadata);
    }

    let notes = PlanNotes {
        ordering_rationale: ordering_rationale(&ordered, &repairs),
        transition_summary: transition_summary(&entries),
        repairs: repairs.iter().map(Repair::describe).collect(),
        low_confidence: low_confidence(&ordered, config),
        corrections: ordered
            .iter()
            .flat_map(|p| p.corrections.iter().cloned())
            .collect(),
        style_fallback,
    };

    log::debug!(
        "planned sequence '{}' ({} entries, style {}, {} repairs)",
        request.sequence_id,
        entries.len(),
        style.slug,
        repairs.len()
    );

    Ok(PlanOutput {
        manifest: SequenceManifest {
            sequence_id: request.sequence_id.clone(),
            style: style.slug.clone(),
            entries,
        },
        notes,
    })
}

/// Shape checks first, then the metadata prerequisite, scene by scene.
fn check_request(request: &PlanRequest) -> Result<Vec<&SceneMetadata>> {
    if request.sequence_id.trim().is_empty() {
        return Err(ChoreographyError::malformed("sequence_id must be non-empty"));
    }
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(request.scenes.len());
    for scene in &request.scenes {
        scene.check_shape()?;
        if !seen.insert(scene.id.as_str()) {
            return Err(ChoreographyError::malformed(format!(
                "duplicate scene id '{}'",
                scene.id
            )));
        }
        let metadata = scene
            .metadata
            .as_ref()
            .ok_or_else(|| ChoreographyError::MissingMetadata {
                scene_id: scene.id.clone(),
            })?;
        out.push(metadata);
    }
    Ok(out)
}

fn resolve_style<'r>(
    slug: &str,
    registry: &'r Registry,
    config: &Config,
) -> Result<(&'r Style, Option<String>)> {
    if let Some(style) = registry.style(slug) {
        return Ok((style, None));
    }
    let style = registry.style(&config.default_style).ok_or_else(|| {
        ChoreographyError::malformed(format!(
            "unknown style '{slug}' and default style '{}' is not in the registry",
            config.default_style
        ))
    })?;
    log::warn!("unknown style '{slug}', planning with '{}'", style.slug);
    Ok((
        style,
        Some(format!("unknown style '{slug}'; used '{}'", style.slug)),
    ))
}

fn resolve_one<'a>(
    scene: &'a Scene,
    metadata: &'a SceneMetadata,
    style: &Style,
    config: &Config,
) -> Planned<'a> {
    let mut corrections = Vec::new();

    let raw = metadata.shot_grammar.grammar();
    let grammar = validate_shot_grammar(&raw, style);
    for axis in grammar_corrections(&raw, style) {
        corrections.push(format!(
            "{}: {} not allowed by {}, using fallback",
            scene.id,
            axis.as_str(),
            style.slug
        ));
    }

    let camera = camera_override(scene, style, &mut corrections);
    let duration = timing::resolve_duration(style, metadata.content_type.value, scene, config);

    Planned {
        scene,
        metadata,
        duration,
        grammar,
        camera,
        corrections,
    }
}

#[cfg(not(feature = "parallel"))]
fn resolve_scenes<'a>(
    scenes: &'a [Scene],
    metadata: &[&'a SceneMetadata],
    style: &Style,
    config: &Config,
) -> Vec<Planned<'a>> {
    scenes
        .iter()
        .zip(metadata)
        .map(|(s, m)| resolve_one(s, *m, style, config))
        .collect()
}

#[cfg(feature = "parallel")]
fn resolve_scenes<'a>(
    scenes: &'a [Scene],
    metadata: &[&'a SceneMetadata],
    style: &Style,
    config: &Config,
) -> Vec<Planned<'a>> {
    use rayon::prelude::*;
    scenes
        .par_iter()
        .zip(metadata.par_iter())
        .map(|(s, m)| resolve_one(s, *m, style, config))
        .collect()
}

/// The authored move when the style allows it, else the style's first allowed
/// movement (or static). Intensity never exceeds the style's ceiling.
fn camera_override(scene: &Scene, style: &Style, corrections: &mut Vec<String>) -> CameraMotion {
    let behavior = &style.camera_behavior;
    let Some(authored) = &scene.camera else {
        return CameraMotion::default();
    };
    let ceiling = behavior.max_intensity.clamp(0.0, 1.0);
    let movement = match CameraMove::parse(&authored.movement) {
        Some(m) if behavior.allows(m) => m,
        _ => {
            let replacement = behavior
                .allowed_movements
                .iter()
                .copied()
                .find(|m| behavior.allows(*m))
                .unwrap_or(CameraMove::Static);
            corrections.push(format!(
                "{}: camera move '{}' not allowed by {}, using {}",
                scene.id,
                authored.movement,
                style.slug,
                replacement.as_str()
            ));
            replacement
        }
    };
    if !movement.is_movement() {
        return CameraMotion::default();
    }
    CameraMotion::new(movement, authored.intensity.min(ceiling))
}

/// Stable partition: opening scenes first, closing scenes last.
fn order_scenes(planned: Vec<Planned<'_>>) -> Vec<Planned<'_>> {
    let mut first = Vec::new();
    let mut middle = Vec::new();
    let mut last = Vec::new();
    for p in planned {
        if p.metadata.has_tag(transition::OPENING_TAG) {
            first.push(p);
        } else if p.metadata.has_tag(CLOSING_TAG) {
            last.push(p);
        } else {
            middle.push(p);
        }
    }
    first.extend(middle);
    first.extend(last);
    first
}

/// Describes the final order: pinned scenes are counted where they ended up.
fn ordering_rationale(ordered: &[Planned<'_>], repairs: &[Repair]) -> String {
    let first = ordered
        .iter()
        .take_while(|p| p.metadata.has_tag(transition::OPENING_TAG))
        .count();
    let last = ordered[first..]
        .iter()
        .rev()
        .take_while(|p| p.metadata.has_tag(CLOSING_TAG))
        .count();
    let mut parts = vec![format!("{} scene(s) in authored order", ordered.len())];
    if first > 0 {
        parts.push(format!("{first} opening scene(s) moved to the front"));
    }
    if last > 0 {
        parts.push(format!("{last} closing scene(s) moved to the end"));
    }
    let swaps = repairs
        .iter()
        .filter(|r| matches!(r, Repair::Swap { .. }))
        .count();
    let reframes = repairs
        .iter()
        .filter(|r| matches!(r, Repair::Reframe { .. }))
        .count();
    let unresolved = repairs.len() - swaps - reframes;
    if swaps + reframes == 0 && unresolved == 0 {
        parts.push("no shot-size runs to repair".to_string());
    } else {
        parts.push(format!(
            "shot-size variety repaired with {swaps} swap(s) and {reframes} reframe(s)"
        ));
        if unresolved > 0 {
            parts.push(format!("{unresolved} run(s) could not be broken"));
        }
    }
    parts.join("; ")
}

fn transition_summary(entries: &[ManifestEntry]) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for e in entries {
        *out.entry(e.transition.kind.as_str().to_string()).or_insert(0) += 1;
    }
    out
}

fn low_confidence(planned: &[Planned<'_>], config: &Config) -> BTreeMap<String, Vec<String>> {
    planned
        .iter()
        .filter_map(|p| {
            let fields: Vec<String> = p
                .metadata
                .confidences()
                .iter()
                .filter(|(_, c)| config.is_low_confidence(*c))
                .map(|(name, _)| name.to_string())
                .collect();
            (!fields.is_empty()).then(|| (p.scene.id.clone(), fields))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::registry::TransitionKind;
    use crate::scene::{Canvas, Layout, SceneCamera};

    fn scene(id: &str, template: Option<&str>, intent: &[&str]) -> Scene {
        Scene {
            id: id.into(),
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            duration: 3000.0,
            assets: vec![],
            camera: None,
            layout: template.map(|t| Layout {
                template: t.into(),
                config: Default::default(),
            }),
            layers: vec![],
            intent: intent.iter().map(|s| s.to_string()).collect(),
            metadata: None,
        }
    }

    fn analyzed(s: Scene) -> Scene {
        analyze(&s).scene
    }

    fn request(style: &str, scenes: Vec<Scene>) -> PlanRequest {
        PlanRequest {
            sequence_id: "seq".into(),
            scenes,
            style: style.into(),
        }
    }

    #[test]
    fn missing_metadata_names_the_scene() {
        let reg = Registry::builtin().unwrap();
        let req = request(
            "editorial",
            vec![analyzed(scene("a", None, &[])), scene("b", None, &[])],
        );
        let err = plan_sequence(&req, &reg, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            ChoreographyError::MissingMetadata {
                scene_id: "b".into()
            }
        );
    }

    #[test]
    fn duplicate_scene_ids_are_malformed() {
        let reg = Registry::builtin().unwrap();
        let a = analyzed(scene("a", None, &[]));
        let req = request("editorial", vec![a.clone(), a]);
        assert!(matches!(
            plan_sequence(&req, &reg, &Config::default()),
            Err(ChoreographyError::MalformedInput { .. })
        ));
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        let reg = Registry::builtin().unwrap();
        let req = request("vaporwave", vec![analyzed(scene("a", None, &[]))]);
        let out = plan_sequence(&req, &reg, &Config::default()).unwrap();
        assert_eq!(out.manifest.style, "neutral");
        assert!(out.notes.style_fallback.is_some());
    }

    #[test]
    fn opening_moves_first_and_gets_fade() {
        let reg = Registry::builtin().unwrap();
        let req = request(
            "editorial",
            vec![
                analyzed(scene("body", None, &[])),
                analyzed(scene("outro", None, &["closing"])),
                analyzed(scene("intro", None, &["opening"])),
            ],
        );
        let out = plan_sequence(&req, &reg, &Config::default()).unwrap();
        assert_eq!(out.manifest.scene_ids(), ["intro", "body", "outro"]);
        assert_eq!(out.manifest.entries[0].transition.kind, TransitionKind::Fade);
        assert_eq!(out.manifest.entries[0].transition.duration_ms, Some(400));
        assert_eq!(
            out.manifest.entries[1].transition.kind,
            TransitionKind::Crossfade
        );
    }

    #[test]
    fn disallowed_camera_move_is_replaced_and_noted() {
        let reg = Registry::builtin().unwrap();
        let mut s = scene("a", None, &[]);
        s.camera = Some(SceneCamera {
            movement: "push_in".into(),
            intensity: 0.9,
            easing: None,
        });
        let req = request("neutral", vec![analyzed(s)]);
        let out = plan_sequence(&req, &reg, &Config::default()).unwrap();
        let cam = out.manifest.entries[0].camera_override;
        assert_eq!(cam.movement, CameraMove::Static);
        assert_eq!(cam.intensity, 0.0);
        assert_eq!(out.notes.corrections.len(), 1);
    }

    #[test]
    fn allowed_camera_intensity_is_capped() {
        let reg = Registry::builtin().unwrap();
        let mut s = scene("a", None, &[]);
        s.camera = Some(SceneCamera {
            movement: "push_in".into(),
            intensity: 0.9,
            easing: None,
        });
        let style = reg.style("editorial").unwrap();
        let req = request("editorial", vec![analyzed(s)]);
        let out = plan_sequence(&req, &reg, &Config::default()).unwrap();
        let cam = out.manifest.entries[0].camera_override;
        assert_eq!(cam.movement, CameraMove::PushIn);
        assert!(cam.intensity <= style.camera_behavior.max_intensity);
    }

    #[test]
    fn summary_counts_every_entry() {
        let reg = Registry::builtin().unwrap();
        let scenes = (0..4)
            .map(|i| analyzed(scene(&format!("s{i}"), Some("hero"), &[])))
            .collect();
        let out = plan_sequence(&request("cinematic", scenes), &reg, &Config::default()).unwrap();
        let total: usize = out.notes.transition_summary.values().sum();
        assert_eq!(total, 4);
        assert!(longest_run(out.manifest.entries.iter().map(|e| e.shot_grammar.size)) <= 2);
    }
}
