//! Visual weight, motion energy and intent tag rules.

use crate::rules::{Rule, RuleChain};
use crate::scene::{MotionEnergy, Scene, VisualWeight};
use crate::shot::CameraMove;

pub fn is_dense_foreground(scene: &Scene) -> bool {
    scene.foreground_layers() >= 4
}

pub fn has_many_layers(scene: &Scene) -> bool {
    scene.layers.len() >= 6
}

pub fn is_sparse(scene: &Scene) -> bool {
    (1..=2).contains(&scene.layers.len())
}

pub fn is_layered(scene: &Scene) -> bool {
    scene.layers.len() >= 3
}

pub fn visual_weight_rules() -> RuleChain<Scene, VisualWeight> {
    RuleChain::new("default", VisualWeight::Light, 0.35)
        .rule(Rule::when("dense_foreground", is_dense_foreground, VisualWeight::Heavy, 0.75))
        .rule(Rule::when("many_layers", has_many_layers, VisualWeight::Heavy, 0.65))
        .rule(Rule::when("sparse", is_sparse, VisualWeight::Light, 0.7))
        .rule(Rule::when("layered", is_layered, VisualWeight::Balanced, 0.6))
}

/// Energy implied by an authored camera move; unknown moves give no signal.
pub fn camera_energy(scene: &Scene) -> Option<MotionEnergy> {
    let cam = scene.camera.as_ref()?;
    let movement = CameraMove::parse(&cam.movement)?;
    if !movement.is_movement() {
        return Some(MotionEnergy::Calm);
    }
    Some(match cam.intensity {
        i if i >= 0.7 => MotionEnergy::Energetic,
        i if i >= 0.3 => MotionEnergy::Moderate,
        _ => MotionEnergy::Calm,
    })
}

fn entrances(scene: &Scene) -> usize {
    scene.layers.iter().filter(|l| l.entrance.is_some()).count()
}

pub fn has_dense_entrances(scene: &Scene) -> bool {
    entrances(scene) >= 3
}

pub fn has_entrances(scene: &Scene) -> bool {
    entrances(scene) >= 1
}

pub fn motion_energy_rules() -> RuleChain<Scene, MotionEnergy> {
    RuleChain::new("default", MotionEnergy::Calm, 0.4)
        .rule(Rule::extract("camera_intensity", camera_energy, 0.8))
        .rule(Rule::when("entrance_density", has_dense_entrances, MotionEnergy::Energetic, 0.6))
        .rule(Rule::when("some_entrances", has_entrances, MotionEnergy::Moderate, 0.55))
}

pub fn authored_intent(scene: &Scene) -> Option<Vec<String>> {
    if scene.intent.is_empty() {
        return None;
    }
    let mut tags: Vec<String> = scene
        .intent
        .iter()
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    tags.dedup();
    (!tags.is_empty()).then_some(tags)
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn template_intent(scene: &Scene) -> Option<Vec<String>> {
    let out = match scene.template()? {
        "hero" | "title-card" => tags(&["hero", "opening"]),
        "chart" | "graph" | "metrics" | "dashboard" | "progress" => tags(&["informational"]),
        "split-panel" | "feature" => tags(&["informational"]),
        "device-mockup" | "product" => tags(&["detail"]),
        "quote" | "testimonial" | "statement" => tags(&["emphasis"]),
        _ => return None,
    };
    Some(out)
}

pub fn composition_intent(scene: &Scene) -> Option<Vec<String>> {
    if scene.count_kind("chart") + scene.count_kind("graph") > 0 {
        return Some(tags(&["informational"]));
    }
    if scene.count_kind("device") + scene.count_kind("screenshot") > 0 {
        return Some(tags(&["detail"]));
    }
    None
}

pub fn intent_tag_rules() -> RuleChain<Scene, Vec<String>> {
    RuleChain::new("default", Vec::new(), 0.4)
        .rule(Rule::extract("authored_intent", authored_intent, 1.0))
        .rule(Rule::extract("layout_template", template_intent, 0.8))
        .rule(Rule::extract("layer_composition", composition_intent, 0.55))
}
