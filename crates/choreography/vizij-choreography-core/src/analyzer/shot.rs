//! Shot grammar rules. These run after content type and intent tags are
//! known, so their input bundles those results with the scene.

use crate::rules::{Rule, RuleChain};
use crate::scene::{ContentType, Scene};
use crate::shot::{Angle, Framing, ShotSize};

pub struct ShotInput<'a> {
    pub scene: &'a Scene,
    pub content_type: ContentType,
    pub intent_tags: &'a [String],
}

impl ShotInput<'_> {
    fn tagged(&self, any_of: &[&str]) -> bool {
        self.intent_tags.iter().any(|t| any_of.contains(&t.as_str()))
    }
}

pub fn template_shot_size(input: &ShotInput<'_>) -> Option<ShotSize> {
    let size = match input.scene.template()? {
        "hero" | "title-card" | "grid" | "gallery" | "collage" | "dashboard" => ShotSize::Wide,
        "split-panel" | "device-mockup" | "chart" | "feature" => ShotSize::Medium,
        "portrait" | "profile" | "testimonial" | "quote" => ShotSize::CloseUp,
        _ => return None,
    };
    Some(size)
}

pub fn content_shot_size(input: &ShotInput<'_>) -> Option<ShotSize> {
    let size = match input.content_type {
        ContentType::Typography | ContentType::Gallery => ShotSize::Wide,
        ContentType::Portrait => ShotSize::CloseUp,
        ContentType::Product
        | ContentType::DataVisualization
        | ContentType::Interface
        | ContentType::Progress => ShotSize::Medium,
        ContentType::Generic => return None,
    };
    Some(size)
}

pub fn foreground_shot_size(input: &ShotInput<'_>) -> Option<ShotSize> {
    match input.scene.foreground_layers() {
        0 => None,
        1 => Some(ShotSize::CloseUp),
        n if n >= 4 => Some(ShotSize::Wide),
        _ => Some(ShotSize::Medium),
    }
}

pub fn shot_size_rules<'a>() -> RuleChain<ShotInput<'a>, ShotSize> {
    RuleChain::new("default", ShotSize::Medium, 0.3)
        .rule(Rule::extract("layout_template", template_shot_size, 0.85))
        .rule(Rule::extract("content_affinity", content_shot_size, 0.65))
        .rule(Rule::extract("foreground_count", foreground_shot_size, 0.5))
}

pub fn is_hero_intent(input: &ShotInput<'_>) -> bool {
    input.tagged(&["hero", "opening"])
}

pub fn is_informational_intent(input: &ShotInput<'_>) -> bool {
    input.tagged(&["informational", "detail"])
}

pub fn is_portrait_content(input: &ShotInput<'_>) -> bool {
    input.content_type == ContentType::Portrait
}

pub fn is_data_content(input: &ShotInput<'_>) -> bool {
    input.content_type == ContentType::DataVisualization
}

pub fn angle_rules<'a>() -> RuleChain<ShotInput<'a>, Angle> {
    RuleChain::new("default", Angle::EyeLevel, 0.4)
        .rule(Rule::when("hero_intent", is_hero_intent, Angle::Low, 0.8))
        .rule(Rule::when("informational_intent", is_informational_intent, Angle::High, 0.75))
        .rule(Rule::when("portrait_content", is_portrait_content, Angle::EyeLevel, 0.6))
        .rule(Rule::when("data_content", is_data_content, Angle::High, 0.6))
}

/// Device mockups frame the subject on the side the device sits; right when unspecified.
pub fn template_framing(input: &ShotInput<'_>) -> Option<Framing> {
    let layout = input.scene.layout.as_ref()?;
    let framing = match layout.template.as_str() {
        "split-panel" => Framing::RuleOfThirdsLeft,
        "device-mockup" => {
            let side = layout
                .config_str("device_side")
                .or_else(|| layout.config_str("side"));
            match side {
                Some("left") => Framing::RuleOfThirdsLeft,
                Some("center") => Framing::Center,
                _ => Framing::RuleOfThirdsRight,
            }
        }
        "lower-third" | "caption" => Framing::LowerThird,
        _ => return None,
    };
    Some(framing)
}

pub fn framing_rules<'a>() -> RuleChain<ShotInput<'a>, Framing> {
    RuleChain::new("default", Framing::Center, 0.4)
        .rule(Rule::extract("layout_template", template_framing, 0.85))
        .rule(Rule::when("hero_intent", is_hero_intent, Framing::Center, 0.7))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(template: Option<&str>, config: serde_json::Value, shapes: usize) -> Scene {
        let layers: Vec<_> = (0..shapes)
            .map(|i| serde_json::json!({ "id": format!("shape-{i}"), "type": "shape" }))
            .collect();
        let mut json = serde_json::json!({
            "id": "s",
            "canvas": { "width": 1920, "height": 1080 },
            "duration": 2000,
            "layers": layers,
        });
        if let Some(t) = template {
            json["layout"] = serde_json::json!({ "template": t, "config": config });
        }
        Scene::from_json(&json.to_string()).unwrap()
    }

    fn input(scene: &Scene, content_type: ContentType) -> ShotInput<'_> {
        ShotInput {
            scene,
            content_type,
            intent_tags: &[],
        }
    }

    #[test]
    fn foreground_count_picks_size() {
        let cases = [
            (0, None),
            (1, Some(ShotSize::CloseUp)),
            (2, Some(ShotSize::Medium)),
            (3, Some(ShotSize::Medium)),
            (4, Some(ShotSize::Wide)),
            (6, Some(ShotSize::Wide)),
        ];
        for (n, expected) in cases {
            let s = scene(None, serde_json::Value::Null, n);
            let got = foreground_shot_size(&input(&s, ContentType::Generic));
            assert_eq!(got, expected, "{n} layers");
        }
    }

    #[test]
    fn background_layers_do_not_count() {
        let s = Scene::from_json(
            r#"{
                "id": "bg",
                "canvas": { "width": 800, "height": 600 },
                "duration": 1000,
                "layers": [
                    { "id": "sky", "type": "shape", "depth_class": "background" },
                    { "id": "logo", "type": "shape", "depth_class": "foreground" }
                ]
            }"#,
        )
        .unwrap();
        let got = foreground_shot_size(&input(&s, ContentType::Generic));
        assert_eq!(got, Some(ShotSize::CloseUp));
    }

    #[test]
    fn content_predicates_match_only_their_type() {
        let s = scene(None, serde_json::Value::Null, 0);
        assert!(is_portrait_content(&input(&s, ContentType::Portrait)));
        assert!(!is_portrait_content(&input(&s, ContentType::DataVisualization)));
        assert!(is_data_content(&input(&s, ContentType::DataVisualization)));
        assert!(!is_data_content(&input(&s, ContentType::Gallery)));
    }

    #[test]
    fn template_framing_by_layout() {
        let framing = |template: &str, config: serde_json::Value| {
            let s = scene(Some(template), config, 0);
            template_framing(&input(&s, ContentType::Generic))
        };
        let empty = serde_json::json!({});
        assert_eq!(framing("split-panel", empty.clone()), Some(Framing::RuleOfThirdsLeft));
        assert_eq!(
            framing("device-mockup", serde_json::json!({ "device_side": "left" })),
            Some(Framing::RuleOfThirdsLeft)
        );
        assert_eq!(
            framing("device-mockup", serde_json::json!({ "side": "center" })),
            Some(Framing::Center)
        );
        assert_eq!(framing("device-mockup", empty.clone()), Some(Framing::RuleOfThirdsRight));
        assert_eq!(framing("caption", empty.clone()), Some(Framing::LowerThird));
        assert_eq!(framing("grid", empty), None);

        let untemplated = scene(None, serde_json::Value::Null, 2);
        assert_eq!(template_framing(&input(&untemplated, ContentType::Generic)), None);
    }

    #[test]
    fn chains_run_most_specific_first() {
        let sizes = shot_size_rules();
        let order: Vec<_> = sizes.rules().iter().map(|r| r.name()).collect();
        assert_eq!(order, ["layout_template", "content_affinity", "foreground_count"]);
        let confidences: Vec<f32> = sizes.rules().iter().map(|r| r.confidence()).collect();
        assert!(confidences.windows(2).all(|w| w[0] > w[1]));

        let angles = angle_rules();
        let order: Vec<_> = angles.rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            order,
            ["hero_intent", "informational_intent", "portrait_content", "data_content"]
        );
        assert!(angles.rules().iter().all(|r| r.confidence() > 0.4));

        let framings = framing_rules();
        let order: Vec<_> = framings.rules().iter().map(|r| r.name()).collect();
        assert_eq!(order, ["layout_template", "hero_intent"]);
    }
}
