use vizij_choreography::analyzer::{analyze, analyze_with};
use vizij_choreography::registry::Registry;
use vizij_choreography::scene::{ContentType, MotionEnergy, Scene, VisualWeight};
use vizij_choreography::shot::{validate_shot_grammar, Angle, Framing, ShotSize};
use vizij_choreography::Config;
use vizij_test_fixtures::scenes;

fn load(name: &str) -> Scene {
    let json = scenes::json(name).expect("scene fixture");
    Scene::from_json(&json).expect("scene parses")
}

#[test]
fn split_panel_in_editorial_frames_rule_of_thirds_left() {
    let reg = Registry::builtin().unwrap();
    let editorial = reg.style("editorial").unwrap();
    let a = analyze(&load("split-panel"));

    let shot = &a.metadata.shot_grammar;
    assert_eq!(shot.framing.value, Framing::RuleOfThirdsLeft);
    assert_eq!(shot.framing.rule, "layout_template");

    let grammar = validate_shot_grammar(&shot.grammar(), editorial);
    assert_eq!(grammar.framing, Framing::RuleOfThirdsLeft);
    assert_eq!(grammar.size, ShotSize::Medium);
    assert_eq!(grammar.angle, Angle::High);
    assert_eq!(a.metadata.content_type.value, ContentType::Product);
}

#[test]
fn scene_without_layers_or_layout_defaults_and_is_flagged() {
    let scene = load("empty");
    let a = analyze(&scene);
    assert_eq!(a.metadata.content_type.value, ContentType::Generic);
    assert!(a.metadata.content_type.confidence < 0.5);
    assert_eq!(a.metadata.content_type.rule, "default");
    assert!(a.low_confidence.iter().any(|f| f == "content_type"));
    assert!(a.confidence < 0.5);
    assert!(scene.metadata.is_none());
}

#[test]
fn specific_rules_outrank_their_chain_default() {
    let a = analyze(&load("split-panel"));
    let m = &a.metadata;
    for (field, c) in m.confidences() {
        assert!((0.0..=1.0).contains(&c), "{field} confidence {c}");
    }
    assert!(m.content_type.confidence > 0.3);
    assert!(m.shot_grammar.framing.confidence > 0.4);
}

#[test]
fn device_mockup_frames_toward_the_device_side() {
    let a = analyze(&load("device-left"));
    assert_eq!(a.metadata.content_type.value, ContentType::Interface);
    assert_eq!(a.metadata.shot_grammar.framing.value, Framing::RuleOfThirdsLeft);
    assert_eq!(a.metadata.intent_tags.value, vec!["detail".to_string()]);
    assert_eq!(a.metadata.shot_grammar.angle.value, Angle::High);

    let mut right = load("device-left");
    if let Some(layout) = right.layout.as_mut() {
        layout.config.remove("device_side");
    }
    let a = analyze(&right);
    assert_eq!(a.metadata.shot_grammar.framing.value, Framing::RuleOfThirdsRight);
}

#[test]
fn hero_title_reads_as_low_angle_opening() {
    let a = analyze(&load("hero-title"));
    let m = &a.metadata;
    assert_eq!(m.content_type.value, ContentType::Typography);
    assert!(m.has_tag("opening"));
    assert_eq!(m.shot_grammar.shot_size.value, ShotSize::Wide);
    assert_eq!(m.shot_grammar.angle.value, Angle::Low);
    assert_eq!(m.shot_grammar.framing.value, Framing::Center);
    assert_eq!(m.motion_energy.value, MotionEnergy::Moderate);
    assert_eq!(m.motion_energy.rule, "camera_intensity");
}

#[test]
fn gallery_is_wide_and_heavy() {
    let a = analyze(&load("team-gallery"));
    assert_eq!(a.metadata.content_type.value, ContentType::Gallery);
    assert_eq!(a.metadata.shot_grammar.shot_size.value, ShotSize::Wide);
    assert_eq!(a.metadata.visual_weight.value, VisualWeight::Heavy);
}

#[test]
fn layer_composition_drives_content_without_a_template() {
    let a = analyze(&load("upload-progress"));
    assert_eq!(a.metadata.content_type.value, ContentType::Progress);
    assert_eq!(a.metadata.content_type.rule, "progress_layer");
    assert_eq!(a.metadata.intent_tags.value, vec!["closing".to_string()]);
    assert_eq!(a.metadata.intent_tags.confidence, 1.0);
    assert_eq!(a.metadata.shot_grammar.shot_size.value, ShotSize::Medium);
}

#[test]
fn equal_confidence_matches_resolve_in_declaration_order() {
    // chart_layer and progress_layer both carry 0.75; chart is declared first.
    let scene = Scene::from_json(
        r#"{
            "id": "tie",
            "canvas": { "width": 800, "height": 600 },
            "duration": 1000,
            "layers": [
                { "id": "bar", "type": "progress" },
                { "id": "plot", "type": "chart" }
            ]
        }"#,
    )
    .unwrap();
    let a = analyze(&scene);
    assert_eq!(a.metadata.content_type.value, ContentType::DataVisualization);
    assert_eq!(a.metadata.content_type.rule, "chart_layer");
}

fn untemplated_shapes(n: usize) -> Scene {
    let layers: Vec<_> = (0..n)
        .map(|i| serde_json::json!({ "id": format!("shape-{i}"), "type": "shape" }))
        .collect();
    let json = serde_json::json!({
        "id": format!("shapes-{n}"),
        "canvas": { "width": 1280, "height": 720 },
        "duration": 2000,
        "layers": layers,
    });
    Scene::from_json(&json.to_string()).unwrap()
}

fn with_intent(template: &str, intent: &[&str]) -> Scene {
    let json = serde_json::json!({
        "id": template,
        "canvas": { "width": 1920, "height": 1080 },
        "duration": 3000,
        "layout": { "template": template },
        "intent": intent,
    });
    Scene::from_json(&json.to_string()).unwrap()
}

#[test]
fn foreground_layer_count_sizes_untemplated_scenes() {
    for (n, expected) in [(1, ShotSize::CloseUp), (2, ShotSize::Medium), (4, ShotSize::Wide)] {
        let a = analyze(&untemplated_shapes(n));
        assert_eq!(a.metadata.content_type.value, ContentType::Generic);
        let size = &a.metadata.shot_grammar.shot_size;
        assert_eq!(size.value, expected, "{n} shapes");
        assert_eq!(size.rule, "foreground_count");
    }
}

#[test]
fn content_type_sets_angle_when_intent_is_silent() {
    let chart = analyze(&with_intent("chart", &["launch"]));
    assert_eq!(chart.metadata.intent_tags.value, vec!["launch".to_string()]);
    assert_eq!(chart.metadata.content_type.value, ContentType::DataVisualization);
    assert_eq!(chart.metadata.shot_grammar.angle.value, Angle::High);
    assert_eq!(chart.metadata.shot_grammar.angle.rule, "data_content");

    let portrait = analyze(&with_intent("portrait", &["launch"]));
    assert_eq!(portrait.metadata.content_type.value, ContentType::Portrait);
    assert_eq!(portrait.metadata.shot_grammar.angle.value, Angle::EyeLevel);
    assert_eq!(portrait.metadata.shot_grammar.angle.rule, "portrait_content");
}

#[test]
fn threshold_is_configurable() {
    let cfg = Config {
        low_confidence_threshold: 0.0,
        ..Config::default()
    };
    let a = analyze_with(&load("empty"), &cfg);
    assert!(!a.is_flagged());
}

#[test]
fn analysis_is_deterministic() {
    for name in scenes::keys() {
        let scene = load(&name);
        assert_eq!(analyze(&scene), analyze(&scene), "{name}");
    }
}
