use proptest::prelude::*;
use vizij_choreography::analyzer::analyze;
use vizij_choreography::planner::{longest_run, plan_sequence, PlanRequest};
use vizij_choreography::registry::Registry;
use vizij_choreography::scene::{Canvas, DepthClass, Layer, Layout, Scene, SceneCamera};
use vizij_choreography::shot::{resolve_css, validate_shot_grammar, Angle, Framing, ShotGrammar, ShotSize};
use vizij_choreography::validator::{validate, ValidationRequest};
use vizij_choreography::Config;

const TEMPLATES: &[&str] = &[
    "hero", "split-panel", "device-mockup", "chart", "grid", "portrait", "quote", "progress",
    "lower-third", "mystery",
];
const KINDS: &[&str] = &["text", "image", "chart", "device", "progress", "shape"];
const MOVES: &[&str] = &["static", "push_in", "pull_out", "pan_left", "tilt_up", "drift", "orbit"];
const INTENTS: &[&str] = &["hero", "opening", "closing", "detail", "informational"];
const STYLES: &[&str] = &["cinematic", "editorial", "neutral", "montage"];
const DEPTHS: &[DepthClass] = &[
    DepthClass::Background,
    DepthClass::Midground,
    DepthClass::Foreground,
];

fn arb_layer() -> impl Strategy<Value = Layer> {
    (
        prop::sample::select(KINDS),
        prop::option::of(prop::sample::select(DEPTHS)),
        any::<bool>(),
    )
        .prop_map(|(kind, depth_class, entrance)| Layer {
            id: String::new(),
            kind: kind.to_string(),
            slot: None,
            position: None,
            depth_class,
            entrance: entrance.then(|| "fade-in".to_string()),
            style: Default::default(),
        })
}

fn arb_scene() -> impl Strategy<Value = Scene> {
    (
        prop::option::of(prop::sample::select(TEMPLATES)),
        prop::collection::vec(arb_layer(), 0..7),
        prop::option::of((prop::sample::select(MOVES), 0.0f32..1.0)),
        prop::collection::vec(prop::sample::select(INTENTS), 0..2),
        500.0f64..10_000.0,
    )
        .prop_map(|(template, layers, camera, intent, duration)| Scene {
            id: String::new(),
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            duration,
            assets: vec![],
            camera: camera.map(|(m, intensity)| SceneCamera {
                movement: m.to_string(),
                intensity,
                easing: None,
            }),
            layout: template.map(|t| Layout {
                template: t.to_string(),
                config: Default::default(),
            }),
            layers: layers
                .into_iter()
                .enumerate()
                .map(|(i, mut l)| {
                    l.id = format!("layer-{i}");
                    l
                })
                .collect(),
            intent: intent.into_iter().map(str::to_string).collect(),
            metadata: None,
        })
}

fn arb_grammar() -> impl Strategy<Value = ShotGrammar> {
    (
        prop::sample::select(ShotSize::ALL.to_vec()),
        prop::sample::select(Angle::ALL.to_vec()),
        prop::sample::select(Framing::ALL.to_vec()),
    )
        .prop_map(|(s, a, f)| ShotGrammar::new(s, a, f))
}

proptest! {
    #[test]
    fn planned_entries_stay_in_style_and_never_run_three(
        raw in prop::collection::vec(arb_scene(), 1..12),
        style in prop::sample::select(STYLES),
    ) {
        let reg = Registry::builtin().unwrap();
        let scenes: Vec<Scene> = raw
            .into_iter()
            .enumerate()
            .map(|(i, mut s)| {
                s.id = format!("scene-{i}");
                analyze(&s).scene
            })
            .collect();
        let n = scenes.len();
        let req = PlanRequest { sequence_id: "prop".into(), scenes, style: style.to_string() };
        let out = plan_sequence(&req, &reg, &Config::default()).unwrap();
        let target = reg.style(style).unwrap();

        prop_assert_eq!(out.manifest.entries.len(), n);
        let mut ids: Vec<String> = out.manifest.entries.iter().map(|e| e.scene.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), n);

        for e in &out.manifest.entries {
            prop_assert!(target.shot_grammar().contains(&e.shot_grammar));
            prop_assert!(target.camera_behavior.allows(e.camera_override.movement));
            prop_assert!(e.camera_override.intensity <= target.camera_behavior.max_intensity);
            prop_assert!(e.duration >= target.phase_timing.min_hold_ms);
            prop_assert!(e.duration <= target.phase_timing.max_hold_ms);
        }
        prop_assert!(longest_run(out.manifest.entries.iter().map(|e| e.shot_grammar.size)) <= 2);
        prop_assert_eq!(out.notes.transition_summary.values().sum::<usize>(), n);
    }

    #[test]
    fn shot_grammar_validation_is_idempotent(
        g in arb_grammar(),
        style in prop::sample::select(STYLES),
    ) {
        let reg = Registry::builtin().unwrap();
        let s = reg.style(style).unwrap();
        let once = validate_shot_grammar(&g, s);
        prop_assert!(s.shot_grammar().contains(&once));
        prop_assert_eq!(validate_shot_grammar(&once, s), once);
        prop_assert_eq!(resolve_css(&once), resolve_css(&once));
    }

    #[test]
    fn verdicts_are_reproducible(
        picks in prop::collection::vec(0usize..32, 0..6),
        style in prop::sample::select(STYLES),
    ) {
        let reg = Registry::builtin().unwrap();
        let catalog: Vec<String> = reg.primitives().map(|p| p.id.clone()).collect();
        let ids: Vec<String> = picks
            .iter()
            .map(|&i| catalog.get(i).cloned().unwrap_or_else(|| format!("unknown-{i}")))
            .collect();
        let req = ValidationRequest::new(ids, style);
        let first = validate(&req, &reg).unwrap();
        prop_assert_eq!(&first, &validate(&req, &reg).unwrap());
        prop_assert_eq!(first.blocks.is_empty(), first.status != vizij_choreography::Status::Block);
    }
}
