use serde_json::{json, Value};
use vizij_choreography::registry::{Feature, PrimitiveCategory, Registry};
use vizij_choreography::ChoreographyError;
use vizij_test_fixtures::registries;

fn builtin_value() -> Value {
    let json = Registry::builtin().unwrap().to_json().unwrap();
    serde_json::from_str(&json).unwrap()
}

fn load(v: &Value) -> Result<Registry, ChoreographyError> {
    Registry::from_json(&v.to_string())
}

#[test]
fn builtin_round_trips_through_json() {
    let reg = Registry::builtin().unwrap();
    let again = Registry::from_json(&reg.to_json().unwrap()).unwrap();
    assert_eq!(reg.catalog(), again.catalog());
    assert_eq!(reg.version(), again.version());
}

#[test]
fn builtin_styles_carry_their_forbidden_features() {
    let reg = Registry::builtin().unwrap();
    let neutral = reg.style("neutral").unwrap();
    for f in [
        Feature::ThreeDTransforms,
        Feature::Blur,
        Feature::BlurEntrance,
        Feature::CameraMovement,
        Feature::CameraShake,
    ] {
        assert!(neutral.forbids(f), "neutral should forbid {f}");
    }
    let cinematic = reg.style("cinematic").unwrap();
    assert_eq!(reg.forbidden_features(cinematic), vec![Feature::CameraShake]);
}

#[test]
fn every_builtin_style_admits_the_grammar_fallbacks() {
    let reg = Registry::builtin().unwrap();
    assert!(reg.styles().all(|s| s.shot_grammar().admits_fallbacks()));
}

#[test]
fn catalog_iterators_keep_catalog_order() {
    let reg = Registry::builtin().unwrap();
    let first = reg.primitives().next().unwrap();
    assert_eq!(first.id, "fade-in");
    assert_eq!(first.category, PrimitiveCategory::Entrance);
    assert!(reg.intents().any(|i| i.slug == "hero-reveal"));
}

#[test]
fn fixture_catalog_loads() {
    let reg = Registry::from_json(&registries::json("speed-boundary").unwrap()).unwrap();
    assert_eq!(reg.version(), "test-speed-boundary");
    assert_eq!(reg.primitive("at-limit").unwrap().duration_ms(), 1000.0);
    assert_eq!(reg.primitive("flip").unwrap().duration_ms(), 2000.0);
    assert!(reg.style("editorial").is_none());
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(matches!(
        Registry::from_json("{ not json"),
        Err(ChoreographyError::RegistryParse(_))
    ));
}

#[test]
fn duplicate_primitive_ids_are_rejected() {
    let mut v = builtin_value();
    let dup = v["primitives"][0].clone();
    v["primitives"].as_array_mut().unwrap().push(dup);
    let err = load(&v).unwrap_err();
    assert!(matches!(err, ChoreographyError::MalformedInput { .. }));
    assert!(err.to_string().contains("fade-in"));
}

#[test]
fn unparsable_duration_is_rejected() {
    let mut v = builtin_value();
    v["primitives"][0]["duration"] = json!("soon");
    assert!(matches!(
        load(&v),
        Err(ChoreographyError::MalformedInput { .. })
    ));
}

#[test]
fn style_without_fallback_sizes_is_rejected() {
    let mut v = builtin_value();
    v["styles"][0]["shot_grammar"]["sizes"] = json!(["wide", "close_up"]);
    assert!(matches!(
        load(&v),
        Err(ChoreographyError::MalformedInput { .. })
    ));
}

#[test]
fn non_positive_speed_limit_is_rejected() {
    let mut v = builtin_value();
    v["guardrails"]["speed_limits"]["translateX"]["max_velocity"] = json!(0);
    assert!(matches!(
        load(&v),
        Err(ChoreographyError::MalformedInput { .. })
    ));
}
