use js_sys::JSON;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_choreography::{
    analyze_with, compose, plan_sequence, resolve_css, validate, CameraMotion, Config, Easing,
    validate_shot_grammar, PlanRequest, Registry, Scene, ShotGrammar, StaticCss, ValidationRequest,
};

/// One registry per handle, built in the constructor and only read afterwards.
#[wasm_bindgen]
pub struct WasmChoreography {
    registry: Registry,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain JS objects instead of `Map`s for the notes' ordered maps.
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue, what: &str) -> Result<T, JsError> {
    if jsvalue_is_undefined_or_null(&value) {
        return Err(JsError::new(&format!("{what}: value is null/undefined")));
    }
    swb::from_value(value).map_err(|e| JsError::new(&format!("{what} parse error: {e}")))
}

fn config_from_js(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(Config::default());
    }
    let cfg: Config = from_js(config, "config")?;
    if cfg.max_shot_size_run == 0 {
        return Err(JsError::new("config error: max_shot_size_run must be >= 1"));
    }
    Ok(cfg)
}

/// Shot grammar as loose strings; unknown values resolve to the fallbacks.
#[derive(Deserialize, Default)]
#[serde(default)]
struct LooseGrammar {
    #[serde(alias = "shot_size")]
    size: String,
    angle: String,
    framing: String,
}

#[wasm_bindgen]
impl WasmChoreography {
    /// Create a handle. `registry` may be undefined/null (built-in catalog),
    /// a JSON string, or a catalog object.
    #[wasm_bindgen(constructor)]
    pub fn new(registry: JsValue) -> Result<WasmChoreography, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let registry = if jsvalue_is_undefined_or_null(&registry) {
            Registry::builtin()
        } else if let Some(text) = registry.as_string() {
            Registry::from_json(&text)
        } else {
            let text = JSON::stringify(&registry)
                .map_err(|e| JsError::new(&format!("registry stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("registry: stringify produced non-string"))?;
            Registry::from_json(&text)
        }
        .map_err(|e| JsError::new(&e.to_string()))?;

        Ok(WasmChoreography { registry })
    }

    /// Classify one scene. Returns `{ scene, metadata, confidence, low_confidence }`.
    #[wasm_bindgen]
    pub fn analyze(&self, scene: JsValue, config: JsValue) -> Result<JsValue, JsError> {
        let scene: Scene = from_js(scene, "scene")?;
        scene.check_shape().map_err(|e| JsError::new(&e.to_string()))?;
        let cfg = config_from_js(config)?;
        to_js(&analyze_with(&scene, &cfg), "analysis")
    }

    /// Plan a sequence of analyzed scenes. Returns `{ manifest, notes }`.
    #[wasm_bindgen]
    pub fn plan(&self, request: JsValue, config: JsValue) -> Result<JsValue, JsError> {
        let request: PlanRequest = from_js(request, "plan request")?;
        let cfg = config_from_js(config)?;
        let out = plan_sequence(&request, &self.registry, &cfg)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&out, "plan output")
    }

    /// Run the guardrail tiers. Returns `{ status, blocks, warnings, notes }`.
    #[wasm_bindgen]
    pub fn validate(&self, request: JsValue) -> Result<JsValue, JsError> {
        let request: ValidationRequest = from_js(request, "validation request")?;
        let verdict =
            validate(&request, &self.registry).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&verdict, "verdict")
    }

    /// Static CSS for `{ size, angle, framing }`, clamped to `style` when given.
    #[wasm_bindgen(js_name = resolve_css)]
    pub fn resolve_css(&self, grammar: JsValue, style: Option<String>) -> Result<JsValue, JsError> {
        let loose: LooseGrammar = if jsvalue_is_undefined_or_null(&grammar) {
            LooseGrammar::default()
        } else {
            from_js(grammar, "shot grammar")?
        };
        let mut g = ShotGrammar::parse_lenient(&loose.size, &loose.angle, &loose.framing);
        if let Some(style) = style.as_deref().and_then(|s| self.registry.style(s)) {
            g = validate_shot_grammar(&g, style);
        }
        to_js(&resolve_css(&g), "css")
    }

    /// Compose static CSS with a camera move at `progress` using a CSS easing string.
    #[wasm_bindgen]
    pub fn compose(
        &self,
        static_css: JsValue,
        camera: JsValue,
        progress: f32,
        easing: Option<String>,
    ) -> Result<JsValue, JsError> {
        let css: StaticCss = from_js(static_css, "static css")?;
        let camera: CameraMotion = if jsvalue_is_undefined_or_null(&camera) {
            CameraMotion::default()
        } else {
            let raw: CameraMotion = from_js(camera, "camera")?;
            CameraMotion::new(raw.movement, raw.intensity)
        };
        let easing = easing.as_deref().map(Easing::parse).unwrap_or_default();
        to_js(&compose(&css, &camera, progress, |t| easing.apply(t)), "transform")
    }

    /// The registry catalog as JSON text.
    #[wasm_bindgen(js_name = registry_json)]
    pub fn registry_json(&self) -> Result<String, JsError> {
        self.registry
            .to_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Style slugs in catalog order.
    #[wasm_bindgen]
    pub fn styles(&self) -> Vec<String> {
        self.registry.styles().map(|s| s.slug.clone()).collect()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
