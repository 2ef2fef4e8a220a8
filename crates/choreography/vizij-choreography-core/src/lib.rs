//! Vizij Choreography Core (engine-agnostic)
//!
//! Turns loosely specified scenes into a resolved, ordered sequence manifest
//! and checks proposed motion primitives against a style's guardrails.
//!
//! Every entry point is a pure function of its arguments plus a read-only
//! [`Registry`] that the caller constructs once and passes in:
//!
//! * [`analyze`] classifies a scene (content, weight, energy, intent, shot grammar).
//! * [`resolve_css`] / [`compose`] turn a shot grammar and a camera move into transform parameters.
//! * [`plan_sequence`] orders analyzed scenes into a [`SequenceManifest`].
//! * [`validate`] runs the six guardrail tiers and returns a [`Verdict`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod planner;
pub mod registry;
pub mod rules;
pub mod scene;
pub mod shot;
pub mod validator;

// Re-exports for consumers (adapters)
pub use analyzer::{analyze, analyze_all, analyze_with, Analysis};
pub use config::Config;
pub use error::{ChoreographyError, Result};
pub use planner::{
    plan_sequence, ManifestEntry, PlanNotes, PlanOutput, PlanRequest, SequenceManifest, Transition,
};
pub use registry::{Feature, Primitive, Registry, Style, TransitionKind};
pub use rules::{Classified, Rule, RuleChain};
pub use scene::{ContentType, MotionEnergy, Scene, SceneMetadata, VisualWeight};
pub use shot::{
    compose, resolve_css, validate_shot_grammar, Angle, CameraMotion, CameraMove, ComposedTransform,
    Easing, Framing, ShotGrammar, ShotSize, StaticCss,
};
pub use validator::{validate, Finding, Overrides, Status, ValidationRequest, Verdict};
