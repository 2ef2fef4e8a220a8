//! Shot grammar: classification enums, style clamping, and CSS resolution.
//!
//! - [`grammar`]: size / angle / framing enums and `validate_shot_grammar`
//! - [`css`]: static table lookup (`resolve_css`) and composition with a camera move
//! - [`camera`]: time-varying camera moves (scale and translation only)
//! - [`easing`]: CSS easing curves used to shape camera progress

pub mod camera;
pub mod css;
pub mod easing;
pub mod grammar;

pub use camera::{CameraFrame, CameraMotion, CameraMove};
pub use css::{compose, resolve_css, ComposedTransform, StaticCss, TransformComponents};
pub use easing::Easing;
pub use grammar::{
    grammar_corrections, validate_shot_grammar, AllowedShotGrammar, Angle, Framing, ShotAxis,
    ShotGrammar, ShotSize,
};
