//! Time-varying camera moves.
//!
//! Moves only ever scale and translate. Rotation belongs to the static shot
//! framing, so a move sampled at any progress has no rotation component.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMove {
    #[default]
    Static,
    PushIn,
    PullOut,
    PanLeft,
    PanRight,
    TiltUp,
    TiltDown,
    Drift,
}

/// Peak scale delta of a push/pull at intensity 1.
const PUSH_SCALE: f32 = 0.12;
/// Peak pan travel at intensity 1, percent of frame width.
const PAN_TRAVEL: f32 = 6.0;
/// Peak tilt travel at intensity 1, percent of frame height.
const TILT_TRAVEL: f32 = 4.0;

impl CameraMove {
    pub const ALL: [CameraMove; 8] = [
        CameraMove::Static,
        CameraMove::PushIn,
        CameraMove::PullOut,
        CameraMove::PanLeft,
        CameraMove::PanRight,
        CameraMove::TiltUp,
        CameraMove::TiltDown,
        CameraMove::Drift,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CameraMove::Static => "static",
            CameraMove::PushIn => "push_in",
            CameraMove::PullOut => "pull_out",
            CameraMove::PanLeft => "pan_left",
            CameraMove::PanRight => "pan_right",
            CameraMove::TiltUp => "tilt_up",
            CameraMove::TiltDown => "tilt_down",
            CameraMove::Drift => "drift",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// True for everything except `Static`.
    pub fn is_movement(self) -> bool {
        self != CameraMove::Static
    }

    /// Sample the move at eased progress `p` in [0,1] with `intensity` in [0,1].
    pub fn sample(self, intensity: f32, p: f32) -> CameraFrame {
        let i = sanitize_unit(intensity);
        let p = sanitize_unit(p);
        let mut frame = CameraFrame::identity();
        match self {
            CameraMove::Static => {}
            CameraMove::PushIn => frame.scale = 1.0 + PUSH_SCALE * i * p,
            CameraMove::PullOut => frame.scale = 1.0 + PUSH_SCALE * i * (1.0 - p),
            CameraMove::PanLeft => frame.translate_x = -PAN_TRAVEL * i * p,
            CameraMove::PanRight => frame.translate_x = PAN_TRAVEL * i * p,
            CameraMove::TiltUp => frame.translate_y = TILT_TRAVEL * i * p,
            CameraMove::TiltDown => frame.translate_y = -TILT_TRAVEL * i * p,
            CameraMove::Drift => {
                frame.scale = 1.0 + 0.25 * PUSH_SCALE * i * p;
                frame.translate_x = 0.35 * PAN_TRAVEL * i * p;
                frame.translate_y = -0.25 * TILT_TRAVEL * i * p;
            }
        }
        frame
    }
}

impl fmt::Display for CameraMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn sanitize_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A move paired with its strength; the manifest's `camera_override`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraMotion {
    #[serde(rename = "move")]
    pub movement: CameraMove,
    /// In [0,1].
    pub intensity: f32,
}

impl Default for CameraMotion {
    fn default() -> Self {
        Self {
            movement: CameraMove::Static,
            intensity: 0.0,
        }
    }
}

impl CameraMotion {
    pub fn new(movement: CameraMove, intensity: f32) -> Self {
        Self {
            movement,
            intensity: sanitize_unit(intensity),
        }
    }

    pub fn sample(&self, p: f32) -> CameraFrame {
        self.movement.sample(self.intensity, p)
    }
}

/// Dynamic camera contribution at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    /// Multiplicative scale delta (1.0 = none).
    pub scale: f32,
    /// Translation in percent of frame width.
    pub translate_x: f32,
    /// Translation in percent of frame height.
    pub translate_y: f32,
    /// Default origin of the move; static framing always overrides it.
    pub transform_origin: String,
}

impl CameraFrame {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            transform_origin: "50% 50%".to_string(),
        }
    }
}
