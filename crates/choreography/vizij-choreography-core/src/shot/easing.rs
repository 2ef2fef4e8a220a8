//! CSS easing curves.
//!
//! Named curves map to their CSS cubic-bezier control points; the eased value
//! is found by inverting the x polynomial with a binary search.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Parse a CSS easing string. Unknown or malformed curves become `Linear`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s {
            "linear" => Easing::Linear,
            "ease" => Easing::Ease,
            "ease-in" | "ease_in" => Easing::EaseIn,
            "ease-out" | "ease_out" => Easing::EaseOut,
            "ease-in-out" | "ease_in_out" => Easing::EaseInOut,
            _ => parse_cubic_bezier(s)
                .map(Easing::CubicBezier)
                .unwrap_or(Easing::Linear),
        }
    }

    pub fn control_points(&self) -> [f32; 4] {
        match self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::Ease => [0.25, 0.1, 0.25, 1.0],
            Easing::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Easing::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Easing::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Easing::CubicBezier(c) => *c,
        }
    }

    /// Map linear progress in [0,1] to eased progress.
    pub fn apply(&self, t: f32) -> f32 {
        let [x1, y1, x2, y2] = self.control_points();
        bezier_ease_t(t, x1, y1, x2, y2)
    }
}

fn parse_cubic_bezier(s: &str) -> Option<[f32; 4]> {
    let inner = s.strip_prefix("cubic-bezier(")?.strip_suffix(')')?;
    let parts: Vec<f32> = inner
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() != 4 || parts.iter().any(|v| !v.is_finite()) {
        return None;
    }
    // x control points outside [0,1] make the curve non-monotonic in time.
    if !(0.0..=1.0).contains(&parts[0]) || !(0.0..=1.0).contains(&parts[2]) {
        return None;
    }
    Some([parts[0], parts[1], parts[2], parts[3]])
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
