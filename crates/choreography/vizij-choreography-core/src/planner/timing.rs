//! Hold durations from a style's phase-timing guide.

use crate::config::Config;
use crate::registry::Style;
use crate::scene::{ContentType, Scene};

/// Content that needs reading or waiting holds longer than simple display content.
pub fn content_scale(content: ContentType) -> f32 {
    match content {
        ContentType::Progress => 1.5,
        ContentType::DataVisualization => 1.35,
        ContentType::Interface => 1.2,
        ContentType::Gallery => 1.1,
        ContentType::Product | ContentType::Portrait | ContentType::Generic => 1.0,
        ContentType::Typography => 0.85,
    }
}

/// Style hold scaled by content type, clamped to the style's bounds.
pub fn resolve_duration(style: &Style, content: ContentType, scene: &Scene, config: &Config) -> u32 {
    let timing = &style.phase_timing;
    let scaled = (timing.hold_ms as f32 * content_scale(content)).round() as u32;
    let held = scaled.clamp(timing.min_hold_ms, timing.max_hold_ms);
    if config.respect_authored_duration && scene.duration.is_finite() && scene.duration > 0.0 {
        let authored = scene.duration.round().min(u32::MAX as f64) as u32;
        return held.max(authored);
    }
    held
}
