//! Transition choice per adjacent pair.

use crate::registry::{Pacing, Style, TransitionKind};
use crate::scene::{MotionEnergy, SceneMetadata};

use super::manifest::Transition;

/// Tag that forces a neutral entrance into the scene carrying it.
pub const OPENING_TAG: &str = "opening";

/// Preferred transition for a style's pacing, before vocabulary checks.
pub fn preferred_kind(pacing: Pacing, prev: &SceneMetadata, next: &SceneMetadata) -> TransitionKind {
    match pacing {
        Pacing::HighEnergy => {
            let energetic = |m: &SceneMetadata| m.motion_energy.value == MotionEnergy::Energetic;
            if energetic(prev) || energetic(next) {
                TransitionKind::Whip
            } else {
                TransitionKind::HardCut
            }
        }
        Pacing::Dramatic => TransitionKind::Wipe,
        Pacing::ContentForward => TransitionKind::Crossfade,
    }
}

/// Transition into `next`. `prev` is `None` for the first entry, which
/// starts on a cut unless it carries the opening tag.
pub fn choose_transition(
    style: &Style,
    prev: Option<&SceneMetadata>,
    next: &SceneMetadata,
    entrance_ms: u32,
) -> Transition {
    if next.has_tag(OPENING_TAG) {
        return Transition::timed(TransitionKind::Fade, entrance_ms);
    }
    let Some(prev) = prev else {
        return Transition::cut();
    };
    let preferred = preferred_kind(style.pacing, prev, next);
    let vocabulary = &style.transitions.vocabulary;
    let kind = if vocabulary.contains(&preferred) {
        preferred
    } else {
        vocabulary.first().copied().unwrap_or(TransitionKind::HardCut)
    };
    Transition::timed(kind, style.transitions.duration_ms)
}
