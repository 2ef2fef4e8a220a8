//! Core configuration for vizij-choreography-core.

use serde::{Deserialize, Serialize};

use crate::error::{ChoreographyError, Result};

/// Tuning knobs shared by the analyzer and the planner.
/// Every field has a default so partial JSON objects are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification confidence below this value is flagged (never blocking).
    pub low_confidence_threshold: f32,

    /// Longest allowed run of consecutive entries sharing a shot size.
    pub max_shot_size_run: usize,

    /// How many entries past a violation the variety repair may look for a swap partner.
    pub variety_lookahead: usize,

    /// Style used when a plan request names a style the registry does not know.
    pub default_style: String,

    /// Use a scene's authored duration as a floor for its resolved hold.
    pub respect_authored_duration: bool,

    /// Duration of the neutral entrance forced by an `opening` intent tag.
    pub entrance_transition_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.5,
            max_shot_size_run: 2,
            variety_lookahead: 8,
            default_style: "neutral".to_string(),
            respect_authored_duration: false,
            entrance_transition_ms: 400,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON object over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Config =
            serde_json::from_str(json).map_err(|e| ChoreographyError::malformed(e.to_string()))?;
        if cfg.max_shot_size_run == 0 {
            return Err(ChoreographyError::malformed(
                "max_shot_size_run must be at least 1",
            ));
        }
        Ok(cfg)
    }

    pub(crate) fn is_low_confidence(&self, confidence: f32) -> bool {
        confidence < self.low_confidence_threshold
    }
}
