//! Shot grammar triple and style clamping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::Style;

/// Apparent subject size in frame, ordered from widest to tightest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotSize {
    ExtremeWide,
    Wide,
    Medium,
    CloseUp,
    ExtremeCloseUp,
}

/// Vertical / roll relationship between camera and subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    EyeLevel,
    High,
    Low,
    Dutch,
    BirdsEye,
}

/// Where the subject sits in frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    Center,
    RuleOfThirdsLeft,
    RuleOfThirdsRight,
    LowerThird,
}

impl ShotSize {
    pub const ALL: [ShotSize; 5] = [
        ShotSize::ExtremeWide,
        ShotSize::Wide,
        ShotSize::Medium,
        ShotSize::CloseUp,
        ShotSize::ExtremeCloseUp,
    ];
    pub const FALLBACK: ShotSize = ShotSize::Medium;

    pub fn as_str(self) -> &'static str {
        match self {
            ShotSize::ExtremeWide => "extreme_wide",
            ShotSize::Wide => "wide",
            ShotSize::Medium => "medium",
            ShotSize::CloseUp => "close_up",
            ShotSize::ExtremeCloseUp => "extreme_close_up",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Position on the wide-to-tight scale.
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl Angle {
    pub const ALL: [Angle; 5] = [
        Angle::EyeLevel,
        Angle::High,
        Angle::Low,
        Angle::Dutch,
        Angle::BirdsEye,
    ];
    pub const FALLBACK: Angle = Angle::EyeLevel;

    pub fn as_str(self) -> &'static str {
        match self {
            Angle::EyeLevel => "eye_level",
            Angle::High => "high",
            Angle::Low => "low",
            Angle::Dutch => "dutch",
            Angle::BirdsEye => "birds_eye",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Framing {
    pub const ALL: [Framing; 4] = [
        Framing::Center,
        Framing::RuleOfThirdsLeft,
        Framing::RuleOfThirdsRight,
        Framing::LowerThird,
    ];
    pub const FALLBACK: Framing = Framing::Center;

    pub fn as_str(self) -> &'static str {
        match self {
            Framing::Center => "center",
            Framing::RuleOfThirdsLeft => "rule_of_thirds_left",
            Framing::RuleOfThirdsRight => "rule_of_thirds_right",
            Framing::LowerThird => "lower_third",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(ShotSize, Angle, Framing);

/// The (size, angle, framing) triple attached to every manifest entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShotGrammar {
    #[serde(alias = "shot_size")]
    pub size: ShotSize,
    pub angle: Angle,
    pub framing: Framing,
}

impl Default for ShotGrammar {
    fn default() -> Self {
        Self {
            size: ShotSize::FALLBACK,
            angle: Angle::FALLBACK,
            framing: Framing::FALLBACK,
        }
    }
}

impl ShotGrammar {
    pub fn new(size: ShotSize, angle: Angle, framing: Framing) -> Self {
        Self {
            size,
            angle,
            framing,
        }
    }

    /// Build from raw strings; unknown values become the axis fallback.
    pub fn parse_lenient(size: &str, angle: &str, framing: &str) -> Self {
        Self {
            size: ShotSize::parse(size).unwrap_or(ShotSize::FALLBACK),
            angle: Angle::parse(angle).unwrap_or(Angle::FALLBACK),
            framing: Framing::parse(framing).unwrap_or(Framing::FALLBACK),
        }
    }
}

/// Per-style allowed values for each axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedShotGrammar {
    pub sizes: Vec<ShotSize>,
    pub angles: Vec<Angle>,
    pub framings: Vec<Framing>,
}

impl AllowedShotGrammar {
    pub fn contains(&self, grammar: &ShotGrammar) -> bool {
        self.sizes.contains(&grammar.size)
            && self.angles.contains(&grammar.angle)
            && self.framings.contains(&grammar.framing)
    }

    /// Every axis must admit its fallback, otherwise clamping could not
    /// guarantee an in-bounds result.
    pub fn admits_fallbacks(&self) -> bool {
        self.contains(&ShotGrammar::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotAxis {
    Size,
    Angle,
    Framing,
}

impl ShotAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            ShotAxis::Size => "shot_size",
            ShotAxis::Angle => "angle",
            ShotAxis::Framing => "framing",
        }
    }
}

/// Clamp each axis to the style's allowed set, substituting the axis fallback
/// (medium / eye_level / center) for out-of-bound values.
pub fn validate_shot_grammar(grammar: &ShotGrammar, style: &Style) -> ShotGrammar {
    let allowed = style.shot_grammar();
    ShotGrammar {
        size: if allowed.sizes.contains(&grammar.size) {
            grammar.size
        } else {
            ShotSize::FALLBACK
        },
        angle: if allowed.angles.contains(&grammar.angle) {
            grammar.angle
        } else {
            Angle::FALLBACK
        },
        framing: if allowed.framings.contains(&grammar.framing) {
            grammar.framing
        } else {
            Framing::FALLBACK
        },
    }
}

/// Axes that `validate_shot_grammar` would replace for this style.
pub fn grammar_corrections(grammar: &ShotGrammar, style: &Style) -> Vec<ShotAxis> {
    let allowed = style.shot_grammar();
    let mut out = Vec::new();
    if !allowed.sizes.contains(&grammar.size) {
        out.push(ShotAxis::Size);
    }
    if !allowed.angles.contains(&grammar.angle) {
        out.push(ShotAxis::Angle);
    }
    if !allowed.framings.contains(&grammar.framing) {
        out.push(ShotAxis::Framing);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_falls_back_per_axis() {
        let g = ShotGrammar::parse_lenient("wide", "sideways", "rule_of_thirds_left");
        assert_eq!(g.size, ShotSize::Wide);
        assert_eq!(g.angle, Angle::EyeLevel);
        assert_eq!(g.framing, Framing::RuleOfThirdsLeft);
    }

    #[test]
    fn serde_uses_snake_case_and_accepts_shot_size_alias() {
        let g: ShotGrammar = serde_json::from_str(
            r#"{ "shot_size": "close_up", "angle": "birds_eye", "framing": "lower_third" }"#,
        )
        .unwrap();
        assert_eq!(
            g,
            ShotGrammar::new(ShotSize::CloseUp, Angle::BirdsEye, Framing::LowerThird)
        );
        let json = serde_json::to_value(g).unwrap();
        assert_eq!(json["size"], "close_up");
    }

    #[test]
    fn ranks_run_wide_to_tight() {
        assert!(ShotSize::Wide.rank() < ShotSize::Medium.rank());
        assert!(ShotSize::CloseUp.rank() < ShotSize::ExtremeCloseUp.rank());
    }
}
