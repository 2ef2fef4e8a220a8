//! Verdict shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warn,
    Block,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Block => "BLOCK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finding is about. Each code belongs to exactly one tier and carries
/// a fixed severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    UnknownPrimitive,
    UnknownStyle,
    StyleIncompatible,
    ForbiddenFeature,
    SpeedLimit,
    LensBounds,
    InvalidOverride,
    UnknownIntent,
    IntentStyleUnsupported,
    IntentPrimitivesMissing,
}

/// How a finding affects the verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Block,
    Warn,
    Note,
}

impl Code {
    pub fn tier(self) -> u8 {
        match self {
            Code::UnknownPrimitive => 1,
            Code::UnknownStyle | Code::StyleIncompatible => 2,
            Code::ForbiddenFeature => 3,
            Code::SpeedLimit => 4,
            Code::LensBounds | Code::InvalidOverride => 5,
            Code::UnknownIntent | Code::IntentStyleUnsupported | Code::IntentPrimitivesMissing => 6,
        }
    }

    pub fn severity(self) -> Severity {
        match self.tier() {
            1..=3 => Severity::Block,
            4 | 5 => Severity::Warn,
            _ => Severity::Note,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub tier: u8,
    pub code: Code,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn new(code: Code, primitive: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            tier: code.tier(),
            code,
            primitive: primitive.map(str::to_string),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: Status,
    pub blocks: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub notes: Vec<Finding>,
}

impl Verdict {
    /// Sort findings into their lists (stable, so tier order then input order
    /// is kept) and derive the status: any block wins, then any warning.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let mut findings = findings;
        findings.sort_by_key(|f| f.tier);
        let mut blocks = Vec::new();
        let mut warnings = Vec::new();
        let mut notes = Vec::new();
        for f in findings {
            match f.code.severity() {
                Severity::Block => blocks.push(f),
                Severity::Warn => warnings.push(f),
                Severity::Note => notes.push(f),
            }
        }
        let status = if !blocks.is_empty() {
            Status::Block
        } else if !warnings.is_empty() {
            Status::Warn
        } else {
            Status::Pass
        };
        Self {
            status,
            blocks,
            warnings,
            notes,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == Status::Block
    }

    /// Every finding citing `primitive`, across all lists.
    pub fn findings_for<'a>(&'a self, primitive: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.blocks
            .iter()
            .chain(&self.warnings)
            .chain(&self.notes)
            .filter(move |f| f.primitive.as_deref() == Some(primitive))
    }
}
