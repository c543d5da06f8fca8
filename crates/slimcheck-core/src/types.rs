//! Core types shared across the grading engine.

use serde::{Deserialize, Serialize};

/// Result of grading one actual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    /// Informational only. Not a failure, not a pass.
    Ignore,
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail)
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Outcome::Ignore)
    }

    pub(crate) fn from_match(matched: bool) -> Self {
        if matched {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

/// Which comparison form a spec was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    Blank,
    Capture,
    Regex,
    Interval,
    Relational,
    Approx,
    Plain,
}

/// A symbol value produced by a `$name=` spec, for the caller to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolBinding {
    pub name: String,
    pub value: String,
}

/// The graded answer for one (spec, actual) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Pass, fail or ignore
    pub outcome: Outcome,

    /// Plain-text message, free of markup (e.g. `pass(3<5.2)`)
    pub message: String,

    /// How the spec was classified
    pub kind: SpecKind,

    /// Expected text as displayed, with bound symbols substituted
    pub expected: String,

    /// Actual text exactly as received
    pub actual: String,

    /// Symbol assignment requested by a capture spec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<SymbolBinding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(Outcome::Pass.is_pass());
        assert!(Outcome::Fail.is_fail());
        assert!(Outcome::Ignore.is_ignore());
        assert!(!Outcome::Ignore.is_fail());
    }

    #[test]
    fn test_outcome_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Outcome::Ignore).unwrap(), "\"ignore\"");
        assert_eq!(
            serde_json::to_string(&SpecKind::Relational).unwrap(),
            "\"relational\""
        );
    }

    #[test]
    fn test_verdict_omits_missing_binding() {
        let verdict = Verdict {
            outcome: Outcome::Pass,
            message: "pass(x)".to_string(),
            kind: SpecKind::Plain,
            expected: "x".to_string(),
            actual: "x".to_string(),
            binding: None,
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert!(json.get("binding").is_none());
        assert_eq!(json["outcome"], "pass");
    }
}
