//! Classification of expected-value text into a comparison form.

use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

use crate::numeric::parse_number;
use crate::patterns::{CAPTURE_PATTERN, INTERVAL_PATTERN, REGEX_SPEC_PATTERN, RELATIONAL_PATTERN};
use crate::types::SpecKind;

use super::{BoundOp, RelationalOp};

/// A number exactly as the author wrote it, plus its decimal value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    text: String,
    value: BigDecimal,
}

impl NumericLiteral {
    /// Read a literal. Returns `None` if the text is not a decimal number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        parse_number(text).map(|value| Self {
            text: text.to_string(),
            value,
        })
    }

    /// The literal as written (trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &BigDecimal {
        &self.value
    }
}

impl Serialize for NumericLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// The parsed form of an expected-value spec.
///
/// Classification is a pure function of the text. Every string classifies;
/// anything unrecognized is `Plain`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedSpec {
    /// Empty cell: report the actual value without checking it.
    Blank,

    /// `$name=`: bind the actual value to a symbol.
    Capture { symbol: String },

    /// `=~/pattern/`: unanchored search in the actual text.
    Regex { pattern: String },

    /// `low <op> _ <op> high`
    Interval {
        low: NumericLiteral,
        low_op: BoundOp,
        high_op: BoundOp,
        high: NumericLiteral,
    },

    /// `[!]<op> number` for `<`, `<=`, `>`, `>=`, `=`.
    Relational {
        op: RelationalOp,
        negated: bool,
        operand: NumericLiteral,
    },

    /// `~= number`, or `!~= number` when negated.
    Approx {
        negated: bool,
        operand: NumericLiteral,
    },

    /// Anything else: equality after symbol substitution.
    Plain { text: String },
}

impl ExpectedSpec {
    /// Classify spec text. First matching form wins:
    /// blank, capture, regex, interval, relational/approx, plain.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::Blank;
        }

        let trimmed = text.trim();

        if let Some(caps) = CAPTURE_PATTERN.captures(trimmed) {
            return Self::Capture {
                symbol: caps[1].to_string(),
            };
        }

        if let Some(caps) = REGEX_SPEC_PATTERN.captures(trimmed) {
            return Self::Regex {
                pattern: caps[1].to_string(),
            };
        }

        if let Some(spec) = Self::parse_interval(trimmed) {
            return spec;
        }

        if let Some(spec) = Self::parse_relational(trimmed) {
            return spec;
        }

        Self::Plain {
            text: text.to_string(),
        }
    }

    fn parse_interval(trimmed: &str) -> Option<Self> {
        let caps = INTERVAL_PATTERN.captures(trimmed)?;
        Some(Self::Interval {
            low: NumericLiteral::parse(&caps[1])?,
            low_op: BoundOp::from_token(&caps[2])?,
            high_op: BoundOp::from_token(&caps[3])?,
            high: NumericLiteral::parse(&caps[4])?,
        })
    }

    fn parse_relational(trimmed: &str) -> Option<Self> {
        let caps = RELATIONAL_PATTERN.captures(trimmed)?;
        let negated = !caps[1].is_empty();
        let operand = NumericLiteral::parse(&caps[3])?;

        if &caps[2] == "~=" {
            return Some(Self::Approx { negated, operand });
        }

        Some(Self::Relational {
            op: RelationalOp::from_token(&caps[2])?,
            negated,
            operand,
        })
    }

    /// The classification tag.
    pub fn kind(&self) -> SpecKind {
        match self {
            Self::Blank => SpecKind::Blank,
            Self::Capture { .. } => SpecKind::Capture,
            Self::Regex { .. } => SpecKind::Regex,
            Self::Interval { .. } => SpecKind::Interval,
            Self::Relational { .. } => SpecKind::Relational,
            Self::Approx { .. } => SpecKind::Approx,
            Self::Plain { .. } => SpecKind::Plain,
        }
    }
}
