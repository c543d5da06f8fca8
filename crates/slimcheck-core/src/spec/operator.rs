//! Comparison operators that can appear in a spec.

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Serialize;

/// Operator of a single-sided numeric comparison (`actual <op> operand`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationalOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl RelationalOp {
    /// Read an operator token. `~=` is not relational and yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "=" => Some(Self::Eq),
            _ => None,
        }
    }

    /// The operator as written in a spec.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "=",
        }
    }

    /// Does `actual <op> operand` hold?
    pub fn holds(&self, actual: &BigDecimal, operand: &BigDecimal) -> bool {
        match self {
            Self::Lt => actual < operand,
            Self::Le => actual <= operand,
            Self::Gt => actual > operand,
            Self::Ge => actual >= operand,
            Self::Eq => actual == operand,
        }
    }
}

impl fmt::Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator on one side of an interval: strict (`<`) or inclusive (`<=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundOp {
    Lt,
    Le,
}

impl BoundOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    /// Does `left <op> right` hold?
    pub fn holds(&self, left: &BigDecimal, right: &BigDecimal) -> bool {
        match self {
            Self::Lt => left < right,
            Self::Le => left <= right,
        }
    }
}

impl fmt::Display for BoundOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
