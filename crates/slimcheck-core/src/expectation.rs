//! Positional expectations.
//!
//! An expectation ties a verdict to the table cell it grades, so a report can
//! put the message back where the value came from.

use serde::{Deserialize, Serialize};

use crate::symbols::SymbolLookup;
use crate::types::{Outcome, Verdict};
use crate::EvaluationError;

/// A verdict plus the instruction and cell position it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    instruction_id: String,
    column: usize,
    row: usize,
    verdict: Verdict,
}

impl Expectation {
    pub fn new(instruction_id: impl Into<String>, column: usize, row: usize, verdict: Verdict) -> Self {
        Self {
            instruction_id: instruction_id.into(),
            column,
            row,
            verdict,
        }
    }

    /// Grade `actual` against `expected` and attach the cell position.
    ///
    /// # Arguments
    ///
    /// * `instruction_id` - Opaque id of the instruction that returned `actual`
    /// * `column` - Column of the expected-value cell
    /// * `row` - Row of the expected-value cell
    /// * `expected` - The expected-value spec text
    /// * `actual` - The returned value
    /// * `symbols` - Bound symbols, read only
    pub fn grade(
        instruction_id: impl Into<String>,
        column: usize,
        row: usize,
        expected: &str,
        actual: &str,
        symbols: &dyn SymbolLookup,
    ) -> Result<Self, EvaluationError> {
        let verdict = crate::evaluate(expected, actual, symbols)?;
        Ok(Self::new(instruction_id, column, row, verdict))
    }

    pub fn message(&self) -> &str {
        &self.verdict.message
    }

    pub fn instruction_id(&self) -> &str {
        &self.instruction_id
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn outcome(&self) -> Outcome {
        self.verdict.outcome
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::NoSymbols;

    #[test]
    fn test_position_is_passed_through() {
        let expectation =
            Expectation::grade("instructionId", 1, 2, "expected", "expected", &NoSymbols).unwrap();

        assert_eq!(expectation.message(), "pass(expected)");
        assert_eq!(expectation.instruction_id(), "instructionId");
        assert_eq!(expectation.column(), 1);
        assert_eq!(expectation.row(), 2);
        assert_eq!(expectation.outcome(), Outcome::Pass);
    }

    #[test]
    fn test_grade_propagates_pattern_errors() {
        let result = Expectation::grade("id", 0, 0, "=~/(/", "x", &NoSymbols);
        assert!(result.is_err());
    }
}
