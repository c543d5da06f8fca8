//! Grading suites loaded from YAML/JSON.
//!
//! A suite lists (expected, actual) cells in table order, with optional
//! initial symbol bindings. Running it grades each cell in turn and records
//! capture bindings so later cells can refer to them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expectation::Expectation;
use crate::symbols::SymbolTable;
use crate::types::Outcome;
use crate::EvaluationError;

/// Errors that can occur when loading a suite.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Failed to read suite file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Suite validation failed: {0}")]
    ValidationError(String),

    #[error("Unsupported suite file extension: {0}")]
    UnsupportedFormat(String),
}

/// One graded cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    /// Instruction that produced the actual value
    pub instruction_id: String,

    #[serde(default)]
    pub column: usize,

    #[serde(default)]
    pub row: usize,

    /// Expected-value spec as written in the table
    #[serde(default)]
    pub expected: String,

    /// Value returned by the system under test
    #[serde(default)]
    pub actual: String,
}

/// A list of cells to grade, with initial symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    /// Symbols bound before the first case
    #[serde(default)]
    pub symbols: SymbolTable,

    pub cases: Vec<Case>,
}

impl Suite {
    /// Parse a suite from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SuiteError> {
        let suite: Suite = serde_yaml::from_str(yaml)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Parse a suite from JSON string.
    pub fn from_json(json: &str) -> Result<Self, SuiteError> {
        let suite: Suite = serde_json::from_str(json)?;
        suite.validate()?;
        Ok(suite)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a suite, picking the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_file(path),
            "json" => Self::from_json_file(path),
            other => Err(SuiteError::UnsupportedFormat(other.to_string())),
        }
    }

    fn validate(&self) -> Result<(), SuiteError> {
        if self.cases.is_empty() {
            return Err(SuiteError::ValidationError(
                "suite has no cases".to_string(),
            ));
        }

        if let Some(index) = self
            .cases
            .iter()
            .position(|case| case.instruction_id.trim().is_empty())
        {
            return Err(SuiteError::ValidationError(format!(
                "case {} has an empty instruction_id",
                index
            )));
        }

        Ok(())
    }

    /// Grade every case in order.
    ///
    /// Capture bindings are applied to a copy of the suite's symbols as they
    /// are produced; the suite itself is not modified.
    pub fn run(&self) -> Result<SuiteReport, EvaluationError> {
        let mut symbols = self.symbols.clone();
        let mut expectations = Vec::with_capacity(self.cases.len());
        let mut tally = Tally::default();

        for case in &self.cases {
            let expectation = Expectation::grade(
                case.instruction_id.clone(),
                case.column,
                case.row,
                &case.expected,
                &case.actual,
                &symbols,
            )?;

            symbols.apply(expectation.verdict());
            tally.record(expectation.outcome());
            expectations.push(expectation);
        }

        tracing::info!(
            pass = tally.pass,
            fail = tally.fail,
            ignore = tally.ignore,
            "Suite graded"
        );

        Ok(SuiteReport {
            expectations,
            tally,
            symbols,
        })
    }
}

/// Counts of each outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub pass: usize,
    pub fail: usize,
    pub ignore: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.pass += 1,
            Outcome::Fail => self.fail += 1,
            Outcome::Ignore => self.ignore += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail + self.ignore
    }
}

/// Result of running a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub expectations: Vec<Expectation>,
    pub tally: Tally,

    /// Symbols as bound after the last case
    pub symbols: SymbolTable,
}

impl SuiteReport {
    /// True when no expectation failed.
    pub fn is_success(&self) -> bool {
        self.tally.fail == 0
    }
}
