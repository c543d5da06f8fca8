//! # slimcheck-core
//!
//! Deterministic expected-value grading for acceptance test tables.
//!
//! A test author writes an expected-value spec in a table cell; the system
//! under test returns an actual value. This crate answers one question:
//! does the actual value satisfy the spec? It then renders the answer as a
//! plain-text message.
//!
//! ## Spec forms
//!
//! | Spec            | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | *(empty)*       | do not check, just report the value       |
//! | `$name=`        | bind the actual value to a symbol         |
//! | `=~/pattern/`   | pattern found anywhere in the actual text |
//! | `2 <= _ < 5`    | actual inside an interval                 |
//! | `< 5.2`, `!>= 3`| numeric comparison, optionally negated    |
//! | `~= 3.0`        | equal after rounding to the literal's precision |
//! | anything else   | equality, with `$name` substitution       |
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same spec, actual and symbols give the same verdict
//! 2. **Read-only symbols**: evaluation never writes the symbol table
//! 3. **Total**: every spec classifies; only an invalid regex is an error
//!
//! ## Example
//!
//! ```rust
//! use slimcheck_core::{evaluate, Outcome, SymbolTable};
//!
//! let mut symbols = SymbolTable::new();
//! symbols.set("S", "Value");
//!
//! let verdict = evaluate("$S", "Value", &symbols).unwrap();
//! assert_eq!(verdict.outcome, Outcome::Pass);
//! assert_eq!(verdict.message, "pass($S->[Value])");
//!
//! let verdict = evaluate(" 2.1 < _ <= 5.9", "5.9", &symbols).unwrap();
//! assert_eq!(verdict.message, "pass(2.1<5.9<=5.9)");
//! ```

pub mod evaluator;
pub mod expectation;
pub mod numeric;
pub mod patterns;
pub mod render;
pub mod spec;
pub mod suite;
pub mod symbols;
pub mod types;

// Re-export main types at crate root
pub use evaluator::Evaluator;
pub use expectation::Expectation;
pub use render::{HtmlRenderer, PlainRenderer, Renderer};
pub use spec::{BoundOp, ExpectedSpec, NumericLiteral, RelationalOp};
pub use suite::{Case, Suite, SuiteError, SuiteReport, Tally};
pub use symbols::{substitute, NoSymbols, Substitution, SymbolLookup, SymbolTable};
pub use types::{Outcome, SpecKind, SymbolBinding, Verdict};

use thiserror::Error;

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The author's `=~/.../` pattern does not compile. The spec must be fixed.
    #[error("Invalid regular expression /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Classify an expected-value spec.
pub fn classify(spec_text: &str) -> ExpectedSpec {
    let spec = ExpectedSpec::parse(spec_text);
    tracing::debug!(spec = %spec_text, kind = ?spec.kind(), "Spec classified");
    spec
}

/// Grade an actual value against an expected-value spec.
///
/// This is the main entry point for slimcheck evaluation.
///
/// # Arguments
///
/// * `spec_text` - The expected-value spec as written by the test author
/// * `actual` - The value returned by the system under test
/// * `symbols` - Symbols bound so far in the run (read only)
///
/// # Returns
///
/// A `Verdict` containing:
/// - `outcome`: PASS, FAIL, or IGNORE
/// - `message`: the plain-text rendering, e.g. `pass(3<5.2)`
/// - `binding`: a symbol assignment, for `$name=` specs
pub fn evaluate(
    spec_text: &str,
    actual: &str,
    symbols: &dyn SymbolLookup,
) -> Result<Verdict, EvaluationError> {
    let spec = classify(spec_text);
    Evaluator::new(symbols).evaluate(&spec, spec_text, actual)
}
