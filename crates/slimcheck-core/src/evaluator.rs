//! Expectation evaluator: matches an actual value against a classified spec
//! and renders the plain-text verdict message.
//!
//! Message forms:
//! - plain: `pass(E)` / `[A] fail(expected [E])`
//! - relational and approx: `pass(A op E)` / `fail(A op E)`
//! - interval: `pass(low op A op high)` / `fail(...)`
//! - regex: `pass(/p/ found in: A)` / `fail(/p/ not found in: A)`
//! - blank: `pass(BLANK)` / `ignore(A)`
//! - capture: `$name<-[A]`

use bigdecimal::BigDecimal;
use regex::Regex;

use crate::numeric::{decimal_places, parse_number, round_half_up};
use crate::spec::{BoundOp, ExpectedSpec, NumericLiteral, RelationalOp};
use crate::symbols::{substitute, SymbolLookup};
use crate::types::{Outcome, SpecKind, SymbolBinding, Verdict};
use crate::EvaluationError;

/// Grades actual values against classified specs.
pub struct Evaluator<'a> {
    symbols: &'a dyn SymbolLookup,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a dyn SymbolLookup) -> Self {
        Self { symbols }
    }

    /// Evaluate `actual` against an already classified spec.
    ///
    /// # Arguments
    ///
    /// * `spec` - The classified spec
    /// * `spec_text` - The text `spec` was parsed from, used for display
    /// * `actual` - The value produced by the system under test
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::InvalidPattern` when a regex spec does not
    /// compile. Every other mismatch is a `Fail` verdict, not an error.
    pub fn evaluate(
        &self,
        spec: &ExpectedSpec,
        spec_text: &str,
        actual: &str,
    ) -> Result<Verdict, EvaluationError> {
        let verdict = match spec {
            ExpectedSpec::Blank => self.blank(actual),
            ExpectedSpec::Capture { symbol } => self.capture(symbol, spec_text, actual),
            ExpectedSpec::Regex { pattern } => self.regex(pattern, spec_text, actual)?,
            ExpectedSpec::Interval {
                low,
                low_op,
                high_op,
                high,
            } => self.interval(low, *low_op, *high_op, high, spec_text, actual),
            ExpectedSpec::Relational {
                op,
                negated,
                operand,
            } => self.relational(*op, *negated, operand, spec_text, actual),
            ExpectedSpec::Approx { negated, operand } => {
                self.approx(*negated, operand, spec_text, actual)
            }
            ExpectedSpec::Plain { text } => self.plain(text, actual),
        };

        tracing::debug!(
            kind = ?verdict.kind,
            outcome = ?verdict.outcome,
            message = %verdict.message,
            "Expectation evaluated"
        );

        Ok(verdict)
    }

    fn blank(&self, actual: &str) -> Verdict {
        let (outcome, message) = if actual.is_empty() {
            (Outcome::Pass, "pass(BLANK)".to_string())
        } else {
            (Outcome::Ignore, format!("ignore({})", actual))
        };

        Verdict {
            outcome,
            message,
            kind: SpecKind::Blank,
            expected: String::new(),
            actual: actual.to_string(),
            binding: None,
        }
    }

    fn capture(&self, symbol: &str, spec_text: &str, actual: &str) -> Verdict {
        Verdict {
            outcome: Outcome::Ignore,
            message: format!("${}<-[{}]", symbol, actual),
            kind: SpecKind::Capture,
            expected: spec_text.trim().to_string(),
            actual: actual.to_string(),
            binding: Some(SymbolBinding {
                name: symbol.to_string(),
                value: actual.to_string(),
            }),
        }
    }

    fn regex(&self, pattern: &str, spec_text: &str, actual: &str) -> Result<Verdict, EvaluationError> {
        let compiled = Regex::new(pattern).map_err(|source| {
            tracing::warn!(pattern = %pattern, error = %source, "Invalid expectation pattern");
            EvaluationError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        let found = compiled.is_match(actual);
        let message = if found {
            format!("pass(/{}/ found in: {})", pattern, actual)
        } else {
            format!("fail(/{}/ not found in: {})", pattern, actual)
        };

        Ok(Verdict {
            outcome: Outcome::from_match(found),
            message,
            kind: SpecKind::Regex,
            expected: spec_text.trim().to_string(),
            actual: actual.to_string(),
            binding: None,
        })
    }

    fn interval(
        &self,
        low: &NumericLiteral,
        low_op: BoundOp,
        high_op: BoundOp,
        high: &NumericLiteral,
        spec_text: &str,
        actual: &str,
    ) -> Verdict {
        let matched = parse_number(actual).is_some_and(|value| {
            low_op.holds(low.value(), &value) && high_op.holds(&value, high.value())
        });

        let comparison = format!(
            "{}{}{}{}{}",
            low.text(),
            low_op,
            actual,
            high_op,
            high.text()
        );

        self.numeric_verdict(matched, comparison, SpecKind::Interval, spec_text, actual)
    }

    fn relational(
        &self,
        op: RelationalOp,
        negated: bool,
        operand: &NumericLiteral,
        spec_text: &str,
        actual: &str,
    ) -> Verdict {
        let matched = parse_number(actual)
            .is_some_and(|value| op.holds(&value, operand.value()) != negated);

        let comparison = format!(
            "{}{}{}{}",
            actual,
            negation_marker(negated),
            op,
            operand.text()
        );

        self.numeric_verdict(matched, comparison, SpecKind::Relational, spec_text, actual)
    }

    fn approx(&self, negated: bool, operand: &NumericLiteral, spec_text: &str, actual: &str) -> Verdict {
        let places = decimal_places(operand.text());
        let matched = parse_number(actual)
            .is_some_and(|value| approximately_equal(&value, operand.value(), places) != negated);

        let comparison = format!(
            "{}{}~={}",
            actual,
            negation_marker(negated),
            operand.text()
        );

        self.numeric_verdict(matched, comparison, SpecKind::Approx, spec_text, actual)
    }

    fn numeric_verdict(
        &self,
        matched: bool,
        comparison: String,
        kind: SpecKind,
        spec_text: &str,
        actual: &str,
    ) -> Verdict {
        let message = if matched {
            format!("pass({})", comparison)
        } else {
            format!("fail({})", comparison)
        };

        Verdict {
            outcome: Outcome::from_match(matched),
            message,
            kind,
            expected: spec_text.trim().to_string(),
            actual: actual.to_string(),
            binding: None,
        }
    }

    fn plain(&self, text: &str, actual: &str) -> Verdict {
        let substitution = substitute(text, self.symbols);

        let matched = match (parse_number(&substitution.compare), parse_number(actual)) {
            (Some(expected), Some(value)) => expected == value,
            _ => substitution.compare == actual,
        };

        let message = if matched {
            format!("pass({})", substitution.display)
        } else {
            format!("[{}] fail(expected [{}])", actual, substitution.display)
        };

        Verdict {
            outcome: Outcome::from_match(matched),
            message,
            kind: SpecKind::Plain,
            expected: substitution.display,
            actual: actual.to_string(),
            binding: None,
        }
    }
}

fn negation_marker(negated: bool) -> &'static str {
    if negated {
        "!"
    } else {
        ""
    }
}

/// Round `actual` to the precision of the expected literal, then compare.
fn approximately_equal(actual: &BigDecimal, expected: &BigDecimal, places: u32) -> bool {
    round_half_up(actual, places) == *expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{NoSymbols, SymbolTable};

    fn grade(spec: &str, actual: &str) -> Verdict {
        let evaluator = Evaluator::new(&NoSymbols);
        evaluator
            .evaluate(&ExpectedSpec::parse(spec), spec, actual)
            .unwrap()
    }

    #[test]
    fn test_plain_pass_and_fail() {
        assert_eq!(grade("expected", "expected").message, "pass(expected)");
        let verdict = grade("expected", "actual");
        assert_eq!(verdict.message, "[actual] fail(expected [expected])");
        assert!(verdict.outcome.is_fail());
    }

    #[test]
    fn test_plain_numbers_compare_by_value() {
        assert!(grade("3", "03").outcome.is_pass());
        assert!(grade("3", " 3 ").outcome.is_pass());
        assert!(grade("3.1", "3.10001").outcome.is_fail());
    }

    #[test]
    fn test_plain_text_is_exact() {
        assert!(grade("abc", "abc ").outcome.is_fail());
        assert!(grade("abc", "ABC").outcome.is_fail());
    }

    #[test]
    fn test_blank() {
        let pass = grade("", "");
        assert_eq!(pass.outcome, Outcome::Pass);
        assert_eq!(pass.message, "pass(BLANK)");

        let ignore = grade("", "ignore");
        assert_eq!(ignore.outcome, Outcome::Ignore);
        assert_eq!(ignore.message, "ignore(ignore)");
    }

    #[test]
    fn test_plain_substitution_uses_bound_value() {
        let mut symbols = SymbolTable::new();
        symbols.set("S", "Value");
        let evaluator = Evaluator::new(&symbols);

        let verdict = evaluator
            .evaluate(&ExpectedSpec::parse("$S"), "$S", "Value")
            .unwrap();
        assert_eq!(verdict.message, "pass($S->[Value])");
        assert_eq!(verdict.expected, "$S->[Value]");
    }

    #[test]
    fn test_relational_unparseable_actual_fails_even_when_negated() {
        let verdict = grade("!< 5", "abc");
        assert!(verdict.outcome.is_fail());
        assert_eq!(verdict.message, "fail(abc!<5)");
    }

    #[test]
    fn test_relational_keeps_actual_verbatim() {
        assert_eq!(grade("=3", " 3 ").message, "pass( 3 =3)");
    }

    #[test]
    fn test_approx_rounding() {
        assert_eq!(grade("~= 3.0", "2.95").message, "pass(2.95~=3.0)");
        assert_eq!(grade("~= 3.0", "2.8").message, "fail(2.8~=3.0)");
        assert!(grade("~= 3", "3.4").outcome.is_pass());
        assert!(grade("~= 3", "3.5").outcome.is_fail());
    }

    #[test]
    fn test_interval_needs_numeric_actual() {
        assert_eq!(grade("1 < _ < 3", "two").message, "fail(1<two<3)");
    }

    #[test]
    fn test_capture_carries_binding() {
        let verdict = grade("$X=", "42");
        assert_eq!(verdict.outcome, Outcome::Ignore);
        assert_eq!(verdict.message, "$X<-[42]");
        assert_eq!(
            verdict.binding,
            Some(SymbolBinding {
                name: "X".to_string(),
                value: "42".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        let spec = ExpectedSpec::parse("=~/[unclosed/");
        let result = Evaluator::new(&NoSymbols).evaluate(&spec, "=~/[unclosed/", "x");
        assert!(matches!(
            result,
            Err(EvaluationError::InvalidPattern { .. })
        ));
    }
}
