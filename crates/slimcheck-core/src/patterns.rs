//! Shared grammar patterns for expected-value specs.
//!
//! The spec parser, the numeric reader and symbol substitution all
//! recognize pieces of the same small language. The patterns
//! live here so every module agrees on what a number or a symbol looks like.

use lazy_static::lazy_static;
use regex::Regex;

/// A decimal literal: optional sign, digits with optional fraction, or a bare
/// fraction such as `.5`. No exponents.
pub const NUMBER: &str = r"[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)";

lazy_static! {
    // =========================================================================
    // SPEC FORMS
    // =========================================================================

    /// A whole string that is exactly one decimal literal.
    pub static ref NUMBER_PATTERN: Regex = Regex::new(
        &format!(r"^{}$", NUMBER)
    ).unwrap();

    /// `=~/pattern/`
    pub static ref REGEX_SPEC_PATTERN: Regex = Regex::new(
        r"(?s)^=~/(.*)/$"
    ).unwrap();

    /// `low <op> _ <op> high` where each op is `<` or `<=`.
    pub static ref INTERVAL_PATTERN: Regex = Regex::new(
        &format!(r"^({})\s*(<=|<)\s*_\s*(<=|<)\s*({})$", NUMBER, NUMBER)
    ).unwrap();

    /// Optional `!`, an operator, then a number.
    pub static ref RELATIONAL_PATTERN: Regex = Regex::new(
        &format!(r"^(!?)(<=|>=|~=|<|>|=)\s*({})$", NUMBER)
    ).unwrap();

    /// `$name=` assigns the actual value to a symbol.
    pub static ref CAPTURE_PATTERN: Regex = Regex::new(
        r"^\$([A-Za-z]\w*)=$"
    ).unwrap();

    // =========================================================================
    // SYMBOLS
    // =========================================================================

    /// A `$name` reference anywhere inside a plain spec.
    pub static ref SYMBOL_PATTERN: Regex = Regex::new(
        r"\$([A-Za-z]\w*)"
    ).unwrap();
}

/// Check if the whole text is a single decimal literal.
pub fn is_number(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_literals() {
        assert!(is_number("3"));
        assert!(is_number("-3.25"));
        assert!(is_number("+0.5"));
        assert!(is_number(".5"));
        assert!(is_number("5."));
        assert!(!is_number("1e5"));
        assert!(!is_number("- 3"));
        assert!(!is_number(""));
        assert!(!is_number("."));
    }

    #[test]
    fn test_interval_captures() {
        let caps = INTERVAL_PATTERN.captures("-4 <= _ < -2").unwrap();
        assert_eq!(&caps[1], "-4");
        assert_eq!(&caps[2], "<=");
        assert_eq!(&caps[3], "<");
        assert_eq!(&caps[4], "-2");
    }

    #[test]
    fn test_relational_prefers_two_char_operators() {
        let caps = RELATIONAL_PATTERN.captures("!>=  5.9").unwrap();
        assert_eq!(&caps[1], "!");
        assert_eq!(&caps[2], ">=");
        assert_eq!(&caps[3], "5.9");
    }

    #[test]
    fn test_symbol_names() {
        let names: Vec<&str> = SYMBOL_PATTERN
            .captures_iter("$a and $b_2 but not $9")
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(names, vec!["a", "b_2"]);
    }
}
