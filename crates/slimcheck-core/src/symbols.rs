//! Symbol lookup and `$name` substitution.
//!
//! Symbols are values captured earlier in a test run. The engine only reads
//! them; the table itself belongs to the caller, who also decides when to
//! record the bindings that capture specs produce.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::patterns::SYMBOL_PATTERN;
use crate::types::Verdict;

/// Read-only access to bound symbol values.
pub trait SymbolLookup {
    /// The value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<T: SymbolLookup + ?Sized> SymbolLookup for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl SymbolLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl SymbolLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A lookup with nothing bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymbols;

impl SymbolLookup for NoSymbols {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Symbols bound during a test run, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    values: BTreeMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record the binding a capture verdict carries. Returns true if the
    /// verdict had one.
    pub fn apply(&mut self, verdict: &Verdict) -> bool {
        match &verdict.binding {
            Some(binding) => {
                tracing::debug!(symbol = %binding.name, value = %binding.value, "Symbol bound");
                self.set(binding.name.clone(), binding.value.clone());
                true
            }
            None => false,
        }
    }
}

impl SymbolLookup for SymbolTable {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Expected text after `$name` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text to compare: bound symbols replaced by their values.
    pub compare: String,

    /// Text to show: bound symbols rendered as `$name->[value]`.
    pub display: String,
}

/// Replace every bound `$name` in `text`. Unbound references stay literal.
pub fn substitute(text: &str, symbols: &dyn SymbolLookup) -> Substitution {
    let mut compare = String::with_capacity(text.len());
    let mut display = String::with_capacity(text.len());
    let mut last = 0;

    for caps in SYMBOL_PATTERN.captures_iter(text) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];

        compare.push_str(&text[last..token.start()]);
        display.push_str(&text[last..token.start()]);

        match symbols.lookup(name) {
            Some(value) => {
                tracing::trace!(symbol = name, value = %value, "Substituting symbol");
                compare.push_str(&value);
                display.push_str(&format!("{}->[{}]", token.as_str(), value));
            }
            None => {
                compare.push_str(token.as_str());
                display.push_str(token.as_str());
            }
        }

        last = token.end();
    }

    compare.push_str(&text[last..]);
    display.push_str(&text[last..]);

    Substitution { compare, display }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, SpecKind, SymbolBinding};

    fn table(pairs: &[(&str, &str)]) -> SymbolTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_bound_symbol_substituted() {
        let symbols = table(&[("S", "Value")]);
        let sub = substitute("$S", &symbols);
        assert_eq!(sub.compare, "Value");
        assert_eq!(sub.display, "$S->[Value]");
    }

    #[test]
    fn test_unbound_symbol_left_literal() {
        let sub = substitute("$S", &NoSymbols);
        assert_eq!(sub.compare, "$S");
        assert_eq!(sub.display, "$S");
    }

    #[test]
    fn test_symbols_inside_text() {
        let symbols = table(&[("A", "1"), ("B", "two")]);
        let sub = substitute("x $A y $B z $C", &symbols);
        assert_eq!(sub.compare, "x 1 y two z $C");
        assert_eq!(sub.display, "x $A->[1] y $B->[two] z $C");
    }

    #[test]
    fn test_map_lookups() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), "v".to_string());
        assert_eq!(map.lookup("k"), Some("v".to_string()));
        assert_eq!((&map).lookup("missing"), None);
    }

    #[test]
    fn test_apply_capture_binding() {
        let mut symbols = SymbolTable::new();
        let verdict = Verdict {
            outcome: Outcome::Ignore,
            message: "$X<-[42]".to_string(),
            kind: SpecKind::Capture,
            expected: "$X=".to_string(),
            actual: "42".to_string(),
            binding: Some(SymbolBinding {
                name: "X".to_string(),
                value: "42".to_string(),
            }),
        };
        assert!(symbols.apply(&verdict));
        assert_eq!(symbols.get("X"), Some("42"));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_table_deserializes_from_map() {
        let symbols: SymbolTable = serde_json::from_str(r#"{"S": "Value"}"#).unwrap();
        assert_eq!(symbols.get("S"), Some("Value"));
    }
}
