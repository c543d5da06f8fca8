//! Rendering collaborators for verdict messages.
//!
//! The evaluator only produces plain text. Presentation (markup, color) is
//! applied here, without changing what the message says.

use crate::types::{Outcome, SpecKind, Verdict};

/// Turns a verdict into displayable text.
pub trait Renderer {
    fn render(&self, verdict: &Verdict) -> String;
}

/// Returns the message as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, verdict: &Verdict) -> String {
        verdict.message.clone()
    }
}

/// Wraps the payload of a message in a `<span>` classed by outcome, the way
/// test table cells are colored in an HTML report.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, verdict: &Verdict) -> String {
        let message = verdict.message.as_str();
        match (verdict.outcome, verdict.kind) {
            (Outcome::Fail, SpecKind::Plain) => format!(
                "[{}] {}",
                escape(&verdict.actual),
                span("fail", &format!("expected [{}]", verdict.expected))
            ),
            (Outcome::Pass, _) => span("pass", payload(message, "pass(")),
            (Outcome::Fail, _) => span("fail", payload(message, "fail(")),
            (Outcome::Ignore, SpecKind::Blank) => span("ignore", &verdict.actual),
            // Capture messages have no ignore(...) wrapper of their own.
            (Outcome::Ignore, _) => span("ignore", message),
        }
    }
}

/// The text inside `prefix...)`, or the whole message if it has another shape.
fn payload<'a>(message: &'a str, prefix: &str) -> &'a str {
    message
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(message)
}

fn span(class: &str, text: &str) -> String {
    format!("<span class=\"{}\">{}</span>", class, escape(text))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::NoSymbols;

    fn verdict(spec: &str, actual: &str) -> Verdict {
        crate::evaluate(spec, actual, &NoSymbols).unwrap()
    }

    #[test]
    fn test_plain_renderer_is_identity() {
        let v = verdict("< 5.2", "3");
        assert_eq!(PlainRenderer.render(&v), "pass(3<5.2)");
    }

    #[test]
    fn test_html_pass_escapes_operators() {
        let v = verdict("< 5.2", "3");
        assert_eq!(
            HtmlRenderer.render(&v),
            "<span class=\"pass\">3&lt;5.2</span>"
        );
    }

    #[test]
    fn test_html_plain_fail_keeps_actual_outside_span() {
        let v = verdict("expected", "actual");
        assert_eq!(
            HtmlRenderer.render(&v),
            "[actual] <span class=\"fail\">expected [expected]</span>"
        );
    }

    #[test]
    fn test_html_plain_fail_with_bracketed_actual() {
        let v = verdict("x", "a] fail(b");
        assert_eq!(
            HtmlRenderer.render(&v),
            "[a] fail(b] <span class=\"fail\">expected [x]</span>"
        );
    }

    #[test]
    fn test_html_numeric_fail_with_parentheses_in_actual() {
        let v = verdict("< 5", "(x)");
        assert_eq!(HtmlRenderer.render(&v), "<span class=\"fail\">(x)&lt;5</span>");
    }

    #[test]
    fn test_html_ignore_and_capture() {
        assert_eq!(
            HtmlRenderer.render(&verdict("", "x")),
            "<span class=\"ignore\">x</span>"
        );
        assert_eq!(
            HtmlRenderer.render(&verdict("$X=", "7")),
            "<span class=\"ignore\">$X&lt;-[7]</span>"
        );
    }

    #[test]
    fn test_html_blank_pass() {
        assert_eq!(
            HtmlRenderer.render(&verdict("", "")),
            "<span class=\"pass\">BLANK</span>"
        );
    }
}
