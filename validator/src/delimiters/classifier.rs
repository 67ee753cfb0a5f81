//! Classification of the next token in the input.
//!
//! Pure functions over the delimiter table: given the unconsumed suffix of
//! the input and the currently active opaque span (if any), decide which
//! delimiter kind matches at the current position, in which role, and how
//! many bytes it consumes. No scanner state is mutated here.

use crate::delimiters::kind::{DELIMITER_TABLE, DelimiterKind};

/// Whether an occurrence opens or closes its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Open,
    Close,
}

/// The result of classifying the input suffix at one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub kind: DelimiterKind,
    pub role: Role,
    /// Number of bytes the token occupies (all tokens are ASCII).
    pub consumed: usize,
}

/// Classify the token starting at `rest`, or return `None` for a plain
/// character.
///
/// Resolution order:
/// 1. Inside an opaque span only that span's close token is recognised.
/// 2. Otherwise the table is walked longest-open-token first, checking the
///    open token before the close token of each kind.
/// 3. An ambiguous kind seen outside any span is always an open occurrence;
///    its close occurrence can only ever be produced by rule 1.
pub fn classify(rest: &str, active_span: Option<DelimiterKind>) -> Option<Classification> {
    if let Some(kind) = active_span {
        let close = kind.close_token();
        if rest.starts_with(close) {
            return Some(Classification {
                kind,
                role: Role::Close,
                consumed: close.len(),
            });
        }
        return None;
    }

    for spec in &DELIMITER_TABLE {
        if rest.starts_with(spec.open) {
            return Some(Classification {
                kind: spec.kind,
                role: Role::Open,
                consumed: spec.open.len(),
            });
        }
        if rest.starts_with(spec.close) {
            return Some(Classification {
                kind: spec.kind,
                role: Role::Close,
                consumed: spec.close.len(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_character_is_not_classified() {
        assert_eq!(classify("abc", None), None);
        assert_eq!(classify("1 + 2", None), None);
    }

    #[test]
    fn test_unambiguous_open_and_close() {
        assert_eq!(
            classify("(x", None),
            Some(Classification {
                kind: DelimiterKind::Round,
                role: Role::Open,
                consumed: 1
            })
        );
        assert_eq!(
            classify("]rest", None),
            Some(Classification {
                kind: DelimiterKind::Square,
                role: Role::Close,
                consumed: 1
            })
        );
    }

    #[test]
    fn test_html_comment_wins_over_angle_bracket() {
        let c = classify("<!-- hi -->", None).unwrap();
        assert_eq!(c.kind, DelimiterKind::HtmlComment);
        assert_eq!(c.role, Role::Open);
        assert_eq!(c.consumed, 4);

        let c = classify("<p>", None).unwrap();
        assert_eq!(c.kind, DelimiterKind::Angle);
        assert_eq!(c.consumed, 1);
    }

    #[test]
    fn test_stray_comment_close_is_a_close_occurrence() {
        let c = classify("--> tail", None).unwrap();
        assert_eq!(c.kind, DelimiterKind::HtmlComment);
        assert_eq!(c.role, Role::Close);
        assert_eq!(c.consumed, 3);

        let c = classify("*/", None).unwrap();
        assert_eq!(c.kind, DelimiterKind::CssComment);
        assert_eq!(c.role, Role::Close);
    }

    #[test]
    fn test_quote_outside_span_opens() {
        let c = classify("'text'", None).unwrap();
        assert_eq!(c.kind, DelimiterKind::SingleQuote);
        assert_eq!(c.role, Role::Open);
    }

    #[test]
    fn test_inside_span_only_own_close_matches() {
        // Inside a double-quote span a single quote is plain text.
        assert_eq!(classify("'", Some(DelimiterKind::DoubleQuote)), None);
        // Brackets are plain text inside any opaque span.
        assert_eq!(classify("(", Some(DelimiterKind::CssComment)), None);
        // The span's own close token matches.
        let c = classify("\"tail", Some(DelimiterKind::DoubleQuote)).unwrap();
        assert_eq!(c.role, Role::Close);
        assert_eq!(c.consumed, 1);
    }

    #[test]
    fn test_comment_close_inside_comment_span() {
        let c = classify("--> after", Some(DelimiterKind::HtmlComment)).unwrap();
        assert_eq!(c.kind, DelimiterKind::HtmlComment);
        assert_eq!(c.role, Role::Close);
        assert_eq!(c.consumed, 3);
        // An open token inside the span is plain text.
        assert_eq!(classify("<!--", Some(DelimiterKind::HtmlComment)), None);
    }
}
