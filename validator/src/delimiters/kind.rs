//! The delimiter kinds and their static token table.
//!
//! Each kind is described by data rather than behaviour: its open and close
//! tokens, whether the two are textually identical (ambiguous), and whether
//! the kind opens an opaque span in which no other kind is tracked. The
//! classifier and matcher are pure functions over this table.

use serde::Serialize;

/// A category of paired markers tracked by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DelimiterKind {
    Round,
    Angle,
    Curly,
    Square,
    SingleQuote,
    DoubleQuote,
    HtmlComment,
    CssComment,
}

/// Static description of one delimiter kind.
#[derive(Debug)]
pub struct DelimiterSpec {
    pub kind: DelimiterKind,
    pub open: &'static str,
    pub close: &'static str,
    /// Open and close tokens are the same text; the role of an occurrence
    /// depends on scan state instead of its literal form.
    pub ambiguous: bool,
    /// Opening this kind suppresses tracking of every other kind until the
    /// matching close token (or end of input).
    pub opaque: bool,
}

/// The full delimiter table, ordered longest open token first so the
/// classifier always prefers `<!--` over `<`.
pub const DELIMITER_TABLE: [DelimiterSpec; 8] = [
    DelimiterSpec {
        kind: DelimiterKind::HtmlComment,
        open: "<!--",
        close: "-->",
        ambiguous: false,
        opaque: true,
    },
    DelimiterSpec {
        kind: DelimiterKind::CssComment,
        open: "/*",
        close: "*/",
        ambiguous: false,
        opaque: true,
    },
    DelimiterSpec {
        kind: DelimiterKind::Round,
        open: "(",
        close: ")",
        ambiguous: false,
        opaque: false,
    },
    DelimiterSpec {
        kind: DelimiterKind::Angle,
        open: "<",
        close: ">",
        ambiguous: false,
        opaque: false,
    },
    DelimiterSpec {
        kind: DelimiterKind::Curly,
        open: "{",
        close: "}",
        ambiguous: false,
        opaque: false,
    },
    DelimiterSpec {
        kind: DelimiterKind::Square,
        open: "[",
        close: "]",
        ambiguous: false,
        opaque: false,
    },
    DelimiterSpec {
        kind: DelimiterKind::SingleQuote,
        open: "'",
        close: "'",
        ambiguous: true,
        opaque: true,
    },
    DelimiterSpec {
        kind: DelimiterKind::DoubleQuote,
        open: "\"",
        close: "\"",
        ambiguous: true,
        opaque: true,
    },
];

impl DelimiterKind {
    /// Every kind, in table order. Used for deterministic end-of-scan
    /// reporting.
    pub const ALL: [DelimiterKind; 8] = [
        DelimiterKind::HtmlComment,
        DelimiterKind::CssComment,
        DelimiterKind::Round,
        DelimiterKind::Angle,
        DelimiterKind::Curly,
        DelimiterKind::Square,
        DelimiterKind::SingleQuote,
        DelimiterKind::DoubleQuote,
    ];

    pub fn spec(self) -> &'static DelimiterSpec {
        match DELIMITER_TABLE.iter().find(|s| s.kind == self) {
            Some(spec) => spec,
            // The table covers every variant; an exhaustive test pins this.
            None => unreachable!(),
        }
    }

    pub fn open_token(self) -> &'static str {
        self.spec().open
    }

    pub fn close_token(self) -> &'static str {
        self.spec().close
    }

    pub fn is_ambiguous(self) -> bool {
        self.spec().ambiguous
    }

    pub fn is_opaque(self) -> bool {
        self.spec().opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_kind() {
        for kind in DelimiterKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_table_is_ordered_longest_open_first() {
        let lengths: Vec<usize> = DELIMITER_TABLE.iter().map(|s| s.open.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn test_ambiguous_kinds_have_identical_tokens() {
        for spec in &DELIMITER_TABLE {
            assert_eq!(spec.ambiguous, spec.open == spec.close);
        }
    }

    #[test]
    fn test_comment_tokens() {
        assert_eq!(DelimiterKind::HtmlComment.open_token(), "<!--");
        assert_eq!(DelimiterKind::HtmlComment.close_token(), "-->");
        assert_eq!(DelimiterKind::CssComment.open_token(), "/*");
        assert_eq!(DelimiterKind::CssComment.close_token(), "*/");
    }

    #[test]
    fn test_opaque_kinds() {
        assert!(DelimiterKind::SingleQuote.is_opaque());
        assert!(DelimiterKind::DoubleQuote.is_opaque());
        assert!(DelimiterKind::HtmlComment.is_opaque());
        assert!(DelimiterKind::CssComment.is_opaque());
        assert!(!DelimiterKind::Round.is_opaque());
        assert!(!DelimiterKind::Angle.is_opaque());
    }
}
