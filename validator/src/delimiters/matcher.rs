//! The delimiter matching pass.
//!
//! Walks the input once, left to right. Open delimiters are pushed onto a
//! stack per kind; close delimiters pop their own kind's stack. Opaque
//! kinds (quotes and comments) open a span that suppresses tracking of
//! every other kind until the matching close token is found or the input
//! ends.
//!
//! Stacks are intentionally per kind: interleavings like `([)]` close
//! cleanly and produce no error. Cross-kind nesting discipline is the tag
//! validator's job, not the delimiter scanner's.

use crate::delimiters::classifier::{Role, classify};
use crate::delimiters::cursor::ScanCursor;
use crate::delimiters::kind::DelimiterKind;
use crate::error::{Position, StructuralError};
use std::collections::HashMap;

/// Scan `text` and report every unmatched delimiter.
///
/// Returns an empty vector for well-formed input. Errors are sorted
/// ascending by (line, column); equal positions keep insertion order. This
/// function never fails: malformed input is exactly what it reports.
pub fn scan(text: &str) -> Vec<StructuralError> {
    let mut errors: Vec<StructuralError> = Vec::new();
    let mut cursor = ScanCursor::new();
    let mut active_span: Option<(DelimiterKind, Position)> = None;
    let mut stacks: HashMap<DelimiterKind, Vec<Position>> = HashMap::new();

    let mut rest = text;
    while !rest.is_empty() {
        match classify(rest, active_span.map(|(kind, _)| kind)) {
            Some(token) => {
                let position = cursor.position();
                if active_span.is_some() {
                    // Only the span's own close token is ever classified here.
                    active_span = None;
                } else if token.kind.is_opaque() && token.role == Role::Open {
                    active_span = Some((token.kind, position));
                } else if token.role == Role::Open {
                    stacks.entry(token.kind).or_default().push(position);
                } else {
                    // Close occurrence of a trackable kind, or a stray close
                    // token of an opaque kind (e.g. `-->` outside a comment).
                    let matched = stacks
                        .get_mut(&token.kind)
                        .and_then(|stack| stack.pop())
                        .is_some();
                    if !matched {
                        errors.push(StructuralError::MissingOpening {
                            delimiter: token.kind,
                            position,
                        });
                    }
                }
                cursor.advance(&rest[..token.consumed]);
                rest = &rest[token.consumed..];
            }
            None => {
                let Some(c) = rest.chars().next() else { break };
                cursor.advance(&rest[..c.len_utf8()]);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    // An opaque span that never closed is reported at its opening token.
    if let Some((kind, position)) = active_span {
        log::debug!("unterminated {kind:?} span opened at {position}");
        errors.push(StructuralError::MissingClosing {
            delimiter: kind,
            position,
        });
    }

    // Remaining opens, oldest first per kind, in table order across kinds.
    // The final position sort makes the cross-kind order irrelevant.
    for kind in DelimiterKind::ALL {
        if let Some(stack) = stacks.get(&kind) {
            for position in stack {
                errors.push(StructuralError::MissingClosing {
                    delimiter: kind,
                    position: *position,
                });
            }
        }
    }

    errors.sort_by_key(|e| e.position());
    errors
}
