//! Event-driven tag scanner.
//!
//! Turns delimiter-clean text into a stream of start/end tag events with
//! source positions, which the validator consumes. Comments and the
//! doctype declaration are skipped. The scanner is deliberately lenient:
//! anything it cannot read as a tag is treated as text, since
//! well-formedness of the raw delimiters has already been checked.

use crate::delimiters::ScanCursor;
use crate::error::Position;
use once_cell::sync::Lazy;
use regex::Regex;

/// One parsed attribute; `value` is `None` for bare attributes like
/// `<input required>`.
pub type Attribute = (String, Option<String>);

/// A tag occurrence in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagEvent {
    Start {
        tag: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
        position: Position,
    },
    End {
        tag: String,
        position: Position,
    },
}

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9:_-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute regex compiles")
});

static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*").expect("tag name regex compiles"));

/// Scan `text` into tag events, in document order.
pub fn scan_tags(text: &str) -> Vec<TagEvent> {
    let mut events = Vec::new();
    let mut cursor = ScanCursor::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let skipped = match rest.find("-->") {
                Some(end) => &rest[..end + 3],
                None => rest,
            };
            cursor.advance(skipped);
            rest = &rest[skipped.len()..];
        } else if rest.starts_with("<!") {
            // Doctype or other declaration; ignored entirely.
            let skipped = match rest.find('>') {
                Some(end) => &rest[..end + 1],
                None => rest,
            };
            cursor.advance(skipped);
            rest = &rest[skipped.len()..];
        } else if rest.starts_with("</") {
            let position = cursor.position();
            let skipped = match rest.find('>') {
                Some(end) => &rest[..end + 1],
                None => rest,
            };
            let inner = skipped.trim_start_matches("</").trim_end_matches('>');
            if let Some(name) = TAG_NAME_RE.find(inner.trim()) {
                events.push(TagEvent::End {
                    tag: name.as_str().to_lowercase(),
                    position,
                });
            }
            cursor.advance(skipped);
            rest = &rest[skipped.len()..];
        } else if rest.starts_with('<') && starts_tag(rest) {
            let position = cursor.position();
            let skipped = &rest[..tag_end(rest)];
            let inner = skipped.trim_start_matches('<').trim_end_matches('>');
            let self_closing = inner.trim_end().ends_with('/');
            let inner = inner.trim_end().trim_end_matches('/');
            if let Some(name) = TAG_NAME_RE.find(inner) {
                let attributes = parse_attributes(&inner[name.end()..]);
                events.push(TagEvent::Start {
                    tag: name.as_str().to_lowercase(),
                    attributes,
                    self_closing,
                    position,
                });
            }
            cursor.advance(skipped);
            rest = &rest[skipped.len()..];
        } else {
            let Some(c) = rest.chars().next() else { break };
            cursor.advance(&rest[..c.len_utf8()]);
            rest = &rest[c.len_utf8()..];
        }
    }

    events
}

/// Position just past the end of `text`; used to report tags left open at
/// the end of the document.
pub fn end_position(text: &str) -> Position {
    let mut cursor = ScanCursor::new();
    cursor.advance(text);
    cursor.position()
}

fn starts_tag(rest: &str) -> bool {
    rest[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Byte length of the tag starting at the front of `rest`, honoring quoted
/// attribute values which may contain `>`.
fn tag_end(rest: &str) -> usize {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return i + 1,
            None => {}
        }
    }
    rest.len()
}

fn parse_attributes(raw: &str) -> Vec<Attribute> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            (name, value)
        })
        .collect()
}
