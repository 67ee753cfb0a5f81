//! # Validator Error Types
//!
//! Positioned error records produced by the delimiter and tag validation
//! passes. Every error carries a 1-based (line, column) [`Position`] so the
//! platform can attach annotations to the student's source, plus a stable
//! kind identifier so the caller can localize the message; the English
//! template produced here is only a fallback.

use crate::delimiters::DelimiterKind;
use serde::Serialize;
use std::fmt;

/// 1-based source location. Orders by line first, then column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} position {}", self.line, self.column)
    }
}

/// A blocking well-formedness violation found in a submission.
///
/// Delimiter variants come from the bracket/quote/comment scanner, tag and
/// attribute variants from the tag validation pass. All variants carry a
/// position; reports are sorted ascending by (line, column).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum StructuralError {
    /// A closing delimiter appeared with no matching opener before it.
    MissingOpening {
        delimiter: DelimiterKind,
        position: Position,
    },
    /// An opening delimiter was never closed.
    MissingClosing {
        delimiter: DelimiterKind,
        position: Position,
    },
    /// A closing tag appeared with no matching opening tag.
    MissingOpeningTag { tag: String, position: Position },
    /// An opening tag was never closed.
    MissingClosingTag { tag: String, position: Position },
    /// The tag does not exist or is not allowed to be used.
    InvalidTag { tag: String, position: Position },
    /// The tag is not permitted at this point in the document.
    UnexpectedTag { tag: String, position: Position },
    /// A void tag (e.g. `<img>`) was explicitly closed.
    UnexpectedClosingTag { tag: String, position: Position },
    /// A non-void tag was written in self-closing form.
    NoSelfClosingTag { tag: String, position: Position },
    /// An attribute that is never allowed on this tag (e.g. inline style).
    InvalidAttribute {
        tag: String,
        attribute: String,
        position: Position,
    },
    /// One or more required attributes are absent.
    MissingRequiredAttribute {
        tag: String,
        attributes: String,
        position: Position,
    },
    /// The same id value is used by more than one element.
    DuplicateId {
        tag: String,
        id: String,
        position: Position,
    },
    /// An attribute is present but its value is not acceptable.
    AttributeValue { message: String, position: Position },
}

impl StructuralError {
    pub fn position(&self) -> Position {
        match self {
            StructuralError::MissingOpening { position, .. }
            | StructuralError::MissingClosing { position, .. }
            | StructuralError::MissingOpeningTag { position, .. }
            | StructuralError::MissingClosingTag { position, .. }
            | StructuralError::InvalidTag { position, .. }
            | StructuralError::UnexpectedTag { position, .. }
            | StructuralError::UnexpectedClosingTag { position, .. }
            | StructuralError::NoSelfClosingTag { position, .. }
            | StructuralError::InvalidAttribute { position, .. }
            | StructuralError::MissingRequiredAttribute { position, .. }
            | StructuralError::DuplicateId { position, .. }
            | StructuralError::AttributeValue { position, .. } => *position,
        }
    }

    /// Stable identifier for the error kind, used by the caller to pick a
    /// localized message template.
    pub fn kind_id(&self) -> &'static str {
        match self {
            StructuralError::MissingOpening { .. } => "missing_opening_character",
            StructuralError::MissingClosing { .. } => "missing_closing_character",
            StructuralError::MissingOpeningTag { .. } => "missing_opening_tag",
            StructuralError::MissingClosingTag { .. } => "missing_closing_tag",
            StructuralError::InvalidTag { .. } => "invalid_tag",
            StructuralError::UnexpectedTag { .. } => "unexpected_tag",
            StructuralError::UnexpectedClosingTag { .. } => "unexpected_closing_tag",
            StructuralError::NoSelfClosingTag { .. } => "no_self_closing_tag",
            StructuralError::InvalidAttribute { .. } => "invalid_attribute",
            StructuralError::MissingRequiredAttribute { .. } => "missing_required_attribute",
            StructuralError::DuplicateId { .. } => "duplicate_id",
            StructuralError::AttributeValue { .. } => "attribute_value",
        }
    }

    /// Short user-facing message, without the position suffix.
    pub fn message(&self) -> String {
        match self {
            StructuralError::MissingOpening { delimiter, .. } => {
                format!("Missing an opening character for '{}'", delimiter.close_token())
            }
            StructuralError::MissingClosing { delimiter, .. } => {
                format!("Missing a closing character for '{}'", delimiter.open_token())
            }
            StructuralError::MissingOpeningTag { tag, .. } => {
                format!("Missing an opening tag for <{tag}>")
            }
            StructuralError::MissingClosingTag { tag, .. } => {
                format!("Missing a closing tag for <{tag}>")
            }
            StructuralError::InvalidTag { tag, .. } => format!("Invalid tag: <{tag}>"),
            StructuralError::UnexpectedTag { tag, .. } => format!("Unexpected tag: <{tag}>"),
            StructuralError::UnexpectedClosingTag { tag, .. } => {
                format!("Tag <{tag}> should not have a closing tag")
            }
            StructuralError::NoSelfClosingTag { tag, .. } => {
                format!("Tag <{tag}> cannot be self-closing")
            }
            StructuralError::InvalidAttribute { tag, attribute, .. } => {
                format!("Invalid attribute for <{tag}>: {attribute}")
            }
            StructuralError::MissingRequiredAttribute { tag, attributes, .. } => {
                format!("Missing required attribute(s) for <{tag}>: {attributes}")
            }
            StructuralError::DuplicateId { tag, id, .. } => {
                format!("Id '{id}' on <{tag}> is already in use")
            }
            StructuralError::AttributeValue { message, .. } => message.clone(),
        }
    }

    /// Long-form message shown in the feedback tab, with the position
    /// appended.
    pub fn annotation(&self) -> String {
        format!("{} at {}", self.message(), self.position())
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.annotation())
    }
}

/// A non-blocking advisory collected during tag validation.
///
/// Warnings never abort a validation pass on their own; they are gathered
/// for the whole document and only reported when no blocking error exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ValidationWarning {
    MissingRecommendedAttribute {
        tag: String,
        attributes: String,
        position: Position,
    },
}

impl ValidationWarning {
    pub fn position(&self) -> Position {
        match self {
            ValidationWarning::MissingRecommendedAttribute { position, .. } => *position,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationWarning::MissingRecommendedAttribute { tag, attributes, .. } => {
                format!("Missing recommended attribute(s) for <{tag}>: {attributes}")
            }
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.position())
    }
}
