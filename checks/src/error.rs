//! Error types for the checks crate.

use std::fmt;

/// Errors raised while setting up checks, as opposed to checks that merely
/// fail. A failing check is a normal outcome; these indicate the exercise
/// author or the submission payload handed us something unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChecksError {
    /// A CSS selector could not be parsed.
    InvalidSelector(String),
    /// A structured answer payload (e.g. a graph submission) could not be
    /// deserialized.
    InvalidAnswer(String),
}

impl fmt::Display for ChecksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksError::InvalidSelector(message) => {
                write!(f, "Invalid CSS selector: {message}")
            }
            ChecksError::InvalidAnswer(message) => {
                write!(f, "Invalid answer payload: {message}")
            }
        }
    }
}

impl std::error::Error for ChecksError {}
