//! # Delimiter Matching
//!
//! A single-pass scanner that checks every paired marker in free-form
//! HTML/CSS text: brackets, quotes and comment markers. The scanner is the
//! first validation pass; a submission with unbalanced delimiters is never
//! handed to the tag validator or the structural comparator.
//!
//! The pieces:
//! - [`kind`]: the delimiter kinds and their static token table.
//! - [`cursor`]: line/column bookkeeping while consuming input.
//! - [`classifier`]: classifies the next token given the current state.
//! - [`matcher`]: the scan loop with per-kind stacks and opaque spans.

pub mod classifier;
pub mod cursor;
pub mod kind;
pub mod matcher;

pub use classifier::{Classification, Role};
pub use cursor::ScanCursor;
pub use kind::DelimiterKind;
pub use matcher::scan;
