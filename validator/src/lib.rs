//! # Validator Library
//!
//! This crate provides the syntactic validation core of the judge: it checks
//! that a submitted HTML/CSS document is well-formed before any structural
//! comparison is attempted.
//!
//! Validation runs in two passes:
//! 1. **Delimiter matching** ([`delimiters`]): a single-pass scanner that
//!    verifies every paired marker (brackets, quotes, comments) has a
//!    matching counterpart, with precise line/column reporting.
//! 2. **Tag validation** ([`html`]): an event-driven pass over the tag
//!    stream that checks tag existence, nesting, closing tags and
//!    attributes against a static tag registry.
//!
//! Errors from both passes are gathered by the [`aggregator`] into a single
//! [`aggregator::ValidationReport`]: blocking errors suppress everything
//! downstream, recommended-attribute warnings are only shown on otherwise
//! clean documents.

pub mod aggregator;
pub mod delimiters;
pub mod error;
pub mod html;

pub use aggregator::{ErrorAggregator, ValidationReport};
pub use error::{Position, StructuralError, ValidationWarning};
pub use html::HtmlValidator;
