//! # Error Aggregation
//!
//! Collects the positioned errors and warnings produced by the validation
//! passes and turns them into a single report for the platform renderer.
//!
//! Two severities exist:
//! - **blocking errors**: a submission with any of these is malformed and
//!   must not be structurally compared; they are reported as the sole
//!   feedback.
//! - **warnings** (missing recommended attributes): gathered for the whole
//!   document and reported together, but only when no blocking error
//!   exists, to avoid noise.
//!
//! Nothing is deduplicated: multiple errors at the same position are all
//! kept and sorted by (line, column).

use crate::error::{StructuralError, ValidationWarning};
use serde::Serialize;

/// Accumulates errors and warnings from one or more validation passes.
///
/// Created fresh per validation call and consumed by
/// [`ErrorAggregator::into_report`]; no state survives across submissions.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    errors: Vec<StructuralError>,
    warnings: Vec<ValidationWarning>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, error: StructuralError) {
        self.errors.push(error);
    }

    pub fn errors(&mut self, errors: impl IntoIterator<Item = StructuralError>) {
        self.errors.extend(errors);
    }

    pub fn warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Whether a blocking error has been recorded. Callers use this to skip
    /// downstream passes that would be meaningless over malformed input.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Produce the final report: errors and warnings each sorted by
    /// position, and warnings dropped entirely when any blocking error
    /// exists.
    pub fn into_report(self) -> ValidationReport {
        let ErrorAggregator {
            mut errors,
            mut warnings,
        } = self;
        errors.sort_by_key(|e| e.position());
        if errors.is_empty() {
            warnings.sort_by_key(|w| w.position());
        } else {
            warnings.clear();
        }
        ValidationReport { errors, warnings }
    }
}

/// The outcome of validating one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<StructuralError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// No errors and no warnings at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Whether the submission passes validation. Warnings are tolerated
    /// when `allow_warnings` is set.
    pub fn passed(&self, allow_warnings: bool) -> bool {
        self.errors.is_empty() && (allow_warnings || self.warnings.is_empty())
    }
}
