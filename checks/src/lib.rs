//! # Checks Library
//!
//! The structural grading layer of the judge. Once a submission has passed
//! syntactic validation, this crate parses it into a [`document::Document`]
//! and evaluates exercise-defined checks over it:
//!
//! - [`element`]: the query/assertion API over the parsed tag tree;
//! - [`check`]: composable boolean check expressions with short-circuit
//!   and abort semantics;
//! - [`suite`]: the ordered checklist a student sees, with skip-on-abort;
//! - [`compare`]: lockstep comparison of a submission against a reference
//!   solution, with `DUMMY` wildcards;
//! - [`css`]: the small cascade used by styling assertions;
//! - [`cfg`]: order-insensitive comparison of submitted control-flow
//!   graphs.

pub mod cfg;
pub mod check;
pub mod compare;
pub mod css;
pub mod document;
pub mod element;
pub mod error;
pub mod suite;

pub use cfg::{CfgAnswer, CfgEdge};
pub use check::{Check, CheckResult};
pub use compare::{CompareError, CompareOptions, DUMMY, compare};
pub use css::StyleSheet;
pub use document::Document;
pub use element::Element;
pub use error::ChecksError;
pub use suite::{ChecklistItem, ItemResult, SuiteReport, TestSuite};
