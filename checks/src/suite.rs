//! # Checklist Evaluation
//!
//! A [`TestSuite`] is the ordered checklist shown to the student: each
//! [`ChecklistItem`] bundles a name with the checks that must all pass for
//! the item to be ticked. Items are evaluated in order; once a failed check
//! marked `or_abort` is hit, the remaining items are marked failed without
//! being evaluated at all.

use crate::check::{Check, CheckResult};
use serde::Serialize;

/// One line of the checklist: a name plus the checks behind it.
pub struct ChecklistItem<'a> {
    name: String,
    checks: Vec<Check<'a>>,
}

impl<'a> ChecklistItem<'a> {
    pub fn new(name: impl Into<String>, checks: Vec<Check<'a>>) -> Self {
        ChecklistItem {
            name: name.into(),
            checks,
        }
    }

    fn evaluate(&self) -> CheckResult {
        let mut abort = false;
        let mut passed = true;
        for check in &self.checks {
            let result = check.evaluate();
            abort |= result.abort;
            if !result.passed {
                log::debug!("item '{}' failed on check '{}'", self.name, check.message());
                passed = false;
                break;
            }
        }
        CheckResult { passed, abort }
    }
}

/// The checklist for one submission.
pub struct TestSuite<'a> {
    name: String,
    items: Vec<ChecklistItem<'a>>,
}

impl<'a> TestSuite<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        TestSuite {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, name: impl Into<String>, checks: Vec<Check<'a>>) -> Self {
        self.items.push(ChecklistItem::new(name, checks));
        self
    }

    pub fn add_item(&mut self, item: ChecklistItem<'a>) {
        self.items.push(item);
    }

    /// Run all items in order and produce the serialisable report. After an
    /// aborting failure the remaining items are reported failed with
    /// `evaluated: false`.
    pub fn evaluate(self) -> SuiteReport {
        let mut items = Vec::with_capacity(self.items.len());
        let mut aborted = false;
        for item in &self.items {
            if aborted {
                items.push(ItemResult {
                    name: item.name.clone(),
                    passed: false,
                    evaluated: false,
                });
                continue;
            }
            let result = item.evaluate();
            if !result.passed && result.abort {
                log::info!(
                    "suite '{}': item '{}' failed a prerequisite, skipping the rest",
                    self.name,
                    item.name
                );
                aborted = true;
            }
            items.push(ItemResult {
                name: item.name.clone(),
                passed: result.passed,
                evaluated: true,
            });
        }
        SuiteReport {
            name: self.name,
            items,
        }
    }
}

/// Outcome of one checklist item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub name: String,
    pub passed: bool,
    /// `false` when the item was skipped because an earlier prerequisite
    /// failed.
    pub evaluated: bool,
}

/// The full checklist outcome handed to the platform renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub name: String,
    pub items: Vec<ItemResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.items.iter().all(|item| item.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::cell::Cell;

    #[test]
    fn test_all_items_pass() {
        let report = TestSuite::new("exercise")
            .item("first", vec![Check::new("yes", || true)])
            .item("second", vec![Check::new("yes", || true)])
            .evaluate();
        assert!(report.passed());
        assert!(report.items.iter().all(|item| item.evaluated));
    }

    #[test]
    fn test_failed_item_does_not_stop_siblings() {
        let report = TestSuite::new("exercise")
            .item("first", vec![Check::new("no", || false)])
            .item("second", vec![Check::new("yes", || true)])
            .evaluate();
        assert!(!report.passed());
        assert!(!report.items[0].passed);
        assert!(report.items[1].passed);
        assert!(report.items[1].evaluated);
    }

    #[test]
    fn test_abort_skips_remaining_items() {
        let ran = Cell::new(false);
        let report = TestSuite::new("exercise")
            .item("prerequisite", vec![Check::new("no", || false).or_abort()])
            .item(
                "dependent",
                vec![Check::new("side effect", || {
                    ran.set(true);
                    true
                })],
            )
            .evaluate();
        assert!(!report.passed());
        assert!(!report.items[1].passed);
        assert!(!report.items[1].evaluated);
        assert!(!ran.get(), "items after an abort must not be evaluated");
    }

    #[test]
    fn test_item_checks_all_must_pass() {
        let report = TestSuite::new("exercise")
            .item(
                "both",
                vec![Check::new("yes", || true), Check::new("no", || false)],
            )
            .evaluate();
        assert!(!report.items[0].passed);
    }

    #[test]
    fn test_report_serializes() {
        let report = TestSuite::new("exercise")
            .item("only", vec![Check::new("yes", || true)])
            .evaluate();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"name\":\"only\""));
        assert!(json.contains("\"passed\":true"));
    }

    #[test]
    fn test_suite_over_a_document() {
        let document = Document::parse(
            "<html><body><table>\
             <thead><tr><th>A</th></tr></thead>\
             <tbody><tr><td>1</td></tr></tbody>\
             </table></body></html>",
        );
        let table = document.root().get_descendant("table");
        let report = TestSuite::new("table exercise")
            .item(
                "table exists",
                vec![Check::new("table present", move || table.exists()).or_abort()],
            )
            .item(
                "header row",
                vec![Check::new("has header", move || {
                    table.has_table_header(&["A"])
                })],
            )
            .evaluate();
        assert!(report.passed());
    }
}
