//! # Check Expression Tree
//!
//! A `Check` is a small boolean expression over leaf predicates, evaluated
//! lazily left-to-right with short-circuit semantics. Exercise authors
//! compose them with `all_of` / `any_of` / `at_least` / `fail_if`, chain
//! dependent checks with [`Check::then`] (children only run when the parent
//! passed), and mark prerequisites with [`Check::or_abort`]: when an
//! aborting check fails, the whole checklist stops evaluating further
//! items, so a missing `<table>` yields one clear failure instead of a
//! cascade of nonsense.

/// The outcome of evaluating one check (or one checklist item).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckResult {
    pub passed: bool,
    /// A failed check marked `or_abort` was encountered somewhere in the
    /// expression.
    pub abort: bool,
}

enum CheckKind<'a> {
    Leaf(Box<dyn Fn() -> bool + 'a>),
    AllOf(Vec<Check<'a>>),
    AnyOf(Vec<Check<'a>>),
    AtLeast(usize, Vec<Check<'a>>),
    Not(Box<Check<'a>>),
}

/// One node of a check expression.
pub struct Check<'a> {
    message: String,
    kind: CheckKind<'a>,
    on_success: Vec<Check<'a>>,
    abort_on_fail: bool,
}

impl<'a> Check<'a> {
    /// A leaf predicate. The message is what the student sees when the
    /// containing checklist item fails.
    pub fn new(message: impl Into<String>, predicate: impl Fn() -> bool + 'a) -> Self {
        Check {
            message: message.into(),
            kind: CheckKind::Leaf(Box::new(predicate)),
            on_success: Vec::new(),
            abort_on_fail: false,
        }
    }

    /// Passes when every child passes; stops at the first failure.
    pub fn all_of(message: impl Into<String>, checks: Vec<Check<'a>>) -> Self {
        Check {
            message: message.into(),
            kind: CheckKind::AllOf(checks),
            on_success: Vec::new(),
            abort_on_fail: false,
        }
    }

    /// Passes when any child passes; stops at the first success.
    pub fn any_of(message: impl Into<String>, checks: Vec<Check<'a>>) -> Self {
        Check {
            message: message.into(),
            kind: CheckKind::AnyOf(checks),
            on_success: Vec::new(),
            abort_on_fail: false,
        }
    }

    /// Passes when at least `count` children pass; stops as soon as the
    /// quota is reached.
    pub fn at_least(message: impl Into<String>, count: usize, checks: Vec<Check<'a>>) -> Self {
        Check {
            message: message.into(),
            kind: CheckKind::AtLeast(count, checks),
            on_success: Vec::new(),
            abort_on_fail: false,
        }
    }

    /// Inverts a check: passes exactly when the inner check fails.
    pub fn fail_if(message: impl Into<String>, check: Check<'a>) -> Self {
        Check {
            message: message.into(),
            kind: CheckKind::Not(Box::new(check)),
            on_success: Vec::new(),
            abort_on_fail: false,
        }
    }

    /// Chain a dependent check: it only runs when this check passed, and
    /// its failure then fails this check too.
    pub fn then(mut self, check: Check<'a>) -> Self {
        self.on_success.push(check);
        self
    }

    /// Mark this check as a prerequisite: if it fails, the remaining items
    /// of the whole checklist are not evaluated.
    pub fn or_abort(mut self) -> Self {
        self.abort_on_fail = true;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn evaluate(&self) -> CheckResult {
        let mut abort = false;
        let mut passed = match &self.kind {
            CheckKind::Leaf(predicate) => predicate(),
            CheckKind::AllOf(checks) => {
                let mut all = true;
                for check in checks {
                    let result = check.evaluate();
                    abort |= result.abort;
                    if !result.passed {
                        all = false;
                        break;
                    }
                }
                all
            }
            CheckKind::AnyOf(checks) => {
                let mut any = false;
                for check in checks {
                    let result = check.evaluate();
                    abort |= result.abort;
                    if result.passed {
                        any = true;
                        break;
                    }
                }
                any
            }
            CheckKind::AtLeast(count, checks) => {
                let mut passes = 0;
                for check in checks {
                    let result = check.evaluate();
                    abort |= result.abort;
                    if result.passed {
                        passes += 1;
                        if passes >= *count {
                            break;
                        }
                    }
                }
                passes >= *count
            }
            CheckKind::Not(check) => {
                let result = check.evaluate();
                abort |= result.abort;
                !result.passed
            }
        };
        if passed {
            for check in &self.on_success {
                let result = check.evaluate();
                abort |= result.abort;
                if !result.passed {
                    passed = false;
                    break;
                }
            }
        }
        if !passed && self.abort_on_fail {
            abort = true;
        }
        CheckResult { passed, abort }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn pass() -> Check<'static> {
        Check::new("passes", || true)
    }

    fn fail() -> Check<'static> {
        Check::new("fails", || false)
    }

    #[test]
    fn test_leaf_check() {
        assert!(pass().evaluate().passed);
        assert!(!fail().evaluate().passed);
        assert!(!fail().evaluate().abort);
    }

    #[test]
    fn test_all_of_short_circuits() {
        let ran = Cell::new(false);
        let late = Check::new("late", || {
            ran.set(true);
            true
        });
        let check = Check::all_of("all", vec![pass(), fail(), late]);
        assert!(!check.evaluate().passed);
        assert!(!ran.get(), "checks after the first failure must not run");
    }

    #[test]
    fn test_any_of_short_circuits() {
        let ran = Cell::new(false);
        let late = Check::new("late", || {
            ran.set(true);
            true
        });
        let check = Check::any_of("any", vec![fail(), pass(), late]);
        assert!(check.evaluate().passed);
        assert!(!ran.get(), "checks after the first success must not run");
    }

    #[test]
    fn test_any_of_fails_when_all_fail() {
        assert!(!Check::any_of("any", vec![fail(), fail()]).evaluate().passed);
    }

    #[test]
    fn test_at_least() {
        let two_of_three = |checks| Check::at_least("quota", 2, checks);
        assert!(two_of_three(vec![pass(), fail(), pass()]).evaluate().passed);
        assert!(two_of_three(vec![pass(), pass(), fail()]).evaluate().passed);
        assert!(!two_of_three(vec![pass(), fail(), fail()]).evaluate().passed);
    }

    #[test]
    fn test_at_least_stops_at_quota() {
        let ran = Cell::new(false);
        let late = Check::new("late", || {
            ran.set(true);
            true
        });
        let check = Check::at_least("quota", 2, vec![pass(), pass(), late]);
        assert!(check.evaluate().passed);
        assert!(!ran.get());
    }

    #[test]
    fn test_fail_if_inverts() {
        assert!(Check::fail_if("inverted", fail()).evaluate().passed);
        assert!(!Check::fail_if("inverted", pass()).evaluate().passed);
    }

    #[test]
    fn test_then_runs_only_after_success() {
        let ran = Cell::new(false);
        let dependent = Check::new("dependent", || {
            ran.set(true);
            true
        });
        assert!(!fail().then(dependent).evaluate().passed);
        assert!(!ran.get(), "chained checks must not run after a failure");

        let dependent = Check::new("dependent", || {
            ran.set(true);
            false
        });
        assert!(!pass().then(dependent).evaluate().passed);
        assert!(ran.get());
    }

    #[test]
    fn test_or_abort_flags_only_on_failure() {
        assert!(!pass().or_abort().evaluate().abort);
        let result = fail().or_abort().evaluate();
        assert!(!result.passed);
        assert!(result.abort);
    }

    #[test]
    fn test_abort_propagates_through_combinators() {
        let check = Check::all_of("all", vec![pass(), fail().or_abort()]);
        let result = check.evaluate();
        assert!(!result.passed);
        assert!(result.abort);
    }
}
