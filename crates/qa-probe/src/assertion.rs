//! Assertions for test validation.
//!
//! Each check yields an [`AssertionResult`]; `into_result` turns a failing
//! one into [`QaError::AssertionFailed`] so scenario bodies can use `?`.

use crate::result::{QaError, QaResult};
use std::fmt::Debug;

/// Result of an assertion
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Prefix the failure message with what was being checked
    #[must_use]
    pub fn context(mut self, what: &str) -> Self {
        if !self.passed {
            self.message = format!("{what}: {}", self.message);
        }
        self
    }

    /// Convert into a result usable with `?`
    pub fn into_result(self) -> QaResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(QaError::AssertionFailed {
                message: self.message,
            })
        }
    }
}

/// Assertion helpers
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a string contains a substring
    #[must_use]
    pub fn contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {haystack:?} to contain {needle:?}"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert a count matches
    #[must_use]
    pub fn has_count(actual: usize, expected: usize) -> AssertionResult {
        if actual == expected {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected count {expected}, got {actual}"))
        }
    }

    /// Assert strings are in ascending lexicographic order
    #[must_use]
    pub fn is_sorted<S: AsRef<str> + Debug>(items: &[S]) -> AssertionResult {
        match items
            .windows(2)
            .position(|w| w[0].as_ref() > w[1].as_ref())
        {
            None => AssertionResult::pass(),
            Some(i) => AssertionResult::fail(format!(
                "expected ascending order, but {:?} precedes {:?} in {items:?}",
                items[i].as_ref(),
                items[i + 1].as_ref()
            )),
        }
    }
}
