use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Where an assertion was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        SourceLocation {
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Outcome of one assertion, wait or gesture check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Step of a declarative spec this belongs to (0-indexed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// What was checked, e.g. `Listing.items[1].title text`
    pub description: String,

    pub passed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,

    /// Human-readable failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssertionResult {
    pub fn pass(description: impl Into<String>) -> Self {
        AssertionResult {
            step_index: None,
            location: None,
            description: description.into(),
            passed: true,
            expected: None,
            actual: None,
            message: None,
        }
    }

    pub fn fail(description: impl Into<String>, message: impl Into<String>) -> Self {
        AssertionResult {
            passed: false,
            message: Some(message.into()),
            ..AssertionResult::pass(description)
        }
    }

    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {}", marker, self.description)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

/// Tracks the results collected while a test runs.
#[derive(Debug, Clone, Default)]
pub struct TestContext {
    /// Current step of a declarative spec, if one is running
    pub current_step: Option<usize>,

    /// All assertion results collected during execution
    pub assertion_results: Vec<AssertionResult>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result, stamping it with the current step.
    pub fn record(&mut self, mut result: AssertionResult) {
        if result.step_index.is_none() {
            result.step_index = self.current_step;
        }
        self.assertion_results.push(result);
    }

    pub fn record_assertions(&mut self, results: Vec<AssertionResult>) {
        for result in results {
            self.record(result);
        }
    }

    /// Check if all recorded assertions passed.
    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }

    pub fn total_count(&self) -> usize {
        self.assertion_results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.assertion_results.iter().filter(|r| !r.passed)
    }

    /// Panic with a summary of every recorded failure.
    #[track_caller]
    pub fn assert_all_passed(&self) {
        if self.all_passed() {
            return;
        }
        let lines: Vec<String> = self.failures().map(|r| format!("  {}", r)).collect();
        panic!(
            "{} of {} checks failed:\n{}",
            self.fail_count(),
            self.total_count(),
            lines.join("\n")
        );
    }
}
