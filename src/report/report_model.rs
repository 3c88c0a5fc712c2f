use serde::{Deserialize, Serialize};

use crate::spec::spec_model::TestResult;
use crate::testing::context::AssertionResult;

/// Outcome of a whole `run`: one [`TestResult`] per spec plus totals, as
/// rendered by the console and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteReport {
    pub suite_name: String,

    /// Number of specs
    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Wall-clock time of the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub test_results: Vec<TestResult>,
}

impl TestSuiteReport {
    pub fn from_results(suite_name: &str, test_results: Vec<TestResult>) -> Self {
        let passed = test_results.iter().filter(|r| r.passed).count();
        TestSuiteReport {
            suite_name: suite_name.to_string(),
            total: test_results.len(),
            passed,
            failed: test_results.len() - passed,
            duration_ms: None,
            test_results,
        }
    }

    pub fn with_duration(self, duration_ms: u128) -> Self {
        TestSuiteReport {
            duration_ms: Some(duration_ms),
            ..self
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed checks with the name of the spec that recorded them.
    pub fn failed_checks(&self) -> impl Iterator<Item = (&str, &AssertionResult)> {
        self.test_results.iter().flat_map(|r| {
            r.assertion_results
                .iter()
                .filter(|ar| !ar.passed)
                .map(move |ar| (r.spec_name.as_str(), ar))
        })
    }

    pub fn check_count(&self) -> usize {
        self.test_results.iter().map(|r| r.assertion_results.len()).sum()
    }
}
