use crate::report::report_model::TestSuiteReport;
use crate::testing::context::AssertionResult;

// ============================================================================
// Console reporter
// ============================================================================

/// Format a test suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Test Suite: screens ===
///
/// ✓ PASS  Listing shows rows (2 steps, 3 checks)
/// ✗ FAIL  Row selection (3 steps, 2 checks)
///     [FAIL] Step 2: Listing.items[1] selected (expected Some(true), got Some(false))
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &TestSuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Test Suite: {} ===\n\n", report.suite_name));

    for result in &report.test_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} checks)\n",
            marker,
            result.spec_name,
            result.steps_run,
            result.assertion_results.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            out.push_str(&format!("    [FAIL] {}\n", format_failure(ar)));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}

/// `Step N: description (detail)`, the step prefix only for spec steps.
pub fn format_failure(ar: &AssertionResult) -> String {
    let detail = ar.message.as_deref().unwrap_or("check failed");
    match ar.step_index {
        Some(step) => format!("Step {}: {} ({})", step, ar.description, detail),
        None => format!("{} ({})", ar.description, detail),
    }
}
