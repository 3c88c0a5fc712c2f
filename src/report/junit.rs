use crate::report::report_model::TestSuiteReport;
use crate::testing::context::AssertionResult;

// ============================================================================
// JUnit XML reporter
// ============================================================================

const CLASSNAME: &str = "screen-keys";

/// Generate a JUnit XML report for CI systems.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="..." tests="2" failures="1" time="1.234">
///   <testcase name="Listing shows rows" classname="screen-keys" />
///   <testcase name="Row selection" classname="screen-keys">
///     <failure message="1 check(s) failed" type="AssertionFailure">
///       Step 1: Listing.items[1] selected: expected Some(true), got Some(false)
///     </failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &TestSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.test_results {
        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"{}\" />\n",
                escape_xml(&result.spec_name),
                CLASSNAME
            ));
            continue;
        }

        let mut body_parts: Vec<String> = result
            .assertion_results
            .iter()
            .filter(|ar| !ar.passed)
            .map(failure_line)
            .collect();
        let failure_count = body_parts.len();

        if let Some(e) = &result.error {
            body_parts.push(format!("Error: {}", e));
        }

        let failure_message = if failure_count > 0 {
            format!("{} check(s) failed", failure_count)
        } else {
            "execution error".to_string()
        };

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"{class}\">\n    <failure message=\"{message}\" type=\"AssertionFailure\">{body}</failure>\n  </testcase>\n",
            name = escape_xml(&result.spec_name),
            class = CLASSNAME,
            message = escape_xml(&failure_message),
            body = escape_xml(&body_parts.join("\n")),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

fn failure_line(ar: &AssertionResult) -> String {
    let msg = ar.message.as_deref().unwrap_or("check failed");
    let mut line = match ar.step_index {
        Some(step) => format!("Step {}: {}: {}", step, ar.description, msg),
        None => format!("{}: {}", ar.description, msg),
    };
    if let Some(location) = &ar.location {
        line.push_str(&format!(" at {}", location));
    }
    line
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
