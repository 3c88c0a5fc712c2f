mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{interactive, listing_tree};
use screen_keys::descriptor::DescriptorTree;
use screen_keys::driver::{Driver, MemoryDriver};
use screen_keys::spec::runner::TestRunner;
use screen_keys::spec::spec_model::{
    Accessor, AssertionSpec, Condition, TestSpec, TestStep, parse_target,
};
use screen_keys::testing::WaitOptions;
use screen_keys::trace::logger::TraceLogger;

const CATALOG: &str = r#"
root: Listing
types:
  - name: Listing
    kind: screen
    capabilities: [swipeable]
    fields:
      - { name: items, type: Row, shape: list }
      - { name: header, type: Header }
      - { name: search, type: SearchBox }
  - name: Row
    kind: view
    capabilities: [selectable, disableable]
    fields:
      - { name: title, type: StaticText }
      - { name: icon, type: StaticImage }
  - name: Header
    kind: group
    fields:
      - { name: caption, type: StaticText }
  - name: SearchBox
    kind: view
    capabilities: [editable]
"#;

// ============================================================================
// Helpers
// ============================================================================

fn catalog() -> DescriptorTree {
    DescriptorTree::from_yaml(CATALOG).expect("catalog")
}

fn driver() -> Arc<dyn Driver> {
    Arc::new(MemoryDriver::new(listing_tree()).on_gesture(interactive))
}

fn fast() -> WaitOptions {
    WaitOptions {
        timeout: Duration::from_secs(2),
        poll_interval: Duration::from_millis(10),
    }
}

fn spec(yaml: &str) -> TestSpec {
    serde_yaml::from_str(yaml).expect("valid spec")
}

// ============================================================================
// TestSpec parsing
// ============================================================================

#[test]
fn spec_yaml_parses_steps_and_defaults() {
    let spec = spec(
        r#"
name: Listing shows rows
steps:
  - action: tap
    target: items[1]
  - action: wait_for
    target: items[1]
    condition: { state: selected }
  - action: assert
    assertions:
      - { type: count, target: items, expected: 3 }
      - { type: exists, target: search }
      - { type: text, target: "items[0].title", expected: Alpha }
"#,
    );

    assert_eq!(spec.name, "Listing shows rows");
    assert!(spec.root.is_none());
    assert_eq!(spec.steps.len(), 3);
    assert_eq!(
        spec.steps[1],
        TestStep::WaitFor {
            target: "items[1]".into(),
            condition: Condition::Selected,
            timeout_secs: None,
            failing: true,
        }
    );
    match &spec.steps[2] {
        TestStep::Assert { assertions } => {
            assert_eq!(assertions[1], AssertionSpec::Exists { target: "search".into(), expected: true });
            assert_eq!(assertions[2].kind(), "text");
            assert_eq!(assertions[2].target(), "items[0].title");
        }
        other => panic!("expected assert step, got {:?}", other),
    }
}

#[test]
fn spec_yaml_roundtrip() {
    let original = TestSpec {
        name: "Search".into(),
        root: Some("Listing".into()),
        steps: vec![
            TestStep::TypeText {
                target: "search".into(),
                text: "kiwi".into(),
            },
            TestStep::Sleep { duration_ms: 10 },
            TestStep::WaitFor {
                target: "search".into(),
                condition: Condition::Text { expected: "kiwi".into() },
                timeout_secs: Some(1.5),
                failing: false,
            },
        ],
    };

    let yaml = serde_yaml::to_string(&original).expect("serialize");
    let back: TestSpec = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, original);
}

// ============================================================================
// Target parsing
// ============================================================================

#[test]
fn parse_target_accepts_fields_indices_and_keys() {
    assert_eq!(
        parse_target("content.users[0].title").expect("valid"),
        vec![
            Accessor::Field("content".into()),
            Accessor::Field("users".into()),
            Accessor::Index(0),
            Accessor::Field("title".into()),
        ]
    );
    assert_eq!(
        parse_target(r#"items["Gamma Ray"]"#).expect("valid"),
        vec![Accessor::Field("items".into()), Accessor::Key("Gamma Ray".into())]
    );
    assert!(parse_target("").expect("root").is_empty());
}

#[test]
fn parse_target_rejects_malformed_chains() {
    for bad in [".items", "items.", "[0]", "items.[0]", "items[x]", "items[]", "items[\"open", "items[0", "a b", "items[0]title"] {
        assert!(parse_target(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn accessor_display_matches_syntax() {
    let rendered: Vec<String> = parse_target(r#"items["Gamma"].title"#)
        .expect("valid")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered, ["items", "[\"Gamma\"]", "title"]);
}

// ============================================================================
// Runner: passing specs
// ============================================================================

#[test]
fn runner_checks_listing_state() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver()).with_options(fast());

    let result = runner.run(&spec(
        r#"
name: Listing state
steps:
  - action: assert
    assertions:
      - { type: count, target: items, expected: 3 }
      - { type: empty, target: items, expected: false }
      - { type: text, target: "items[1].title", expected: Beta }
      - { type: text, target: 'items["Gamma"].title', expected: Gamma }
      - { type: image, target: "items[0].icon", expected: Alpha-icon }
      - { type: exists, target: header.caption }
      - { type: exists, target: "items[3]", expected: false }
      - { type: text, target: "items[3].title", expected: null }
      - { type: selected, target: "items[0]", expected: false }
      - { type: enabled, target: "items[0]" }
      - { type: placeholder, target: search, expected: Search }
      - { type: focused, target: search, expected: false }
      - { type: hittable, target: search }
"#,
    ));

    assert!(result.passed, "{:?}", result.assertion_results);
    assert!(result.error.is_none());
    assert_eq!(result.steps_run, 1);
    assert_eq!(result.assertion_results.len(), 13);
    assert_eq!(result.assertion_results[0].description, "Listing.items count");
    assert_eq!(result.assertion_results[0].step_index, Some(0));
}

#[test]
fn runner_drives_gestures_and_waits() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver()).with_options(fast());

    let result = runner.run(&spec(
        r#"
name: Select and search
steps:
  - action: tap
    target: "items[1]"
  - action: wait_for
    target: "items[1]"
    condition: { state: selected }
  - action: type_text
    target: search
    text: kiwi
  - action: wait_for
    target: search
    condition: { state: text, expected: kiwi }
    timeout_secs: 1
  - action: clear_text
    target: search
  - action: swipe
    target: ""
    direction: up
  - action: double_tap
    target: "items[0]"
  - action: long_press
    target: "items[0]"
  - action: assert
    assertions:
      - { type: text, target: search, expected: "" }
      - { type: selected, target: "items[0]", expected: false }
"#,
    ));

    assert!(result.passed, "{:?} {:?}", result.error, result.assertion_results);
    assert_eq!(result.steps_run, 9);
}

#[test]
fn non_failing_wait_passes_on_timeout() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver()).with_options(fast());

    let result = runner.run(&spec(
        r#"
name: Optional banner
steps:
  - action: wait_for
    target: "items[5]"
    condition: { state: exists }
    timeout_secs: 0.05
    failing: false
"#,
    ));
    assert!(result.passed);
    assert!(result.assertion_results.is_empty());
}

// ============================================================================
// Runner: failures
// ============================================================================

#[test]
fn failed_checks_are_collected_with_step_index() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver()).with_options(fast());

    let result = runner.run(&spec(
        r#"
name: Wrong expectations
steps:
  - action: assert
    assertions:
      - { type: count, target: items, expected: 3 }
  - action: assert
    assertions:
      - { type: count, target: items, expected: 4 }
      - { type: text, target: "items[0].title", expected: Zeta }
  - action: wait_for
    target: "items[9]"
    condition: { state: exists }
    timeout_secs: 0.05
"#,
    ));

    assert!(!result.passed);
    assert!(result.error.is_none());
    assert_eq!(result.steps_run, 3);

    let failures: Vec<_> = result.assertion_results.iter().filter(|r| !r.passed).collect();
    assert_eq!(failures.len(), 3);
    assert_eq!(failures[0].step_index, Some(1));
    assert_eq!(failures[1].description, "Listing.items[0].title text");
    assert_eq!(failures[2].step_index, Some(2));
    assert_eq!(
        failures[2].message.as_deref(),
        Some("Element Listing.items[9] did not appear within 0.05 seconds")
    );
}

#[test]
fn stop_on_failure_ends_spec_early() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver())
        .with_options(fast())
        .stop_on_failure(true);

    let result = runner.run(&spec(
        r#"
name: Stops
steps:
  - action: assert
    assertions:
      - { type: count, target: items, expected: 0 }
  - action: tap
    target: "items[0]"
"#,
    ));
    assert!(!result.passed);
    assert_eq!(result.steps_run, 1);
    assert!(result.error.is_none());
}

#[test]
fn unknown_field_is_a_step_error() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver());

    let result = runner.run(&spec(
        r#"
name: Typo
steps:
  - action: sleep
    duration_ms: 1
  - action: tap
    target: "items[0].nope"
"#,
    ));
    assert!(!result.passed);
    assert_eq!(result.steps_run, 2);
    let error = result.error.expect("step error");
    assert!(error.starts_with("Step 1 failed"), "{error}");
    assert!(error.contains("Row has no field 'nope'"), "{error}");
}

#[test]
fn negative_wait_timeout_is_a_step_error() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver()).with_options(fast());

    let result = runner.run(&spec(
        r#"
name: Bad timeout
steps:
  - action: wait_for
    target: search
    condition: { state: exists }
    timeout_secs: -1
"#,
    ));
    assert!(!result.passed);
    assert_eq!(result.steps_run, 1);
    let error = result.error.expect("step error");
    assert_eq!(error, "Step 0 failed: invalid timeout: -1 seconds");
}

#[test]
fn capability_mismatch_is_a_step_error() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver());

    let typing = runner.run(&spec(
        "name: t\nsteps:\n  - { action: type_text, target: \"items[0]\", text: x }\n",
    ));
    let error = typing.error.expect("error");
    assert!(error.contains("(Row) does not support typing"), "{error}");

    let text = runner.run(&spec(
        "name: t\nsteps:\n  - action: assert\n    assertions:\n      - { type: text, target: \"items[0]\", expected: x }\n",
    ));
    assert!(text.error.expect("error").contains("does not support text"));
}

#[test]
fn list_and_element_targets_are_not_interchangeable() {
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver());

    let list_as_element = runner.run(&spec("name: t\nsteps:\n  - { action: tap, target: items }\n"));
    assert!(list_as_element.error.expect("error").contains("is a list"));

    let element_as_list = runner.run(&spec(
        "name: t\nsteps:\n  - action: assert\n    assertions:\n      - { type: count, target: search, expected: 1 }\n",
    ));
    assert!(element_as_list.error.expect("error").contains("is not a list"));

    let field_on_list = runner.run(&spec("name: t\nsteps:\n  - { action: tap, target: items.title }\n"));
    assert!(field_on_list.error.expect("error").contains("select an item"));

    let index_on_element = runner.run(&spec("name: t\nsteps:\n  - { action: tap, target: \"search[0]\" }\n"));
    assert!(index_on_element.error.expect("error").contains("is not a list"));
}

#[test]
fn missing_root_is_reported() {
    let tree = DescriptorTree::from_yaml("types:\n  - { name: Lonely, kind: screen }\n").expect("catalog");
    let runner = TestRunner::new(&tree, driver());

    let result = runner.run(&spec("name: t\nsteps: []\n"));
    assert!(!result.passed);
    assert_eq!(result.steps_run, 0);
    assert!(result.error.expect("error").contains("no root"));

    let explicit = runner.run(&spec("name: t\nroot: Lonely\nsteps: []\n"));
    assert!(explicit.passed);

    let unknown = runner.run(&spec("name: t\nroot: Ghost\nsteps: []\n"));
    assert!(unknown.error.expect("error").contains("unknown descriptor type 'Ghost'"));
}

// ============================================================================
// Trace
// ============================================================================

#[test]
fn runner_traces_each_step() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("run.jsonl");
    let tree = catalog();
    let runner = TestRunner::new(&tree, driver())
        .with_options(fast())
        .with_trace(Arc::new(TraceLogger::new(&path)));

    let result = runner.run(&spec(
        "name: t\nsteps:\n  - { action: tap, target: \"items[0]\" }\n  - { action: sleep, duration_ms: 1 }\n",
    ));
    assert!(result.passed);

    let steps: Vec<serde_json::Value> = std::fs::read_to_string(&path)
        .expect("trace")
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).expect("json"))
        .filter(|e| e["kind"] == "step")
        .collect();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["target"], "items[0]");
    assert_eq!(steps[0]["detail"], "tap");
    assert_eq!(steps[0]["step"], 0);
    assert_eq!(steps[1]["target"], "");
    assert_eq!(steps[1]["detail"], "sleep");
}

#[test]
fn step_action_and_target_accessors() {
    let spec = spec(
        "name: t\nsteps:\n  - { action: clear_text, target: search }\n  - { action: assert, assertions: [] }\n",
    );
    assert_eq!(spec.steps[0].action(), "clear_text");
    assert_eq!(spec.steps[0].target(), Some("search"));
    assert_eq!(spec.steps[1].action(), "assert");
    assert_eq!(spec.steps[1].target(), None);
}
