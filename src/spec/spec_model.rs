use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::gesture::SwipeDirection;
use crate::spec::error::SpecError;
use crate::testing::context::AssertionResult;

/// A declarative test: steps addressed by accessor chains from a root
/// descriptor type, e.g. `content.users[0].title` or `items["Gamma"]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestSpec {
    /// Human-readable name for this test
    pub name: String,

    /// Root descriptor type. Falls back to the catalog's root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Ordered list of test steps to execute
    pub steps: Vec<TestStep>,
}

/// A single step in a test spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    Tap {
        target: String,
    },

    DoubleTap {
        target: String,
    },

    LongPress {
        target: String,
    },

    /// Type into an editable element
    TypeText {
        target: String,
        text: String,
    },

    /// Delete the current text of an editable element
    ClearText {
        target: String,
    },

    Swipe {
        target: String,
        direction: SwipeDirection,
    },

    /// Sleep without polling
    Sleep {
        duration_ms: u64,
    },

    /// Poll until a condition holds
    WaitFor {
        target: String,
        condition: Condition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<f64>,
        #[serde(default = "default_true")]
        failing: bool,
    },

    /// Check the current UI state
    Assert {
        assertions: Vec<AssertionSpec>,
    },
}

impl TestStep {
    /// The `action` tag, as written in YAML.
    pub fn action(&self) -> &'static str {
        match self {
            TestStep::Tap { .. } => "tap",
            TestStep::DoubleTap { .. } => "double_tap",
            TestStep::LongPress { .. } => "long_press",
            TestStep::TypeText { .. } => "type_text",
            TestStep::ClearText { .. } => "clear_text",
            TestStep::Swipe { .. } => "swipe",
            TestStep::Sleep { .. } => "sleep",
            TestStep::WaitFor { .. } => "wait_for",
            TestStep::Assert { .. } => "assert",
        }
    }

    /// Target accessor chain; `None` for steps without one.
    pub fn target(&self) -> Option<&str> {
        match self {
            TestStep::Tap { target }
            | TestStep::DoubleTap { target }
            | TestStep::LongPress { target }
            | TestStep::TypeText { target, .. }
            | TestStep::ClearText { target }
            | TestStep::Swipe { target, .. }
            | TestStep::WaitFor { target, .. } => Some(target),
            TestStep::Sleep { .. } | TestStep::Assert { .. } => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// State a `wait_for` step polls for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Condition {
    Exists,
    Absent,
    Hittable,
    Unhittable,
    Text { expected: String },
    Selected,
    Deselected,
    Enabled,
    Disabled,
    Focused,
    Unfocused,
}

/// A single check against the live UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    Exists {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    /// Static text label, or the value of an editable element
    Text {
        target: String,
        expected: Option<String>,
    },

    /// Image label
    Image {
        target: String,
        expected: Option<String>,
    },

    Placeholder {
        target: String,
        expected: Option<String>,
    },

    Focused {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    Enabled {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    Selected {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    Hittable {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    /// Number of items of a list target
    Count {
        target: String,
        expected: usize,
    },

    Empty {
        target: String,
        #[serde(default = "default_true")]
        expected: bool,
    },
}

impl AssertionSpec {
    pub fn target(&self) -> &str {
        match self {
            AssertionSpec::Exists { target, .. }
            | AssertionSpec::Text { target, .. }
            | AssertionSpec::Image { target, .. }
            | AssertionSpec::Placeholder { target, .. }
            | AssertionSpec::Focused { target, .. }
            | AssertionSpec::Enabled { target, .. }
            | AssertionSpec::Selected { target, .. }
            | AssertionSpec::Hittable { target, .. }
            | AssertionSpec::Count { target, .. }
            | AssertionSpec::Empty { target, .. } => target,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AssertionSpec::Exists { .. } => "exists",
            AssertionSpec::Text { .. } => "text",
            AssertionSpec::Image { .. } => "image",
            AssertionSpec::Placeholder { .. } => "placeholder",
            AssertionSpec::Focused { .. } => "focused",
            AssertionSpec::Enabled { .. } => "enabled",
            AssertionSpec::Selected { .. } => "selected",
            AssertionSpec::Hittable { .. } => "hittable",
            AssertionSpec::Count { .. } => "count",
            AssertionSpec::Empty { .. } => "empty",
        }
    }
}

/// Result of running a complete test spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Name of the test spec that was run
    pub spec_name: String,

    /// Whether all steps and assertions passed
    pub passed: bool,

    /// Number of steps that were executed
    pub steps_run: usize,

    /// All assertion results collected during the run
    pub assertion_results: Vec<AssertionResult>,

    /// Error message if the test failed due to an error (not assertion failure)
    pub error: Option<String>,
}

// ============================================================================
// Target accessors
// ============================================================================

/// One step of an accessor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Field(String),
    Index(usize),
    Key(String),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.write_str(name),
            Accessor::Index(i) => write!(f, "[{}]", i),
            Accessor::Key(k) => write!(f, "[\"{}\"]", k),
        }
    }
}

/// Parse `content.users[0].title` or `items["Gamma"]` into accessors. The empty
/// string addresses the root itself.
pub fn parse_target(target: &str) -> Result<Vec<Accessor>, SpecError> {
    let err = |reason: &str| SpecError::Target {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    let mut out = Vec::new();
    let mut chars = target.trim().chars().peekable();
    let mut expect_field = true;

    while let Some(&c) = chars.peek() {
        match c {
            '[' => {
                chars.next();
                if expect_field {
                    return Err(err("subscript without a list field"));
                }
                if chars.peek() == Some(&'"') {
                    chars.next();
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some(ch) => key.push(ch),
                            None => return Err(err("unterminated key")),
                        }
                    }
                    if chars.next() != Some(']') {
                        return Err(err("expected ']' after key"));
                    }
                    out.push(Accessor::Key(key));
                } else {
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(ch) if ch.is_ascii_digit() => digits.push(ch),
                            Some(_) => return Err(err("index must be a non-negative integer")),
                            None => return Err(err("unterminated index")),
                        }
                    }
                    let index = digits.parse().map_err(|_| err("empty index"))?;
                    out.push(Accessor::Index(index));
                }
                expect_field = false;
            }
            '.' => {
                chars.next();
                if expect_field {
                    return Err(err("empty field name"));
                }
                expect_field = true;
            }
            _ => {
                if !expect_field {
                    return Err(err("expected '.' or '['"));
                }
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '.' || ch == '[' {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
                    return Err(err("invalid field name"));
                }
                out.push(Accessor::Field(name));
                expect_field = false;
            }
        }
    }

    if expect_field && !out.is_empty() {
        return Err(err("trailing '.'"));
    }
    Ok(out)
}
