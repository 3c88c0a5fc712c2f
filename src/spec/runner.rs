use std::sync::Arc;
use std::time::Duration;

use crate::descriptor::descriptor_model::Capability;
use crate::descriptor::tree::{DescriptorNode, DescriptorTree, FieldShape};
use crate::driver::Driver;
use crate::driver::gesture::{Gesture, Velocity};
use crate::driver::snapshot::{ElementSnapshot, Vector};
use crate::lookup::scope::{ListScope, Scope};
use crate::path::key_path::PathSegment;
use crate::path::type_name::TypeName;
use crate::spec::error::SpecError;
use crate::spec::spec_model::{
    Accessor, AssertionSpec, Condition, TestResult, TestSpec, TestStep, parse_target,
};
use crate::testing::content;
use crate::testing::harness::Harness;
use crate::testing::wait::{Wait, WaitOptions};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TraceKind};

/// A target resolved against the descriptor catalog.
enum Handle<'t> {
    Node { scope: Scope, node: &'t DescriptorNode },
    List { scope: ListScope, item: &'t DescriptorNode },
}

/// Executes `TestSpec`s against a driver, resolving targets through a
/// descriptor catalog.
pub struct TestRunner<'t> {
    tree: &'t DescriptorTree,
    driver: Arc<dyn Driver>,
    options: WaitOptions,
    stop_on_failure: bool,
    trace: Option<Arc<TraceLogger>>,
}

impl<'t> TestRunner<'t> {
    pub fn new(tree: &'t DescriptorTree, driver: Arc<dyn Driver>) -> Self {
        TestRunner {
            tree,
            driver,
            options: WaitOptions::default(),
            stop_on_failure: false,
            trace: None,
        }
    }

    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    /// End a spec at the first failed step instead of running the rest.
    pub fn stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    pub fn with_trace(mut self, trace: Arc<TraceLogger>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Run a complete test spec.
    ///
    /// Assertion failures are collected; a step that cannot be executed
    /// (unknown target, unsupported property) stops the spec with an error.
    pub fn run(&self, spec: &TestSpec) -> TestResult {
        let mut harness = Harness::from_arc(self.driver.clone()).with_options(self.options);
        if let Some(trace) = &self.trace {
            harness = harness.with_trace(trace.clone());
        }

        let root = match self.root_of(spec) {
            Ok(root) => root,
            Err(e) => {
                return TestResult {
                    spec_name: spec.name.clone(),
                    passed: false,
                    steps_run: 0,
                    assertion_results: Vec::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        tracing::info!(spec = %spec.name, root = %root, "running spec");

        for (i, step) in spec.steps.iter().enumerate() {
            harness.set_step(Some(i));
            tracing::debug!(step = i, action = step.action(), element = step.target(), "step");
            if let Some(trace) = &self.trace {
                trace.log(
                    &TraceEvent::now(TraceKind::Step, step.target().unwrap_or_default())
                        .with_step(Some(i))
                        .with_detail(step.action()),
                );
            }

            if let Err(e) = self.execute_step(step, &root, &harness) {
                return TestResult {
                    spec_name: spec.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    assertion_results: harness.results(),
                    error: Some(format!("Step {} failed: {}", i, e)),
                };
            }

            if self.stop_on_failure && !harness.all_passed() {
                return TestResult {
                    spec_name: spec.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    assertion_results: harness.results(),
                    error: None,
                };
            }
        }

        let context = harness.context();
        TestResult {
            spec_name: spec.name.clone(),
            passed: context.all_passed(),
            steps_run: spec.steps.len(),
            assertion_results: context.assertion_results,
            error: None,
        }
    }

    fn root_of(&self, spec: &TestSpec) -> Result<TypeName, SpecError> {
        let root = match &spec.root {
            Some(name) => TypeName::parse(name),
            None => self.tree.root().cloned().ok_or(SpecError::MissingRoot)?,
        };
        self.tree.require(&root)?;
        Ok(root)
    }

    // ------------------------------------------------------------------------
    // Target resolution
    // ------------------------------------------------------------------------

    fn resolve(&self, root: &TypeName, target: &str) -> Result<Handle<'t>, SpecError> {
        let err = |reason: String| SpecError::Target {
            target: target.to_string(),
            reason,
        };

        let mut handle = Handle::Node {
            scope: Scope::root(root.clone()),
            node: self.tree.require(root)?,
        };

        for accessor in parse_target(target)? {
            handle = match (handle, accessor) {
                (Handle::Node { scope, node }, Accessor::Field(name)) => {
                    let field = node.field(&name).ok_or_else(|| {
                        err(format!("{} has no field '{}'", node.name, name))
                    })?;
                    let value = self.tree.require(&field.target)?;
                    let segment = PathSegment::new(name, node.name.clone());

                    match field.shape {
                        FieldShape::Single => Handle::Node {
                            scope: scope.field(segment, &value.name, value.kind),
                            node: value,
                        },
                        FieldShape::List => Handle::List {
                            scope: scope.list(segment, value.name.clone()),
                            item: value,
                        },
                    }
                }
                (Handle::List { scope, item }, Accessor::Index(i)) => Handle::Node {
                    scope: scope.at(i),
                    node: item,
                },
                (Handle::List { scope, item }, Accessor::Key(key)) => Handle::Node {
                    scope: scope.item(&key),
                    node: item,
                },
                (Handle::List { scope, .. }, Accessor::Field(name)) => {
                    return Err(err(format!(
                        "{} is a list; select an item before '.{}'",
                        scope.description(),
                        name
                    )));
                }
                (Handle::Node { scope, .. }, accessor) => {
                    return Err(err(format!(
                        "{} is not a list; cannot apply {}",
                        scope.description(),
                        accessor
                    )));
                }
            };
        }

        Ok(handle)
    }

    fn element(&self, root: &TypeName, target: &str) -> Result<(Scope, &'t DescriptorNode), SpecError> {
        match self.resolve(root, target)? {
            Handle::Node { scope, node } => Ok((scope, node)),
            Handle::List { scope, .. } => Err(SpecError::Target {
                target: target.to_string(),
                reason: format!("{} is a list, not an element", scope.description()),
            }),
        }
    }

    fn list(&self, root: &TypeName, target: &str) -> Result<ListScope, SpecError> {
        match self.resolve(root, target)? {
            Handle::List { scope, .. } => Ok(scope),
            Handle::Node { scope, .. } => Err(SpecError::Target {
                target: target.to_string(),
                reason: format!("{} is not a list", scope.description()),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------------

    fn execute_step(&self, step: &TestStep, root: &TypeName, harness: &Harness) -> Result<(), SpecError> {
        match step {
            TestStep::Tap { target } => self.gesture(root, target, harness, Gesture::tap(), None),
            TestStep::DoubleTap { target } => self.gesture(
                root,
                target,
                harness,
                Gesture::DoubleTap { at: Vector::CENTER },
                None,
            ),
            TestStep::LongPress { target } => self.gesture(
                root,
                target,
                harness,
                Gesture::long_press(Vector::CENTER),
                None,
            ),
            TestStep::TypeText { target, text } => self.gesture(
                root,
                target,
                harness,
                Gesture::type_text(text.clone()),
                Some((Capability::Editable, "typing")),
            ),
            TestStep::ClearText { target } => {
                let (scope, node) = self.element(root, target)?;
                require(target, node, Capability::Editable, "clearing")?;
                let current = harness.observe(scope.query(), content::editable_text);
                if let Some(current) = current.filter(|t| !t.is_empty()) {
                    harness.gesture(scope.query(), scope.description(), Gesture::clear(&current), None);
                }
                Ok(())
            }
            TestStep::Swipe { target, direction } => self.gesture(
                root,
                target,
                harness,
                Gesture::Swipe {
                    direction: *direction,
                    velocity: Velocity::Default,
                },
                Some((Capability::Swipeable, "swiping")),
            ),
            TestStep::Sleep { duration_ms } => {
                std::thread::sleep(Duration::from_millis(*duration_ms));
                Ok(())
            }
            TestStep::WaitFor {
                target,
                condition,
                timeout_secs,
                failing,
            } => {
                let timeout = timeout_secs
                    .map(|secs| Duration::try_from_secs_f64(secs).map_err(|_| SpecError::Timeout(secs)))
                    .transpose()?;
                let wait = Wait {
                    timeout,
                    failing: *failing,
                };
                self.wait_for(root, target, condition, wait, harness)
            }
            TestStep::Assert { assertions } => {
                for assertion in assertions {
                    self.evaluate(root, assertion, harness)?;
                }
                Ok(())
            }
        }
    }

    fn gesture(
        &self,
        root: &TypeName,
        target: &str,
        harness: &Harness,
        gesture: Gesture,
        capability: Option<(Capability, &'static str)>,
    ) -> Result<(), SpecError> {
        let (scope, node) = self.element(root, target)?;
        if let Some((capability, property)) = capability {
            require(target, node, capability, property)?;
        }
        harness.gesture(scope.query(), scope.description(), gesture, None);
        Ok(())
    }

    fn wait_for(
        &self,
        root: &TypeName,
        target: &str,
        condition: &Condition,
        wait: Wait,
        harness: &Harness,
    ) -> Result<(), SpecError> {
        let (scope, node) = self.element(root, target)?;
        let subject = format!("Element {}", scope.description());
        let query = scope.query();

        match condition {
            Condition::Exists => {
                harness.wait_for(query, &subject, "did not appear", |n| n.is_some(), &true, wait, None);
            }
            Condition::Absent => {
                harness.wait_for(query, &subject, "did not disappear", |n| n.is_some(), &false, wait, None);
            }
            Condition::Hittable | Condition::Unhittable => {
                let expected = matches!(condition, Condition::Hittable);
                let what = if expected { "was not hittable" } else { "was not unhittable" };
                harness.wait_for(query, &subject, what, |n| n.is_some_and(|n| n.hittable), &expected, wait, None);
            }
            Condition::Text { expected } => {
                let projection = text_projection(target, node)?;
                let what = format!("text was not equal to {}", expected);
                harness.wait_for(query, &subject, &what, projection, &Some(expected.clone()), wait, None);
            }
            Condition::Selected | Condition::Deselected => {
                require(target, node, Capability::Selectable, "selection")?;
                let expected = matches!(condition, Condition::Selected);
                let what = if expected { "was not selected" } else { "was not deselected" };
                harness.wait_for(query, &subject, what, content::selected, &Some(expected), wait, None);
            }
            Condition::Enabled | Condition::Disabled => {
                require(target, node, Capability::Disableable, "enabled state")?;
                let expected = matches!(condition, Condition::Enabled);
                let what = if expected { "was not enabled" } else { "was not disabled" };
                harness.wait_for(query, &subject, what, content::enabled, &Some(expected), wait, None);
            }
            Condition::Focused | Condition::Unfocused => {
                require(target, node, Capability::Editable, "focus")?;
                let expected = matches!(condition, Condition::Focused);
                let what = if expected { "was not focused" } else { "was not unfocused" };
                harness.wait_for(query, &subject, what, content::focused, &expected, wait, None);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------------

    fn evaluate(&self, root: &TypeName, spec: &AssertionSpec, harness: &Harness) -> Result<(), SpecError> {
        let target = spec.target();

        match spec {
            AssertionSpec::Count { expected, .. } => {
                let (description, count) = self.count(root, spec, harness)?;
                harness.check(description, expected, &count, None);
                return Ok(());
            }
            AssertionSpec::Empty { expected, .. } => {
                let (description, count) = self.count(root, spec, harness)?;
                harness.check(description, expected, &(count == 0), None);
                return Ok(());
            }
            _ => {}
        }

        let (scope, node) = self.element(root, target)?;
        let description = format!("{} {}", scope.description(), spec.kind());
        let query = scope.query();

        match spec {
            AssertionSpec::Exists { expected, .. } => {
                let actual = harness.observe(query, |n| n.is_some());
                harness.check(description, expected, &actual, None);
            }
            AssertionSpec::Hittable { expected, .. } => {
                let actual = harness.observe(query, |n| n.is_some_and(|n| n.hittable));
                harness.check(description, expected, &actual, None);
            }
            AssertionSpec::Text { expected, .. } => {
                let projection = text_projection(target, node)?;
                harness.check(description, expected, &harness.observe(query, projection), None);
            }
            AssertionSpec::Image { expected, .. } => {
                require(target, node, Capability::Image, "image")?;
                harness.check(description, expected, &harness.observe(query, content::image), None);
            }
            AssertionSpec::Placeholder { expected, .. } => {
                require(target, node, Capability::Editable, "placeholder")?;
                harness.check(description, expected, &harness.observe(query, content::placeholder), None);
            }
            AssertionSpec::Focused { expected, .. } => {
                require(target, node, Capability::Editable, "focus")?;
                let actual = harness.observe(query, content::focused);
                harness.check(description, expected, &actual, None);
            }
            AssertionSpec::Enabled { expected, .. } => {
                require(target, node, Capability::Disableable, "enabled state")?;
                let actual = harness.observe(query, content::enabled);
                harness.check(description, &Some(*expected), &actual, None);
            }
            AssertionSpec::Selected { expected, .. } => {
                require(target, node, Capability::Selectable, "selection")?;
                let actual = harness.observe(query, content::selected);
                harness.check(description, &Some(*expected), &actual, None);
            }
            AssertionSpec::Count { .. } | AssertionSpec::Empty { .. } => {}
        }
        Ok(())
    }

    fn count(&self, root: &TypeName, spec: &AssertionSpec, harness: &Harness) -> Result<(String, usize), SpecError> {
        let list = self.list(root, spec.target())?;
        let count = harness.snapshot().map(|t| list.count(&t)).unwrap_or(0);
        Ok((format!("{} {}", list.description(), spec.kind()), count))
    }
}

fn require(
    target: &str,
    node: &DescriptorNode,
    capability: Capability,
    property: &'static str,
) -> Result<(), SpecError> {
    if node.supports(capability) {
        return Ok(());
    }
    Err(SpecError::Unsupported {
        target: target.to_string(),
        type_name: node.name.display_name(),
        property,
    })
}

/// Text of a static-text node, or the value of an editable one.
fn text_projection(
    target: &str,
    node: &DescriptorNode,
) -> Result<fn(Option<&ElementSnapshot>) -> Option<String>, SpecError> {
    if node.supports(Capability::Text) {
        Ok(content::text)
    } else if node.supports(Capability::Editable) {
        Ok(content::editable_text)
    } else {
        Err(SpecError::Unsupported {
            target: target.to_string(),
            type_name: node.name.display_name(),
            property: "text",
        })
    }
}
