use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::descriptor::descriptor_model::Descriptor;
use crate::driver::gesture::Gesture;
use crate::driver::snapshot::ElementSnapshot;
use crate::driver::{Driver, ElementTarget};
use crate::lookup::element::Element;
use crate::lookup::query::ElementQuery;
use crate::lookup::scope::Scope;
use crate::testing::context::{AssertionResult, SourceLocation, TestContext};
use crate::testing::wait::{Wait, WaitOptions, format_secs, poll_until};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TraceKind};

/// Shared state behind every element handle of one test: the driver, the
/// failure recorder and the wait defaults.
///
/// Cloning is cheap; clones record into the same [`TestContext`].
#[derive(Clone)]
pub struct Harness {
    driver: Arc<dyn Driver>,
    context: Arc<Mutex<TestContext>>,
    options: WaitOptions,
    fail_fast: bool,
    trace: Option<Arc<TraceLogger>>,
}

impl Harness {
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self::from_arc(Arc::new(driver))
    }

    pub fn from_arc(driver: Arc<dyn Driver>) -> Self {
        Harness {
            driver,
            context: Arc::new(Mutex::new(TestContext::new())),
            options: WaitOptions::default(),
            fail_fast: false,
            trace: None,
        }
    }

    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    /// Panic at the first recorded failure instead of collecting.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_trace(mut self, logger: impl Into<Arc<TraceLogger>>) -> Self {
        self.trace = Some(logger.into());
        self
    }

    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Typed handle for screen `S`, bound to the application element.
    pub fn screen<S: Descriptor>(&self) -> Element<S> {
        Element::new(self.clone(), Scope::root(S::type_name()))
    }

    /// Typed handle for a view declared as its own root, bound to the
    /// application element.
    pub fn view<V: Descriptor>(&self) -> Element<V> {
        Element::new(self.clone(), Scope::root(V::type_name()))
    }

    // ------------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------------

    pub fn context(&self) -> TestContext {
        self.lock().clone()
    }

    pub fn results(&self) -> Vec<AssertionResult> {
        self.lock().assertion_results.clone()
    }

    pub fn all_passed(&self) -> bool {
        self.lock().all_passed()
    }

    #[track_caller]
    pub fn assert_all_passed(&self) {
        self.context().assert_all_passed();
    }

    pub fn set_step(&self, step: Option<usize>) {
        self.lock().current_step = step;
    }

    pub fn record(&self, result: AssertionResult) {
        if !result.passed {
            tracing::warn!(check = %result.description, message = ?result.message, "check failed");
        }
        let step = {
            let mut ctx = self.lock();
            ctx.record(result.clone());
            ctx.current_step
        };
        if let Some(trace) = &self.trace {
            trace.log(&TraceEvent::assertion(&result).with_step(step));
        }
        if self.fail_fast && !result.passed {
            panic!("{}", result);
        }
    }

    fn lock(&self) -> MutexGuard<'_, TestContext> {
        self.context
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// A fresh snapshot, or `None` when the driver failed.
    pub fn snapshot(&self) -> Option<ElementSnapshot> {
        match self.driver.snapshot() {
            Ok(tree) => Some(tree),
            Err(e) => {
                tracing::warn!(error = %e, "snapshot failed, treating element as absent");
                None
            }
        }
    }

    /// Resolve `query` against a fresh snapshot and project the element
    /// (`None` when it does not exist).
    pub fn observe<T>(&self, query: &ElementQuery, projection: impl FnOnce(Option<&ElementSnapshot>) -> T) -> T {
        let tree = self.snapshot();
        let node = tree
            .as_ref()
            .and_then(|t| query.resolve(t))
            .map(|(_, node)| node);
        projection(node)
    }

    pub fn target(&self, query: &ElementQuery) -> Option<ElementTarget> {
        let tree = self.snapshot()?;
        let (index_path, node) = query.resolve(&tree)?;
        Some(ElementTarget {
            index_path,
            identifier: node.identifier.clone(),
            frame: node.frame,
        })
    }

    // ------------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------------

    /// Record an equality check of `actual` against `expected`.
    pub fn check<T: PartialEq + Debug>(
        &self,
        description: String,
        expected: &T,
        actual: &T,
        location: Option<SourceLocation>,
    ) {
        let result = if expected == actual {
            AssertionResult::pass(description)
        } else {
            let message = format!("expected {:?}, got {:?}", expected, actual);
            AssertionResult::fail(description, message)
        };
        self.record(
            result
                .with_values(format!("{:?}", expected), format!("{:?}", actual))
                .at(location),
        );
    }

    /// Record a boolean condition.
    pub fn check_that(&self, description: String, condition: bool, location: Option<SourceLocation>) {
        let result = if condition {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, "condition was false")
        };
        self.record(result.at(location));
    }

    /// Poll until the projection of the element equals `expected`. On timeout a
    /// failure reading "{subject} {what} within N seconds" is recorded unless
    /// the wait is non-failing. Returns whether the value was reached.
    pub fn wait_for<T, F>(
        &self,
        query: &ElementQuery,
        subject: &str,
        what: &str,
        projection: F,
        expected: &T,
        wait: Wait,
        location: Option<SourceLocation>,
    ) -> bool
    where
        T: PartialEq + Debug,
        F: Fn(Option<&ElementSnapshot>) -> T,
    {
        let timeout = wait.resolve(&self.options);
        let start = Instant::now();
        let mut last = None;

        let reached = poll_until(timeout, self.options.poll_interval, || {
            let actual = self.observe(query, &projection);
            let done = actual == *expected;
            last = Some(actual);
            done
        });

        tracing::debug!(subject, what, reached, elapsed_ms = start.elapsed().as_millis() as u64, "wait finished");
        if let Some(trace) = &self.trace {
            trace.log(
                &TraceEvent::now(TraceKind::Wait, subject)
                    .with_passed(reached)
                    .with_detail(what)
                    .with_elapsed(start.elapsed().as_millis()),
            );
        }

        if !reached && wait.failing {
            let message = format!("{} {} within {} seconds", subject, what, format_secs(timeout));
            let actual = last.map(|v| format!("{:?}", v)).unwrap_or_default();
            self.record(
                AssertionResult::fail(format!("{} {}", subject, what), message)
                    .with_values(format!("{:?}", expected), actual)
                    .at(location),
            );
        }
        reached
    }

    /// Dispatch `gesture` to the element, recording a failure when it is absent
    /// or the driver rejects it.
    pub fn gesture(&self, query: &ElementQuery, description: &str, gesture: Gesture, location: Option<SourceLocation>) {
        if let Some(trace) = &self.trace {
            trace.log(&TraceEvent::gesture(description, &gesture));
        }

        let Some(target) = self.target(query) else {
            self.record(
                AssertionResult::fail(
                    format!("{} {}", description, gesture.name()),
                    format!("Element {} does not exist", description),
                )
                .at(location),
            );
            return;
        };

        tracing::debug!(element = description, gesture = gesture.name(), "dispatch");
        if let Err(e) = self.driver.perform(&target, &gesture) {
            self.record(
                AssertionResult::fail(format!("{} {}", description, gesture.name()), e.to_string())
                    .at(location),
            );
        }
    }
}
