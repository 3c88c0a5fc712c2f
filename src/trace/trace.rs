use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::driver::gesture::Gesture;
use crate::testing::context::AssertionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Assertion,
    Wait,
    Gesture,
    Step,
}

/// One line of the JSONL trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub kind: TraceKind,

    /// Accessor chain of the element involved
    pub target: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u128>,
}

impl TraceEvent {
    pub fn now(kind: TraceKind, target: impl Into<String>) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            kind,
            target: target.into(),
            step: None,
            passed: None,
            detail: None,
            elapsed_ms: None,
        }
    }

    pub fn assertion(result: &AssertionResult) -> Self {
        let mut event = Self::now(TraceKind::Assertion, &result.description)
            .with_passed(result.passed);
        event.step = result.step_index;
        event.detail = result.message.clone();
        event
    }

    pub fn gesture(target: &str, gesture: &Gesture) -> Self {
        Self::now(TraceKind::Gesture, target).with_detail(format!("{:?}", gesture))
    }

    pub fn with_passed(mut self, passed: bool) -> Self {
        self.passed = Some(passed);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_step(mut self, step: Option<usize>) -> Self {
        self.step = step;
        self
    }

    pub fn with_elapsed(mut self, elapsed_ms: u128) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}
