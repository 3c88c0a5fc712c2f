use serde::{Deserialize, Serialize};

use crate::driver::snapshot::Vector;

pub const LONG_PRESS_SECS: f64 = 0.5;
pub const DRAG_PRESS_SECS: f64 = 0.05;

/// Keyboard delete key as sent through `TypeText`.
pub const DELETE_KEY: char = '\u{8}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Swipe velocity, either one of the host's presets or pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Velocity {
    #[default]
    Default,
    Slow,
    Fast,
    PixelsPerSecond(f64),
}

/// An input event dispatched to a resolved element. Offsets are normalized to
/// the element's frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    Tap {
        at: Vector,
        taps: u32,
        touches: u32,
    },
    DoubleTap {
        at: Vector,
    },
    Press {
        at: Vector,
        duration_secs: f64,
    },
    Swipe {
        direction: SwipeDirection,
        #[serde(default)]
        velocity: Velocity,
    },
    Drag {
        from: Vector,
        to: Vector,
        press_duration_secs: f64,
    },
    Pinch {
        scale: f64,
        velocity: f64,
    },
    Rotate {
        radians: f64,
        velocity: f64,
    },
    TypeText {
        text: String,
    },
}

impl Gesture {
    pub fn tap() -> Self {
        Gesture::Tap {
            at: Vector::CENTER,
            taps: 1,
            touches: 1,
        }
    }

    pub fn long_press(at: Vector) -> Self {
        Gesture::Press {
            at,
            duration_secs: LONG_PRESS_SECS,
        }
    }

    pub fn drag(from: Vector, to: Vector) -> Self {
        Gesture::Drag {
            from,
            to,
            press_duration_secs: DRAG_PRESS_SECS,
        }
    }

    /// Drag across the element centre by a normalized delta. Both ends are
    /// clamped into the element.
    pub fn drag_by(dx: f64, dy: f64) -> Self {
        let clamp = |v: f64| v.clamp(0.0, 1.0);
        Gesture::drag(
            Vector::new(clamp(0.5 - dx * 0.5), clamp(0.5 - dy * 0.5)),
            Vector::new(clamp(0.5 + dx * 0.5), clamp(0.5 + dy * 0.5)),
        )
    }

    pub fn type_text(text: impl Into<String>) -> Self {
        Gesture::TypeText { text: text.into() }
    }

    /// One delete key per character of `current`.
    pub fn clear(current: &str) -> Self {
        Gesture::TypeText {
            text: std::iter::repeat_n(DELETE_KEY, current.chars().count()).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Tap { .. } => "tap",
            Gesture::DoubleTap { .. } => "double_tap",
            Gesture::Press { .. } => "press",
            Gesture::Swipe { .. } => "swipe",
            Gesture::Drag { .. } => "drag",
            Gesture::Pinch { .. } => "pinch",
            Gesture::Rotate { .. } => "rotate",
            Gesture::TypeText { .. } => "type_text",
        }
    }
}
