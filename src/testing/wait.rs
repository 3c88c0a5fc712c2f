use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Harness-wide polling defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        WaitOptions {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Per-call wait settings. Unset timeout falls back to the harness default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Option<Duration>,
    pub failing: bool,
}

impl Default for Wait {
    fn default() -> Self {
        Wait {
            timeout: None,
            failing: true,
        }
    }
}

impl Wait {
    pub fn within(timeout: Duration) -> Self {
        Wait {
            timeout: Some(timeout),
            ..Wait::default()
        }
    }

    /// Negative and NaN values mean no waiting at all.
    pub fn secs(secs: f64) -> Self {
        Wait::within(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX))
    }

    /// Whether a timeout is recorded as a failure.
    pub fn failing(mut self, failing: bool) -> Self {
        self.failing = failing;
        self
    }

    pub fn resolve(&self, options: &WaitOptions) -> Duration {
        self.timeout.unwrap_or(options.timeout)
    }
}

impl From<Duration> for Wait {
    fn from(timeout: Duration) -> Self {
        Wait::within(timeout)
    }
}

/// Call `check` until it returns true or `timeout` elapses. `check` always
/// runs at least once.
pub fn poll_until<F: FnMut() -> bool>(timeout: Duration, interval: Duration, mut check: F) -> bool {
    let start = Instant::now();
    loop {
        if check() {
            return true;
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return false;
        }
        std::thread::sleep(interval.min(timeout - elapsed));
    }
}

pub fn format_secs(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}", secs as u64)
    } else {
        format!("{}", secs)
    }
}
