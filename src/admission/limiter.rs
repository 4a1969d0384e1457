use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// The request may proceed to validation and the engine.
    Admitted,
    /// The window quota is exhausted; retry once `retry_after` has elapsed.
    Rejected { retry_after: Duration },
}

/// Mutable window state, always accessed under the limiter's mutex.
struct WindowState {
    window_start: Instant,
    count: u32,
}

/// Process-wide fixed-window rate limiter.
///
/// One instance is created at startup and injected wherever admission
/// decisions are needed; there is no ambient global. The check-and-increment
/// is a single critical section, so concurrent callers can never over-admit
/// through a read-then-write race.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(WindowState {
                window_start: Instant::now(),
                count: 0,
            }),
        }
    }

    /// Decides whether one more request fits in the current window.
    ///
    /// Rolls the window over first if it has elapsed, then admits while the
    /// count is below the configured maximum. Rejections report the time
    /// remaining until the next rollover.
    pub fn try_admit(&self) -> AdmissionDecision {
        self.try_admit_at(Instant::now())
    }

    /// Same as [`try_admit`](Self::try_admit) with an explicit clock reading,
    /// so tests can drive window rollover deterministically.
    pub(crate) fn try_admit_at(&self, now: Instant) -> AdmissionDecision {
        let mut state = self.state.lock();

        let elapsed = now.saturating_duration_since(state.window_start);
        if elapsed >= self.window {
            state.window_start = now;
            state.count = 0;
        }

        if state.count < self.max_requests {
            state.count += 1;
            AdmissionDecision::Admitted
        } else {
            let retry_after = self.window - now.saturating_duration_since(state.window_start);
            tracing::debug!(
                "Rate limit exhausted ({} in window), retry after {:?}",
                state.count,
                retry_after
            );
            AdmissionDecision::Rejected { retry_after }
        }
    }

    /// Number of requests admitted in the current window.
    pub fn current_count(&self) -> u32 {
        self.state.lock().count
    }

    /// Discards the current window entirely. Exposed for tests and operator
    /// tooling; never called on the request path.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.window_start = Instant::now();
        state.count = 0;
    }
}
