//! Observability hooks invoked inline by long-running generation loops.
//!
//! Hooks have no semantic effect on generation and must return quickly.

use std::time::Duration;

pub trait ProgressHooks {
    /// Called once per loop iteration with the number of accepted elements.
    fn on_progress(&mut self, _current: usize, _total: usize) {}

    /// Called periodically with elapsed time and an extrapolated remainder.
    ///
    /// `remaining` is `None` until there is enough progress to extrapolate.
    fn on_time(&mut self, _elapsed: Duration, _remaining: Option<Duration>) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl ProgressHooks for NoHooks {}

/// Forwards time estimates to `tracing` at debug level.
///
/// Per-iteration progress is not logged: it fires on every attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl ProgressHooks for TracingHooks {
    fn on_time(&mut self, elapsed: Duration, remaining: Option<Duration>) {
        match remaining {
            Some(remaining) => tracing::debug!(
                elapsed_secs = elapsed.as_secs_f64(),
                remaining_secs = remaining.as_secs_f64(),
                "Generation in progress"
            ),
            None => tracing::debug!(
                elapsed_secs = elapsed.as_secs_f64(),
                "Generation in progress, no estimate yet"
            ),
        }
    }
}

/// Extrapolate the time left from the rate of accepted elements so far.
///
/// `accepted` counts every element including the seed; the seed is free, so
/// the rate is measured over `accepted - 1` steps.
#[must_use]
pub fn estimate_remaining(elapsed: Duration, accepted: usize, target: usize) -> Option<Duration> {
    if accepted < 2 {
        return None;
    }
    let per_step = elapsed.as_secs_f64() / (accepted - 1) as f64;
    let left = target.saturating_sub(accepted) as f64;
    Duration::try_from_secs_f64(per_step * left).ok()
}
