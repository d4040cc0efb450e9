//! Timer samples and per-request instrumentation state.

use std::time::Duration;

use metrics::Label;
use tokio::time::Instant;
use tracing::{debug, warn};

/// A started timing measurement, not yet attached to a metric.
///
/// Stopping consumes the sample, so each sample yields at most one
/// observation.
#[derive(Debug, Clone, Copy)]
pub struct TimerSample {
    start: Instant,
}

impl TimerSample {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Record the elapsed time, in seconds, to the histogram `name`.
    pub fn stop(self, name: &'static str, labels: Vec<Label>) -> Duration {
        let elapsed = self.elapsed();
        metrics::histogram!(name, labels).record(elapsed.as_secs_f64());
        elapsed
    }
}

/// Lifecycle of one request's timer.
#[derive(Debug, Clone, Copy, Default)]
pub enum RequestPhase {
    /// State created, timer not started yet.
    #[default]
    Idle,
    Timing(TimerSample),
    Completed,
}

/// Per-request state created by
/// [`Instrumentation::create_state`](super::Instrumentation::create_state).
///
/// Owned by the request's execution and passed by `&mut` to the start and
/// completion hooks; never shared between requests.
#[derive(Debug, Default)]
pub struct MetricsInstrumentationState {
    phase: RequestPhase,
}

impl MetricsInstrumentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, RequestPhase::Completed)
    }

    /// `Idle → Timing`. A repeated start keeps the first sample.
    pub fn start_timer(&mut self) {
        match self.phase {
            RequestPhase::Idle => self.phase = RequestPhase::Timing(TimerSample::start()),
            RequestPhase::Timing(_) => warn!("request timer already started, keeping first sample"),
            RequestPhase::Completed => warn!("request already completed, timer not restarted"),
        }
    }

    /// Move to `Completed`, handing back the running sample if any.
    ///
    /// Returns `None` when the timer never started or the request was
    /// already completed, so a request yields at most one sample.
    pub fn complete(&mut self) -> Option<TimerSample> {
        match std::mem::replace(&mut self.phase, RequestPhase::Completed) {
            RequestPhase::Timing(sample) => Some(sample),
            RequestPhase::Idle => {
                debug!("request completed before its timer started");
                None
            }
            RequestPhase::Completed => {
                debug!("request completion reported twice, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_without_start_yields_nothing() {
        let mut state = MetricsInstrumentationState::new();
        assert!(state.complete().is_none());
        assert!(state.is_completed());
    }

    #[test]
    fn second_completion_yields_nothing() {
        let mut state = MetricsInstrumentationState::new();
        state.start_timer();
        assert!(matches!(state.phase(), RequestPhase::Timing(_)));
        assert!(state.complete().is_some());
        assert!(state.complete().is_none());
    }

    #[test]
    fn start_after_completion_is_ignored() {
        let mut state = MetricsInstrumentationState::new();
        state.start_timer();
        state.complete();
        state.start_timer();
        assert!(state.is_completed());
    }
}
