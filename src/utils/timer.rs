//! Deadline timer with a re-evaluated duration

use std::time::Duration;

use tokio::time::Instant;

/// Measures elapsed time against a duration that is re-drawn on every
/// [`Timer::start`], so randomized intervals differ per start.
pub struct Timer {
    provider: Box<dyn Fn() -> Duration>,
    started: Option<Instant>,
    duration: Duration,
}

impl Timer {
    pub fn new(provider: impl Fn() -> Duration + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            started: None,
            duration: Duration::ZERO,
        }
    }

    /// Timer with a constant duration
    pub fn fixed(duration: Duration) -> Self {
        Self::new(move || duration)
    }

    pub fn start(&mut self) {
        self.duration = (self.provider)();
        self.started = Some(Instant::now());
    }

    /// A timer that was never started counts as elapsed
    pub fn is_elapsed(&self) -> bool {
        match self.started {
            Some(started) => started.elapsed() >= self.duration,
            None => true,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Duration drawn at the last start
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Duration of `minutes` minutes. Negative and NaN values give zero, values
/// too large for a `Duration` saturate.
pub fn from_minutes(minutes: f64) -> Duration {
    Duration::try_from_secs_f64(minutes.max(0.0) * 60.0).unwrap_or(Duration::MAX)
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("started", &self.started)
            .field("duration", &self.duration)
            .finish()
    }
}
