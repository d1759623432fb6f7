use std::time::{Duration, Instant};

/// Quiescence window for the search box.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trailing-edge debounce driven by the caller's clock.
///
/// `push` restarts the window; `poll` hands the latest value back once the
/// window has elapsed without another `push`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, since)) if now.saturating_duration_since(*since) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Remaining wait before `poll` would commit, for repaint scheduling.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|(_, since)| {
            self.window
                .saturating_sub(now.saturating_duration_since(*since))
        })
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
