//! Leading+trailing debounce of recompile requests.

use std::time::{Duration, Instant};

/// Default quiet period between the leading and trailing compile.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(750);

/// What the caller should do with a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run a compile now.
    Fire,
    /// Request recorded; a later [`ChangeScheduler::poll`] will fire it.
    Deferred,
    /// Nothing to do.
    Skip,
}

/// Rate limiter for high-frequency edit events.
///
/// The contract is a leading+trailing debounce: the first request in a
/// quiet window fires immediately and opens a cooling window; requests
/// arriving while cooling are recorded but not executed; when the window
/// elapses, one trailing fire covers them using the then-latest state.
/// A burst of N requests in one window therefore produces exactly two
/// compiles, and a single request produces one.
///
/// The scheduler never spawns a timer. The owner polls it with the
/// current instant (the engine does this on every edit and exposes
/// [`Engine::tick`](crate::Engine::tick) for idle moments); a deadline
/// that comes due after the scheduler was disabled simply no-ops.
#[derive(Debug)]
pub struct ChangeScheduler {
    disabled: bool,
    can_refresh_now: bool,
    can_delay: bool,
    delay: Duration,
    deadline: Option<Instant>,
    pending: bool,
}

impl ChangeScheduler {
    /// Creates a scheduler with the default 750 ms window.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Creates a scheduler with a custom quiet period.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            disabled: false,
            can_refresh_now: true,
            can_delay: true,
            delay,
            deadline: None,
            pending: false,
        }
    }

    /// Suppresses all requests (bulk import, reset).
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Lifts the suppression.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Whether requests are currently suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Turns off the trailing fire: requests arriving while cooling are
    /// dropped instead of deferred.
    pub fn set_can_delay(&mut self, can_delay: bool) {
        self.can_delay = can_delay;
    }

    /// Changes the quiet period for subsequent windows.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Registers a compile request at `now`.
    pub fn request(&mut self, now: Instant) -> Decision {
        if self.disabled {
            return Decision::Skip;
        }
        if self.can_refresh_now {
            self.can_refresh_now = false;
            self.deadline = Some(now + self.delay);
            self.pending = false;
            tracing::debug!("leading compile, cooling for {:?}", self.delay);
            return Decision::Fire;
        }
        if self.can_delay {
            self.pending = true;
            Decision::Deferred
        } else {
            Decision::Skip
        }
    }

    /// Checks whether the cooling window has elapsed at `now`, returning
    /// [`Decision::Fire`] when a trailing compile is due.
    pub fn poll(&mut self, now: Instant) -> Decision {
        let Some(deadline) = self.deadline else {
            return Decision::Skip;
        };
        if now < deadline {
            return Decision::Skip;
        }
        self.deadline = None;
        self.can_refresh_now = true;
        let had_pending = std::mem::take(&mut self.pending);
        if self.disabled || !had_pending {
            return Decision::Skip;
        }
        tracing::debug!("trailing compile");
        Decision::Fire
    }
}

impl Default for ChangeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_first_request_fires_immediately() {
        let mut s = ChangeScheduler::new();
        assert_eq!(s.request(Instant::now()), Decision::Fire);
    }

    #[test]
    fn test_burst_yields_exactly_two_fires() {
        let base = Instant::now();
        let mut s = ChangeScheduler::with_delay(Duration::from_millis(100));

        let mut fires = 0;
        for i in 0..5 {
            if s.request(at(base, i)) == Decision::Fire {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
        // Before the window elapses nothing more fires.
        assert_eq!(s.poll(at(base, 50)), Decision::Skip);
        // At the deadline the trailing fire covers the burst.
        assert_eq!(s.poll(at(base, 100)), Decision::Fire);
        // And only once.
        assert_eq!(s.poll(at(base, 200)), Decision::Skip);
    }

    #[test]
    fn test_single_request_fires_once() {
        let base = Instant::now();
        let mut s = ChangeScheduler::with_delay(Duration::from_millis(100));
        assert_eq!(s.request(base), Decision::Fire);
        // No pending request, so the window closing is silent.
        assert_eq!(s.poll(at(base, 150)), Decision::Skip);
        // Back to idle: a new request fires immediately again.
        assert_eq!(s.request(at(base, 200)), Decision::Fire);
    }

    #[test]
    fn test_disabled_requests_are_noops() {
        let mut s = ChangeScheduler::new();
        s.disable();
        assert_eq!(s.request(Instant::now()), Decision::Skip);
    }

    #[test]
    fn test_stale_deadline_into_disabled_scheduler_noops() {
        let base = Instant::now();
        let mut s = ChangeScheduler::with_delay(Duration::from_millis(100));
        s.request(base);
        s.request(at(base, 10));
        s.disable();
        assert_eq!(s.poll(at(base, 150)), Decision::Skip);
    }

    #[test]
    fn test_can_delay_off_drops_followups() {
        let base = Instant::now();
        let mut s = ChangeScheduler::with_delay(Duration::from_millis(100));
        s.set_can_delay(false);
        assert_eq!(s.request(base), Decision::Fire);
        assert_eq!(s.request(at(base, 10)), Decision::Skip);
        assert_eq!(s.poll(at(base, 150)), Decision::Skip);
    }
}
