use std::time::Duration;

use tracing::trace;

/// Trailing-edge throttle driven by host-supplied timestamps.
///
/// The first value after idle (or after the interval elapsed) is released
/// immediately. Values arriving sooner replace any pending value and are
/// released by `poll` once the interval has passed since the last release, so
/// the latest submission always wins and is never dropped unless cancelled.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_release: Option<Duration>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Submits a value; returns it back when it may be applied right away.
    pub fn submit(&mut self, value: T, now: Duration) -> Option<T> {
        if self.is_ready(now) {
            self.last_release = Some(now);
            self.pending = None;
            return Some(value);
        }
        trace!("throttled value deferred");
        self.pending = Some(value);
        None
    }

    /// Releases the pending value once the interval has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.is_none() || !self.is_ready(now) {
            return None;
        }
        self.last_release = Some(now);
        self.pending.take()
    }

    /// Drops any pending value and forgets the last release time.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            trace!("pending throttled value cancelled");
        }
        self.last_release = None;
    }

    fn is_ready(&self, now: Duration) -> bool {
        match self.last_release {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Throttle;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn first_value_is_released_immediately() {
        let mut throttle = Throttle::new(ms(25));
        assert_eq!(throttle.submit(1, ms(0)), Some(1));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn burst_keeps_only_latest_value() {
        let mut throttle = Throttle::new(ms(25));
        assert_eq!(throttle.submit(1, ms(0)), Some(1));
        assert_eq!(throttle.submit(2, ms(5)), None);
        assert_eq!(throttle.submit(3, ms(10)), None);
        assert_eq!(throttle.poll(ms(20)), None);
        assert_eq!(throttle.poll(ms(25)), Some(3));
        assert_eq!(throttle.poll(ms(60)), None);
    }

    #[test]
    fn cancel_prevents_stale_release() {
        let mut throttle = Throttle::new(ms(25));
        throttle.submit(1, ms(0));
        throttle.submit(2, ms(5));
        throttle.cancel();
        assert_eq!(throttle.poll(ms(100)), None);
        assert_eq!(throttle.submit(3, ms(101)), Some(3));
    }
}
