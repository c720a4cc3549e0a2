//! Timestamp-derived identifiers.

use num_traits::cast::cast;

/// Source of wall-clock milliseconds.
/// Platform-specific implementations should provide this.
pub trait Clock {
    fn now_millis(&self) -> f64;
}

/// Native wall clock. Not available on `wasm32-unknown-unknown`, where the
/// browser clock is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1000.0)
    }
}

/// Clock that returns a fixed start time and advances by `step` on each read.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::cell::Cell<f64>,
    step: f64,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start: f64, step: f64) -> Self {
        Self {
            now: std::cell::Cell::new(start),
            step,
        }
    }

    /// Clock frozen at `start`; every read returns the same instant.
    #[must_use]
    pub const fn frozen(start: f64) -> Self {
        Self::new(start, 0.0)
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Truncate a millisecond reading to an integer id, returning 0 for
/// non-finite or out-of-range values.
#[must_use]
pub fn millis_to_id(millis: f64) -> i64 {
    if !millis.is_finite() {
        return 0;
    }
    cast::<f64, i64>(millis.trunc()).unwrap_or(0)
}

/// Id for a new list entry: the current timestamp, bumped past any id already
/// taken so two entries created within the same millisecond stay distinct.
pub fn next_id<C: Clock + ?Sized>(clock: &C, taken: impl Fn(i64) -> bool) -> i64 {
    let mut id = millis_to_id(clock.now_millis());
    while taken(id) {
        id = id.saturating_add(1);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_truncate_to_ids() {
        assert_eq!(millis_to_id(1_700_000_000_123.9), 1_700_000_000_123);
        assert_eq!(millis_to_id(f64::NAN), 0);
        assert_eq!(millis_to_id(f64::INFINITY), 0);
        assert_eq!(millis_to_id(1e30), 0);
    }

    #[test]
    fn manual_clock_advances_by_step() {
        let clock = ManualClock::new(1000.0, 5.0);
        assert!((clock.now_millis() - 1000.0).abs() < f64::EPSILON);
        assert!((clock.now_millis() - 1005.0).abs() < f64::EPSILON);
    }

    #[test]
    fn colliding_ids_are_bumped() {
        let clock = ManualClock::frozen(500.0);
        let taken = [500, 501];
        assert_eq!(next_id(&clock, |id| taken.contains(&id)), 502);
        assert_eq!(next_id(&clock, |_| false), 500);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_millis() > 1_600_000_000_000.0);
    }
}
