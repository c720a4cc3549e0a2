//! Browser wall clock.

use tripplan_core::Clock;

/// Milliseconds since the epoch from `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_millis(&self) -> f64 {
        js_sys::Date::now()
    }
}
