//! Millisecond tick source anchored at process start
//!
//! Everything time-driven in the crate works on relative `Ticks` deltas,
//! never wall-clock time, so the animation code can be driven by synthetic
//! tick values in tests.

use std::time::Instant;

/// Milliseconds elapsed since the clock was created. Monotonic.
pub type Ticks = u64;

/// Wraps a monotonic starting point and hands out elapsed milliseconds.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn ticks(&self) -> Ticks {
        self.origin.elapsed().as_millis() as Ticks
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_monotonic() {
        let clock = MonotonicClock::new();
        let a = clock.ticks();
        let b = clock.ticks();
        assert!(b >= a);
    }

    #[test]
    fn test_ticks_start_near_zero() {
        let clock = MonotonicClock::new();
        // Allow plenty of slack for a slow test runner
        assert!(clock.ticks() < 1000);
    }
}
