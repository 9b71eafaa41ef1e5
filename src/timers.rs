//! Timing utilities for minimization reports.

use std::time::{Duration, Instant};

/// RAII timer that adds the elapsed time to a slot when dropped.
///
/// Time is recorded on every exit path, including an early `?` return.
///
/// ```rust,ignore
/// let mut total = Duration::ZERO;
/// {
///     let _timer = PhaseTimer::new(&mut total);
///     // ... work being measured ...
/// }
/// ```
pub(crate) struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub(crate) fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

pub(crate) fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_phase_timer_records_elapsed() {
        let mut duration = Duration::ZERO;
        {
            let _timer = PhaseTimer::new(&mut duration);
            thread::sleep(Duration::from_millis(10));
        }
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_phase_timer_records_on_early_return() {
        fn fails(slot: &mut Duration) -> Result<(), ()> {
            let _timer = PhaseTimer::new(slot);
            thread::sleep(Duration::from_millis(5));
            Err(())
        }

        let mut duration = Duration::ZERO;
        assert!(fails(&mut duration).is_err());
        assert!(duration.as_millis() >= 5);
    }

    #[test]
    fn test_as_millis_f64() {
        assert_eq!(as_millis_f64(Duration::from_micros(1500)), 1.5);
    }
}
