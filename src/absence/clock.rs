//! Wall-clock source for absence tracking.
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch. Injected so tests can move time by hand.
pub trait WallClock: Send + Sync {
    fn now(&self) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::WallClock;

    /// Clock whose handle stays with the test after the tracker takes ownership.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<f64>>,
    }

    impl ManualClock {
        pub fn starting_at(seconds: f64) -> Self {
            Self {
                now: Arc::new(Mutex::new(seconds)),
            }
        }

        pub fn advance(&self, seconds: f64) {
            *self.now.lock().expect("clock lock") += seconds;
        }

        pub fn set(&self, seconds: f64) {
            *self.now.lock().expect("clock lock") = seconds;
        }
    }

    impl WallClock for ManualClock {
        fn now(&self) -> f64 {
            *self.now.lock().expect("clock lock")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::ManualClock, *};

    #[test]
    fn system_clock_reports_recent_epoch_seconds() {
        // 2020-01-01T00:00:00Z
        assert!(SystemWallClock.now() > 1_577_836_800.0);
    }

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::starting_at(100.0);
        let handle = clock.clone();
        handle.advance(25.5);
        assert_eq!(clock.now(), 125.5);
        handle.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }
}
