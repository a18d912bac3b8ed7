use std::thread;
use std::time::Duration;

/// Fixed-interval frame pacing.
///
/// Sleeps a flat interval after every frame regardless of how long the frame
/// took, so the effective rate is at most `1 / interval` and drops under load.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks the calling thread for the configured interval.
    pub fn wait(&self) {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}

/// `1 / rate` seconds, or zero when `rate == 0`.
pub fn interval_for_rate(rate: u32) -> Duration {
    if rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs(1) / rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sixty_hertz_interval() {
        assert_eq!(interval_for_rate(60), Duration::from_nanos(16_666_666));
        assert_eq!(
            FramePacer::new(interval_for_rate(60)).interval(),
            Duration::from_nanos(16_666_666)
        );
    }

    #[test]
    fn zero_rate_disables_sleep() {
        assert_eq!(interval_for_rate(0), Duration::ZERO);

        let started = Instant::now();
        FramePacer::new(interval_for_rate(0)).wait();
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn wait_sleeps_at_least_the_interval() {
        let pacer = FramePacer::new(Duration::from_millis(5));
        let started = Instant::now();
        pacer.wait();
        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
