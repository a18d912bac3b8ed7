use std::time::{Duration, Instant};

/// Frames-per-second counter, reported once per window of time.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameStats {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
        }
    }

    /// Counts a presented frame. Returns the measured rate when a window closes.
    pub fn record(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let span = now.saturating_duration_since(start);
        if span < self.window {
            return None;
        }

        let fps = f64::from(self.frames) / span.as_secs_f64();
        log::debug!("{fps:.1} fps ({} frames in {:.2}s)", self.frames, span.as_secs_f64());

        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut stats = FrameStats::default();
        let t0 = Instant::now();

        assert_eq!(stats.record(t0), None);
        for i in 1..60 {
            assert_eq!(stats.record(t0 + Duration::from_millis(i * 16)), None);
        }
        let fps = stats.record(t0 + Duration::from_secs(1)).unwrap();

        assert!((fps - 61.0).abs() < 1e-9);
    }

    #[test]
    fn window_restarts_after_report() {
        let mut stats = FrameStats::new(Duration::from_millis(100));
        let t0 = Instant::now();

        stats.record(t0);
        assert!(stats.record(t0 + Duration::from_millis(100)).is_some());
        assert_eq!(stats.record(t0 + Duration::from_millis(150)), None);
        assert!(stats.record(t0 + Duration::from_millis(200)).is_some());
    }
}
