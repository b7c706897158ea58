use std::time::{Duration, Instant};

/// Frames per second, averaged over a sliding window that restarts each time
/// it fills up.
pub struct FpsCounter {
    window: Duration,
    started: Instant,
    frames: u32,
    value: f64,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        FpsCounter {
            window,
            started: Instant::now(),
            frames: 0,
            value: 0.0,
        }
    }

    /// The rate over the last full window, or zero before the first one ends.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn increment(&mut self) {
        self.increment_at(Instant::now());
    }

    fn increment_at(&mut self, now: Instant) {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.started);
        if elapsed > self.window {
            self.value = self.frames as f64 / elapsed.as_secs_f64();
            self.started = now;
            self.frames = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_over_window() {
        let mut counter = FpsCounter::new(Duration::from_secs(1));
        let start = counter.started;
        let frame = Duration::from_millis(20);

        for i in 1..=50 {
            counter.increment_at(start + frame * i);
        }
        // Exactly one second isn't past the window yet
        approx::assert_relative_eq!(counter.value(), 0.0);

        counter.increment_at(start + frame * 51);
        approx::assert_relative_eq!(counter.value(), 50.0, max_relative = 1e-9);

        // The next window starts from scratch
        for i in 1..=11 {
            counter.increment_at(start + frame * 51 + Duration::from_millis(100) * i);
        }
        approx::assert_relative_eq!(counter.value(), 10.0, max_relative = 1e-9);
    }
}
