//! Shared utilities

use std::collections::VecDeque;
use std::time::Instant;

// ============================================================================
// Time
// ============================================================================

/// Source of "now" in seconds
pub trait Clock {
    fn now(&self) -> f32;
}

/// Seconds since the clock was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// Loop rate over a rolling window of frame timestamps
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: f32,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize, now: f32) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: now,
            sample_count: sample_count.max(1),
        }
    }

    /// Record a frame at `now`. Returns the average FPS over the window.
    pub fn tick(&mut self, now: f32) -> f32 {
        let dt = now - self.last_frame;
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// Average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_fps_rolling_window() {
        let mut fps = FpsCounter::new(4, 0.0);
        for i in 1..=4 {
            fps.tick(i as f32 * 0.5);
        }
        assert!((fps.tick(2.5) - 2.0).abs() < 1e-4);
        assert!((fps.avg_frame_time_ms() - 500.0).abs() < 1e-2);

        // Old samples fall out of the window
        for i in 0..4 {
            fps.tick(2.5 + (i + 1) as f32 * 0.25);
        }
        assert!((fps.tick(3.75) - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_fps_empty_counter() {
        let fps = FpsCounter::new(0, 1.0);
        assert_eq!(fps.avg_frame_time_ms(), 0.0);
    }
}
