//! Time management utilities

use std::time::{Duration, Instant};

/// Simulation clock handed to transform modifiers every frame
///
/// Replaces reading a global window clock or keeping static frame counters
/// inside animation closures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds accumulated since the scene started updating
    pub elapsed: f32,
    /// Seconds covered by the current frame
    pub delta: f32,
    /// Number of completed updates
    pub frame: u64,
}

impl FrameTime {
    /// Clock at time zero, before the first frame
    pub const fn zero() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
        }
    }

    /// Advance the clock by one frame of `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame += 1;
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Wall-clock duration since the timer was created
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs_f32(self.total_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_time_advances() {
        let mut time = FrameTime::zero();
        time.advance(0.5);
        time.advance(0.25);

        assert_eq!(time.frame, 2);
        assert_relative_eq!(time.delta, 0.25);
        assert_relative_eq!(time.elapsed, 0.75);
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= 0.0);
    }
}
