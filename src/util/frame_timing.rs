//! Frame timing with FPS calculation and optional frame limiting.

use std::time::{Duration, Instant};

/// Frame timing with FPS calculation and optional frame limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Call at the start of each frame. Returns true if enough time has
    /// passed to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing. Returns the elapsed time since
    /// the previous frame in seconds.
    pub fn end_frame(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Get the current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn limited_blocks_immediately_after_frame() {
        // 1 FPS target: a full second must pass before the next frame.
        let mut timing = FrameTiming::new(1);
        let _ = timing.end_frame();
        assert!(!timing.should_render());
    }

    #[test]
    fn fps_starts_at_default() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn end_frame_reports_nonnegative_dt() {
        let mut timing = FrameTiming::new(0);
        assert!(timing.end_frame() >= 0.0);
    }
}
