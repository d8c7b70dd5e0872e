//! Frame timing for the driver.
//!
//! The field itself is stepped per frame, not per second, so the clock only
//! counts frames and keeps a periodic FPS estimate for logging.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // once per frame:
//! if clock.tick() {
//!     tracing::debug!(fps = clock.fps(), "frame rate");
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame counter with an FPS estimate refreshed every `interval`.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    frame_count: u64,
    fps: f32,
    /// Frame count at the last FPS refresh.
    fps_frame_count: u64,
    fps_update_time: Instant,
    interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    /// A clock that refreshes its FPS estimate every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            interval,
        }
    }

    /// Count one frame. Returns `true` when the FPS estimate was refreshed.
    pub fn tick(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let since = now.duration_since(self.fps_update_time);
        if since < self.interval {
            return false;
        }
        let frames = self.frame_count - self.fps_frame_count;
        self.fps = frames as f32 / since.as_secs_f32().max(f32::EPSILON);
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    /// Frames counted since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS estimate, 0 before the first refresh.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::with_interval(Duration::from_secs(3600));
        for _ in 0..5 {
            assert!(!clock.tick());
        }
        assert_eq!(clock.frame(), 5);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_fps_refresh() {
        let mut clock = FrameClock::with_interval(Duration::from_millis(10));
        clock.tick();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.tick());
        assert!(clock.fps() > 0.0);
        assert!(clock.elapsed() >= Duration::from_millis(20));
    }
}
