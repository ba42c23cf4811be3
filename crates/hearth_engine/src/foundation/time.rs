//! Time management utilities
//!
//! The engine pulls one [`FrameTime`] per frame from a [`TimeSource`].
//! [`Timer`] follows the wall clock; [`FixedStepTimer`] advances by a constant
//! step and is what headless runs and tests use.

use std::time::Instant;

/// Timing information for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame
    pub delta: f32,

    /// Seconds since the time source started
    pub elapsed: f32,

    /// Zero-based index of this frame
    pub frame: u64,
}

/// Monotonic per-frame clock
pub trait TimeSource {
    /// Advance to the next frame and report its timing
    fn tick(&mut self) -> FrameTime;
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

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

impl TimeSource for Timer {
    fn tick(&mut self) -> FrameTime {
        let frame = self.frame_count;
        self.update();
        FrameTime {
            delta: self.delta_time,
            elapsed: self.total_time,
            frame,
        }
    }
}

/// Deterministic clock advancing by a fixed step every tick
#[derive(Debug, Clone)]
pub struct FixedStepTimer {
    step: f32,
    elapsed: f32,
    frame: u64,
}

impl FixedStepTimer {
    /// Create a timer advancing `step` seconds per frame
    pub fn new(step: f32) -> Self {
        Self {
            step,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Create a timer stepping at the given rate (frames per second)
    pub fn from_rate(fps: f32) -> Self {
        Self::new(if fps > 0.0 { 1.0 / fps } else { 0.0 })
    }
}

impl TimeSource for FixedStepTimer {
    fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step;
        let time = FrameTime {
            delta: self.step,
            elapsed: self.elapsed,
            frame: self.frame,
        };
        self.frame += 1;
        time
    }
}
