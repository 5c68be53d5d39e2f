//! Time management for the scene loop.

use std::time::{Duration, Instant};

/// Upper bound on a single frame delta. A stalled terminal read or a
/// debugger pause must not flood the fixed-step loop with catch-up ticks.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Manages frame timing, elapsed time and the fixed-step accumulator.
#[derive(Debug)]
pub struct Time {
    /// Wall-clock instant of the last `update`.
    last_frame: Instant,
    /// Duration of the last frame (clamped).
    delta: Duration,
    /// Total elapsed time fed into the clock.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for scene ticks (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Create a time manager ticking at `hz` fixed updates per second.
    pub fn with_fixed_rate(hz: f64) -> Self {
        let mut time = Self::new();
        time.set_fixed_rate(hz);
        time
    }

    /// Update timing from the wall clock at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Feed an explicit frame delta into the clock.
    pub fn advance(&mut self, delta: Duration) {
        let delta = delta.min(MAX_FRAME_DELTA);
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Get the fixed timestep as a Duration.
    pub fn fixed_timestep(&self) -> Duration {
        self.fixed_timestep
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Set the fixed timestep rate in Hz. Non-positive rates are ignored.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        if hz > 0.0 && hz.is_finite() {
            self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
        } else {
            log::warn!("Ignoring invalid fixed rate {hz} Hz");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_elapsed_and_frames() {
        let mut t = Time::new();
        t.advance(Duration::from_millis(10));
        t.advance(Duration::from_millis(20));
        assert_eq!(t.frame_count(), 2);
        assert_eq!(t.elapsed(), Duration::from_millis(30));
        assert_eq!(t.delta(), Duration::from_millis(20));
    }

    #[test]
    fn fixed_updates_consume_accumulator() {
        let mut t = Time::with_fixed_rate(10.0);
        t.advance(Duration::from_millis(250));
        let mut steps = 0;
        while t.should_fixed_update() {
            steps += 1;
        }
        assert_eq!(steps, 2);
        t.advance(Duration::from_millis(60));
        assert!(t.should_fixed_update());
        assert!(!t.should_fixed_update());
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut t = Time::new();
        t.advance(Duration::from_secs(5));
        assert_eq!(t.delta(), MAX_FRAME_DELTA);
        assert_eq!(t.elapsed(), MAX_FRAME_DELTA);
    }

    #[test]
    fn invalid_rate_keeps_previous_step() {
        let mut t = Time::with_fixed_rate(30.0);
        let before = t.fixed_timestep();
        t.set_fixed_rate(0.0);
        t.set_fixed_rate(f64::NAN);
        assert_eq!(t.fixed_timestep(), before);
    }
}
