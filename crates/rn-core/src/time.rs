//! Simulation time model.
//!
//! # Design
//!
//! The engine runs inside a continuous real-time render loop: the host calls
//! `step(dt)` once per displayed frame with the elapsed wall-clock delta.
//! Time is therefore tracked as accumulated fractional seconds plus a frame
//! counter, not as an integer tick schedule — signal timers, spawn intervals,
//! and vehicle kinematics all integrate over `dt` directly.
//!
//! `elapsed_secs` is `f64` so a multi-hour session does not lose sub-frame
//! precision to f32 rounding; per-frame deltas stay `f32` like the rest of
//! the kinematics.

use std::fmt;

/// Frame-driven simulation clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Number of completed simulation steps.
    pub frame: u64,
    /// Total simulated seconds accumulated across all steps.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }

    /// Break elapsed time into (hours, minutes, seconds) components.
    /// Useful for human-readable progress output without a datetime library.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total = self.elapsed_secs.max(0.0) as u64;
        let hours = total / 3_600;
        let minutes = ((total % 3_600) / 60) as u32;
        let seconds = (total % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "F{} ({:02}:{:02}:{:02})", self.frame, h, m, s)
    }
}
