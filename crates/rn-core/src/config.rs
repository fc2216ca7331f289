//! Simulation configuration: every tuned constant in one place.
//!
//! The defaults reproduce the shipped game balance.  None of the rates are
//! physically derived — they are gameplay tuning values, which is why they
//! live in config rather than as hard-coded constants at the use sites.

use crate::error::{CoreError, CoreResult};

/// Top-level traffic-engine configuration.
///
/// Typically constructed via `TrafficConfig::default()` and selectively
/// overridden; validated once by the sim builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    // ── Graph ─────────────────────────────────────────────────────────────
    /// Two node positions closer than this merge into one node.
    pub merge_tolerance: f32,

    // ── Signals ───────────────────────────────────────────────────────────
    /// Total length of one signal phase, seconds.
    pub light_cycle_secs: f32,
    /// Warning window at the end of a phase during which the active lights
    /// show yellow, seconds.  Must be shorter than `light_cycle_secs`.
    pub yellow_secs: f32,

    // ── Spawning ──────────────────────────────────────────────────────────
    /// Seconds between spawn attempts.
    pub spawn_interval_secs: f32,
    /// Hard cap on simultaneous vehicles per connection.
    pub max_vehicles_per_connection: u32,

    // ── Kinematics ────────────────────────────────────────────────────────
    /// Acceleration toward target speed, world units per second squared.
    pub acceleration: f32,
    /// Braking rate toward zero, world units per second squared.
    pub deceleration: f32,
    /// Lateral spacing between adjacent lanes, world units.
    pub lane_width: f32,
    /// Progress fraction past which an approaching vehicle obeys its signal.
    pub signal_check_progress: f32,
    /// Normalized gap below which a vehicle brakes behind a leader in the
    /// same lane of the same connection.
    pub follow_gap: f32,

    // ── Density & incidents ───────────────────────────────────────────────
    /// Radius for associating a raw position with the nearest road in the
    /// legacy density tally, world units.
    pub density_radius: f32,
    /// Per-second probability of an accident spawning on a random active
    /// vehicle's connection.
    pub accident_probability: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            merge_tolerance: 0.5,
            light_cycle_secs: 10.0,
            yellow_secs: 2.0,
            spawn_interval_secs: 2.5,
            max_vehicles_per_connection: 4,
            acceleration: 6.0,
            deceleration: 14.0,
            lane_width: 2.0,
            signal_check_progress: 0.7,
            follow_gap: 0.15,
            density_radius: 20.0,
            accident_probability: 0.002,
        }
    }
}

impl TrafficConfig {
    /// Check internal consistency.  Called once by the sim builder; a failed
    /// check aborts construction rather than producing a silently broken run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.light_cycle_secs <= 0.0 {
            return Err(CoreError::Config("light_cycle_secs must be positive".into()));
        }
        if self.yellow_secs < 0.0 || self.yellow_secs >= self.light_cycle_secs {
            return Err(CoreError::Config(
                "yellow_secs must be non-negative and shorter than light_cycle_secs".into(),
            ));
        }
        if self.spawn_interval_secs <= 0.0 {
            return Err(CoreError::Config("spawn_interval_secs must be positive".into()));
        }
        if self.merge_tolerance < 0.0 {
            return Err(CoreError::Config("merge_tolerance must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.signal_check_progress) {
            return Err(CoreError::Config(
                "signal_check_progress must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.accident_probability) {
            return Err(CoreError::Config(
                "accident_probability must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
