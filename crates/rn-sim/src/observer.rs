//! Simulation observer trait for progress reporting and data collection.

use rn_core::{SimClock, VehicleId};
use rn_traffic::Vehicle;

use crate::World;

/// Callbacks invoked by [`Sim::run_for`][crate::Sim::run_for] at key points
/// in the frame loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — congestion printer
///
/// ```rust,ignore
/// struct CongestionPrinter;
///
/// impl SimObserver for CongestionPrinter {
///     fn on_step_end(&mut self, clock: &SimClock, world: &World) {
///         if clock.frame % 600 == 0 {
///             println!("{clock}: {} vehicles", world.vehicle_count());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any processing in a frame.  The clock still shows the
    /// previous frame's count.
    fn on_step_start(&mut self, _clock: &SimClock) {}

    /// Called after a frame fully commits (clock already advanced).
    fn on_step_end(&mut self, _clock: &SimClock, _world: &World) {}

    /// Called for each vehicle the spawner added this frame.
    fn on_vehicle_spawned(&mut self, _clock: &SimClock, _vehicle: &Vehicle) {}

    /// Called for each vehicle removed this frame (trip complete or orphaned
    /// by a graph edit).
    fn on_vehicle_removed(&mut self, _clock: &SimClock, _id: VehicleId) {}

    /// Called once when `run_for` finishes.
    fn on_sim_end(&mut self, _clock: &SimClock) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run_for`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
