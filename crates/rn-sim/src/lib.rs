//! `rn-sim` — world state and frame-loop orchestration.
//!
//! # Five-phase frame
//!
//! ```text
//! step(dt):
//!   ① Signals   — every Intersection::advance(dt)
//!   ② Spawn     — Spawner::tick may add one vehicle
//!   ③ Vehicles  — step_vehicle per vehicle in spawn order;
//!                 Finished/Orphaned collected, removed after the sweep
//!   ④ Density   — per-connection tally rebuilt wholesale
//!   ⑤ Incidents — countdowns, accident roll, jam detection
//! ```
//!
//! The engine is single-threaded by contract: it runs inside a host render
//! loop that calls `step(dt)` once per displayed frame.  "Concurrency" is
//! the interleaving of many independent vehicle and signal updates within
//! one synchronous pass.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rn_core::TrafficConfig;
//! use rn_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(TrafficConfig::default()).build()?;
//! let a = sim.world.add_road_node(Vec3::new(0.0, 0.0, 0.0));
//! let b = sim.world.add_road_node(Vec3::new(80.0, 0.0, 0.0));
//! sim.world.add_road_connection(a, b, 2, false)?;
//! sim.run_for(60.0, 1.0 / 60.0, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, StepReport};
pub use world::World;
