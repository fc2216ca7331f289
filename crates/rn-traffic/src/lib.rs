//! `rn-traffic` — vehicles on the road graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`vehicle`]  | `Vehicle`, `VehicleClass`, the render color palette      |
//! | [`spawn`]    | `Spawner` — interval-driven, capacity-capped spawning    |
//! | [`motion`]   | `step_vehicle` kinematics, `lane_pose` world placement   |
//! | [`density`]  | Per-connection and proximity-based vehicle tallies       |
//! | [`incident`] | Transient accidents, jams, and emergency dispatches      |
//!
//! # Update discipline
//!
//! All functions here take the world collections as explicit arguments; the
//! owning `rn-sim` crate drives them once per frame in a fixed order.  The
//! leader-gap check in [`motion`] deliberately reads sibling vehicles'
//! same-frame, partially-updated progress (vehicles earlier in the sweep
//! have already moved) — the simulation is best-effort, not barrier-ordered,
//! and downstream behavior is tuned against exactly that approximation.

pub mod density;
pub mod incident;
pub mod motion;
pub mod spawn;
pub mod vehicle;


pub use density::{tally, tally_by_proximity};
pub use incident::{EmergencyRun, Incident, IncidentBoard, IncidentKind};
pub use motion::{StepOutcome, lane_pose, step_vehicle};
pub use spawn::Spawner;
pub use vehicle::{Vehicle, VehicleClass};
