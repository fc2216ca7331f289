//! `rn-core` — foundational types for the roadnet traffic simulation engine.
//!
//! This crate is a dependency of every other `rn-*` crate.  It intentionally
//! has no `rn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `ConnectionId`, `VehicleId`, `SegmentId`      |
//! | [`vec3`]   | `Vec3`, ground-plane heading and lane-offset helpers    |
//! | [`time`]   | `SimClock` — delta-time frame clock                     |
//! | [`config`] | `TrafficConfig` — all tuned simulation constants        |
//! | [`rng`]    | `SimRng` — deterministic simulation RNG                 |
//! | [`error`]  | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec3;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TrafficConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{ConnectionId, NodeId, SegmentId, VehicleId};
pub use rng::SimRng;
pub use time::SimClock;
pub use vec3::Vec3;
