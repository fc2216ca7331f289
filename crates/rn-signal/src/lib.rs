//! `rn-signal` — traffic-light control at multi-way nodes.
//!
//! # Crate layout
//!
//! | Module           | Contents                                         |
//! |------------------|--------------------------------------------------|
//! | [`light`]        | `LightState`, `Light`                            |
//! | [`intersection`] | `Intersection` — phase plan + cycle state machine |
//!
//! # Signal model
//!
//! A node with three or more connections is governed by a synthesized phase
//! plan: approaches are paired two at a time in connection-id order, and
//! exactly one phase holds green at any instant.  Each phase runs for
//! `light_cycle_secs`, showing yellow for the final `yellow_secs` before the
//! next phase's approaches flip to green and everything else to red.
//! Detection is event-driven: the sim promotes a node when a graph mutation
//! pushes its degree to ≥ 3, never by periodic scanning.

pub mod intersection;
pub mod light;


pub use intersection::Intersection;
pub use light::{Light, LightState};
