//! `rn-graph` — road network topology and route planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`graph`]   | `RoadGraph` (mutable node/connection model), `RoadNode`,     |
//! |             | `RoadConnection`                                             |
//! | [`segment`] | `RoadSegment`, `SegmentNetwork` (legacy clustered network)   |
//! | [`planner`] | `find_path` (node-id BFS), `PathPlanner` trait,              |
//! |             | `AStarPlanner`, `plan_or_direct`                             |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |
//!
//! # Two network models
//!
//! The engine carries two parallel graph representations:
//!
//! - **`RoadGraph`** — the authoritative, mutable node/connection model the
//!   player edits live.  Nodes carry explicit IDs and adjacency; connections
//!   carry lane counts and one-way flags.  An R-tree keeps nearest-node and
//!   merge-tolerance queries cheap as the graph changes.
//! - **`SegmentNetwork`** — the legacy model derived wholesale from raw
//!   start/end segments (no explicit IDs); endpoints are clustered into
//!   synthetic nodes by spatial tolerance.  It is rebuilt from scratch on
//!   every road-list change and serves position-based A* queries.

pub mod error;
pub mod graph;
pub mod planner;
pub mod segment;


pub use error::{GraphError, GraphResult};
pub use graph::{RoadConnection, RoadGraph, RoadNode};
pub use planner::{AStarPlanner, PathPlanner, find_path, plan_or_direct};
pub use segment::{RoadSegment, SegmentNetwork};
