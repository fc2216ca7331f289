//! Interval-driven vehicle spawning.

use std::collections::VecDeque;

use rn_core::{NodeId, SimRng, TrafficConfig, VehicleId};
use rn_graph::{RoadGraph, find_path};

use crate::density;
use crate::vehicle::{PALETTE, Vehicle, VehicleClass};

/// Rate-limited spawner: one attempt per `spawn_interval_secs`, silently
/// skipped when every connection is at capacity (no retry queue).
#[derive(Debug)]
pub struct Spawner {
    accumulator: f32,
    next_id: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self { accumulator: 0.0, next_id: 0 }
    }

    /// Accumulate `dt`; when the interval elapses, attempt one spawn.
    ///
    /// The remainder carries over so the long-run rate is exact regardless
    /// of frame timing.
    pub fn tick(
        &mut self,
        dt: f32,
        graph: &RoadGraph,
        vehicles: &[Vehicle],
        config: &TrafficConfig,
        rng: &mut SimRng,
    ) -> Option<Vehicle> {
        self.accumulator += dt;
        if self.accumulator < config.spawn_interval_secs {
            return None;
        }
        self.accumulator -= config.spawn_interval_secs;
        self.try_spawn(graph, vehicles, config, rng)
    }

    /// One spawn attempt, regardless of the interval (tests and scripted
    /// scenarios call this directly).
    pub fn try_spawn(
        &mut self,
        graph: &RoadGraph,
        vehicles: &[Vehicle],
        config: &TrafficConfig,
        rng: &mut SimRng,
    ) -> Option<Vehicle> {
        // Candidate connections: those under the per-connection cap, in id
        // order for deterministic selection.
        let counts = density::tally(vehicles);
        let mut candidates: Vec<_> = graph
            .connections()
            .filter(|c| {
                counts.get(&c.id).copied().unwrap_or(0) < config.max_vehicles_per_connection
            })
            .map(|c| c.id)
            .collect();
        candidates.sort_unstable();
        let &conn_id = rng.choose(&candidates)?;
        let conn = graph.connection(conn_id)?;

        // Travel direction: one-way connections force start → end; two-way
        // picks either orientation.
        let (from_node, to_node) = if conn.one_way || rng.gen_bool(0.5) {
            (conn.start, conn.end)
        } else {
            (conn.end, conn.start)
        };

        let class = VehicleClass::sample(rng);
        let lane = rng.gen_range(0..conn.lanes);
        let color = *rng.choose(&PALETTE)?;
        let path = plan_route(graph, to_node, rng);

        let id = VehicleId(self.next_id);
        self.next_id += 1;
        Some(Vehicle {
            id,
            connection: conn_id,
            from_node,
            to_node,
            lane,
            progress: 0.0,
            speed: 0.0,
            target_speed: class.target_speed(),
            class,
            color,
            waiting: false,
            path,
        })
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Plan an onward route from `origin` toward a random destination node.
///
/// Returns the node sequence *after* `origin` (possibly empty when the
/// destination is unreachable or the graph is tiny) — an empty queue leaves
/// the vehicle locally reactive, which is fine.
fn plan_route(graph: &RoadGraph, origin: NodeId, rng: &mut SimRng) -> VecDeque<NodeId> {
    let mut nodes: Vec<NodeId> = graph.nodes().map(|n| n.id).filter(|&n| n != origin).collect();
    nodes.sort_unstable();
    let Some(&dest) = rng.choose(&nodes) else {
        return VecDeque::new();
    };
    match find_path(graph, origin, dest) {
        Some(path) => path.into_iter().skip(1).collect(),
        None => VecDeque::new(), // disconnected: spawn anyway, roam locally
    }
}
