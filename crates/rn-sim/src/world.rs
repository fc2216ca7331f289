//! The authoritative simulation state and its mutation contract.

use rn_core::{ConnectionId, NodeId, Vec3};
use rn_graph::{GraphResult, RoadGraph};
use rn_signal::Intersection;
use rn_traffic::{IncidentBoard, Vehicle};
use rustc_hash::FxHashMap;

/// Everything the simulation owns, bundled as one explicit context.
///
/// Single-writer: one `&mut World` flows through the frame; subsystems never
/// hold references across frames.  Graph edits go through the `*_road_*`
/// mutators below, which keep the intersection table in sync — editing
/// `graph` directly would leave stale signals behind.
#[derive(Debug)]
pub struct World {
    pub graph:         RoadGraph,
    /// Signalled junctions, keyed by their node.  A node is promoted when a
    /// mutation raises its degree to 3 or more, and the intersection persists
    /// until the node itself is removed (demolition that drops the degree
    /// below 3 only rebuilds the phase plan).
    pub intersections: FxHashMap<NodeId, Intersection>,
    /// Live vehicles in spawn order.  The sweep updates them in this order.
    pub vehicles:      Vec<Vehicle>,
    /// Per-connection vehicle counts, replaced wholesale each frame.
    pub density:       FxHashMap<ConnectionId, u32>,
    pub incidents:     IncidentBoard,
}

impl World {
    pub fn new(merge_tolerance: f32) -> Self {
        Self::from_graph(RoadGraph::new(merge_tolerance))
    }

    /// Wrap an existing graph, promoting any node that already qualifies as
    /// an intersection.
    pub fn from_graph(graph: RoadGraph) -> Self {
        let mut world = Self {
            graph,
            intersections: FxHashMap::default(),
            vehicles: Vec::new(),
            density: FxHashMap::default(),
            incidents: IncidentBoard::new(),
        };
        let candidates: Vec<NodeId> = world.graph.nodes().map(|n| n.id).collect();
        for node in candidates {
            world.refresh_signals(node);
        }
        world
    }

    // ── Graph mutators ────────────────────────────────────────────────────

    /// Add a node at `position`, merging into an existing node within the
    /// graph's tolerance.
    pub fn add_road_node(&mut self, position: Vec3) -> NodeId {
        self.graph.add_node(position)
    }

    /// Add a connection and re-evaluate signalling at both endpoints.
    pub fn add_road_connection(
        &mut self,
        start: NodeId,
        end: NodeId,
        lanes: u32,
        one_way: bool,
    ) -> GraphResult<ConnectionId> {
        let id = self.graph.add_connection(start, end, lanes, one_way)?;
        self.refresh_signals(start);
        self.refresh_signals(end);
        Ok(id)
    }

    /// Remove a connection.  Existing intersections at the endpoints rebuild
    /// their phase plans; vehicles on the connection are swept out as
    /// orphans on the next step.  Returns `false` if the id was unknown.
    pub fn remove_road_connection(&mut self, id: ConnectionId) -> bool {
        let Some(removed) = self.graph.remove_connection(id) else {
            return false;
        };
        self.refresh_signals(removed.start);
        self.refresh_signals(removed.end);
        true
    }

    /// Remove a node and every connection touching it.  Returns the removed
    /// connection ids.  Vehicles on those connections are swept out as
    /// orphans on the next step.
    pub fn remove_road_node(&mut self, id: NodeId) -> Vec<ConnectionId> {
        let removed = self.graph.remove_node(id);
        self.intersections.remove(&id);
        // Far endpoints of the cascaded connections may still be signalled.
        let survivors: Vec<NodeId> = self.graph.nodes().map(|n| n.id).collect();
        for node in survivors {
            if self.intersections.contains_key(&node) {
                self.refresh_signals(node);
            }
        }
        removed
    }

    // ── Consumer-facing views ─────────────────────────────────────────────

    pub fn active_vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn traffic_density(&self) -> &FxHashMap<ConnectionId, u32> {
        &self.density
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    // ── Internal ──────────────────────────────────────────────────────────

    /// Promote, rebuild, or drop the signal record at `node` after a graph
    /// mutation touched it.
    fn refresh_signals(&mut self, node: NodeId) {
        if self.graph.node(node).is_none() {
            self.intersections.remove(&node);
            return;
        }
        if let Some(ix) = self.intersections.get_mut(&node) {
            ix.rebuild(&self.graph);
            return;
        }
        if self.graph.degree(node) >= 3
            && let Some(ix) = Intersection::build(node, &self.graph)
        {
            self.graph.set_intersection(node, true);
            self.intersections.insert(node, ix);
        }
    }
}
