//! The mutable road graph: nodes, connections, and adjacency.
//!
//! # Data layout
//!
//! Unlike a load-once network, this graph mutates continuously as the player
//! places and demolishes roads, so it uses id-keyed `FxHashMap`s rather than
//! a packed CSR layout.  Adjacency is stored redundantly on both endpoint
//! nodes (one side only for one-way connections), matching how the rest of
//! the engine walks it.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps ground-plane `(x, z)` to `NodeId`.  It is
//! maintained incrementally: entries are inserted on `add_node` and removed
//! on `remove_node`.  Two queries use it:
//!
//! - merge-tolerance lookup in `add_node` (two road endpoints within ~0.5
//!   units collapse into one node);
//! - `nearest_node` snapping for physical start/end points.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use rn_core::{ConnectionId, NodeId, Vec3};

use crate::error::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a ground-plane `[x, z]` point
/// with the associated `NodeId`.  `PartialEq` is required by
/// `RTree::remove`.
#[derive(Clone, Debug, PartialEq)]
struct NodeEntry {
    point: [f32; 2], // [x, z]
    id: NodeId,
}

impl NodeEntry {
    fn new(position: Vec3, id: NodeId) -> Self {
        Self { point: [position.x, position.z], id }
    }
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance on the ground plane.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── Node and connection records ───────────────────────────────────────────────

/// A point in the road graph: an intersection or a road endpoint.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadNode {
    pub id: NodeId,
    /// World position; y is typically 0 (ground plane).
    pub position: Vec3,
    /// Neighbor node ids, in connection-insertion order.  Redundant with the
    /// connection map but kept on the node because BFS and intersection
    /// detection both walk it directly.
    pub connected: Vec<NodeId>,
    /// Set once the node has ≥ 3 connections (or is explicitly promoted).
    pub is_intersection: bool,
}

/// A road segment between two nodes, carrying lane count and directionality.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadConnection {
    pub id: ConnectionId,
    pub start: NodeId,
    pub end: NodeId,
    /// Lane count, always ≥ 1.  Determines lateral offset spacing for
    /// vehicles traveling the connection.
    pub lanes: u32,
    /// One-way connections are traversable only start → end.
    pub one_way: bool,
}

impl RoadConnection {
    /// `true` if `node` is one of the endpoints.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.start {
            Some(self.end)
        } else if node == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// `true` if a vehicle standing at `node` may begin traversing this
    /// connection (either endpoint of a two-way, only `start` of a one-way).
    pub fn enterable_at(&self, node: NodeId) -> bool {
        self.start == node || (!self.one_way && self.end == node)
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// The single source of truth for network topology.
///
/// Invariant: every connection's `start` and `end` reference nodes present in
/// the node map.  All mutators preserve it — `remove_node` cascades removal
/// of every connection touching the node.
#[derive(Debug)]
pub struct RoadGraph {
    nodes: FxHashMap<NodeId, RoadNode>,
    connections: FxHashMap<ConnectionId, RoadConnection>,
    spatial_idx: RTree<NodeEntry>,
    /// Two node positions closer than this merge into one node.
    merge_tolerance: f32,
    next_node: u32,
    next_connection: u32,
}

impl RoadGraph {
    /// Create an empty graph with the given node-merge tolerance.
    pub fn new(merge_tolerance: f32) -> Self {
        Self {
            nodes: FxHashMap::default(),
            connections: FxHashMap::default(),
            spatial_idx: RTree::new(),
            merge_tolerance,
            next_node: 0,
            next_connection: 0,
        }
    }

    // ── Dimensions & accessors ────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.nodes.get(&id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&RoadConnection> {
        self.connections.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.nodes.values()
    }

    pub fn connections(&self) -> impl Iterator<Item = &RoadConnection> {
        self.connections.values()
    }

    /// Number of distinct neighbors of `node` — the promotion criterion for
    /// intersections.  Zero for unknown nodes.
    pub fn degree(&self, node: NodeId) -> usize {
        self.nodes.get(&node).map_or(0, |n| n.connected.len())
    }

    /// Mark or unmark `node` as an intersection.  No-op for unknown nodes.
    pub fn set_intersection(&mut self, node: NodeId, flag: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.is_intersection = flag;
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Create a node at `position`, or return the id of an existing node
    /// within the merge tolerance.
    ///
    /// The merge prevents duplicate nodes when two road placements share an
    /// endpoint: the second placement silently reuses the first node.
    pub fn add_node(&mut self, position: Vec3) -> NodeId {
        let query = [position.x, position.z];
        if let Some(entry) = self.spatial_idx.nearest_neighbor(&query) {
            if entry.distance_2(&query) <= self.merge_tolerance * self.merge_tolerance {
                return entry.id;
            }
        }

        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            RoadNode { id, position, connected: Vec::new(), is_intersection: false },
        );
        self.spatial_idx.insert(NodeEntry::new(position, id));
        id
    }

    /// Connect two existing nodes.
    ///
    /// Updates both endpoints' adjacency lists (only `start`'s for a one-way
    /// connection).  `lanes` is clamped to ≥ 1.
    ///
    /// # Errors
    ///
    /// `ZeroLengthConnection` when `start == end`; `NodeNotFound` when either
    /// endpoint is missing.
    pub fn add_connection(
        &mut self,
        start: NodeId,
        end: NodeId,
        lanes: u32,
        one_way: bool,
    ) -> GraphResult<ConnectionId> {
        if start == end {
            return Err(GraphError::ZeroLengthConnection(start));
        }
        if !self.nodes.contains_key(&start) {
            return Err(GraphError::NodeNotFound(start));
        }
        if !self.nodes.contains_key(&end) {
            return Err(GraphError::NodeNotFound(end));
        }

        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        self.connections.insert(
            id,
            RoadConnection { id, start, end, lanes: lanes.max(1), one_way },
        );

        if let Some(s) = self.nodes.get_mut(&start) {
            if !s.connected.contains(&end) {
                s.connected.push(end);
            }
        }
        if !one_way {
            if let Some(e) = self.nodes.get_mut(&end) {
                if !e.connected.contains(&start) {
                    e.connected.push(start);
                }
            }
        }

        Ok(id)
    }

    /// Remove a connection, updating both endpoints' adjacency lists.
    ///
    /// Returns the removed record, or `None` if the id was unknown (removal
    /// is idempotent — demolish handlers may race with cascades).
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<RoadConnection> {
        let removed = self.connections.remove(&id)?;
        self.refresh_adjacency(removed.start);
        self.refresh_adjacency(removed.end);
        Some(removed)
    }

    /// Remove a node and cascade removal of every connection touching it.
    ///
    /// Returns the ids of the removed connections so callers can drop
    /// vehicles that were traveling them.
    pub fn remove_node(&mut self, id: NodeId) -> Vec<ConnectionId> {
        let Some(node) = self.nodes.remove(&id) else {
            return Vec::new();
        };
        self.spatial_idx.remove(&NodeEntry::new(node.position, id));

        let doomed: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.touches(id))
            .map(|c| c.id)
            .collect();
        for conn in &doomed {
            if let Some(removed) = self.connections.remove(conn) {
                // The removed node is gone; only the far endpoint survives.
                let survivor = if removed.start == id { removed.end } else { removed.start };
                self.refresh_adjacency(survivor);
            }
        }
        doomed
    }

    /// Recompute a node's adjacency list from the surviving connections.
    ///
    /// Rebuilding (rather than deleting single entries) keeps adjacency
    /// correct when parallel connections link the same node pair.
    fn refresh_adjacency(&mut self, node: NodeId) {
        let mut connected = Vec::new();
        for conn in self.connections.values() {
            if conn.enterable_at(node) {
                if let Some(other) = conn.other_end(node) {
                    if !connected.contains(&other) {
                        connected.push(other);
                    }
                }
            }
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.connected = connected;
        }
    }

    // ── Topology queries ──────────────────────────────────────────────────

    /// All connections touching `node`, sorted by connection id so phase
    /// plans built from this list are deterministic.
    pub fn connections_at(&self, node: NodeId) -> Vec<ConnectionId> {
        let mut out: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.touches(node))
            .map(|c| c.id)
            .collect();
        out.sort_unstable();
        out
    }

    /// Connections a vehicle standing at `node` may continue onto, excluding
    /// the one it arrived by.  Sorted by connection id.
    pub fn onward_connections(&self, node: NodeId, exclude: ConnectionId) -> Vec<ConnectionId> {
        let mut out: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.id != exclude && c.enterable_at(node))
            .map(|c| c.id)
            .collect();
        out.sort_unstable();
        out
    }

    /// A connection traversable from `from` directly to `to`, if one exists.
    /// Used to turn BFS node paths into connection hops.
    pub fn connection_toward(&self, from: NodeId, to: NodeId) -> Option<ConnectionId> {
        let mut best: Option<ConnectionId> = None;
        for conn in self.connections.values() {
            if conn.enterable_at(from) && conn.other_end(from) == Some(to) {
                // Lowest id wins for determinism.
                best = Some(best.map_or(conn.id, |b| b.min(conn.id)));
            }
        }
        best
    }

    // ── Geometry queries ──────────────────────────────────────────────────

    /// Physical length of a connection, or `None` if it (or an endpoint) is
    /// gone.
    pub fn connection_length(&self, id: ConnectionId) -> Option<f32> {
        let conn = self.connections.get(&id)?;
        let a = self.nodes.get(&conn.start)?;
        let b = self.nodes.get(&conn.end)?;
        Some(a.position.distance(b.position))
    }

    /// Nearest node to `pos` by ground-plane distance, with no maximum
    /// radius — always picks *some* node unless the graph is empty.
    pub fn nearest_node(&self, pos: Vec3) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.z])
            .map(|e| e.id)
    }
}
