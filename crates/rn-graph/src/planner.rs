//! Route planning: node-id BFS and position-based A*.
//!
//! # Two planners, one seam
//!
//! - [`find_path`] searches the authoritative [`RoadGraph`] by node id and
//!   hop count (unweighted BFS).  The vehicle spawner uses it to assign
//!   `path` queues.
//! - The [`PathPlanner`] trait serves callers that only have raw 3-D points:
//!   [`AStarPlanner`] snaps both points to the nearest synthetic node of a
//!   [`SegmentNetwork`] and runs A* with Euclidean heuristic and
//!   Euclidean edge costs.
//!
//! # "No path" is the caller's decision
//!
//! Both planners return `Option` and never invent a path.  The historical
//! behavior of degrading to a straight two-point line lives in
//! [`plan_or_direct`], so "no path" and "trivial path" stay distinguishable
//! at the boundary.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::FxHashMap;

use rn_core::{NodeId, Vec3};

use crate::graph::RoadGraph;
use crate::segment::SegmentNetwork;

// ── Node-id BFS over RoadGraph ────────────────────────────────────────────────

/// Breadth-first search from `start` to `end` over explicit adjacency.
///
/// Returns the node-id sequence of the first-discovered shortest path by hop
/// count (ties resolved by adjacency insertion order), or `None` when either
/// node is missing or the nodes are disconnected.  `start == end` yields the
/// single-node path.
pub fn find_path(graph: &RoadGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    graph.node(start)?;
    graph.node(end)?;
    if start == end {
        return Some(vec![start]);
    }

    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    parent.insert(start, start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let Some(record) = graph.node(node) else { continue };
        for &next in &record.connected {
            if parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, node);
            if next == end {
                // Reconstruct by walking parents back to start.
                let mut path = vec![end];
                let mut cur = end;
                while cur != start {
                    cur = parent[&cur];
                    path.push(cur);
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

// ── PathPlanner trait ─────────────────────────────────────────────────────────

/// Pluggable position-based route planner over the legacy segment network.
///
/// Implementations snap arbitrary physical points onto the network and
/// return an ordered waypoint list, or `None` when no connected path exists
/// (including the empty-network case).  Callers decide what a missing path
/// means — see [`plan_or_direct`].
pub trait PathPlanner {
    fn plan(&self, network: &SegmentNetwork, start: Vec3, end: Vec3) -> Option<Vec<Vec3>>;
}

/// Plan via `planner`, falling back to the direct two-point line when no
/// connected path exists.
///
/// The fallback guarantees callers always receive a navigable (if
/// degenerate) path; spawners that must *not* spawn on a missing path should
/// call [`PathPlanner::plan`] directly and skip on `None`.
pub fn plan_or_direct<P: PathPlanner>(
    planner: &P,
    network: &SegmentNetwork,
    start: Vec3,
    end: Vec3,
) -> Vec<Vec3> {
    planner
        .plan(network, start, end)
        .unwrap_or_else(|| vec![start, end])
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over the clustered segment network.
///
/// Edge cost and heuristic are both Euclidean distance, so the heuristic is
/// admissible and the first settle of the goal is optimal.  A node is
/// re-expanded whenever a strictly lower g-cost is found via a later path.
pub struct AStarPlanner;

/// Open-set entry ordered by f-cost, then node index for deterministic
/// tie-breaking.  Wrapped in `Reverse` to turn `BinaryHeap` into a min-heap.
/// Carries its g-cost so stale entries can be skipped on pop.
#[derive(PartialEq)]
struct OpenEntry {
    f: f32,
    g: f32,
    node: usize,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.node.cmp(&other.node))
            .then_with(|| self.g.total_cmp(&other.g))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PathPlanner for AStarPlanner {
    fn plan(&self, network: &SegmentNetwork, start: Vec3, end: Vec3) -> Option<Vec<Vec3>> {
        let from = network.nearest_node(start)?;
        let to = network.nearest_node(end)?;
        if from == to {
            return Some(vec![network.position(from)]);
        }

        let n = network.node_count();
        let goal_pos = network.position(to);

        // g[v] = best known cost to reach v; parent[v] traces the path back.
        let mut g = vec![f32::INFINITY; n];
        let mut parent = vec![usize::MAX; n];
        g[from] = 0.0;

        let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
        open.push(Reverse(OpenEntry {
            f: network.position(from).distance(goal_pos),
            g: 0.0,
            node: from,
        }));

        while let Some(Reverse(OpenEntry { f: _, g: entry_g, node })) = open.pop() {
            if node == to {
                return Some(reconstruct(network, &parent, from, to));
            }
            // Skip stale heap entries superseded by a cheaper re-expansion.
            if entry_g > g[node] {
                continue;
            }

            for (next, cost, _segment) in network.neighbors(node) {
                let tentative = g[node] + cost;
                if tentative < g[next] {
                    g[next] = tentative;
                    parent[next] = node;
                    let next_h = network.position(next).distance(goal_pos);
                    open.push(Reverse(OpenEntry {
                        f: tentative + next_h,
                        g: tentative,
                        node: next,
                    }));
                }
            }
        }
        None
    }
}

fn reconstruct(network: &SegmentNetwork, parent: &[usize], from: usize, to: usize) -> Vec<Vec3> {
    let mut waypoints = vec![network.position(to)];
    let mut cur = to;
    while cur != from {
        cur = parent[cur];
        waypoints.push(network.position(cur));
    }
    waypoints.reverse();
    waypoints
}
