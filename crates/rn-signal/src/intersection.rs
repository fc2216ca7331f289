//! The per-node intersection controller.

use rustc_hash::FxHashMap;

use rn_core::{ConnectionId, NodeId, Vec3};
use rn_graph::RoadGraph;

use crate::light::{Light, LightState};

/// Number of approaches granted green together in one phase.
const PHASE_SIZE: usize = 2;

/// Derived control structure attached to a qualifying road node.
///
/// Built once when the node's degree first reaches 3 (the graph mutators in
/// `rn-sim` drive this); it persists until the node is removed, with the
/// phase plan rebuilt in place if an approach connection is demolished.
///
/// Invariant: at most one phase's approaches are non-red at any instant, and
/// an approach passes through yellow before its phase loses green.
#[derive(Clone, Debug)]
pub struct Intersection {
    /// The governed node.
    pub node: NodeId,
    /// Mirrors the node's position (lamp geometry anchors here).
    pub position: Vec3,
    /// Approach connections in connection-id order; phase `p` covers
    /// `approaches[p * 2 .. p * 2 + 2]`.
    pub approaches: Vec<ConnectionId>,
    /// Per-approach lamp state and geometry angle.
    pub lights: FxHashMap<ConnectionId, Light>,
    /// Seconds elapsed in the current phase.
    pub cycle_timer: f32,
    /// Index of the currently green (or yellow) phase.
    pub phase: usize,
}

impl Intersection {
    /// Build the phase plan for `node` from the graph's current topology.
    ///
    /// Approaches are ordered by connection id; indices 0–1 form phase 0,
    /// 2–3 phase 1, and so on (a trailing odd approach forms a singleton
    /// phase).  Phase 0 starts green, everything else red.
    pub fn build(node: NodeId, graph: &RoadGraph) -> Option<Intersection> {
        let record = graph.node(node)?;
        let approaches = graph.connections_at(node);

        let mut lights = FxHashMap::default();
        for (i, &conn) in approaches.iter().enumerate() {
            let angle = approach_angle(graph, node, conn);
            let state = if i < PHASE_SIZE { LightState::Green } else { LightState::Red };
            lights.insert(conn, Light { state, angle });
        }

        Some(Intersection {
            node,
            position: record.position,
            approaches,
            lights,
            cycle_timer: 0.0,
            phase: 0,
        })
    }

    /// Rebuild the phase plan after an approach connection was removed,
    /// preserving nothing of the old cycle (the timer restarts at phase 0).
    pub fn rebuild(&mut self, graph: &RoadGraph) {
        if let Some(fresh) = Intersection::build(self.node, graph) {
            *self = fresh;
        }
    }

    /// Number of phases in the plan.
    pub fn phase_count(&self) -> usize {
        self.approaches.len().div_ceil(PHASE_SIZE)
    }

    /// The approach connections belonging to phase `p`.
    pub fn phase_members(&self, p: usize) -> &[ConnectionId] {
        let start = p * PHASE_SIZE;
        let end = (start + PHASE_SIZE).min(self.approaches.len());
        &self.approaches[start..end]
    }

    /// Advance the cycle state machine by `dt` seconds.
    ///
    /// While `cycle_timer < cycle_secs - yellow_secs` the active phase shows
    /// green; inside the yellow window it shows yellow; at `cycle_secs` the
    /// phase index advances, the timer resets, and lamps are reassigned —
    /// the new phase green, all others red.
    pub fn advance(&mut self, dt: f32, cycle_secs: f32, yellow_secs: f32) {
        let phases = self.phase_count();
        if phases == 0 {
            return;
        }

        self.cycle_timer += dt;

        if self.cycle_timer >= cycle_secs {
            self.cycle_timer = 0.0;
            self.phase = (self.phase + 1) % phases;
            self.apply_phase(LightState::Green);
        } else if self.cycle_timer >= cycle_secs - yellow_secs {
            self.apply_phase(LightState::Yellow);
        } else {
            self.apply_phase(LightState::Green);
        }
    }

    /// Set the active phase's lamps to `active` and every other lamp to red.
    fn apply_phase(&mut self, active: LightState) {
        let start = self.phase * PHASE_SIZE;
        let end = (start + PHASE_SIZE).min(self.approaches.len());
        for (i, conn) in self.approaches.iter().enumerate() {
            if let Some(light) = self.lights.get_mut(conn) {
                light.state = if (start..end).contains(&i) { active } else { LightState::Red };
            }
        }
    }

    /// May a vehicle approaching via `conn` enter the intersection?
    ///
    /// Connections with no registered lamp are treated as unsignalled and
    /// always pass; otherwise only an exact green grants entry.
    pub fn can_proceed(&self, conn: ConnectionId) -> bool {
        self.lights.get(&conn).is_none_or(|l| l.state.allows_entry())
    }

    /// Current lamp state for `conn`, if it is a registered approach.
    pub fn light_state(&self, conn: ConnectionId) -> Option<LightState> {
        self.lights.get(&conn).map(|l| l.state)
    }
}

/// Ground-plane angle of the approach direction: from the intersection node
/// toward the connection's far endpoint.
fn approach_angle(graph: &RoadGraph, node: NodeId, conn: ConnectionId) -> f32 {
    let Some(record) = graph.connection(conn) else {
        return 0.0;
    };
    let Some(far) = record.other_end(node) else {
        return 0.0;
    };
    match (graph.node(node), graph.node(far)) {
        (Some(a), Some(b)) => (b.position - a.position).yaw(),
        _ => 0.0,
    }
}
