//! Per-frame vehicle kinematics.
//!
//! The step is deliberately simple: fixed-rate acceleration and braking
//! (tuning values, not physics), a two-condition stop decision, and a
//! normalized progress integration.  Speeds are world units per second; the
//! progress increment divides by the connection's physical length so a class
//! cruises at the same real speed on roads of any length.

use rustc_hash::FxHashMap;

use rn_core::{NodeId, SimRng, TrafficConfig, Vec3};
use rn_graph::RoadGraph;
use rn_signal::Intersection;

use crate::vehicle::Vehicle;

/// What a single vehicle step produced.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// Still traveling its connection.
    Cruising,
    /// Completed the connection and moved onto an onward one.
    Transitioned,
    /// Completed the connection with no onward continuation — trip done,
    /// remove the vehicle.
    Finished,
    /// The connection or an endpoint no longer exists — remove the vehicle.
    Orphaned,
}

/// Advance one vehicle by `dt` seconds.
///
/// `earlier` and `later` are the sweep's split views around this vehicle:
/// `earlier` holds vehicles already stepped this frame, `later` the ones
/// still pending.  The leader-gap check scans both, accepting that earlier
/// vehicles' progress is from *this* frame — the engine's long-standing
/// best-effort ordering.
#[allow(clippy::too_many_arguments)]
pub fn step_vehicle(
    v: &mut Vehicle,
    earlier: &[Vehicle],
    later: &[Vehicle],
    graph: &RoadGraph,
    intersections: &FxHashMap<NodeId, Intersection>,
    config: &TrafficConfig,
    dt: f32,
    rng: &mut SimRng,
) -> StepOutcome {
    // Dangling references (player demolished mid-transit) despawn silently.
    let Some(length) = graph.connection_length(v.connection) else {
        return StepOutcome::Orphaned;
    };

    // ── Stop decision ─────────────────────────────────────────────────────
    let held_at_signal = blocked_by_signal(v, intersections, config);
    let should_stop = held_at_signal || leader_too_close(v, earlier, later, config);
    v.waiting = held_at_signal;

    // ── Speed adjustment ──────────────────────────────────────────────────
    if should_stop {
        v.speed = (v.speed - config.deceleration * dt).max(0.0);
    } else {
        v.speed = (v.speed + config.acceleration * dt).min(v.target_speed);
    }

    // ── Advance ───────────────────────────────────────────────────────────
    v.progress += v.speed * dt / length.max(f32::EPSILON);
    if v.progress < 1.0 {
        return StepOutcome::Cruising;
    }

    // ── Transition at the far node ────────────────────────────────────────
    let reached = v.to_node;
    let onward = graph.onward_connections(reached, v.connection);
    if onward.is_empty() {
        return StepOutcome::Finished;
    }

    // Prefer the planned path's next hop when it is still traversable;
    // otherwise the route is stale — drop it and pick locally.
    let chosen = next_hop_from_path(v, reached, graph).or_else(|| {
        v.path.clear();
        rng.choose(&onward).copied()
    });
    let Some(next_conn) = chosen else {
        return StepOutcome::Finished;
    };
    let Some(record) = graph.connection(next_conn) else {
        return StepOutcome::Finished;
    };
    let Some(next_to) = record.other_end(reached) else {
        return StepOutcome::Finished;
    };

    v.connection = next_conn;
    v.from_node = reached;
    v.to_node = next_to;
    v.progress = 0.0;
    v.speed *= 0.5; // turn penalty
    v.lane = rng.gen_range(0..record.lanes);
    StepOutcome::Transitioned
}

/// Signal check: near the end of the connection and the upcoming node is a
/// governed intersection whose lamp for this approach is not green.
fn blocked_by_signal(
    v: &Vehicle,
    intersections: &FxHashMap<NodeId, Intersection>,
    config: &TrafficConfig,
) -> bool {
    if v.progress <= config.signal_check_progress {
        return false;
    }
    intersections
        .get(&v.to_node)
        .is_some_and(|ix| !ix.can_proceed(v.connection))
}

/// Leader check: another vehicle on the same connection, lane, and travel
/// direction sits ahead within the follow gap.
fn leader_too_close(
    v: &Vehicle,
    earlier: &[Vehicle],
    later: &[Vehicle],
    config: &TrafficConfig,
) -> bool {
    earlier.iter().chain(later.iter()).any(|other| {
        other.connection == v.connection
            && other.lane == v.lane
            && other.from_node == v.from_node
            && other.progress > v.progress
            && other.progress - v.progress < config.follow_gap
    })
}

/// Take the path queue's next hop if it names a node directly reachable
/// from `reached`, consuming it.  Returns the connection to use.
fn next_hop_from_path(
    v: &mut Vehicle,
    reached: NodeId,
    graph: &RoadGraph,
) -> Option<rn_core::ConnectionId> {
    let &next_node = v.path.front()?;
    let conn = graph.connection_toward(reached, next_node)?;
    if conn == v.connection {
        return None; // would double back along the arrival connection
    }
    v.path.pop_front();
    Some(conn)
}

/// World pose of a vehicle: position interpolated along its connection at
/// `progress`, offset laterally by lane, plus ground-plane heading.
///
/// Lane offsets center the lane block on the road axis:
/// `(lane - (lanes - 1) / 2) * lane_width` along the segment perpendicular.
///
/// Returns `None` when any referenced graph element is gone.
pub fn lane_pose(graph: &RoadGraph, v: &Vehicle, lane_width: f32) -> Option<(Vec3, f32)> {
    let conn = graph.connection(v.connection)?;
    let from = graph.node(v.from_node)?.position;
    let to = graph.node(v.to_node)?.position;

    let direction = (to - from).normalized();
    let lateral = (v.lane as f32 - (conn.lanes as f32 - 1.0) / 2.0) * lane_width;
    let center = from.lerp(to, v.progress.clamp(0.0, 1.0));
    let position = center + direction.perp_xz() * lateral;
    Some((position, direction.yaw()))
}
