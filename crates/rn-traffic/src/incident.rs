//! Transient traffic incidents.
//!
//! Accidents roll at a low per-second probability against a random active
//! vehicle, jams are detected from per-connection occupancy and speed, and
//! severe accidents dispatch an emergency run.  Everything here counts down
//! and disappears; nothing is persisted.

use rn_core::{ConnectionId, SimRng, TrafficConfig, Vec3};
use rn_graph::RoadGraph;
use rustc_hash::FxHashMap;

use crate::density;
use crate::motion::lane_pose;
use crate::vehicle::Vehicle;

/// Jam detection: a connection at capacity whose mean speed is below this.
const JAM_SPEED_THRESHOLD: f32 = 0.5;
/// How long a detected jam record lingers before re-evaluation.
const JAM_DURATION_SECS: f32 = 5.0;
const ACCIDENT_MIN_SECS: f32 = 20.0;
const ACCIDENT_MAX_SECS: f32 = 60.0;
/// Severity at or above which an accident dispatches an emergency run.
const SEVERE_THRESHOLD: f32 = 0.7;
/// Fixed response-and-clearance time of an emergency run.
const EMERGENCY_RUN_SECS: f32 = 30.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum IncidentKind {
    /// Collision with a severity in `[0, 1]`.
    Accident { severity: f32 },
    /// A connection saturated at near-zero speed.
    Jam,
}

/// A transient record pinned to a connection.
#[derive(Clone, Debug)]
pub struct Incident {
    pub kind:           IncidentKind,
    pub connection:     ConnectionId,
    pub position:       Vec3,
    pub remaining_secs: f32,
}

/// An emergency vehicle dispatched to a severe accident.
#[derive(Clone, Debug)]
pub struct EmergencyRun {
    pub target:         ConnectionId,
    pub remaining_secs: f32,
}

/// Live incident state, updated once per frame.
#[derive(Debug, Default)]
pub struct IncidentBoard {
    pub incidents:  Vec<Incident>,
    pub dispatches: Vec<EmergencyRun>,
}

impl IncidentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count down, expire, and roll for new incidents.
    pub fn update(
        &mut self,
        dt: f32,
        graph: &RoadGraph,
        vehicles: &[Vehicle],
        config: &TrafficConfig,
        rng: &mut SimRng,
    ) {
        for incident in &mut self.incidents {
            incident.remaining_secs -= dt;
        }
        self.incidents.retain(|i| i.remaining_secs > 0.0);
        for run in &mut self.dispatches {
            run.remaining_secs -= dt;
        }
        self.dispatches.retain(|r| r.remaining_secs > 0.0);

        self.roll_accident(dt, graph, vehicles, config, rng);
        self.detect_jams(graph, vehicles, config);
    }

    /// True if the connection currently carries an incident of any kind.
    pub fn affects(&self, connection: ConnectionId) -> bool {
        self.incidents.iter().any(|i| i.connection == connection)
    }

    fn roll_accident(
        &mut self,
        dt: f32,
        graph: &RoadGraph,
        vehicles: &[Vehicle],
        config: &TrafficConfig,
        rng: &mut SimRng,
    ) {
        if vehicles.is_empty() {
            return;
        }
        // Per-second probability scaled to the frame, so the rate is
        // independent of tick length.
        if !rng.gen_bool(config.accident_probability * dt as f64) {
            return;
        }
        let Some(victim) = rng.choose(vehicles) else {
            return;
        };
        let position = match lane_pose(graph, victim, config.lane_width) {
            Some((pos, _)) => pos,
            None => return, // vehicle already dangling; next sweep removes it
        };
        let severity: f32 = rng.gen_range(0.0..1.0);
        self.incidents.push(Incident {
            kind: IncidentKind::Accident { severity },
            connection: victim.connection,
            position,
            remaining_secs: rng.gen_range(ACCIDENT_MIN_SECS..ACCIDENT_MAX_SECS),
        });
        if severity >= SEVERE_THRESHOLD {
            self.dispatches.push(EmergencyRun {
                target:         victim.connection,
                remaining_secs: EMERGENCY_RUN_SECS,
            });
        }
    }

    fn detect_jams(&mut self, graph: &RoadGraph, vehicles: &[Vehicle], config: &TrafficConfig) {
        let counts = density::tally(vehicles);
        let mut speed_sums: FxHashMap<ConnectionId, f32> = FxHashMap::default();
        for v in vehicles {
            *speed_sums.entry(v.connection).or_insert(0.0) += v.speed;
        }
        for (&conn, &count) in &counts {
            if count < config.max_vehicles_per_connection {
                continue;
            }
            let mean_speed = speed_sums.get(&conn).copied().unwrap_or(0.0) / count as f32;
            if mean_speed >= JAM_SPEED_THRESHOLD || self.affects(conn) {
                continue;
            }
            // Pin the record at the head of the stalled pack.
            let position = vehicles
                .iter()
                .filter(|v| v.connection == conn)
                .max_by(|a, b| a.progress.total_cmp(&b.progress))
                .and_then(|v| lane_pose(graph, v, config.lane_width))
                .map(|(pos, _)| pos)
                .unwrap_or(Vec3::ZERO);
            self.incidents.push(Incident {
                kind:           IncidentKind::Jam,
                connection:     conn,
                position,
                remaining_secs: JAM_DURATION_SECS,
            });
        }
    }
}
