//! Vehicle records and class distribution.

use std::collections::VecDeque;

use rn_core::{ConnectionId, NodeId, SimRng, VehicleId};

/// Render colors assigned round-robin-randomly at spawn.  RGB in [0, 1].
pub const PALETTE: [[f32; 3]; 8] = [
    [0.85, 0.10, 0.10], // red
    [0.10, 0.35, 0.80], // blue
    [0.95, 0.95, 0.95], // white
    [0.15, 0.15, 0.15], // black
    [0.75, 0.75, 0.78], // silver
    [0.90, 0.65, 0.10], // amber
    [0.10, 0.55, 0.25], // green
    [0.45, 0.25, 0.60], // purple
];

/// Vehicle class: determines cruising speed and render footprint.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleClass {
    Car,
    Truck,
    Bus,
}

impl VehicleClass {
    /// Draw from the weighted spawn distribution: cars dominate, trucks and
    /// buses fill out the remainder.
    pub fn sample(rng: &mut SimRng) -> Self {
        let roll: f32 = rng.gen_range(0.0..1.0);
        if roll < 0.70 {
            VehicleClass::Car
        } else if roll < 0.90 {
            VehicleClass::Truck
        } else {
            VehicleClass::Bus
        }
    }

    /// Desired cruising speed, world units per second.
    pub fn target_speed(self) -> f32 {
        match self {
            VehicleClass::Car => 12.0,
            VehicleClass::Truck => 8.0,
            VehicleClass::Bus => 9.0,
        }
    }

    /// Render footprint as (length, width) in world units.
    pub fn footprint(self) -> (f32, f32) {
        match self {
            VehicleClass::Car => (4.2, 1.8),
            VehicleClass::Truck => (7.5, 2.4),
            VehicleClass::Bus => (10.5, 2.5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Truck => "truck",
            VehicleClass::Bus => "bus",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated traffic participant on one connection of the road graph.
///
/// Invariant: `progress ∈ [0, 1]` between steps; when it reaches 1 the
/// vehicle either transitions onto an onward connection (progress reset to
/// 0) or is removed.  `from_node`/`to_node` orient travel on two-way
/// connections — they always equal the connection's endpoints in one order
/// or the other.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: VehicleId,
    /// The connection currently being traversed.
    pub connection: ConnectionId,
    /// Endpoint the vehicle departed from.
    pub from_node: NodeId,
    /// Endpoint the vehicle is heading toward.
    pub to_node: NodeId,
    /// Lane index in `0..connection.lanes`.
    pub lane: u32,
    /// Normalized position along the connection, 0 at `from_node`.
    pub progress: f32,
    /// Current speed, world units per second.
    pub speed: f32,
    /// Cruising speed for this vehicle's class.
    pub target_speed: f32,
    pub class: VehicleClass,
    pub color: [f32; 3],
    /// `true` while held at a signalled intersection.
    pub waiting: bool,
    /// Planned upcoming node sequence beyond `to_node`.  Empty for locally
    /// reactive vehicles that pick onward connections at random.
    pub path: VecDeque<NodeId>,
}
