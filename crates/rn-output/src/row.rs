//! Plain data row types written by output backends.

/// A snapshot of one vehicle's state at a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id: u32,
    pub frame:      u64,
    pub connection: u32,
    pub lane:       u32,
    /// Normalized position along the connection.
    pub progress:   f32,
    /// World units per second.
    pub speed:      f32,
    pub class:      &'static str,
}

/// Summary statistics for one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub frame:           u64,
    pub elapsed_secs:    f64,
    pub active_vehicles: u64,
    pub intersections:   u64,
    pub incidents:       u64,
}
