//! Traffic density aggregation.
//!
//! Two views: an exact per-connection head count over the live vehicle list,
//! and a proximity tally that attributes world-space positions to legacy road
//! segments.  Both are full recomputes — the consumer replaces its map every
//! frame rather than patching increments, so a missing key always means zero.

use rustc_hash::FxHashMap;

use rn_core::{ConnectionId, SegmentId, Vec3};
use rn_graph::RoadSegment;

use crate::vehicle::Vehicle;

/// Count vehicles per connection.  Connections with no vehicles are absent.
pub fn tally(vehicles: &[Vehicle]) -> FxHashMap<ConnectionId, u32> {
    let mut counts = FxHashMap::default();
    for v in vehicles {
        *counts.entry(v.connection).or_insert(0) += 1;
    }
    counts
}

/// Attribute each position to its nearest segment within `radius`, counting
/// hits per segment.
///
/// Nearness is measured to the closest of a segment's start, midpoint, and
/// end — a three-sample approximation of point-to-curve distance that is
/// exact enough at road scale.  Positions farther than `radius` from every
/// segment are ignored.  Segment keys are indices into `segments`.
pub fn tally_by_proximity(
    segments: &[RoadSegment],
    positions: &[Vec3],
    radius: f32,
) -> FxHashMap<SegmentId, u32> {
    let mut counts = FxHashMap::default();
    let radius_sq = radius * radius;
    for &pos in positions {
        let mut best: Option<(SegmentId, f32)> = None;
        for (i, seg) in segments.iter().enumerate() {
            let d = [seg.start, seg.midpoint(), seg.end]
                .into_iter()
                .map(|p| p.distance_sq(pos))
                .fold(f32::INFINITY, f32::min);
            if d <= radius_sq && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((SegmentId(i as u32), d));
            }
        }
        if let Some((segment, _)) = best {
            *counts.entry(segment).or_insert(0) += 1;
        }
    }
    counts
}
