//! Legacy segment network: a graph synthesized from raw road segments.
//!
//! The original road tool predates explicit node ids — a road is just a
//! start/end pair (plus an optional quadratic-curve control point).  This
//! module clusters segment endpoints within a spatial tolerance into
//! synthetic nodes and records each segment as an undirected edge.  The
//! network is rebuilt **wholesale** whenever the road list changes; there is
//! no incremental update, which keeps the clustering trivially consistent.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rn_core::{SegmentId, Vec3};

/// Subdivisions used when measuring a curved segment's length.
const CURVE_SAMPLES: u32 = 8;

// ── RoadSegment ───────────────────────────────────────────────────────────────

/// A raw road segment as produced by the legacy road tool.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    pub start: Vec3,
    pub end: Vec3,
    /// Control point of a quadratic Bezier for curved roads; `None` for
    /// straight segments.
    pub control: Option<Vec3>,
}

impl RoadSegment {
    pub fn straight(start: Vec3, end: Vec3) -> Self {
        Self { start, end, control: None }
    }

    pub fn curved(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self { start, end, control: Some(control) }
    }

    /// Point on the segment at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        match self.control {
            None => self.start.lerp(self.end, t),
            Some(c) => {
                // Quadratic Bezier: lerp the two leg interpolants.
                let a = self.start.lerp(c, t);
                let b = c.lerp(self.end, t);
                a.lerp(b, t)
            }
        }
    }

    /// Physical length; curved segments are measured along a sampled
    /// polyline of the Bezier (matching how their meshes are built).
    pub fn length(&self) -> f32 {
        match self.control {
            None => self.start.distance(self.end),
            Some(_) => {
                let mut total = 0.0;
                let mut prev = self.start;
                for i in 1..=CURVE_SAMPLES {
                    let p = self.point_at(i as f32 / CURVE_SAMPLES as f32);
                    total += prev.distance(p);
                    prev = p;
                }
                total
            }
        }
    }

    /// Midpoint (t = 0.5), on the curve for curved segments.
    pub fn midpoint(&self) -> Vec3 {
        self.point_at(0.5)
    }
}

// ── R-tree entry for synthetic nodes ──────────────────────────────────────────

#[derive(Clone, PartialEq)]
struct ClusterEntry {
    point: [f32; 2], // [x, z]
    index: usize,
}

impl RTreeObject for ClusterEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ClusterEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── SegmentNetwork ────────────────────────────────────────────────────────────

/// An edge incident to a synthetic node.
#[derive(Clone, Copy, Debug)]
struct SegmentLink {
    /// Index of the neighbor node.
    to: usize,
    /// Traversal cost (physical segment length).
    cost: f32,
    /// The segment this link came from.
    segment: SegmentId,
}

/// Undirected graph of clustered segment endpoints.
///
/// Node indices are positions in `positions`; adjacency lists are in
/// segment-insertion order.  Built by [`SegmentNetwork::build_from_roads`];
/// never mutated after construction.
pub struct SegmentNetwork {
    positions: Vec<Vec3>,
    adjacency: Vec<Vec<SegmentLink>>,
    spatial_idx: RTree<ClusterEntry>,
}

impl SegmentNetwork {
    /// An empty network.  Any plan request against it returns `None`.
    pub fn empty() -> Self {
        Self::build_from_roads(&[], 0.5)
    }

    /// Cluster segment endpoints within `tolerance` into synthetic nodes and
    /// record each segment as an undirected edge between its two clusters.
    ///
    /// Segments whose two endpoints cluster to the same node (shorter than
    /// the tolerance) are dropped — a zero-length edge cannot be traversed.
    pub fn build_from_roads(segments: &[RoadSegment], tolerance: f32) -> Self {
        let mut positions: Vec<Vec3> = Vec::new();
        let tol_sq = tolerance * tolerance;

        // Linear-scan clustering: segment counts are small and the network
        // is rebuilt rarely (only when the road list changes).
        let mut cluster = |p: Vec3, positions: &mut Vec<Vec3>| -> usize {
            for (i, existing) in positions.iter().enumerate() {
                if existing.distance_sq(p) <= tol_sq {
                    return i;
                }
            }
            positions.push(p);
            positions.len() - 1
        };

        let mut adjacency: Vec<Vec<SegmentLink>> = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            let a = cluster(seg.start, &mut positions);
            let b = cluster(seg.end, &mut positions);
            adjacency.resize(positions.len(), Vec::new());
            if a == b {
                continue;
            }
            let cost = seg.length();
            let segment = SegmentId(i as u32);
            adjacency[a].push(SegmentLink { to: b, cost, segment });
            adjacency[b].push(SegmentLink { to: a, cost, segment });
        }
        adjacency.resize(positions.len(), Vec::new());

        // Bulk-load the R-tree once — O(N log N), faster than N inserts.
        let entries: Vec<ClusterEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| ClusterEntry { point: [p.x, p.z], index: i })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Self { positions, adjacency, spatial_idx }
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of synthetic node `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Neighbors of node `index` as `(neighbor, cost, segment)` triples.
    pub fn neighbors(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (usize, f32, SegmentId)> + '_ {
        self.adjacency[index]
            .iter()
            .map(|l| (l.to, l.cost, l.segment))
    }

    /// Nearest synthetic node to `pos` — no maximum radius, so this always
    /// resolves unless the network is empty.
    pub fn nearest_node(&self, pos: Vec3) -> Option<usize> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.z])
            .map(|e| e.index)
    }
}
