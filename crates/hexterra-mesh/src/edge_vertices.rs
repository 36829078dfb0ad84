//! Four points sampled along one hexagon edge.

use glam::Vec3;
use hexterra_metrics::HexMetrics;

/// An edge split into three segments: the two endpoints plus points at one
/// and two thirds along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeVertices {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub v4: Vec3,
}

impl EdgeVertices {
    /// Subdivides the edge from `corner1` to `corner2`.
    pub fn new(corner1: Vec3, corner2: Vec3) -> Self {
        Self {
            v1: corner1,
            v2: corner1.lerp(corner2, 1.0 / 3.0),
            v3: corner1.lerp(corner2, 2.0 / 3.0),
            v4: corner2,
        }
    }

    /// Applies [`HexMetrics::terrace_lerp`] to each of the four points.
    pub fn terrace_lerp(a: &Self, b: &Self, step: u32, metrics: &HexMetrics) -> Self {
        Self {
            v1: metrics.terrace_lerp(a.v1, b.v1, step),
            v2: metrics.terrace_lerp(a.v2, b.v2, step),
            v3: metrics.terrace_lerp(a.v3, b.v3, step),
            v4: metrics.terrace_lerp(a.v4, b.v4, step),
        }
    }

    pub fn to_array(self) -> [Vec3; 4] {
        [self.v1, self.v2, self.v3, self.v4]
    }
}
