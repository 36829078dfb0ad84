//! Corner case analysis.
//!
//! A corner joins three cells. After sorting so the lowest cell is `bottom`
//! (with `left` and `right` following clockwise), the three pairwise edge
//! types pick one of four constructions. Each construction is drawn from a
//! rotated view of the corner, described here by which input plays which role.

use hexterra_metrics::EdgeType;

/// One of the three cells around a corner, as passed to [`plan_corner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerRole {
    Bottom,
    Left,
    Right,
}

/// The rotation a construction is drawn with: which input cell acts as the
/// construction's `begin`, `left`, and `right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerRoles {
    pub begin: CornerRole,
    pub left: CornerRole,
    pub right: CornerRole,
}

impl CornerRoles {
    const fn new(begin: CornerRole, left: CornerRole, right: CornerRole) -> Self {
        Self { begin, left, right }
    }

    /// Reorders `(bottom, left, right)` values into `(begin, left, right)`.
    pub fn apply<T: Copy>(&self, bottom: T, left: T, right: T) -> (T, T, T) {
        let pick = |role| match role {
            CornerRole::Bottom => bottom,
            CornerRole::Left => left,
            CornerRole::Right => right,
        };
        (pick(self.begin), pick(self.left), pick(self.right))
    }
}

use CornerRole::{Bottom as B, Left as L, Right as R};

/// How to triangulate a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerPlan {
    /// Two slopes meet at `begin`: terrace both sides into a stepped wedge.
    Terraces(CornerRoles),
    /// Slope from `begin` to `left`, cliff from `begin` to `right`.
    TerracesCliff(CornerRoles),
    /// Cliff from `begin` to `left`, slope from `begin` to `right`.
    CliffTerraces(CornerRoles),
    /// No slope anywhere: a single flat-shaded triangle.
    Triangle,
}

/// Picks the corner construction for cells at the given elevations.
///
/// `bottom` must be the lowest of the three.
pub fn plan_corner(bottom: i32, left: i32, right: i32) -> CornerPlan {
    debug_assert!(bottom <= left && bottom <= right);

    let left_edge = EdgeType::between(bottom, left);
    let right_edge = EdgeType::between(bottom, right);

    match (left_edge, right_edge) {
        (EdgeType::Slope, EdgeType::Slope) => CornerPlan::Terraces(CornerRoles::new(B, L, R)),
        (EdgeType::Slope, EdgeType::Flat) => CornerPlan::Terraces(CornerRoles::new(L, R, B)),
        (EdgeType::Slope, EdgeType::Cliff) => {
            CornerPlan::TerracesCliff(CornerRoles::new(B, L, R))
        }
        (EdgeType::Flat, EdgeType::Slope) => CornerPlan::Terraces(CornerRoles::new(R, B, L)),
        (EdgeType::Cliff, EdgeType::Slope) => {
            CornerPlan::CliffTerraces(CornerRoles::new(B, L, R))
        }
        _ if EdgeType::between(left, right) == EdgeType::Slope => {
            if left < right {
                CornerPlan::CliffTerraces(CornerRoles::new(R, B, L))
            } else {
                CornerPlan::TerracesCliff(CornerRoles::new(L, R, B))
            }
        }
        _ => CornerPlan::Triangle,
    }
}
