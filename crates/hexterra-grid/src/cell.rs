//! Per-cell state stored in the grid arena.

use glam::Vec3;
use hexterra_coords::{CubeCoord, HexDirection};
use hexterra_metrics::Color;

use crate::RegionId;

/// Stable handle to a cell in a [`HexGrid`](crate::HexGrid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    /// Arena index of this cell.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single hex cell.
///
/// Read-only outside the grid; edits go through [`HexGrid`](crate::HexGrid)
/// so adjacency and dirty tracking stay consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct HexCell {
    pub(crate) coordinates: CubeCoord,
    /// `None` until the first assignment, so assigning any value (including
    /// zero) to a fresh cell registers as a change.
    pub(crate) elevation: Option<i32>,
    pub(crate) color: Color,
    pub(crate) position: Vec3,
    pub(crate) neighbors: [Option<CellId>; 6],
    pub(crate) region: RegionId,
    pub(crate) incoming_river: Option<HexDirection>,
    pub(crate) outgoing_river: Option<HexDirection>,
}

impl HexCell {
    pub(crate) fn new(coordinates: CubeCoord, position: Vec3, region: RegionId) -> Self {
        Self {
            coordinates,
            elevation: None,
            color: Color::WHITE,
            position,
            neighbors: [None; 6],
            region,
            incoming_river: None,
            outgoing_river: None,
        }
    }

    pub fn coordinates(&self) -> CubeCoord {
        self.coordinates
    }

    /// Elevation level. Cells never assigned an elevation report zero.
    pub fn elevation(&self) -> i32 {
        self.elevation.unwrap_or(0)
    }

    /// Returns `true` once an elevation has been assigned.
    pub fn has_elevation(&self) -> bool {
        self.elevation.is_some()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// World-space center, including the height jitter of the current elevation.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The neighbor handle in `direction`, absent at grid borders.
    pub fn neighbor(&self, direction: HexDirection) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// The region this cell's geometry belongs to.
    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn incoming_river(&self) -> Option<HexDirection> {
        self.incoming_river
    }

    pub fn outgoing_river(&self) -> Option<HexDirection> {
        self.outgoing_river
    }

    pub fn has_incoming_river(&self) -> bool {
        self.incoming_river.is_some()
    }

    pub fn has_outgoing_river(&self) -> bool {
        self.outgoing_river.is_some()
    }

    /// Returns `true` if any river enters or leaves this cell.
    pub fn has_river(&self) -> bool {
        self.has_incoming_river() || self.has_outgoing_river()
    }

    /// Returns `true` if a river starts or ends here (exactly one of in/out).
    pub fn has_river_begin_or_end(&self) -> bool {
        self.has_incoming_river() != self.has_outgoing_river()
    }

    /// Returns `true` if a river crosses the edge facing `direction`.
    pub fn has_river_through_edge(&self, direction: HexDirection) -> bool {
        self.incoming_river == Some(direction) || self.outgoing_river == Some(direction)
    }
}
