//! River edits. A river leaves one cell through an edge and enters the
//! neighbor across it; each cell holds at most one incoming and one outgoing
//! river.

use hexterra_coords::HexDirection;
use hexterra_metrics::NoiseSource;

use crate::{CellId, HexGrid};

impl<N: NoiseSource> HexGrid<N> {
    /// Starts a river flowing out of `id` toward its neighbor in `direction`.
    ///
    /// Silently ignored when the neighbor is missing or higher than the source.
    /// Replaces any previous outgoing river, and an incoming river through the
    /// same edge, since an edge cannot carry water both ways. Returns `true` if
    /// the river was placed.
    pub fn set_outgoing_river(&mut self, id: CellId, direction: HexDirection) -> bool {
        let Some(cell) = self.cell(id) else {
            tracing::warn!("set_outgoing_river on unknown cell {:?}", id);
            return false;
        };
        if cell.outgoing_river == Some(direction) {
            return false;
        }
        let Some(neighbor) = cell.neighbor(direction) else {
            tracing::debug!(cell = ?id, %direction, "river rejected: no neighbor");
            return false;
        };
        let source_elevation = cell.elevation();
        let target_elevation = self.cells[neighbor.index()].elevation();
        if target_elevation > source_elevation {
            tracing::debug!(
                cell = ?id,
                %direction,
                source_elevation,
                target_elevation,
                "river rejected: uphill"
            );
            return false;
        }

        self.remove_outgoing_river(id);
        if self.cells[id.index()].incoming_river == Some(direction) {
            self.remove_incoming_river(id);
        }
        self.cells[id.index()].outgoing_river = Some(direction);
        self.refresh_self_only(id);

        self.remove_incoming_river(neighbor);
        self.cells[neighbor.index()].incoming_river = Some(direction.opposite());
        self.refresh_self_only(neighbor);

        tracing::trace!(cell = ?id, %direction, "river placed");
        true
    }

    /// Removes the river leaving `id`, and the matching incoming river on the
    /// downstream neighbor.
    pub fn remove_outgoing_river(&mut self, id: CellId) {
        let Some(direction) = self.cell(id).and_then(|c| c.outgoing_river) else {
            return;
        };
        self.cells[id.index()].outgoing_river = None;
        self.refresh_self_only(id);

        if let Some(neighbor) = self.cells[id.index()].neighbor(direction) {
            self.cells[neighbor.index()].incoming_river = None;
            self.refresh_self_only(neighbor);
        }
    }

    /// Removes the river entering `id`, and the matching outgoing river on the
    /// upstream neighbor.
    pub fn remove_incoming_river(&mut self, id: CellId) {
        let Some(direction) = self.cell(id).and_then(|c| c.incoming_river) else {
            return;
        };
        self.cells[id.index()].incoming_river = None;
        self.refresh_self_only(id);

        if let Some(neighbor) = self.cells[id.index()].neighbor(direction) {
            self.cells[neighbor.index()].outgoing_river = None;
            self.refresh_self_only(neighbor);
        }
    }

    /// Removes both rivers of `id`.
    pub fn remove_river(&mut self, id: CellId) {
        self.remove_outgoing_river(id);
        self.remove_incoming_river(id);
    }

    /// Drops rivers at `id` that an elevation edit has turned uphill.
    ///
    /// Elevation edits never call this; callers that want rivers to stay
    /// downhill invoke it after changing elevations. Returns `true` if a river
    /// was removed.
    pub fn remove_illegal_rivers(&mut self, id: CellId) -> bool {
        let Some(cell) = self.cell(id) else {
            return false;
        };
        let elevation = cell.elevation();
        let outgoing = cell
            .outgoing_river
            .and_then(|dir| cell.neighbor(dir))
            .map(|n| self.cells[n.index()].elevation());
        let incoming = cell
            .incoming_river
            .and_then(|dir| cell.neighbor(dir))
            .map(|n| self.cells[n.index()].elevation());

        let mut removed = false;
        if outgoing.is_some_and(|target| target > elevation) {
            self.remove_outgoing_river(id);
            removed = true;
        }
        if incoming.is_some_and(|source| source < elevation) {
            self.remove_incoming_river(id);
            removed = true;
        }
        removed
    }

    /// Returns `true` if a river crosses the edge of `id` facing `direction`.
    pub fn has_river_through_edge(&self, id: CellId, direction: HexDirection) -> bool {
        self.cell(id)
            .is_some_and(|c| c.has_river_through_edge(direction))
    }
}

#[cfg(test)]
mod tests {
    use hexterra_metrics::{HexMetrics, UniformNoise};

    use super::*;
    use crate::RegionId;

    fn grid() -> HexGrid<UniformNoise> {
        HexGrid::new(1, 1, HexMetrics::default(), UniformNoise::default()).unwrap()
    }

    fn center(g: &HexGrid<UniformNoise>) -> CellId {
        g.cell_at_offset(2, 2).unwrap()
    }

    #[test]
    fn test_level_river_links_both_cells() {
        let mut g = grid();
        let a = center(&g);
        let b = g.neighbor(a, HexDirection::E).unwrap();

        assert!(g.set_outgoing_river(a, HexDirection::E));
        assert_eq!(g.cell(a).unwrap().outgoing_river(), Some(HexDirection::E));
        assert_eq!(g.cell(b).unwrap().incoming_river(), Some(HexDirection::W));
        assert!(g.has_river_through_edge(a, HexDirection::E));
        assert!(g.has_river_through_edge(b, HexDirection::W));
    }

    #[test]
    fn test_uphill_river_rejected() {
        let mut g = grid();
        let a = center(&g);
        let b = g.neighbor(a, HexDirection::NE).unwrap();
        g.set_elevation(b, 1);

        assert!(!g.set_outgoing_river(a, HexDirection::NE));
        assert!(!g.cell(a).unwrap().has_river());
        assert!(!g.cell(b).unwrap().has_river());
    }

    #[test]
    fn test_downhill_river_keeps_grade() {
        for (i, dir) in HexDirection::ALL.into_iter().enumerate() {
            let mut g = grid();
            let a = center(&g);
            g.set_elevation(a, 2);
            // Raise every other neighbor above the source.
            let target = g.neighbor(a, dir).unwrap();
            g.set_elevation(target, if i % 2 == 0 { 1 } else { 3 });

            let placed = g.set_outgoing_river(a, dir);
            assert_eq!(placed, i % 2 == 0);
            if placed {
                assert!(g.cell(a).unwrap().elevation() >= g.cell(target).unwrap().elevation());
            }
        }
    }

    #[test]
    fn test_missing_neighbor_rejected() {
        let mut g = grid();
        let corner = g.cell_at_offset(0, 0).unwrap();
        assert!(!g.set_outgoing_river(corner, HexDirection::W));
        assert!(!g.cell(corner).unwrap().has_river());
    }

    #[test]
    fn test_replacing_outgoing_river_clears_old_target() {
        let mut g = grid();
        let a = center(&g);
        let east = g.neighbor(a, HexDirection::E).unwrap();
        let west = g.neighbor(a, HexDirection::W).unwrap();

        g.set_outgoing_river(a, HexDirection::E);
        g.set_outgoing_river(a, HexDirection::W);
        assert!(!g.cell(east).unwrap().has_incoming_river());
        assert_eq!(g.cell(west).unwrap().incoming_river(), Some(HexDirection::E));
    }

    #[test]
    fn test_reversing_flow_through_edge() {
        let mut g = grid();
        let a = center(&g);
        let b = g.neighbor(a, HexDirection::E).unwrap();

        g.set_outgoing_river(b, HexDirection::W);
        assert_eq!(g.cell(a).unwrap().incoming_river(), Some(HexDirection::E));

        // Flowing back out through the same edge replaces the incoming river.
        assert!(g.set_outgoing_river(a, HexDirection::E));
        assert_eq!(g.cell(a).unwrap().incoming_river(), None);
        assert_eq!(g.cell(a).unwrap().outgoing_river(), Some(HexDirection::E));
        assert_eq!(g.cell(b).unwrap().outgoing_river(), None);
        assert_eq!(g.cell(b).unwrap().incoming_river(), Some(HexDirection::W));
    }

    #[test]
    fn test_new_river_into_cell_replaces_previous_source() {
        let mut g = grid();
        let a = center(&g);
        let target = g.neighbor(a, HexDirection::E).unwrap();
        let other = g.neighbor(target, HexDirection::NE).unwrap();

        g.set_outgoing_river(a, HexDirection::E);
        g.set_outgoing_river(other, HexDirection::SW);
        assert_eq!(g.cell(a).unwrap().outgoing_river(), None);
        assert_eq!(
            g.cell(target).unwrap().incoming_river(),
            Some(HexDirection::NE)
        );
    }

    #[test]
    fn test_same_river_twice_is_noop() {
        let mut g = grid();
        let a = center(&g);
        assert!(g.set_outgoing_river(a, HexDirection::E));
        g.take_dirty();
        assert!(!g.set_outgoing_river(a, HexDirection::E));
        assert!(g.dirty().is_empty());
    }

    #[test]
    fn test_remove_river_marks_only_own_regions() {
        let metrics = HexMetrics {
            chunk_size_x: 2,
            chunk_size_z: 2,
            ..HexMetrics::default()
        };
        let mut g = HexGrid::new(2, 2, metrics, UniformNoise::default()).unwrap();
        let a = g.cell_at_offset(0, 0).unwrap();
        g.set_outgoing_river(a, HexDirection::E);
        g.take_dirty();

        g.remove_river(a);
        assert_eq!(g.take_dirty(), vec![RegionId(0)]);
        let b = g.neighbor(a, HexDirection::E).unwrap();
        assert!(!g.cell(b).unwrap().has_river());
    }

    #[test]
    fn test_elevation_edit_does_not_repair_rivers() {
        let mut g = grid();
        let a = center(&g);
        let b = g.neighbor(a, HexDirection::E).unwrap();
        g.set_outgoing_river(a, HexDirection::E);

        g.set_elevation(b, 3);
        assert_eq!(g.cell(a).unwrap().outgoing_river(), Some(HexDirection::E));

        assert!(g.remove_illegal_rivers(a));
        assert!(!g.cell(a).unwrap().has_river());
        assert!(!g.cell(b).unwrap().has_river());
        assert!(!g.remove_illegal_rivers(a));
    }

    #[test]
    fn test_remove_illegal_incoming_river() {
        let mut g = grid();
        let a = center(&g);
        let b = g.neighbor(a, HexDirection::E).unwrap();
        g.set_outgoing_river(a, HexDirection::E);

        // Raising the downstream cell above its source invalidates the inflow.
        g.set_elevation(b, 1);
        assert!(g.remove_illegal_rivers(b));
        assert!(!g.cell(a).unwrap().has_outgoing_river());
    }
}
