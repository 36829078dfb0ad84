//! The cell arena: construction, lookups, adjacency, and elevation/color edits.

use glam::Vec3;
use hexterra_coords::{CubeCoord, HexDirection};
use hexterra_metrics::{Color, EdgeType, HexMetrics, NoiseSource};

use crate::{CellId, DirtyRegions, GridError, HexCell, RegionId};

/// A rectangular hex map made of chunk-sized regions.
///
/// Cells are stored row-major by offset position. Each cell belongs to exactly
/// one region; regions are the unit of retriangulation.
pub struct HexGrid<N> {
    metrics: HexMetrics,
    noise: N,
    width: u32,
    height: u32,
    chunk_count_x: u32,
    pub(crate) cells: Vec<HexCell>,
    regions: Vec<Vec<CellId>>,
    dirty: DirtyRegions,
}

impl<N: NoiseSource> HexGrid<N> {
    /// Builds a grid of `chunk_count_x × chunk_count_z` regions, each
    /// `metrics.chunk_size_x × metrics.chunk_size_z` cells.
    ///
    /// Every cell starts white at elevation zero, fully linked to its
    /// neighbors, and every region starts dirty.
    pub fn new(
        chunk_count_x: u32,
        chunk_count_z: u32,
        metrics: HexMetrics,
        noise: N,
    ) -> Result<Self, GridError> {
        metrics.validate()?;
        if chunk_count_x == 0 || chunk_count_z == 0 {
            return Err(GridError::Empty(chunk_count_x, chunk_count_z));
        }

        let Some((width, height)) = metrics.grid_dimensions(chunk_count_x, chunk_count_z) else {
            return Err(GridError::TooLarge(chunk_count_x, chunk_count_z));
        };
        let region_count = chunk_count_x as usize * chunk_count_z as usize;

        let mut grid = Self {
            metrics,
            noise,
            width,
            height,
            chunk_count_x,
            cells: Vec::with_capacity(width as usize * height as usize),
            regions: vec![Vec::new(); region_count],
            dirty: DirtyRegions::new(),
        };

        for row in 0..height as i32 {
            for col in 0..width as i32 {
                grid.create_cell(col, row);
            }
        }

        for index in 0..grid.cells.len() {
            grid.set_elevation(CellId(index as u32), 0);
        }

        tracing::debug!(
            "Created hex grid: {}x{} cells in {} regions",
            width,
            height,
            region_count
        );
        Ok(grid)
    }

    fn create_cell(&mut self, col: i32, row: i32) {
        let id = CellId(self.cells.len() as u32);
        let region = RegionId(
            (row as u32 / self.metrics.chunk_size_z) * self.chunk_count_x
                + col as u32 / self.metrics.chunk_size_x,
        );
        let position = self.metrics.cell_position(col, row);
        self.cells.push(HexCell::new(
            CubeCoord::from_offset(col, row),
            position,
            region,
        ));
        self.regions[region.0 as usize].push(id);

        let w = self.width as i32;
        if col > 0 {
            self.link(id, HexDirection::W, CellId(id.0 - 1));
        }
        if row > 0 {
            let below = id.0 - self.width;
            if row & 1 == 0 {
                self.link(id, HexDirection::SE, CellId(below));
                if col > 0 {
                    self.link(id, HexDirection::SW, CellId(below - 1));
                }
            } else {
                self.link(id, HexDirection::SW, CellId(below));
                if col < w - 1 {
                    self.link(id, HexDirection::SE, CellId(below + 1));
                }
            }
        }
    }

    /// Re-derives a cell's height from its elevation and the noise field.
    fn update_height(&mut self, id: CellId, elevation: i32) {
        let mut position = self.cells[id.index()].position;
        position.y = elevation as f32 * self.metrics.elevation_step
            + self.metrics.elevation_offset(&self.noise, position);
        self.cells[id.index()].position = position;
    }

    /// Sets a cell's elevation and marks its region, plus every neighboring
    /// region that differs, as dirty.
    ///
    /// Returns `false` if the value is unchanged or the handle is unknown.
    /// Existing rivers are left alone even if the new grade makes them flow
    /// uphill; see [`remove_illegal_rivers`](Self::remove_illegal_rivers).
    pub fn set_elevation(&mut self, id: CellId, elevation: i32) -> bool {
        let Some(cell) = self.cells.get_mut(id.index()) else {
            tracing::warn!("set_elevation on unknown cell {:?}", id);
            return false;
        };
        if cell.elevation == Some(elevation) {
            return false;
        }
        cell.elevation = Some(elevation);
        self.update_height(id, elevation);
        self.refresh(id);
        tracing::trace!(cell = ?id, elevation, "elevation changed");
        true
    }

    /// Sets a cell's color with the same dirty marking as elevation edits.
    pub fn set_color(&mut self, id: CellId, color: Color) -> bool {
        let Some(cell) = self.cells.get_mut(id.index()) else {
            tracing::warn!("set_color on unknown cell {:?}", id);
            return false;
        };
        if cell.color == color {
            return false;
        }
        cell.color = color;
        self.refresh(id);
        tracing::trace!(cell = ?id, ?color, "color changed");
        true
    }

    /// Links `a` to `b` in `direction`, and `b` back to `a` in the opposite
    /// direction.
    ///
    /// Any previous partners on either side are unlinked first so adjacency
    /// stays symmetric.
    pub fn set_neighbor(
        &mut self,
        a: CellId,
        direction: HexDirection,
        b: CellId,
    ) -> Result<(), GridError> {
        for id in [a, b] {
            if id.index() >= self.cells.len() {
                return Err(GridError::UnknownCell(id));
            }
        }
        if a == b {
            return Err(GridError::SelfLink(a));
        }
        self.link(a, direction, b);
        self.dirty.mark(self.cells[a.index()].region);
        self.dirty.mark(self.cells[b.index()].region);
        Ok(())
    }

    fn link(&mut self, a: CellId, direction: HexDirection, b: CellId) {
        let opposite = direction.opposite();

        if let Some(old) = self.cells[a.index()].neighbors[direction.index()]
            && old != b
        {
            self.cells[old.index()].neighbors[opposite.index()] = None;
            self.dirty.mark(self.cells[old.index()].region);
        }
        if let Some(old) = self.cells[b.index()].neighbors[opposite.index()]
            && old != a
        {
            self.cells[old.index()].neighbors[direction.index()] = None;
            self.dirty.mark(self.cells[old.index()].region);
        }

        self.cells[a.index()].neighbors[direction.index()] = Some(b);
        self.cells[b.index()].neighbors[opposite.index()] = Some(a);

        debug_assert!(self.is_symmetric(a) && self.is_symmetric(b));
    }

    /// Returns `true` if every neighbor of `id` links back to it.
    pub fn is_symmetric(&self, id: CellId) -> bool {
        let Some(cell) = self.cell(id) else {
            return false;
        };
        HexDirection::ALL.iter().all(|&dir| match cell.neighbor(dir) {
            Some(other) => self.cells[other.index()].neighbor(dir.opposite()) == Some(id),
            None => true,
        })
    }

    /// Marks the cell's region and every differing neighbor region dirty, since
    /// the blend geometry on a region border belongs to either side.
    pub(crate) fn refresh(&mut self, id: CellId) {
        let cell = &self.cells[id.index()];
        let own = cell.region;
        let neighbors = cell.neighbors;
        self.dirty.mark(own);
        for neighbor in neighbors.into_iter().flatten() {
            let region = self.cells[neighbor.index()].region;
            if region != own {
                self.dirty.mark(region);
            }
        }
    }

    /// Marks only the cell's own region dirty.
    pub(crate) fn refresh_self_only(&mut self, id: CellId) {
        let region = self.cells[id.index()].region;
        self.dirty.mark(region);
    }
}

impl<N> HexGrid<N> {
    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    /// The noise field used for height and vertex jitter.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id.index())
    }

    /// Iterates all cells with their handles, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &HexCell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (CellId(i as u32), cell))
    }

    /// Looks up a cell by offset position.
    pub fn cell_at_offset(&self, col: i32, row: i32) -> Option<CellId> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(CellId(row as u32 * self.width + col as u32))
    }

    /// Looks up a cell by cube coordinate.
    pub fn cell_at(&self, coordinates: CubeCoord) -> Option<CellId> {
        let (col, row) = coordinates.to_offset();
        self.cell_at_offset(col, row)
    }

    /// Finds the cell under a world-space point.
    pub fn cell_at_position(&self, position: Vec3) -> Option<CellId> {
        self.cell_at(CubeCoord::from_position(
            position,
            self.metrics.outer_radius,
        ))
    }

    /// Every existing cell within `radius` steps of `center`.
    ///
    /// Radii whose area exceeds the grid scan the cells instead of the area.
    pub fn cells_within(&self, center: CubeCoord, radius: u32) -> Vec<CellId> {
        match CubeCoord::count_within(radius) {
            Some(count) if count <= self.cells.len() => center
                .within(radius)
                .into_iter()
                .filter_map(|coord| self.cell_at(coord))
                .collect(),
            _ => self
                .cells()
                .filter(|(_, cell)| center.distance_to(cell.coordinates()) <= radius)
                .map(|(id, _)| id)
                .collect(),
        }
    }

    /// The neighbor of `id` in `direction`, if both exist.
    pub fn neighbor(&self, id: CellId, direction: HexDirection) -> Option<CellId> {
        self.cell(id)?.neighbor(direction)
    }

    /// Edge classification between two cells' elevations.
    pub fn edge_type(&self, a: CellId, b: CellId) -> Option<EdgeType> {
        let a = self.cell(a)?;
        let b = self.cell(b)?;
        Some(self.metrics.edge_type(a.elevation(), b.elevation()))
    }

    /// Edge classification between a cell and its neighbor in `direction`.
    pub fn edge_type_toward(&self, id: CellId, direction: HexDirection) -> Option<EdgeType> {
        let neighbor = self.neighbor(id, direction)?;
        self.edge_type(id, neighbor)
    }

    /// Number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// All region ids in ascending order.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len() as u32).map(RegionId)
    }

    /// Cells belonging to `region`, row-major. Empty for unknown regions.
    pub fn region_cells(&self, region: RegionId) -> &[CellId] {
        self.regions
            .get(region.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn dirty(&self) -> &DirtyRegions {
        &self.dirty
    }

    /// Drains the dirty set, returning regions in ascending order.
    pub fn take_dirty(&mut self) -> Vec<RegionId> {
        self.dirty.take()
    }
}

#[cfg(test)]
mod tests {
    use hexterra_metrics::UniformNoise;

    use super::*;

    fn grid(cx: u32, cz: u32) -> HexGrid<UniformNoise> {
        HexGrid::new(cx, cz, HexMetrics::default(), UniformNoise::default()).unwrap()
    }

    fn small_metrics() -> HexMetrics {
        HexMetrics {
            chunk_size_x: 2,
            chunk_size_z: 2,
            ..HexMetrics::default()
        }
    }

    #[test]
    fn test_construction_sizes() {
        let g = grid(2, 3);
        assert_eq!(g.width(), 10);
        assert_eq!(g.height(), 15);
        assert_eq!(g.len(), 150);
        assert_eq!(g.region_count(), 6);
        assert!(g.regions().all(|r| g.region_cells(r).len() == 25));
    }

    #[test]
    fn test_construction_rejects_empty() {
        let result = HexGrid::new(0, 1, HexMetrics::default(), UniformNoise::default());
        assert!(matches!(result, Err(GridError::Empty(0, 1))));
    }

    #[test]
    fn test_construction_rejects_oversized_grid() {
        let result = HexGrid::new(u32::MAX, 1, HexMetrics::default(), UniformNoise::default());
        assert!(matches!(result, Err(GridError::TooLarge(u32::MAX, 1))));

        let result = HexGrid::new(70_000, 70_000, HexMetrics::default(), UniformNoise::default());
        assert!(matches!(result, Err(GridError::TooLarge(70_000, 70_000))));
    }

    #[test]
    fn test_construction_rejects_invalid_metrics() {
        let metrics = HexMetrics {
            terraces_per_slope: 0,
            ..HexMetrics::default()
        };
        let result = HexGrid::new(1, 1, metrics, UniformNoise::default());
        assert!(matches!(result, Err(GridError::InvalidMetrics(_))));
    }

    #[test]
    fn test_all_cells_start_at_zero_and_dirty() {
        let g = grid(2, 2);
        assert!(g.cells().all(|(_, c)| c.has_elevation() && c.elevation() == 0));
        assert_eq!(g.dirty().len(), 4);
    }

    #[test]
    fn test_adjacency_symmetric_after_construction() {
        let g = grid(2, 2);
        for (id, cell) in g.cells() {
            assert!(g.is_symmetric(id));
            for dir in HexDirection::ALL {
                if let Some(n) = cell.neighbor(dir) {
                    let other = g.cell(n).unwrap();
                    assert_eq!(cell.coordinates().neighbor(dir), other.coordinates());
                }
            }
        }
    }

    #[test]
    fn test_interior_cell_has_six_neighbors() {
        let g = grid(1, 1);
        let id = g.cell_at_offset(2, 2).unwrap();
        let cell = g.cell(id).unwrap();
        assert!(HexDirection::ALL.iter().all(|d| cell.neighbor(*d).is_some()));

        let corner = g.cell(g.cell_at_offset(0, 0).unwrap()).unwrap();
        assert!(corner.neighbor(HexDirection::W).is_none());
        assert!(corner.neighbor(HexDirection::SW).is_none());
        assert!(corner.neighbor(HexDirection::E).is_some());
        assert!(corner.neighbor(HexDirection::NE).is_some());
    }

    #[test]
    fn test_lookup_by_coordinates_and_position() {
        let g = grid(1, 1);
        let id = g.cell_at_offset(3, 4).unwrap();
        let cell = g.cell(id).unwrap();
        assert_eq!(g.cell_at(cell.coordinates()), Some(id));
        assert_eq!(g.cell_at_position(cell.position()), Some(id));
        assert_eq!(g.cell_at_offset(5, 0), None);
        assert_eq!(g.cell_at_offset(-1, 0), None);
        assert_eq!(g.cell_at(CubeCoord::new(-10, -10)), None);
    }

    #[test]
    fn test_cells_within_clips_to_grid() {
        let g = grid(1, 1);
        let center = g.cell(g.cell_at_offset(2, 2).unwrap()).unwrap().coordinates();
        assert_eq!(g.cells_within(center, 1).len(), 7);
        let corner = g.cell(g.cell_at_offset(0, 0).unwrap()).unwrap().coordinates();
        assert_eq!(g.cells_within(corner, 1).len(), 3);
    }

    #[test]
    fn test_cells_within_huge_radius_covers_grid() {
        let g = grid(1, 1);
        let corner = g.cell(g.cell_at_offset(0, 0).unwrap()).unwrap().coordinates();
        assert_eq!(g.cells_within(corner, 100).len(), 25);
        assert_eq!(g.cells_within(corner, u32::MAX).len(), 25);
        assert!(g.cells_within(CubeCoord::new(1_000, 1_000), 10).is_empty());
    }

    #[test]
    fn test_set_elevation_updates_height_and_noops_when_unchanged() {
        let mut g = grid(1, 1);
        g.take_dirty();
        let id = g.cell_at_offset(1, 1).unwrap();

        assert!(g.set_elevation(id, 2));
        assert_eq!(g.cell(id).unwrap().position().y, 6.0);
        assert_eq!(g.take_dirty(), vec![RegionId(0)]);

        assert!(!g.set_elevation(id, 2));
        assert!(g.dirty().is_empty());
    }

    #[test]
    fn test_elevation_jitter_from_noise() {
        let noise = UniformNoise(glam::Vec4::new(0.5, 1.0, 0.5, 0.5));
        let mut g = HexGrid::new(1, 1, HexMetrics::default(), noise).unwrap();
        let id = g.cell_at_offset(0, 0).unwrap();
        g.set_elevation(id, 1);
        assert_eq!(g.cell(id).unwrap().position().y, 3.0 + 1.5);
    }

    #[test]
    fn test_boundary_edit_marks_neighbor_region() {
        let mut g = HexGrid::new(2, 2, small_metrics(), UniformNoise::default()).unwrap();
        g.take_dirty();

        // (1, 1) is the top-right cell of region 0, bordering regions 1, 2 and 3.
        let id = g.cell_at_offset(1, 1).unwrap();
        g.set_elevation(id, 1);
        let dirty = g.take_dirty();
        assert!(dirty.contains(&RegionId(0)));
        assert!(dirty.contains(&RegionId(1)));
        assert!(dirty.contains(&RegionId(2)));
        assert!(dirty.contains(&RegionId(3)));

        // (0, 0) touches only its own region.
        let id = g.cell_at_offset(0, 0).unwrap();
        g.set_color(id, Color::GREEN);
        assert_eq!(g.take_dirty(), vec![RegionId(0)]);
    }

    #[test]
    fn test_set_color_noop_when_unchanged() {
        let mut g = grid(1, 1);
        g.take_dirty();
        let id = g.cell_at_offset(0, 0).unwrap();
        assert!(!g.set_color(id, Color::WHITE));
        assert!(g.dirty().is_empty());
        assert!(g.set_color(id, Color::BLUE));
        assert_eq!(g.cell(id).unwrap().color(), Color::BLUE);
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut g = grid(1, 1);
        let bogus = CellId(10_000);
        assert!(!g.set_elevation(bogus, 3));
        assert!(!g.set_color(bogus, Color::BLACK));
        assert!(g.cell(bogus).is_none());
        assert_eq!(g.neighbor(bogus, HexDirection::E), None);
        assert_eq!(
            g.set_neighbor(bogus, HexDirection::E, CellId(0)),
            Err(GridError::UnknownCell(bogus))
        );
    }

    #[test]
    fn test_set_neighbor_is_symmetric_and_unlinks_old_partners() {
        let mut g = grid(1, 1);
        let a = g.cell_at_offset(0, 0).unwrap();
        let b = g.cell_at_offset(4, 4).unwrap();
        let old_east = g.neighbor(a, HexDirection::E).unwrap();

        g.set_neighbor(a, HexDirection::E, b).unwrap();
        assert_eq!(g.neighbor(a, HexDirection::E), Some(b));
        assert_eq!(g.neighbor(b, HexDirection::W), Some(a));
        assert_eq!(g.neighbor(old_east, HexDirection::W), None);
        for (id, _) in g.cells() {
            assert!(g.is_symmetric(id));
        }
    }

    #[test]
    fn test_set_neighbor_rejects_self_link() {
        let mut g = grid(1, 1);
        let a = CellId(0);
        assert_eq!(
            g.set_neighbor(a, HexDirection::E, a),
            Err(GridError::SelfLink(a))
        );
    }

    #[test]
    fn test_edge_types() {
        let mut g = grid(1, 1);
        let a = g.cell_at_offset(1, 1).unwrap();
        let b = g.neighbor(a, HexDirection::E).unwrap();
        assert_eq!(g.edge_type(a, b), Some(EdgeType::Flat));
        g.set_elevation(b, 1);
        assert_eq!(g.edge_type_toward(a, HexDirection::E), Some(EdgeType::Slope));
        g.set_elevation(b, 3);
        assert_eq!(g.edge_type(b, a), Some(EdgeType::Cliff));
        assert_eq!(g.edge_type_toward(CellId(0), HexDirection::W), None);
    }
}
