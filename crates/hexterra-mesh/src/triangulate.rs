//! Walks cells and emits their interior, edge, and corner geometry.

use glam::Vec3;
use hexterra_coords::HexDirection;
use hexterra_grid::{CellId, HexCell, HexGrid, RegionId};
use hexterra_metrics::{Color, EdgeType, HexMetrics, NoiseSource};

use crate::builder::MeshBuilder;
use crate::corner::{CornerPlan, plan_corner};
use crate::edge_vertices::EdgeVertices;
use crate::hex_mesh::{HexMesh, PieceKind};

/// Rebuilds `mesh` from scratch for the given cells.
///
/// Unknown handles are skipped. Cells outside `cells` are only read, to blend
/// toward them across shared edges and corners.
pub fn triangulate<N: NoiseSource>(grid: &HexGrid<N>, cells: &[CellId], mesh: &mut HexMesh) {
    let _span = tracing::debug_span!("triangulate", cells = cells.len()).entered();

    mesh.clear();
    let mut triangulator = Triangulator {
        grid,
        metrics: grid.metrics(),
        builder: MeshBuilder::new(grid.metrics(), grid.noise(), mesh),
    };
    for &id in cells {
        if let Some(cell) = grid.cell(id) {
            triangulator.cell(cell);
        }
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "triangulated"
    );
}

/// Triangulates one region into a fresh mesh.
pub fn triangulate_region<N: NoiseSource>(grid: &HexGrid<N>, region: RegionId) -> HexMesh {
    let mut mesh = HexMesh::new();
    triangulate(grid, grid.region_cells(region), &mut mesh);
    mesh
}

/// Drains the grid's dirty set and rebuilds each stale region once.
pub fn triangulate_dirty<N: NoiseSource>(grid: &mut HexGrid<N>) -> Vec<(RegionId, HexMesh)> {
    let dirty = grid.take_dirty();
    let grid = &*grid;
    dirty
        .into_iter()
        .map(|region| (region, triangulate_region(grid, region)))
        .collect()
}

/// One of the three points of a corner wedge, with the cell it belongs to.
#[derive(Clone, Copy)]
struct Corner<'a> {
    position: Vec3,
    cell: &'a HexCell,
}

impl Corner<'_> {
    fn elevation(&self) -> i32 {
        self.cell.elevation()
    }

    fn color(&self) -> Color {
        self.cell.color()
    }
}

struct Triangulator<'a, N> {
    grid: &'a HexGrid<N>,
    metrics: &'a HexMetrics,
    builder: MeshBuilder<'a, N>,
}

impl<'a, N: NoiseSource> Triangulator<'a, N> {
    fn cell(&mut self, cell: &'a HexCell) {
        for direction in HexDirection::ALL {
            self.direction(direction, cell);
        }
    }

    fn neighbor(&self, cell: &HexCell, direction: HexDirection) -> Option<&'a HexCell> {
        cell.neighbor(direction).and_then(|id| self.grid.cell(id))
    }

    fn direction(&mut self, direction: HexDirection, cell: &'a HexCell) {
        let center = cell.position();
        let edge = EdgeVertices::new(
            center + self.metrics.first_solid_corner(direction),
            center + self.metrics.second_solid_corner(direction),
        );
        self.builder.mark(PieceKind::Fan, direction);
        self.builder.edge_fan(center, &edge, cell.color());

        // Each edge is shared by two cells; only the NE, E and SE sides draw it.
        if direction <= HexDirection::SE {
            self.connection(direction, cell, &edge);
        }
    }

    fn connection(&mut self, direction: HexDirection, cell: &'a HexCell, e1: &EdgeVertices) {
        let Some(neighbor) = self.neighbor(cell, direction) else {
            return;
        };

        let mut bridge = self.metrics.bridge(direction);
        bridge.y = neighbor.position().y - cell.position().y;
        let e2 = EdgeVertices::new(e1.v1 + bridge, e1.v4 + bridge);

        if self.metrics.edge_type(cell.elevation(), neighbor.elevation()) == EdgeType::Slope {
            self.edge_terraces(direction, e1, cell, &e2, neighbor);
        } else {
            self.builder.mark(PieceKind::Strip, direction);
            self.builder
                .edge_strip(e1, cell.color(), &e2, neighbor.color());
        }

        // Each corner is shared by three cells; only the NE and E corners are
        // drawn from here.
        if direction > HexDirection::E {
            return;
        }
        let Some(next) = self.neighbor(cell, direction.next()) else {
            return;
        };
        let mut v5 = e1.v4 + self.metrics.bridge(direction.next());
        v5.y = next.position().y;

        let here = Corner {
            position: e1.v4,
            cell,
        };
        let there = Corner {
            position: e2.v4,
            cell: neighbor,
        };
        let beyond = Corner {
            position: v5,
            cell: next,
        };

        // Rotate so the lowest cell is the bottom, keeping clockwise order.
        if cell.elevation() <= neighbor.elevation() {
            if cell.elevation() <= next.elevation() {
                self.corner(direction, here, there, beyond);
            } else {
                self.corner(direction, beyond, here, there);
            }
        } else if neighbor.elevation() <= next.elevation() {
            self.corner(direction, there, beyond, here);
        } else {
            self.corner(direction, beyond, here, there);
        }
    }

    fn edge_terraces(
        &mut self,
        direction: HexDirection,
        begin: &EdgeVertices,
        begin_cell: &HexCell,
        end: &EdgeVertices,
        end_cell: &HexCell,
    ) {
        let steps = self.metrics.terrace_steps();
        let (begin_color, end_color) = (begin_cell.color(), end_cell.color());

        let mut e2 = EdgeVertices::terrace_lerp(begin, end, 1, self.metrics);
        let mut c2 = self.metrics.terrace_lerp_color(begin_color, end_color, 1);
        self.builder.mark(PieceKind::TerraceStrip, direction);
        self.builder.edge_strip(begin, begin_color, &e2, c2);

        for i in 2..steps {
            let (e1, c1) = (e2, c2);
            e2 = EdgeVertices::terrace_lerp(begin, end, i, self.metrics);
            c2 = self.metrics.terrace_lerp_color(begin_color, end_color, i);
            self.builder.mark(PieceKind::TerraceStrip, direction);
            self.builder.edge_strip(&e1, c1, &e2, c2);
        }

        self.builder.mark(PieceKind::TerraceStrip, direction);
        self.builder.edge_strip(&e2, c2, end, end_color);
    }

    fn corner(
        &mut self,
        direction: HexDirection,
        bottom: Corner<'a>,
        left: Corner<'a>,
        right: Corner<'a>,
    ) {
        match plan_corner(bottom.elevation(), left.elevation(), right.elevation()) {
            CornerPlan::Terraces(roles) => {
                let (begin, left, right) = roles.apply(bottom, left, right);
                self.builder.mark(PieceKind::CornerTerraces, direction);
                self.corner_terraces(begin, left, right);
            }
            CornerPlan::TerracesCliff(roles) => {
                let (begin, left, right) = roles.apply(bottom, left, right);
                self.builder.mark(PieceKind::CornerTerracesCliff, direction);
                self.corner_terraces_cliff(begin, left, right);
            }
            CornerPlan::CliffTerraces(roles) => {
                let (begin, left, right) = roles.apply(bottom, left, right);
                self.builder.mark(PieceKind::CornerCliffTerraces, direction);
                self.corner_cliff_terraces(begin, left, right);
            }
            CornerPlan::Triangle => {
                self.builder.mark(PieceKind::CornerTriangle, direction);
                self.builder.add_triangle(
                    [bottom.position, left.position, right.position],
                    [bottom.color(), left.color(), right.color()],
                );
            }
        }
    }

    /// Two slopes fanning out from `begin`: a triangle at the first step, then
    /// a quad per remaining step.
    fn corner_terraces(&mut self, begin: Corner<'a>, left: Corner<'a>, right: Corner<'a>) {
        let m = self.metrics;
        let steps = m.terrace_steps();

        let mut v3 = m.terrace_lerp(begin.position, left.position, 1);
        let mut v4 = m.terrace_lerp(begin.position, right.position, 1);
        let mut c3 = m.terrace_lerp_color(begin.color(), left.color(), 1);
        let mut c4 = m.terrace_lerp_color(begin.color(), right.color(), 1);
        self.builder
            .add_triangle([begin.position, v3, v4], [begin.color(), c3, c4]);

        for i in 2..steps {
            let (v1, v2, c1, c2) = (v3, v4, c3, c4);
            v3 = m.terrace_lerp(begin.position, left.position, i);
            v4 = m.terrace_lerp(begin.position, right.position, i);
            c3 = m.terrace_lerp_color(begin.color(), left.color(), i);
            c4 = m.terrace_lerp_color(begin.color(), right.color(), i);
            self.builder.add_quad([v1, v2, v3, v4], [c1, c2, c3, c4]);
        }

        self.builder.add_quad(
            [v3, v4, left.position, right.position],
            [c3, c4, left.color(), right.color()],
        );
    }

    /// Slope toward `left`, cliff toward `right`. The terraces collapse onto a
    /// point on the cliff edge one elevation level above `begin`.
    fn corner_terraces_cliff(&mut self, begin: Corner<'a>, left: Corner<'a>, right: Corner<'a>) {
        let (boundary, boundary_color) = self.cliff_boundary(begin, right);
        self.boundary_triangle(begin, left, boundary, boundary_color);
        self.close_top(left, right, boundary, boundary_color);
    }

    /// Cliff toward `left`, slope toward `right`; the mirror image of
    /// [`corner_terraces_cliff`](Self::corner_terraces_cliff).
    fn corner_cliff_terraces(&mut self, begin: Corner<'a>, left: Corner<'a>, right: Corner<'a>) {
        let (boundary, boundary_color) = self.cliff_boundary(begin, left);
        self.boundary_triangle(right, begin, boundary, boundary_color);
        self.close_top(left, right, boundary, boundary_color);
    }

    /// The point one level up the cliff from `low` toward `high`, computed on
    /// perturbed endpoints so it lies exactly on the drawn cliff face.
    fn cliff_boundary(&self, low: Corner<'a>, high: Corner<'a>) -> (Vec3, Color) {
        let levels = low.elevation().abs_diff(high.elevation());
        debug_assert!(levels > 1, "cliff boundary across {levels} levels");
        let t = 1.0 / levels.max(1) as f32;
        let boundary = self
            .builder
            .perturb(low.position)
            .lerp(self.builder.perturb(high.position), t);
        (boundary, low.color().lerp(high.color(), t))
    }

    /// Fills the part of a mixed corner above the boundary point.
    fn close_top(&mut self, left: Corner<'a>, right: Corner<'a>, boundary: Vec3, color: Color) {
        if self.metrics.edge_type(left.elevation(), right.elevation()) == EdgeType::Slope {
            self.boundary_triangle(left, right, boundary, color);
        } else {
            let top = [
                self.builder.perturb(left.position),
                self.builder.perturb(right.position),
                boundary,
            ];
            self.builder
                .add_triangle_unperturbed(top, [left.color(), right.color(), color]);
        }
    }

    /// Terraces from `begin` to `left`, each step fanned to `boundary`.
    ///
    /// Terrace points are perturbed individually and the triangles are added
    /// unperturbed, so the boundary point stays exactly on the cliff edge.
    fn boundary_triangle(
        &mut self,
        begin: Corner<'a>,
        left: Corner<'a>,
        boundary: Vec3,
        boundary_color: Color,
    ) {
        let m = self.metrics;
        let steps = m.terrace_steps();

        let mut v2 = self
            .builder
            .perturb(m.terrace_lerp(begin.position, left.position, 1));
        let mut c2 = m.terrace_lerp_color(begin.color(), left.color(), 1);
        let start = self.builder.perturb(begin.position);
        self.builder.add_triangle_unperturbed(
            [start, v2, boundary],
            [begin.color(), c2, boundary_color],
        );

        for i in 2..steps {
            let (v1, c1) = (v2, c2);
            v2 = self
                .builder
                .perturb(m.terrace_lerp(begin.position, left.position, i));
            c2 = m.terrace_lerp_color(begin.color(), left.color(), i);
            self.builder
                .add_triangle_unperturbed([v1, v2, boundary], [c1, c2, boundary_color]);
        }

        let end = self.builder.perturb(left.position);
        self.builder.add_triangle_unperturbed(
            [v2, end, boundary],
            [c2, left.color(), boundary_color],
        );
    }
}

#[cfg(test)]
mod tests {
    use hexterra_metrics::{Color, HexMetrics, UniformNoise};

    use super::*;

    fn grid(cx: u32, cz: u32) -> HexGrid<UniformNoise> {
        HexGrid::new(cx, cz, HexMetrics::default(), UniformNoise::default()).unwrap()
    }

    #[test]
    fn test_single_cell_is_six_fans() {
        let metrics = HexMetrics {
            chunk_size_x: 1,
            chunk_size_z: 1,
            ..HexMetrics::default()
        };
        let g = HexGrid::new(1, 1, metrics, UniformNoise::default()).unwrap();
        let mesh = triangulate_region(&g, RegionId(0));
        assert_eq!(mesh.count_pieces(PieceKind::Fan), 6);
        assert_eq!(mesh.triangle_count(), 18);
        assert_eq!(mesh.pieces.len(), 6);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_triangulate_replaces_previous_contents() {
        let g = grid(1, 1);
        let cells = g.region_cells(RegionId(0)).to_vec();
        let mut mesh = HexMesh::new();
        triangulate(&g, &cells, &mut mesh);
        let first = mesh.clone();
        triangulate(&g, &cells, &mut mesh);
        assert_eq!(mesh, first);
    }

    #[test]
    fn test_unknown_cells_skipped() {
        let g = grid(1, 1);
        let mut mesh = HexMesh::new();
        triangulate(&g, &[CellId(9_999)], &mut mesh);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_fan_colors_are_cell_color() {
        let mut g = grid(1, 1);
        let id = g.cell_at_offset(0, 0).unwrap();
        g.set_color(id, Color::BLUE);
        let mut mesh = HexMesh::new();
        triangulate(&g, &[id], &mut mesh);
        // The NE fan comes first: three triangles in the cell's own color.
        assert!(mesh.colors[..9].iter().all(|c| *c == Color::BLUE));
    }

    #[test]
    fn test_triangulate_dirty_drains_once() {
        let mut g = grid(2, 1);
        let meshes = triangulate_dirty(&mut g);
        assert_eq!(meshes.len(), 2);
        assert!(meshes.iter().all(|(_, m)| m.is_well_formed() && !m.is_empty()));
        assert!(triangulate_dirty(&mut g).is_empty());
    }
}
