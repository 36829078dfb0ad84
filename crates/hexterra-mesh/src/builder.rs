//! Low-level triangle and quad emission with vertex perturbation.

use glam::Vec3;
use hexterra_coords::HexDirection;
use hexterra_metrics::{Color, HexMetrics, NoiseSource};

use crate::edge_vertices::EdgeVertices;
use crate::hex_mesh::{HexMesh, MeshPiece, PieceKind};

/// Appends geometry to a [`HexMesh`] for the duration of one triangulation.
///
/// Every primitive pushes fresh vertices; indices are never shared across
/// calls.
pub struct MeshBuilder<'a, N: ?Sized> {
    metrics: &'a HexMetrics,
    noise: &'a N,
    mesh: &'a mut HexMesh,
}

impl<'a, N: NoiseSource + ?Sized> MeshBuilder<'a, N> {
    pub fn new(metrics: &'a HexMetrics, noise: &'a N, mesh: &'a mut HexMesh) -> Self {
        Self {
            metrics,
            noise,
            mesh,
        }
    }

    pub fn metrics(&self) -> &'a HexMetrics {
        self.metrics
    }

    /// Applies horizontal noise jitter to a point.
    pub fn perturb(&self, position: Vec3) -> Vec3 {
        self.metrics.perturb(self.noise, position)
    }

    /// Records which construction the following triangles belong to.
    pub fn mark(&mut self, kind: PieceKind, direction: HexDirection) {
        self.mesh.pieces.push(MeshPiece { kind, direction });
    }

    /// Adds a triangle, perturbing each corner.
    pub fn add_triangle(&mut self, vertices: [Vec3; 3], colors: [Color; 3]) {
        let perturbed = vertices.map(|v| self.perturb(v));
        self.add_triangle_unperturbed(perturbed, colors);
    }

    /// Adds a triangle exactly as given.
    pub fn add_triangle_unperturbed(&mut self, vertices: [Vec3; 3], colors: [Color; 3]) {
        let base = self.mesh.positions.len() as u32;
        self.mesh.positions.extend_from_slice(&vertices);
        self.mesh.colors.extend_from_slice(&colors);
        self.mesh
            .indices
            .extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Adds a quad spanning `v1 v2` (near edge) and `v3 v4` (far edge).
    pub fn add_quad(&mut self, vertices: [Vec3; 4], colors: [Color; 4]) {
        let perturbed = vertices.map(|v| self.perturb(v));
        let base = self.mesh.positions.len() as u32;
        self.mesh.positions.extend_from_slice(&perturbed);
        self.mesh.colors.extend_from_slice(&colors);
        self.mesh.indices.extend_from_slice(&[
            base,
            base + 2,
            base + 1,
            base + 1,
            base + 2,
            base + 3,
        ]);
    }

    /// Fans from `center` to the three segments of `edge` in a single color.
    pub fn edge_fan(&mut self, center: Vec3, edge: &EdgeVertices, color: Color) {
        let solid = [color; 3];
        self.add_triangle([center, edge.v1, edge.v2], solid);
        self.add_triangle([center, edge.v2, edge.v3], solid);
        self.add_triangle([center, edge.v3, edge.v4], solid);
    }

    /// Bridges two parallel edges with three quads, blending `c1` into `c2`.
    pub fn edge_strip(&mut self, e1: &EdgeVertices, c1: Color, e2: &EdgeVertices, c2: Color) {
        let colors = [c1, c1, c2, c2];
        self.add_quad([e1.v1, e1.v2, e2.v1, e2.v2], colors);
        self.add_quad([e1.v2, e1.v3, e2.v2, e2.v3], colors);
        self.add_quad([e1.v3, e1.v4, e2.v3, e2.v4], colors);
    }
}
