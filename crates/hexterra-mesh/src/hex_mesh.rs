//! Triangulation output: parallel position/color buffers, triangle indices,
//! and per-piece debug metadata.

use glam::Vec3;
use hexterra_coords::HexDirection;
use hexterra_metrics::Color;

/// The construction that produced a run of triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Solid-colored fan from the cell center to one edge.
    Fan,
    /// Single strip bridging a flat or cliff edge.
    Strip,
    /// One step of a terraced slope bridge.
    TerraceStrip,
    /// Plain corner triangle (no slope involved).
    CornerTriangle,
    /// Corner where two slopes meet.
    CornerTerraces,
    /// Corner where a slope on the left meets a cliff on the right.
    CornerTerracesCliff,
    /// Corner where a cliff on the left meets a slope on the right.
    CornerCliffTerraces,
}

/// Metadata for one emitted piece, used for analysis and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshPiece {
    pub kind: PieceKind,
    /// Direction (from the emitting cell) the piece was built for.
    pub direction: HexDirection,
}

/// Geometry for one region.
///
/// `positions` and `colors` are parallel; `indices` holds three entries per
/// triangle. Vertices are never shared between triangles, so flat shading and
/// per-triangle normals fall out directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HexMesh {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
    pub pieces: Vec<MeshPiece>,
}

impl HexMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all geometry, keeping allocations for reuse.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
        self.pieces.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Counts the pieces of a given kind.
    pub fn count_pieces(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind == kind).count()
    }

    /// Iterates triangle corner positions in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Checks the buffer invariants: colors parallel to positions, a whole
    /// number of triangles, and every index in bounds.
    pub fn is_well_formed(&self) -> bool {
        let n = self.positions.len();
        self.colors.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Interleaves positions and colors into GPU-ready vertices.
    pub fn pack(&self) -> PackedHexMesh {
        let vertices = self
            .positions
            .iter()
            .zip(self.colors.iter())
            .map(|(p, c)| HexVertex::new(*p, *c))
            .collect();
        PackedHexMesh {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

/// A vertex ready for upload: position followed by linear RGBA color.
///
/// Layout (28 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..28]` color `[f32; 4]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HexVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(HexVertex, [u8; 28]);

impl HexVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// Interleaved vertex and index buffers for one region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedHexMesh {
    pub vertices: Vec<HexVertex>,
    pub indices: Vec<u32>,
}

impl PackedHexMesh {
    /// Vertex data as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes (little-endian `u32` on all supported targets).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_triangle() -> HexMesh {
        HexMesh {
            positions: vec![Vec3::ZERO, Vec3::Z, Vec3::X],
            colors: vec![Color::WHITE; 3],
            indices: vec![0, 1, 2],
            pieces: vec![MeshPiece {
                kind: PieceKind::CornerTriangle,
                direction: HexDirection::NE,
            }],
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HexMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.is_well_formed());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_well_formed_detects_bad_index() {
        let mut mesh = one_triangle();
        assert!(mesh.is_well_formed());
        mesh.indices[2] = 7;
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_well_formed_detects_missing_color() {
        let mut mesh = one_triangle();
        mesh.colors.pop();
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut mesh = one_triangle();
        mesh.clear();
        assert_eq!(mesh, HexMesh::new());
    }

    #[test]
    fn test_triangles_iterator() {
        let mesh = one_triangle();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[Vec3::ZERO, Vec3::Z, Vec3::X]]);
        assert_eq!(mesh.count_pieces(PieceKind::CornerTriangle), 1);
        assert_eq!(mesh.count_pieces(PieceKind::Fan), 0);
    }

    #[test]
    fn test_pack_sizes() {
        let packed = one_triangle().pack();
        assert_eq!(packed.vertices.len(), 3);
        assert_eq!(packed.vertex_bytes().len(), 3 * 28);
        assert_eq!(packed.index_bytes().len(), 12);
        assert_eq!(packed.vertices[1].position, [0.0, 0.0, 1.0]);
        assert_eq!(packed.vertices[1].color, [1.0, 1.0, 1.0, 1.0]);
    }
}
