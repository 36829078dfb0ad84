//! Triangulation of hex terrain: interior fans, edge bridges, and corner
//! wedges with flat, terraced, and cliff transitions.
//!
//! [`triangulate`] walks a set of cells and rebuilds a [`HexMesh`] from
//! scratch. Each cell draws its six solid-colored fans; the blend region
//! between cells is drawn once per shared edge (by the cell on the NE/E/SE
//! side) and once per shared corner (NE and E only), so every boundary is
//! covered exactly once.

pub mod builder;
pub mod corner;
pub mod edge_vertices;
pub mod hex_mesh;
pub mod triangulate;

pub use builder::MeshBuilder;
pub use corner::{CornerPlan, CornerRole, CornerRoles, plan_corner};
pub use edge_vertices::EdgeVertices;
pub use hex_mesh::{HexMesh, HexVertex, MeshPiece, PackedHexMesh, PieceKind};
pub use triangulate::{triangulate, triangulate_dirty, triangulate_region};
