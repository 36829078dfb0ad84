//! Hexagonal cell addressing: cube coordinates, offset conversion, and the six
//! neighbor directions of a pointy-top hex grid.
//!
//! Cells are addressed by [`CubeCoord`], which stores only `x` and `z`; the third
//! axis is always derived as `y = -x - z`, so the cube invariant `x + y + z = 0`
//! holds by construction.
//!
//! ```rust
//! use hexterra_coords::{CubeCoord, HexDirection};
//!
//! let coord = CubeCoord::from_offset(3, 2);
//! assert_eq!(coord.to_offset(), (3, 2));
//! assert_eq!(coord.x() + coord.y() + coord.z(), 0);
//!
//! let east = coord.neighbor(HexDirection::E);
//! assert_eq!(coord.distance_to(east), 1);
//! ```

mod cube;
mod direction;

pub use cube::CubeCoord;
pub use direction::HexDirection;
