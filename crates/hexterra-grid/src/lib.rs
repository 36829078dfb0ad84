//! The hex cell graph: an arena of cells with symmetric six-way adjacency,
//! elevation, color, and river state, plus dirty-region tracking for
//! retriangulation.
//!
//! Cells are addressed by [`CellId`] handles into the [`HexGrid`] arena. All
//! mutation goes through the grid so that neighbor links stay symmetric and
//! every visible change marks the affected regions in [`DirtyRegions`]. The
//! grid never rebuilds geometry itself; a scheduler drains the dirty set and
//! hands each region to the mesher.

mod cell;
mod error;
mod grid;
mod region;
mod rivers;

pub use cell::{CellId, HexCell};
pub use error::GridError;
pub use grid::HexGrid;
pub use region::{DirtyRegions, RegionId};
