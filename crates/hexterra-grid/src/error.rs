//! Cell graph errors.

use hexterra_metrics::MetricsError;

use crate::CellId;

/// Errors from grid construction and structural edits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The metrics cannot produce valid geometry.
    #[error("invalid metrics: {0}")]
    InvalidMetrics(#[from] MetricsError),

    /// A grid needs at least one region in each dimension.
    #[error("grid must contain at least one region, got {0}x{1}")]
    Empty(u32, u32),

    /// The cell count does not fit the grid's `u32` handles.
    #[error("grid of {0}x{1} regions has too many cells")]
    TooLarge(u32, u32),

    /// A handle does not refer to a cell in this grid.
    #[error("unknown cell {0:?}")]
    UnknownCell(CellId),

    /// A cell cannot be its own neighbor.
    #[error("cell {0:?} cannot neighbor itself")]
    SelfLink(CellId),
}
