//! Metrics validation errors.

/// A [`HexMetrics`](crate::HexMetrics) parameter set that cannot produce valid geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// The outer radius must be a positive, finite length.
    #[error("outer radius must be positive, got {0}")]
    InvalidRadius(f32),

    /// The solid factor must lie in `(0, 1]`.
    #[error("solid factor must be in (0, 1], got {0}")]
    InvalidSolidFactor(f32),

    /// At least one terrace per slope is required.
    #[error("terraces per slope must be at least 1")]
    NoTerraces,

    /// The elevation step must be a positive height.
    #[error("elevation step must be positive, got {0}")]
    InvalidElevationStep(f32),

    /// Perturbation strengths cannot be negative.
    #[error("perturbation strength must be non-negative, got {0}")]
    NegativePerturbation(f32),

    /// The noise scale must be positive.
    #[error("noise scale must be positive, got {0}")]
    InvalidNoiseScale(f32),

    /// Chunk dimensions must be at least one cell.
    #[error("chunk size must be at least 1x1, got {0}x{1}")]
    EmptyChunk(u32, u32),
}
