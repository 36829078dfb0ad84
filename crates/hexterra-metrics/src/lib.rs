//! Hexagon geometry, terrace interpolation, edge classification, and
//! noise-driven surface perturbation.
//!
//! [`HexMetrics`] is a plain parameter set rather than global state: every
//! consumer receives it by reference, so two grids with different cell sizes or
//! terrace counts can coexist.

mod color;
mod edge;
mod error;
mod metrics;
mod noise_source;

pub use color::Color;
pub use edge::EdgeType;
pub use error::MetricsError;
pub use metrics::HexMetrics;
pub use noise_source::{NoiseSource, NoiseTexture, UniformNoise};
