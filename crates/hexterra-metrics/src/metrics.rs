//! Hexagon dimensions, terrace interpolation, and surface perturbation.

use glam::{Vec3, Vec4};
use hexterra_coords::HexDirection;
use serde::{Deserialize, Serialize};

use crate::{Color, EdgeType, MetricsError, NoiseSource};

/// Ratio between a hexagon's inner and outer radius (√3 / 2).
const INNER_TO_OUTER: f32 = 0.866_025_4;

/// Geometric parameters of the hex terrain.
///
/// All derived quantities (inner radius, blend factor, terrace step sizes, the
/// corner table) are computed from these fields on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HexMetrics {
    /// Distance from a cell's center to any of its corners.
    pub outer_radius: f32,
    /// Fraction of the hexagon covered by the cell's own solid color.
    pub solid_factor: f32,
    /// World height of one elevation level.
    pub elevation_step: f32,
    /// Number of flat treads on a slope between two adjacent levels.
    pub terraces_per_slope: u32,
    /// Maximum horizontal vertex jitter.
    pub cell_perturb_strength: f32,
    /// Maximum vertical jitter of a cell's height.
    pub elevation_perturb_strength: f32,
    /// World-to-noise-texture scale. Small values give locally coherent jitter.
    pub noise_scale: f32,
    /// Cells per region along X.
    pub chunk_size_x: u32,
    /// Cells per region along Z.
    pub chunk_size_z: u32,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self {
            outer_radius: 10.0,
            solid_factor: 0.8,
            elevation_step: 3.0,
            terraces_per_slope: 2,
            cell_perturb_strength: 4.0,
            elevation_perturb_strength: 1.5,
            noise_scale: 0.003,
            chunk_size_x: 5,
            chunk_size_z: 5,
        }
    }
}

impl HexMetrics {
    /// Checks that the parameters describe drawable geometry.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if !(self.outer_radius.is_finite() && self.outer_radius > 0.0) {
            return Err(MetricsError::InvalidRadius(self.outer_radius));
        }
        if !(self.solid_factor > 0.0 && self.solid_factor <= 1.0) {
            return Err(MetricsError::InvalidSolidFactor(self.solid_factor));
        }
        if self.terraces_per_slope == 0 {
            return Err(MetricsError::NoTerraces);
        }
        if !(self.elevation_step > 0.0) {
            return Err(MetricsError::InvalidElevationStep(self.elevation_step));
        }
        for strength in [self.cell_perturb_strength, self.elevation_perturb_strength] {
            if !(strength >= 0.0) {
                return Err(MetricsError::NegativePerturbation(strength));
            }
        }
        if !(self.noise_scale > 0.0) {
            return Err(MetricsError::InvalidNoiseScale(self.noise_scale));
        }
        if self.chunk_size_x == 0 || self.chunk_size_z == 0 {
            return Err(MetricsError::EmptyChunk(self.chunk_size_x, self.chunk_size_z));
        }
        Ok(())
    }

    /// Cell dimensions of a grid made of `chunk_count_x × chunk_count_z`
    /// chunks. `None` when the cell count overflows a `u32` handle or a side
    /// overflows an `i32` offset.
    pub fn grid_dimensions(&self, chunk_count_x: u32, chunk_count_z: u32) -> Option<(u32, u32)> {
        let width = chunk_count_x.checked_mul(self.chunk_size_x)?;
        let height = chunk_count_z.checked_mul(self.chunk_size_z)?;
        width.checked_mul(height)?;
        i32::try_from(width.max(height)).ok()?;
        Some((width, height))
    }

    /// Distance from a cell's center to the middle of any edge.
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius * INNER_TO_OUTER
    }

    /// Fraction of the hexagon given over to blending with neighbors.
    pub fn blend_factor(&self) -> f32 {
        1.0 - self.solid_factor
    }

    /// Number of interpolation steps across a terraced slope. Always odd.
    pub fn terrace_steps(&self) -> u32 {
        self.terraces_per_slope * 2 + 1
    }

    pub fn horizontal_terrace_step_size(&self) -> f32 {
        1.0 / self.terrace_steps() as f32
    }

    pub fn vertical_terrace_step_size(&self) -> f32 {
        1.0 / (self.terraces_per_slope + 1) as f32
    }

    /// The seven-entry corner table of a pointy-top hexagon, starting at the
    /// top corner and running clockwise. The last entry repeats the first so
    /// `corners[d + 1]` is valid for every direction.
    pub fn corners(&self) -> [Vec3; 7] {
        let outer = self.outer_radius;
        let inner = self.inner_radius();
        [
            Vec3::new(0.0, 0.0, outer),
            Vec3::new(inner, 0.0, 0.5 * outer),
            Vec3::new(inner, 0.0, -0.5 * outer),
            Vec3::new(0.0, 0.0, -outer),
            Vec3::new(-inner, 0.0, -0.5 * outer),
            Vec3::new(-inner, 0.0, 0.5 * outer),
            Vec3::new(0.0, 0.0, outer),
        ]
    }

    /// The corner at the counter-clockwise end of the edge facing `direction`.
    pub fn first_corner(&self, direction: HexDirection) -> Vec3 {
        self.corners()[direction.index()]
    }

    /// The corner at the clockwise end of the edge facing `direction`.
    pub fn second_corner(&self, direction: HexDirection) -> Vec3 {
        self.corners()[direction.index() + 1]
    }

    pub fn first_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.first_corner(direction) * self.solid_factor
    }

    pub fn second_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.second_corner(direction) * self.solid_factor
    }

    /// Offset from a cell's solid edge to the facing solid edge of its
    /// neighbor in `direction`.
    pub fn bridge(&self, direction: HexDirection) -> Vec3 {
        (self.first_corner(direction) + self.second_corner(direction)) * self.blend_factor()
    }

    /// World-space center (at height zero) of the cell at an offset position.
    pub fn cell_position(&self, col: i32, row: i32) -> Vec3 {
        let shifted = col as f32 + row as f32 * 0.5 - (row / 2) as f32;
        Vec3::new(
            shifted * self.inner_radius() * 2.0,
            0.0,
            row as f32 * self.outer_radius * 1.5,
        )
    }

    /// Interpolates along a terraced slope.
    ///
    /// Horizontal position advances linearly with `step`; height only changes
    /// on odd steps, so consecutive step pairs share a level and the surface
    /// alternates between flat treads and sloped risers.
    pub fn terrace_lerp(&self, a: Vec3, b: Vec3, step: u32) -> Vec3 {
        let h = step as f32 * self.horizontal_terrace_step_size();
        let v = ((step + 1) / 2) as f32 * self.vertical_terrace_step_size();
        Vec3::new(
            a.x + (b.x - a.x) * h,
            a.y + (b.y - a.y) * v,
            a.z + (b.z - a.z) * h,
        )
    }

    /// Color counterpart of [`terrace_lerp`](Self::terrace_lerp): blends with the
    /// horizontal fraction only.
    pub fn terrace_lerp_color(&self, a: Color, b: Color, step: u32) -> Color {
        a.lerp(b, step as f32 * self.horizontal_terrace_step_size())
    }

    /// Classifies the connection between two elevations.
    pub fn edge_type(&self, elevation_a: i32, elevation_b: i32) -> EdgeType {
        EdgeType::between(elevation_a, elevation_b)
    }

    /// Noise sample for a world position.
    pub fn sample_noise<N: NoiseSource + ?Sized>(&self, noise: &N, position: Vec3) -> Vec4 {
        noise.sample(position.x * self.noise_scale, position.z * self.noise_scale)
    }

    /// Jitters a vertex horizontally using the first and third noise channels.
    pub fn perturb<N: NoiseSource + ?Sized>(&self, noise: &N, position: Vec3) -> Vec3 {
        let sample = self.sample_noise(noise, position);
        Vec3::new(
            position.x + (sample.x * 2.0 - 1.0) * self.cell_perturb_strength,
            position.y,
            position.z + (sample.z * 2.0 - 1.0) * self.cell_perturb_strength,
        )
    }

    /// Vertical jitter applied to a cell's height, from the second noise channel.
    pub fn elevation_offset<N: NoiseSource + ?Sized>(&self, noise: &N, position: Vec3) -> f32 {
        let sample = self.sample_noise(noise, position);
        (sample.y * 2.0 - 1.0) * self.elevation_perturb_strength
    }
}
