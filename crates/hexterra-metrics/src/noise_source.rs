//! Four-channel periodic noise used to jitter vertices and cell heights.
//!
//! Perturbation only needs *some* deterministic, tileable field; the
//! [`NoiseSource`] trait keeps the mesh code independent of where it comes from.

use std::f64::consts::TAU;

use glam::Vec4;
use noise::{NoiseFn, Perlin};

/// A deterministic 2D → 4-channel noise field.
///
/// Samples are in `[0, 1]` per channel and the field repeats with period 1 in
/// both `u` and `v`.
pub trait NoiseSource {
    /// Samples the field at texture-space coordinate `(u, v)`.
    fn sample(&self, u: f32, v: f32) -> Vec4;
}

impl<F> NoiseSource for F
where
    F: Fn(f32, f32) -> Vec4,
{
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        self(u, v)
    }
}

/// A field returning the same sample everywhere.
///
/// `UniformNoise::default()` returns `0.5` on every channel, which maps to zero
/// displacement and yields perfectly regular geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformNoise(pub Vec4);

impl Default for UniformNoise {
    fn default() -> Self {
        Self(Vec4::splat(0.5))
    }
}

impl NoiseSource for UniformNoise {
    fn sample(&self, _u: f32, _v: f32) -> Vec4 {
        self.0
    }
}

/// A square, seamlessly tiling RGBA noise image sampled with bilinear filtering.
///
/// Each channel is seeded 4D Perlin noise evaluated on a torus, so the left and
/// right (and top and bottom) borders meet without a seam.
#[derive(Clone, Debug)]
pub struct NoiseTexture {
    size: usize,
    texels: Vec<Vec4>,
}

impl NoiseTexture {
    /// Generates a `size × size` texture. `frequency` controls feature size:
    /// roughly how many noise blobs fit across one tile.
    pub fn generate(size: usize, seed: u32, frequency: f64) -> Self {
        let size = size.max(1);
        let channels = [
            Perlin::new(seed),
            Perlin::new(seed.wrapping_add(1)),
            Perlin::new(seed.wrapping_add(2)),
            Perlin::new(seed.wrapping_add(3)),
        ];
        let radius = frequency / TAU;

        let mut texels = Vec::with_capacity(size * size);
        for row in 0..size {
            let av = row as f64 / size as f64 * TAU;
            for col in 0..size {
                let au = col as f64 / size as f64 * TAU;
                let point = [
                    au.cos() * radius,
                    au.sin() * radius,
                    av.cos() * radius,
                    av.sin() * radius,
                ];
                let mut texel = [0.0_f32; 4];
                for (out, perlin) in texel.iter_mut().zip(channels.iter()) {
                    *out = (perlin.get(point) * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
                }
                texels.push(Vec4::from_array(texel));
            }
        }

        Self { size, texels }
    }

    /// Builds a texture from explicit texels in row-major order.
    ///
    /// Returns `None` unless `texels.len() == size * size` and `size > 0`.
    pub fn from_texels(size: usize, texels: Vec<Vec4>) -> Option<Self> {
        (size > 0 && size.checked_mul(size) == Some(texels.len())).then_some(Self { size, texels })
    }

    /// Edge length in texels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw texel at integer coordinates, wrapping out-of-range indices.
    pub fn texel(&self, col: i64, row: i64) -> Vec4 {
        let n = self.size as i64;
        let c = col.rem_euclid(n) as usize;
        let r = row.rem_euclid(n) as usize;
        self.texels[r * self.size + c]
    }
}

impl NoiseSource for NoiseTexture {
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        // Texel centers sit at half-texel offsets.
        let x = u * self.size as f32 - 0.5;
        let y = v * self.size as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (c, r) = (x0 as i64, y0 as i64);

        let bottom = self.texel(c, r).lerp(self.texel(c + 1, r), fx);
        let top = self.texel(c, r + 1).lerp(self.texel(c + 1, r + 1), fx);
        bottom.lerp(top, fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_default_is_neutral() {
        assert_eq!(UniformNoise::default().sample(0.3, 0.7), Vec4::splat(0.5));
    }

    #[test]
    fn test_closure_source() {
        let source = |u: f32, v: f32| Vec4::new(u, v, 0.0, 1.0);
        assert_eq!(source.sample(0.25, 0.5), Vec4::new(0.25, 0.5, 0.0, 1.0));
    }

    #[test]
    fn test_generated_values_in_unit_range() {
        let tex = NoiseTexture::generate(32, 7, 4.0);
        assert_eq!(tex.size(), 32);
        for row in 0..32 {
            for col in 0..32 {
                let t = tex.texel(col, row);
                assert!(t.min_element() >= 0.0 && t.max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = NoiseTexture::generate(16, 3, 4.0);
        let b = NoiseTexture::generate(16, 3, 4.0);
        assert_eq!(a.sample(0.37, 0.81), b.sample(0.37, 0.81));
    }

    #[test]
    fn test_sampling_is_periodic() {
        let tex = NoiseTexture::generate(16, 11, 4.0);
        let a = tex.sample(0.2, 0.6);
        let b = tex.sample(1.2, -0.4);
        assert!((a - b).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_bilinear_at_texel_center_returns_texel() {
        let texels = (0..4).map(|i| Vec4::splat(i as f32 / 4.0)).collect();
        let tex = NoiseTexture::from_texels(2, texels).unwrap();
        // Center of texel (1, 0).
        assert_eq!(tex.sample(0.75, 0.25), Vec4::splat(0.25));
        // Halfway between texel (0, 0) and (1, 0).
        assert_eq!(tex.sample(0.5, 0.25), Vec4::splat(0.125));
    }

    #[test]
    fn test_from_texels_rejects_bad_length() {
        assert!(NoiseTexture::from_texels(2, vec![Vec4::ZERO; 3]).is_none());
        assert!(NoiseTexture::from_texels(0, Vec::new()).is_none());
    }
}
