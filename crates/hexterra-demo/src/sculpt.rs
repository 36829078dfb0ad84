//! Terrain sculpting for the demo: heightmap, color bands, brushes, and a river.

use hexterra_coords::HexDirection;
use hexterra_grid::{CellId, HexGrid};
use hexterra_metrics::{Color, NoiseSource};
use noise::{NoiseFn, Simplex};
use rand::Rng;

/// Fractal simplex noise sampled per cell.
pub struct Heightmap {
    noise: Simplex,
    frequency: f64,
    octaves: u32,
}

impl Heightmap {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            noise: Simplex::new(seed),
            frequency,
            octaves: 4,
        }
    }

    /// Height in `[0, 1]` at a cell's offset position.
    pub fn sample(&self, col: f64, row: f64) -> f64 {
        let mut total = 0.0;
        let mut norm = 0.0;
        let mut frequency = self.frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.octaves {
            total += self.noise.get([col * frequency, row * frequency]) * amplitude;
            norm += amplitude;
            frequency *= 2.0;
            amplitude *= 0.5;
        }

        (total / norm * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Water, sand, grass, rock, snow.
pub fn band_color(elevation: i32, max_elevation: i32) -> Color {
    if elevation <= 0 {
        return Color::BLUE;
    }
    let t = elevation as f32 / max_elevation.max(1) as f32;
    if t < 0.25 {
        Color::YELLOW
    } else if t < 0.6 {
        Color::GREEN
    } else if t < 0.9 {
        Color::rgb(0.5, 0.45, 0.4)
    } else {
        Color::WHITE
    }
}

/// Assigns every cell an elevation from the heightmap and a matching color.
pub fn sculpt<N: NoiseSource>(grid: &mut HexGrid<N>, heightmap: &Heightmap, max_elevation: i32) {
    let cells: Vec<_> = grid
        .cells()
        .map(|(id, cell)| (id, cell.coordinates().to_offset()))
        .collect();

    for (id, (col, row)) in cells {
        let h = heightmap.sample(col as f64, row as f64);
        let elevation = (h * max_elevation as f64).round() as i32;
        grid.set_elevation(id, elevation);
        grid.set_color(id, band_color(elevation, max_elevation));
    }
}

/// Raises or lowers random circular areas by one level. Returns how many cell
/// edits took effect.
pub fn apply_brushes<N: NoiseSource, R: Rng>(
    grid: &mut HexGrid<N>,
    rng: &mut R,
    count: usize,
    max_elevation: i32,
) -> usize {
    if grid.is_empty() {
        return 0;
    }

    let mut changed = 0;
    for _ in 0..count {
        let center = CellId(rng.random_range(0..grid.len() as u32));
        let Some(coordinates) = grid.cell(center).map(|c| c.coordinates()) else {
            continue;
        };
        let radius = rng.random_range(0..=2);
        let delta = if rng.random_bool(0.5) { 1 } else { -1 };

        for id in grid.cells_within(coordinates, radius) {
            let Some(elevation) = grid.cell(id).map(|c| c.elevation()) else {
                continue;
            };
            let elevation = (elevation + delta).clamp(0, max_elevation);
            if grid.set_elevation(id, elevation) {
                grid.set_color(id, band_color(elevation, max_elevation));
                changed += 1;
            }
        }
    }
    changed
}

/// Runs a river downhill from `source`, always toward the lowest neighbor that
/// it has not visited yet. Returns the number of river segments laid.
pub fn trace_river<N: NoiseSource>(grid: &mut HexGrid<N>, source: CellId) -> usize {
    let mut visited = vec![false; grid.len()];
    let mut current = source;
    let mut segments = 0;

    loop {
        let Some(cell) = grid.cell(current) else {
            break;
        };
        visited[current.index()] = true;
        let elevation = cell.elevation();

        let next = HexDirection::ALL
            .into_iter()
            .filter_map(|direction| {
                let id = cell.neighbor(direction)?;
                let neighbor = grid.cell(id)?;
                (!visited[id.index()] && neighbor.elevation() <= elevation)
                    .then_some((neighbor.elevation(), direction))
            })
            .min();

        let Some((_, direction)) = next else {
            break;
        };
        if !grid.set_outgoing_river(current, direction) {
            break;
        }
        segments += 1;
        match grid.neighbor(current, direction) {
            Some(id) => current = id,
            None => break,
        }
    }
    segments
}

/// The highest cell, preferring the first one found.
pub fn highest_cell<N>(grid: &HexGrid<N>) -> Option<CellId> {
    grid.cells()
        .max_by_key(|(id, cell)| (cell.elevation(), std::cmp::Reverse(*id)))
        .map(|(id, _)| id)
}
