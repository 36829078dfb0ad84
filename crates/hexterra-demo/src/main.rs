//! Builds a sculpted hex terrain and triangulates it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexterra-demo -- --chunks-x 8 --seed 42`.

mod sculpt;

use std::path::PathBuf;

use clap::Parser;
use hexterra_config::{CliArgs, Config, default_config_dir};
use hexterra_grid::{HexGrid, RegionId};
use hexterra_mesh::{HexMesh, PieceKind, triangulate_dirty};
use hexterra_metrics::NoiseTexture;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::sculpt::{Heightmap, apply_brushes, highest_cell, sculpt, trace_river};

const BRUSH_COUNT: usize = 12;

const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::Fan,
    PieceKind::Strip,
    PieceKind::TerraceStrip,
    PieceKind::CornerTriangle,
    PieceKind::CornerTerraces,
    PieceKind::CornerTerracesCliff,
    PieceKind::CornerCliffTerraces,
];

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("hexterra"));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexterra_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let noise = NoiseTexture::generate(
        config.noise.texture_size,
        config.noise.seed,
        config.noise.texture_frequency,
    );
    info!(
        "Generated {0}x{0} noise texture (seed {1})",
        noise.size(),
        config.noise.seed
    );

    let mut grid = match HexGrid::new(
        config.grid.chunk_count_x,
        config.grid.chunk_count_z,
        config.metrics.clone(),
        noise,
    ) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::error!("Failed to build grid: {e}");
            std::process::exit(1);
        }
    };

    let max_elevation = config.noise.max_elevation;
    let heightmap = Heightmap::new(config.noise.seed, config.noise.terrain_frequency);
    sculpt(&mut grid, &heightmap, max_elevation);

    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.noise.seed));
    let edits = apply_brushes(&mut grid, &mut rng, BRUSH_COUNT, max_elevation);
    info!("Applied {BRUSH_COUNT} brushes, {edits} cells changed");

    match highest_cell(&grid) {
        Some(source) => {
            let segments = trace_river(&mut grid, source);
            info!("Traced river of {segments} segments from {source:?}");
        }
        None => warn!("Grid has no cells, skipping river"),
    }

    let meshes = triangulate_dirty(&mut grid);
    report(&meshes, config.debug.log_piece_stats);
}

fn report(meshes: &[(RegionId, HexMesh)], piece_stats: bool) {
    let mut vertices = 0;
    let mut triangles = 0;
    let mut bytes = 0;

    for (region, mesh) in meshes {
        if !mesh.is_well_formed() {
            warn!("Region {} produced a malformed mesh", region.0);
        }
        let packed = mesh.pack();
        vertices += mesh.vertex_count();
        triangles += mesh.triangle_count();
        bytes += packed.vertex_bytes().len() + packed.index_bytes().len();

        info!(
            "Region {}: {} vertices, {} triangles",
            region.0,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        if piece_stats {
            for kind in PIECE_KINDS {
                let count = mesh.count_pieces(kind);
                if count > 0 {
                    info!("  {kind:?}: {count}");
                }
            }
        }
    }

    info!(
        "Triangulated {} regions: {vertices} vertices, {triangles} triangles, {bytes} bytes packed",
        meshes.len()
    );
}
