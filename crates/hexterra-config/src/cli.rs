//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// hexterra command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexterra", about = "Hex terrain mesh generator")]
pub struct CliArgs {
    /// Regions along X.
    #[arg(long)]
    pub chunks_x: Option<u32>,

    /// Regions along Z.
    #[arg(long)]
    pub chunks_z: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Perturbation texture size in texels.
    #[arg(long)]
    pub noise_size: Option<usize>,

    /// Terraces per slope.
    #[arg(long)]
    pub terraces: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(x) = args.chunks_x {
            self.grid.chunk_count_x = x;
        }
        if let Some(z) = args.chunks_z {
            self.grid.chunk_count_z = z;
        }
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(size) = args.noise_size {
            self.noise.texture_size = size;
        }
        if let Some(terraces) = args.terraces {
            self.metrics.terraces_per_slope = terraces;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
