//! Command-line argument parsing for the terrain demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Geomip command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geomip", about = "Geomipmapped terrain block mesher")]
pub struct CliArgs {
    /// Height field samples per side.
    #[arg(long)]
    pub dimension: Option<u32>,

    /// Vertices per block side.
    #[arg(long)]
    pub block_size: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Acceptable screen-space error in pixels.
    #[arg(long)]
    pub pixel_error: Option<f32>,

    /// Viewer X position in world units.
    #[arg(long, default_value_t = 0.0)]
    pub viewer_x: f32,

    /// Viewer height in world units.
    #[arg(long, default_value_t = 50.0)]
    pub viewer_y: f32,

    /// Viewer Z position in world units.
    #[arg(long, default_value_t = 0.0)]
    pub viewer_z: f32,

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
        if let Some(dimension) = args.dimension {
            self.terrain.dimension = dimension;
        }
        if let Some(block_size) = args.block_size {
            self.terrain.block_size = block_size;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(pixel_error) = args.pixel_error {
            self.lod.pixel_error = pixel_error;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
