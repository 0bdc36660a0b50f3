//! Demo binary that meshes a procedural height field for one viewpoint.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p geomip-demo -- --viewer-x 128 --viewer-z 128` to
//! place the viewer over the middle of the default field.

use std::error::Error;

use clap::Parser;
use geomip_config::{CliArgs, Config, default_config_dir};
use geomip_heightfield::{FbmHeights, FbmParams, HeightField, HeightGrid};
use geomip_mesh::{BlockGrid, LodAssignment};
use glam::Vec3;
use tracing::{info, warn};

fn build_field(config: &Config) -> Result<HeightGrid, Box<dyn Error>> {
    let terrain = &config.terrain;
    let fbm = FbmHeights::new(FbmParams {
        seed: terrain.seed,
        octaves: terrain.octaves,
        lacunarity: terrain.lacunarity,
        persistence: terrain.persistence,
        base_frequency: terrain.base_frequency,
        amplitude: terrain.amplitude,
    });

    let mut field = HeightGrid::from_fbm(&fbm, terrain.dimension, terrain.block_size)?
        .with_spacing(terrain.spacing)?
        .with_detail_scale(terrain.detail_scale);
    if let Some(levels) = terrain.mip_levels {
        field = field.with_mip_levels(levels)?;
    }
    Ok(field)
}

fn level_histogram(lods: &LodAssignment, num_levels: u32) -> Vec<usize> {
    let mut histogram = vec![0; num_levels as usize];
    for (_, lod) in lods.iter().filter(|(_, lod)| lod.visible) {
        histogram[lod.level as usize] += 1;
    }
    histogram
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    config.lod.validate()?;

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    geomip_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let field = build_field(&config)?;
    info!(
        "Height field {}x{} with {} blocks per side, {} mip levels",
        field.dimension(),
        field.dimension(),
        field.blocks_per_side(),
        field.num_mip_levels()
    );

    let mut grid = BlockGrid::new(&field)?;
    let tolerance_factor = config.lod.tolerance_factor();
    grid.compute_error_thresholds(&field, tolerance_factor);
    info!("Error thresholds computed with tolerance factor {tolerance_factor:.1}");

    let viewer = Vec3::new(args.viewer_x, args.viewer_y, args.viewer_z);
    let mut lods = grid.select_lods(viewer);
    if config.lod.balance {
        let lowered = lods.enforce_balance(&grid);
        if lowered > 0 {
            info!("Balanced LOD assignment, lowered {lowered} levels");
        }
    } else {
        warn!("LOD balancing disabled; blocks may crack against much coarser neighbours");
    }

    let stats = grid.render(&lods);
    info!(
        "Viewer at {viewer}: levels per block {:?}",
        level_histogram(&lods, field.num_mip_levels())
    );
    info!(
        "Rendered {} blocks: {} strip indices, {} fan indices ({} fan triangles)",
        stats.blocks_drawn,
        stats.strip_indices,
        stats.list_indices,
        stats.list_indices / 3
    );

    let vertex_bytes: usize = grid.blocks().iter().map(|b| b.mesh().vertex_bytes().len()).sum();
    let index_bytes: usize = grid.blocks().iter().map(|b| b.mesh().index_bytes().len()).sum();
    info!("GPU payload: {vertex_bytes} vertex bytes, {index_bytes} index bytes");

    Ok(())
}
