//! Per-level geometric error of a block, expressed as squared-distance
//! thresholds for LOD switching.
//!
//! At level `L` the block is drawn with quads of `2^L` samples. Every
//! lattice point strictly inside such a quad is dropped and replaced by the
//! bilinear interpolation of the quad's corners; the level's error is the
//! largest height difference this causes anywhere in the block.

use geomip_heightfield::HeightField;

/// Bilinear interpolation of four corner heights.
///
/// `h00` is at `(0, 0)`, `h10` at `(1, 0)`, `h01` at `(0, 1)` and `h11` at
/// `(1, 1)`; `fx` and `fz` are the independent fractions along x and z.
pub fn bilinear(h00: f32, h10: f32, h01: f32, h11: f32, fx: f32, fz: f32) -> f32 {
    let near = h00 + (h10 - h00) * fx;
    let far = h01 + (h11 - h01) * fx;
    near + (far - near) * fz
}

/// Largest absolute height error introduced by drawing the block at `level`.
///
/// Computed from this level's quads alone.
pub fn level_max_delta<F: HeightField + ?Sized>(
    field: &F,
    origin_x: u32,
    origin_z: u32,
    block_size: u32,
    level: u32,
) -> f32 {
    let step = 1u32 << level;
    let inv_step = 1.0 / step as f32;
    let mut max_delta = 0.0f32;

    for qz in (0..block_size - 1).step_by(step as usize) {
        for qx in (0..block_size - 1).step_by(step as usize) {
            let (x0, z0) = (origin_x + qx, origin_z + qz);
            let h00 = field.height(x0, z0);
            let h10 = field.height(x0 + step, z0);
            let h01 = field.height(x0, z0 + step);
            let h11 = field.height(x0 + step, z0 + step);

            for dz in 1..step {
                for dx in 1..step {
                    let fx = dx as f32 * inv_step;
                    let fz = dz as f32 * inv_step;
                    let expected = bilinear(h00, h10, h01, h11, fx, fz);
                    let delta = (field.height(x0 + dx, z0 + dz) - expected).abs();
                    max_delta = max_delta.max(delta);
                }
            }
        }
    }

    max_delta
}

/// Squared-distance LOD thresholds for levels `0..num_levels`.
///
/// `thresholds[0]` is always zero. For coarser levels the error is carried
/// forward as a running maximum, so the result never decreases with level;
/// `thresholds[L] = max_delta(0..=L)² * tolerance_factor`.
///
/// # Panics
///
/// Panics if `tolerance_factor` is not positive and finite.
pub fn compute_error_thresholds<F: HeightField + ?Sized>(
    field: &F,
    origin_x: u32,
    origin_z: u32,
    block_size: u32,
    num_levels: u32,
    tolerance_factor: f32,
) -> Vec<f32> {
    assert!(
        tolerance_factor.is_finite() && tolerance_factor > 0.0,
        "tolerance factor must be positive, got {tolerance_factor}"
    );

    let mut thresholds = Vec::with_capacity(num_levels as usize);
    thresholds.push(0.0);

    let mut max_delta = 0.0f32;
    for level in 1..num_levels {
        let delta = level_max_delta(field, origin_x, origin_z, block_size, level);
        max_delta = max_delta.max(delta);
        thresholds.push(max_delta * max_delta * tolerance_factor);
    }

    thresholds
}
