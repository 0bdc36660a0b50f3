//! The read-only height field contract consumed by block meshing.

use glam::Vec3;

/// One grid point of the height field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    /// World-space position.
    pub position: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
}

/// A square grid of height samples shared by all terrain blocks.
///
/// Coordinates run over `[0, dimension)` on both axes. `x` grows east and
/// `z` grows south.
pub trait HeightField {
    /// Sample at integer grid coordinates.
    ///
    /// # Panics
    ///
    /// Implementations panic when `x` or `z` is outside `[0, dimension)`.
    fn sample(&self, x: u32, z: u32) -> HeightSample;

    /// Vertices per block side (`2^k + 1`).
    fn block_size(&self) -> u32;

    /// Number of mip levels each block supports; level 0 is full resolution.
    fn num_mip_levels(&self) -> u32;

    /// Samples per side of the whole field.
    fn dimension(&self) -> u32;

    /// How many times the detail texture repeats across the field.
    fn detail_scale(&self) -> f32;

    /// Height (`position.y`) at integer grid coordinates.
    fn height(&self, x: u32, z: u32) -> f32 {
        self.sample(x, z).position.y
    }

    /// Blocks per field side.
    fn blocks_per_side(&self) -> u32 {
        (self.dimension() - 1) / (self.block_size() - 1)
    }
}
