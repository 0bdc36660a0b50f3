//! In-memory height grid with validated block layout.

use glam::Vec3;

use crate::error::HeightFieldError;
use crate::fbm::FbmHeights;
use crate::field::{HeightField, HeightSample};

/// A `dimension × dimension` grid of heights laid out row by row (`z` major).
///
/// Positions are `(x * spacing, height, z * spacing)`. Normals are central
/// differences, one-sided at the field border.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    dimension: u32,
    block_size: u32,
    mip_levels: u32,
    spacing: f32,
    detail_scale: f32,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Build a grid from raw heights with unit spacing, a detail scale of 1
    /// and every mip level the block size allows.
    pub fn new(heights: Vec<f32>, dimension: u32, block_size: u32) -> Result<Self, HeightFieldError> {
        let max_levels = Self::max_mip_levels(block_size)?;
        if dimension < block_size || (dimension - 1) % (block_size - 1) != 0 {
            return Err(HeightFieldError::DimensionMismatch {
                dimension,
                block_size,
            });
        }
        let expected = dimension as usize * dimension as usize;
        if heights.len() != expected {
            return Err(HeightFieldError::SampleCountMismatch {
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self {
            dimension,
            block_size,
            mip_levels: max_levels,
            spacing: 1.0,
            detail_scale: 1.0,
            heights,
        })
    }

    /// Build a grid by evaluating `height(x, z)` at every sample.
    pub fn from_fn(
        dimension: u32,
        block_size: u32,
        mut height: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, HeightFieldError> {
        let mut heights = Vec::with_capacity(dimension as usize * dimension as usize);
        for z in 0..dimension {
            for x in 0..dimension {
                heights.push(height(x, z));
            }
        }
        Self::new(heights, dimension, block_size)
    }

    /// Fill a grid from a fBm generator, sampling it once per grid point.
    pub fn from_fbm(
        fbm: &FbmHeights,
        dimension: u32,
        block_size: u32,
    ) -> Result<Self, HeightFieldError> {
        let grid = Self::from_fn(dimension, block_size, |x, z| {
            fbm.sample(x as f64, z as f64) as f32
        })?;
        log::debug!(
            "Generated {dimension}x{dimension} fBm height grid (seed {})",
            fbm.params().seed
        );
        Ok(grid)
    }

    /// Largest mip level count a block of `block_size` vertices supports.
    ///
    /// The coarsest level spans the whole block with a single quad.
    pub fn max_mip_levels(block_size: u32) -> Result<u32, HeightFieldError> {
        if block_size < 3 || !(block_size - 1).is_power_of_two() {
            return Err(HeightFieldError::InvalidBlockSize(block_size));
        }
        Ok((block_size - 1).trailing_zeros() + 1)
    }

    /// Set the world distance between neighbouring samples.
    pub fn with_spacing(mut self, spacing: f32) -> Result<Self, HeightFieldError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(HeightFieldError::InvalidSpacing(spacing));
        }
        self.spacing = spacing;
        Ok(self)
    }

    /// Set the detail texture repeat count.
    pub fn with_detail_scale(mut self, detail_scale: f32) -> Self {
        self.detail_scale = detail_scale;
        self
    }

    /// Limit the number of mip levels per block.
    pub fn with_mip_levels(mut self, levels: u32) -> Result<Self, HeightFieldError> {
        let max = Self::max_mip_levels(self.block_size)?;
        if levels == 0 || levels > max {
            return Err(HeightFieldError::InvalidMipLevels {
                levels,
                block_size: self.block_size,
                max,
            });
        }
        self.mip_levels = levels;
        Ok(self)
    }

    /// World distance between neighbouring samples.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Overwrite a single height, e.g. for terrain editing.
    ///
    /// Blocks covering the sample must rebuild their mesh and error thresholds.
    pub fn set_height(&mut self, x: u32, z: u32, height: f32) {
        let index = self.index(x, z);
        self.heights[index] = height;
    }

    fn index(&self, x: u32, z: u32) -> usize {
        assert!(
            x < self.dimension && z < self.dimension,
            "sample ({x}, {z}) outside {d}x{d} height grid",
            d = self.dimension
        );
        z as usize * self.dimension as usize + x as usize
    }

    fn normal(&self, x: u32, z: u32) -> Vec3 {
        let last = self.dimension - 1;
        let (x0, x1) = (x.saturating_sub(1), (x + 1).min(last));
        let (z0, z1) = (z.saturating_sub(1), (z + 1).min(last));

        let dx = (self.height(x1, z) - self.height(x0, z)) / ((x1 - x0) as f32 * self.spacing);
        let dz = (self.height(x, z1) - self.height(x, z0)) / ((z1 - z0) as f32 * self.spacing);

        Vec3::new(-dx, 1.0, -dz).normalize()
    }
}

impl HeightField for HeightGrid {
    fn sample(&self, x: u32, z: u32) -> HeightSample {
        let height = self.heights[self.index(x, z)];
        HeightSample {
            position: Vec3::new(x as f32 * self.spacing, height, z as f32 * self.spacing),
            normal: self.normal(x, z),
        }
    }

    fn block_size(&self) -> u32 {
        self.block_size
    }

    fn num_mip_levels(&self) -> u32 {
        self.mip_levels
    }

    fn dimension(&self) -> u32 {
        self.dimension
    }

    fn detail_scale(&self) -> f32 {
        self.detail_scale
    }

    fn height(&self, x: u32, z: u32) -> f32 {
        self.heights[self.index(x, z)]
    }
}
