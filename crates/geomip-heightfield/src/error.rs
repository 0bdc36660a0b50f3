//! Height field construction errors.

/// Reasons a height grid cannot be built from the given layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeightFieldError {
    /// Block size is not `2^k + 1` with `k >= 1`.
    #[error("block size {0} is not a power of two plus one")]
    InvalidBlockSize(u32),

    /// The field cannot be tiled by blocks sharing their border samples.
    #[error("dimension {dimension} is not a multiple of (block size {block_size} - 1) plus one")]
    DimensionMismatch {
        /// Samples per side of the field.
        dimension: u32,
        /// Vertices per side of a block.
        block_size: u32,
    },

    /// The height buffer does not hold `dimension²` samples.
    #[error("expected {expected} height samples, got {actual}")]
    SampleCountMismatch {
        /// `dimension²`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Mip level count is zero or asks for a step wider than the block.
    #[error("{levels} mip levels requested, block size {block_size} supports at most {max}")]
    InvalidMipLevels {
        /// Requested level count.
        levels: u32,
        /// Vertices per side of a block.
        block_size: u32,
        /// Largest level count the block size supports.
        max: u32,
    },

    /// Sample spacing must be positive and finite.
    #[error("sample spacing {0} must be positive and finite")]
    InvalidSpacing(f32),
}
