//! Block construction errors.

/// Reasons a [`crate::MapBlock`] or [`crate::BlockGrid`] cannot be built
/// over a height field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// Block size is not `2^k + 1` with `k >= 1`.
    #[error("block size {0} is not a power of two plus one")]
    InvalidBlockSize(u32),

    /// Mip level count is zero or coarser than one quad per block.
    #[error("{levels} mip levels do not fit a block of {block_size} vertices")]
    InvalidMipLevels {
        /// Level count reported by the height field.
        levels: u32,
        /// Vertices per block side.
        block_size: u32,
    },

    /// The block does not lie inside the height field.
    #[error("block ({block_x}, {block_z}) lies outside a {blocks_per_side}x{blocks_per_side} block field")]
    OutsideField {
        /// Block column.
        block_x: u32,
        /// Block row.
        block_z: u32,
        /// Blocks per field side.
        blocks_per_side: u32,
    },
}
