//! Geomipmapped terrain blocks: per-level error thresholds, a static vertex
//! buffer per block, and per-frame index synthesis that stitches each block
//! to coarser neighbours without T-junction cracks.

pub mod aabb;
pub mod block;
pub mod builder;
pub mod error;
pub mod error_metric;
pub mod frame;
pub mod grid;
pub mod interior;
pub mod mesh;
pub mod selector;
pub mod side;
pub mod stitch;
pub mod vertex;
pub mod vertex_format;

#[cfg(test)]
mod test_support;

pub use aabb::Aabb;
pub use block::MapBlock;
pub use builder::initialize_mesh;
pub use error::BlockError;
pub use error_metric::{bilinear, compute_error_thresholds, level_max_delta};
pub use frame::{BlockId, BlockLod, LodAssignment};
pub use grid::{BlockGrid, FrameStats};
pub use interior::emit_interior;
pub use mesh::{DrawGroup, IndexBatch, TerrainMesh, Topology, index_capacity};
pub use selector::select_level;
pub use side::{AlignedSides, Side};
pub use stitch::{EdgeFrame, FanBody, FanPlan, emit_edge};
pub use vertex::TerrainVertex;
pub use vertex_format::{TERRAIN_VERTEX_ATTRIBUTES, TERRAIN_VERTEX_LAYOUT};
