//! One terrain block: static vertices, per-level error thresholds and the
//! per-frame index synthesis that joins the interior strip to edge fans.

use geomip_heightfield::HeightField;

use crate::aabb::Aabb;
use crate::builder::initialize_mesh;
use crate::error::BlockError;
use crate::error_metric;
use crate::frame::{BlockId, BlockLod, LodAssignment};
use crate::interior::emit_interior;
use crate::mesh::{TerrainMesh, Topology};
use crate::side::{AlignedSides, Side};
use crate::stitch::emit_edge;

/// A `block_size × block_size` window onto the shared height field.
///
/// Neighbours are ids into the owning [`crate::BlockGrid`]; a block only
/// reads their LODs from the frame's [`LodAssignment`].
#[derive(Debug)]
pub struct MapBlock {
    id: BlockId,
    block_x: u32,
    block_z: u32,
    origin_x: u32,
    origin_z: u32,
    block_size: u32,
    num_levels: u32,
    error_thresholds: Vec<f32>,
    neighbors: [Option<BlockId>; 4],
    mesh: TerrainMesh,
}

impl MapBlock {
    /// Build block `(block_x, block_z)` of `field` and its vertex buffer.
    ///
    /// Error thresholds start at zero for every level until
    /// [`Self::compute_error_thresholds`] runs.
    pub fn new<F: HeightField + ?Sized>(
        field: &F,
        id: BlockId,
        block_x: u32,
        block_z: u32,
    ) -> Result<Self, BlockError> {
        let block_size = field.block_size();
        if block_size < 3 || !(block_size - 1).is_power_of_two() {
            return Err(BlockError::InvalidBlockSize(block_size));
        }

        let num_levels = field.num_mip_levels();
        let max_levels = (block_size - 1).trailing_zeros() + 1;
        if num_levels == 0 || num_levels > max_levels {
            return Err(BlockError::InvalidMipLevels {
                levels: num_levels,
                block_size,
            });
        }

        let blocks_per_side = field.blocks_per_side();
        if block_x >= blocks_per_side || block_z >= blocks_per_side {
            return Err(BlockError::OutsideField {
                block_x,
                block_z,
                blocks_per_side,
            });
        }

        let origin_x = block_x * (block_size - 1);
        let origin_z = block_z * (block_size - 1);
        let mesh = initialize_mesh(field, origin_x, origin_z, block_size);

        Ok(Self {
            id,
            block_x,
            block_z,
            origin_x,
            origin_z,
            block_size,
            num_levels,
            error_thresholds: vec![0.0; num_levels as usize],
            neighbors: [None; 4],
            mesh,
        })
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Block column and row in the grid.
    pub fn block_coords(&self) -> (u32, u32) {
        (self.block_x, self.block_z)
    }

    /// First height field sample covered by this block.
    pub fn origin(&self) -> (u32, u32) {
        (self.origin_x, self.origin_z)
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    /// Squared-distance thresholds, one per level.
    pub fn error_thresholds(&self) -> &[f32] {
        &self.error_thresholds
    }

    /// Box around every sample of the block.
    pub fn bounds(&self) -> Aabb {
        self.mesh.bounds()
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn neighbor(&self, side: Side) -> Option<BlockId> {
        self.neighbors[side.index()]
    }

    /// Neighbour ids indexed by [`Side::index`].
    pub fn neighbors(&self) -> &[Option<BlockId>; 4] {
        &self.neighbors
    }

    pub fn set_neighbor(&mut self, side: Side, neighbor: Option<BlockId>) {
        self.neighbors[side.index()] = neighbor;
    }

    /// Recompute the LOD thresholds from the current field heights.
    pub fn compute_error_thresholds<F: HeightField + ?Sized>(
        &mut self,
        field: &F,
        tolerance_factor: f32,
    ) {
        self.error_thresholds = error_metric::compute_error_thresholds(
            field,
            self.origin_x,
            self.origin_z,
            self.block_size,
            self.num_levels,
            tolerance_factor,
        );
    }

    /// Rebuild the vertex buffer and bounds after the field was edited.
    pub fn rebuild<F: HeightField + ?Sized>(&mut self, field: &F) {
        self.mesh = initialize_mesh(field, self.origin_x, self.origin_z, self.block_size);
    }

    /// Drop this frame's indices without drawing anything.
    pub fn hide(&mut self) {
        self.mesh.reset_frame();
    }

    /// Regenerate the index buffer for this frame.
    ///
    /// Produces two draw groups: the interior triangle strip, then the edge
    /// fans as a triangle list (possibly empty). Sides are stitched in the
    /// order west, east, north, south.
    ///
    /// # Panics
    ///
    /// Panics if this block's level or a visible neighbour's level is outside
    /// `0..num_levels`, or if the assignment does not cover a neighbour.
    pub fn render(&mut self, lods: &LodAssignment) -> &TerrainMesh {
        let own = lods.get(self.id);
        assert!(
            own.level < self.num_levels,
            "block {:?} level {} outside 0..{}",
            self.id,
            own.level,
            self.num_levels
        );

        let neighbors: [Option<BlockLod>; 4] = self.neighbors.map(|id| id.map(|id| lods.get(id)));
        for side in Side::ALL {
            let Some(lod) = neighbors[side.index()].filter(|lod| lod.visible) else {
                continue;
            };
            assert!(
                lod.level < self.num_levels,
                "{side:?} neighbour of block {:?} has level {} outside 0..{}",
                self.id,
                lod.level,
                self.num_levels
            );
            if lod.level > own.level + 1 {
                log::warn!(
                    "Block {:?} at level {} has {side:?} neighbour at level {}; edge fans only bridge one level",
                    self.id,
                    own.level,
                    lod.level
                );
            }
        }

        let aligned = AlignedSides::from_neighbors(own, &neighbors);
        let step = own.step();
        let block_size = self.block_size;

        self.mesh.reset_frame();
        {
            let mut strip = self.mesh.lock_indices(Topology::TriangleStrip);
            emit_interior(&mut strip, block_size, step, aligned);
        }
        {
            let mut fans = self.mesh.lock_indices(Topology::TriangleList);
            for side in Side::STITCH_ORDER {
                if aligned.contains(side) {
                    emit_edge(&mut fans, block_size, step, side, aligned);
                }
            }
        }

        log::debug!(
            "Rendered block {:?} at level {} ({} aligned sides, {} indices)",
            self.id,
            own.level,
            aligned.count(),
            self.mesh.indices().len()
        );
        &self.mesh
    }
}
