//! Registry of every block over one height field.

use geomip_heightfield::HeightField;
use glam::Vec3;

use crate::block::MapBlock;
use crate::error::BlockError;
use crate::frame::{BlockId, BlockLod, LodAssignment};
use crate::selector::select_level;
use crate::side::Side;

/// Index totals for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub blocks_drawn: usize,
    pub strip_indices: usize,
    pub list_indices: usize,
}

/// Owns every [`MapBlock`] of a field, in row-major order, and the neighbour
/// links between them.
#[derive(Debug)]
pub struct BlockGrid {
    blocks_per_side: u32,
    blocks: Vec<MapBlock>,
}

impl BlockGrid {
    /// Partition `field` into blocks and link each to its four neighbours.
    pub fn new<F: HeightField + ?Sized>(field: &F) -> Result<Self, BlockError> {
        let blocks_per_side = field.blocks_per_side();
        let mut blocks = Vec::with_capacity((blocks_per_side * blocks_per_side) as usize);
        for block_z in 0..blocks_per_side {
            for block_x in 0..blocks_per_side {
                let id = BlockId(block_z * blocks_per_side + block_x);
                blocks.push(MapBlock::new(field, id, block_x, block_z)?);
            }
        }

        let mut grid = Self {
            blocks_per_side,
            blocks,
        };
        for index in 0..grid.blocks.len() {
            let (block_x, block_z) = grid.blocks[index].block_coords();
            for side in Side::ALL {
                let (dx, dz) = side.offset();
                let neighbor = grid.id_at(block_x as i64 + dx as i64, block_z as i64 + dz as i64);
                grid.blocks[index].set_neighbor(side, neighbor);
            }
        }

        log::info!(
            "Built {} terrain blocks ({blocks_per_side}x{blocks_per_side}, {} vertices per side)",
            grid.blocks.len(),
            field.block_size()
        );
        Ok(grid)
    }

    pub fn blocks_per_side(&self) -> u32 {
        self.blocks_per_side
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[MapBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> &MapBlock {
        &self.blocks[id.index()]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut MapBlock {
        &mut self.blocks[id.index()]
    }

    /// Id of the block at column `block_x`, row `block_z`, if inside the grid.
    pub fn id_at(&self, block_x: i64, block_z: i64) -> Option<BlockId> {
        let n = i64::from(self.blocks_per_side);
        if (0..n).contains(&block_x) && (0..n).contains(&block_z) {
            Some(BlockId((block_z * n + block_x) as u32))
        } else {
            None
        }
    }

    /// Recompute every block's LOD thresholds.
    pub fn compute_error_thresholds<F: HeightField + ?Sized>(
        &mut self,
        field: &F,
        tolerance_factor: f32,
    ) {
        for block in &mut self.blocks {
            block.compute_error_thresholds(field, tolerance_factor);
        }
        log::debug!(
            "Computed error thresholds for {} blocks (tolerance factor {tolerance_factor})",
            self.blocks.len()
        );
    }

    /// Every block visible at the coarsest level its thresholds allow for a
    /// viewer at `viewer`, measured to the block's bounding box.
    pub fn select_lods(&self, viewer: Vec3) -> LodAssignment {
        let mut lods = LodAssignment::new(self.blocks.len());
        for block in &self.blocks {
            let distance_squared = block.bounds().distance_squared(viewer);
            let level = select_level(block.error_thresholds(), distance_squared);
            lods.set(block.id(), BlockLod::visible(level));
        }
        lods
    }

    /// Rebuild the blocks affected by an edit to sample `(x, z)`.
    ///
    /// Normals read one sample either side, so blocks within one sample of
    /// the edit rebuild too. Returns how many blocks were rebuilt.
    pub fn refresh_sample<F: HeightField + ?Sized>(
        &mut self,
        field: &F,
        x: u32,
        z: u32,
        tolerance_factor: f32,
    ) -> usize {
        let mut rebuilt = 0;
        for block in &mut self.blocks {
            let (origin_x, origin_z) = block.origin();
            let span = block.block_size();
            let near = |sample: u32, origin: u32| {
                sample + 1 >= origin && sample <= origin + span
            };
            if near(x, origin_x) && near(z, origin_z) {
                block.rebuild(field);
                block.compute_error_thresholds(field, tolerance_factor);
                rebuilt += 1;
            }
        }
        log::debug!("Sample ({x}, {z}) edited, rebuilt {rebuilt} blocks");
        rebuilt
    }

    /// Render every visible block and clear the rest.
    ///
    /// # Panics
    ///
    /// Panics if `lods` does not cover exactly this grid's blocks, or on any
    /// per-block contract violation (see [`MapBlock::render`]).
    pub fn render(&mut self, lods: &LodAssignment) -> FrameStats {
        assert_eq!(
            lods.len(),
            self.blocks.len(),
            "LOD assignment covers {} blocks, grid has {}",
            lods.len(),
            self.blocks.len()
        );

        let mut stats = FrameStats::default();
        for block in &mut self.blocks {
            if !lods.get(block.id()).visible {
                block.hide();
                continue;
            }
            let mesh = block.render(lods);
            stats.blocks_drawn += 1;
            if let [strip, fans] = mesh.groups() {
                stats.strip_indices += strip.index_count as usize;
                stats.list_indices += fans.index_count as usize;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_exact_cover, mesh_triangles};
    use geomip_heightfield::HeightGrid;

    fn flat_field(blocks_per_side: u32, block_size: u32) -> HeightGrid {
        let dimension = blocks_per_side * (block_size - 1) + 1;
        HeightGrid::from_fn(dimension, block_size, |_, _| 0.0).unwrap()
    }

    fn levels(lods: &LodAssignment) -> Vec<u32> {
        lods.iter().map(|(_, lod)| lod.level).collect()
    }

    #[test]
    fn test_neighbors_are_wired() {
        let grid = BlockGrid::new(&flat_field(3, 5)).unwrap();
        assert_eq!(grid.len(), 9);

        let center = grid.block(BlockId(4));
        assert_eq!(center.neighbor(Side::North), Some(BlockId(1)));
        assert_eq!(center.neighbor(Side::South), Some(BlockId(7)));
        assert_eq!(center.neighbor(Side::East), Some(BlockId(5)));
        assert_eq!(center.neighbor(Side::West), Some(BlockId(3)));

        let corner = grid.block(BlockId(0));
        assert_eq!(corner.neighbor(Side::North), None);
        assert_eq!(corner.neighbor(Side::West), None);
        assert_eq!(corner.neighbor(Side::East), Some(BlockId(1)));
    }

    #[test]
    fn test_neighbor_links_are_symmetric() {
        let grid = BlockGrid::new(&flat_field(4, 5)).unwrap();
        for block in grid.blocks() {
            for side in Side::ALL {
                if let Some(id) = block.neighbor(side) {
                    assert_eq!(grid.block(id).neighbor(side.opposite()), Some(block.id()));
                }
            }
        }
    }

    #[test]
    fn test_id_at_bounds() {
        let grid = BlockGrid::new(&flat_field(2, 5)).unwrap();
        assert_eq!(grid.id_at(1, 1), Some(BlockId(3)));
        assert_eq!(grid.id_at(-1, 0), None);
        assert_eq!(grid.id_at(0, 2), None);
    }

    #[test]
    fn test_flat_field_selects_coarsest() {
        let field = flat_field(2, 9);
        let mut grid = BlockGrid::new(&field).unwrap();
        grid.compute_error_thresholds(&field, 1.0);
        let lods = grid.select_lods(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(levels(&lods), vec![3; 4]);
        assert!(lods.iter().all(|(_, lod)| lod.visible));
    }

    #[test]
    fn test_rough_block_near_viewer_is_fine() {
        let field = HeightGrid::from_fn(17, 9, |x, z| ((x * 5 + z * 3) % 4) as f32).unwrap();
        let mut grid = BlockGrid::new(&field).unwrap();
        grid.compute_error_thresholds(&field, 100.0);
        let lods = grid.select_lods(Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(lods.get(BlockId(0)).level, 0);
    }

    #[test]
    fn test_balance_limits_level_gaps() {
        let mut grid = BlockGrid::new(&flat_field(3, 9)).unwrap();
        let mut lods = LodAssignment::uniform(grid.len(), 3);
        lods.set(BlockId(4), BlockLod::visible(0));

        assert_eq!(lods.enforce_balance(&grid), 8);
        assert_eq!(levels(&lods), vec![2, 1, 2, 1, 0, 1, 2, 1, 2]);
        assert_eq!(lods.enforce_balance(&grid), 0);

        grid.render(&lods);
        for block in grid.blocks() {
            assert_exact_cover(&mesh_triangles(block.mesh()), 9);
        }
    }

    #[test]
    fn test_balance_ignores_hidden_blocks() {
        let grid = BlockGrid::new(&flat_field(2, 9)).unwrap();
        let mut lods = LodAssignment::uniform(grid.len(), 3);
        lods.set(BlockId(0), BlockLod { level: 0, visible: false });
        assert_eq!(lods.enforce_balance(&grid), 0);
    }

    #[test]
    fn test_render_hides_invisible_blocks() {
        let mut grid = BlockGrid::new(&flat_field(2, 5)).unwrap();
        let mut lods = LodAssignment::uniform(grid.len(), 0);
        grid.render(&lods);
        lods.set(BlockId(3), BlockLod { level: 0, visible: false });

        let stats = grid.render(&lods);
        assert_eq!(stats.blocks_drawn, 3);
        assert_eq!(stats.strip_indices, 3 * 48);
        assert_eq!(stats.list_indices, 0);
        assert!(grid.block(BlockId(3)).mesh().groups().is_empty());
    }

    #[test]
    fn test_render_counts_fans() {
        let mut grid = BlockGrid::new(&flat_field(2, 5)).unwrap();
        let mut lods = LodAssignment::uniform(grid.len(), 1);
        lods.set(BlockId(1), BlockLod::visible(2));
        let stats = grid.render(&lods);
        // Blocks 0 and 3 each stitch one side against block 1.
        assert_eq!(stats.list_indices, 2 * 9);
    }

    #[test]
    #[should_panic(expected = "LOD assignment covers")]
    fn test_render_rejects_mismatched_assignment() {
        let mut grid = BlockGrid::new(&flat_field(2, 5)).unwrap();
        grid.render(&LodAssignment::uniform(3, 0));
    }

    #[test]
    fn test_refresh_sample_updates_touching_blocks() {
        let mut field = flat_field(3, 5);
        let mut grid = BlockGrid::new(&field).unwrap();
        grid.compute_error_thresholds(&field, 1.0);

        // (4, 2) lies on the border shared by blocks 0 and 1.
        field.set_height(4, 2, 8.0);
        let rebuilt = grid.refresh_sample(&field, 4, 2, 1.0);
        assert_eq!(rebuilt, 2);

        let left = grid.block(BlockId(0)).mesh().vertices()[4 + 2 * 5];
        let right = grid.block(BlockId(1)).mesh().vertices()[2 * 5];
        assert_eq!(left.position[1], 8.0);
        assert_eq!(right.position[1], 8.0);
        assert!(grid.block(BlockId(0)).error_thresholds()[2] > 0.0);
        assert_eq!(grid.block(BlockId(2)).error_thresholds()[2], 0.0);
    }
}
