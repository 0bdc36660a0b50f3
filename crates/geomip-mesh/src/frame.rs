//! The per-frame LOD input shared by every block in a render pass.
//!
//! Levels and visibility are decided before any block renders and stay
//! frozen for the whole pass; blocks only read them.

use crate::grid::BlockGrid;

/// Index of a block inside its owning [`crate::BlockGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    /// Position in registry-ordered arrays.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Level and visibility chosen for one block this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockLod {
    /// Mip level; `0` is full resolution, the vertex step is `2^level`.
    pub level: u32,
    /// Whether the block is drawn this frame.
    pub visible: bool,
}

impl BlockLod {
    /// A visible block at `level`.
    pub fn visible(level: u32) -> Self {
        Self {
            level,
            visible: true,
        }
    }

    /// Distance between rendered vertices, in grid samples.
    pub fn step(self) -> u32 {
        1 << self.level
    }
}

/// One [`BlockLod`] per block, indexed by [`BlockId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LodAssignment {
    lods: Vec<BlockLod>,
}

impl LodAssignment {
    /// Every block hidden at level 0.
    pub fn new(block_count: usize) -> Self {
        Self {
            lods: vec![BlockLod::default(); block_count],
        }
    }

    /// Every block visible at the same level.
    pub fn uniform(block_count: usize, level: u32) -> Self {
        Self {
            lods: vec![BlockLod::visible(level); block_count],
        }
    }

    /// Number of blocks covered.
    pub fn len(&self) -> usize {
        self.lods.len()
    }

    /// Returns true if the assignment covers no blocks.
    pub fn is_empty(&self) -> bool {
        self.lods.is_empty()
    }

    /// LOD of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not covered by this assignment.
    pub fn get(&self, id: BlockId) -> BlockLod {
        assert!(
            id.index() < self.lods.len(),
            "block {id:?} missing from LOD assignment of {} blocks",
            self.lods.len()
        );
        self.lods[id.index()]
    }

    /// Replace the LOD of `id`.
    pub fn set(&mut self, id: BlockId, lod: BlockLod) {
        assert!(
            id.index() < self.lods.len(),
            "block {id:?} missing from LOD assignment of {} blocks",
            self.lods.len()
        );
        self.lods[id.index()] = lod;
    }

    /// Iterate `(id, lod)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, BlockLod)> + '_ {
        self.lods
            .iter()
            .enumerate()
            .map(|(i, &lod)| (BlockId(i as u32), lod))
    }

    /// Lower coarse levels until no visible block has a visible neighbour
    /// more than one level coarser, since edge fans only bridge a single
    /// level. Returns how many levels were lowered.
    pub fn enforce_balance(&mut self, grid: &BlockGrid) -> usize {
        let mut lowered = 0;
        loop {
            let mut changed = false;
            for block in grid.blocks() {
                let own = self.get(block.id());
                if !own.visible {
                    continue;
                }
                for &neighbor in block.neighbors().iter().flatten() {
                    let mut lod = self.get(neighbor);
                    if lod.visible && lod.level > own.level + 1 {
                        lod.level = own.level + 1;
                        self.set(neighbor, lod);
                        lowered += 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                return lowered;
            }
        }
    }
}
