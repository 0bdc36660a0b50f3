//! Interior triangle strip of a block at a uniform step.

use crate::mesh::IndexBatch;
use crate::side::{AlignedSides, Side};

/// Emit one serpentine triangle strip covering the block interior.
///
/// Each aligned side is inset by `step` so the edge stitcher can cover that
/// border row instead. Columns of width `step` alternate between walking
/// down (`z` ascending) and up; up columns are bracketed by repeated
/// vertices so the winding stays consistent across the turn.
pub fn emit_interior(batch: &mut IndexBatch<'_>, block_size: u32, step: u32, aligned: AlignedSides) {
    let inset = |side: Side| if aligned.contains(side) { step } else { 0 };
    let start_x = inset(Side::West);
    let end_x = block_size - 1 - inset(Side::East);
    let start_z = inset(Side::North);
    let end_z = block_size - 1 - inset(Side::South);

    for (column, x) in (start_x..end_x).step_by(step as usize).enumerate() {
        if column % 2 == 0 {
            for z in (start_z..end_z + 1).step_by(step as usize) {
                batch.push_vertex(x + step, z);
                batch.push_vertex(x, z);
            }
        } else {
            batch.push_vertex(x, end_z);
            batch.push_vertex(x, end_z);
            for z in (start_z..end_z + 1).step_by(step as usize).rev() {
                batch.push_vertex(x, z);
                batch.push_vertex(x + step, z);
            }
            batch.push_vertex(x + step, start_z);
            batch.push_vertex(x + step, start_z);
        }
    }
}
