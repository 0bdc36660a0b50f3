//! Crack-free edge fans between a block and a coarser neighbour.
//!
//! When a neighbour is drawn one level coarser, the shared border only has
//! vertices every `2 * step`. The border row of the block is then covered by
//! fans: each increment of `2 * step` along the edge has its apex on the
//! border and fans out to the inner row at `step` spacing.
//!
//! All four sides share one emitter. An [`EdgeFrame`] maps an `(along,
//! inward)` position into block coordinates; mirrored frames flip the
//! winding. Where two aligned sides meet, the corner is split between them:
//! at the start of a side the near triangle is skipped, at the end the body
//! collapses into a single triangle reaching the next corner vertex.

use crate::mesh::IndexBatch;
use crate::side::{AlignedSides, Side};

/// Local coordinate frame of one block edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeFrame {
    origin: (i64, i64),
    along: (i64, i64),
    inward: (i64, i64),
    mirrored: bool,
    /// Side met at the start of the walk.
    pub near: Side,
    /// Side met at the end of the walk.
    pub far: Side,
}

impl EdgeFrame {
    /// Frame for `side` of a block with `block_size` samples per edge.
    pub fn new(side: Side, block_size: u32) -> Self {
        let end = i64::from(block_size) - 1;
        match side {
            Side::North => Self {
                origin: (0, 0),
                along: (1, 0),
                inward: (0, 1),
                mirrored: false,
                near: Side::West,
                far: Side::East,
            },
            Side::East => Self {
                origin: (end, end),
                along: (0, -1),
                inward: (-1, 0),
                mirrored: true,
                near: Side::South,
                far: Side::North,
            },
            Side::South => Self {
                origin: (end, end),
                along: (-1, 0),
                inward: (0, -1),
                mirrored: false,
                near: Side::East,
                far: Side::West,
            },
            Side::West => Self {
                origin: (0, 0),
                along: (0, 1),
                inward: (1, 0),
                mirrored: true,
                near: Side::North,
                far: Side::South,
            },
        }
    }

    /// Block coordinates of the point `t` along the edge and `depth` inward.
    pub fn point(&self, t: u32, depth: u32) -> (u32, u32) {
        let (t, depth) = (i64::from(t), i64::from(depth));
        let x = self.origin.0 + self.along.0 * t + self.inward.0 * depth;
        let z = self.origin.1 + self.along.1 * t + self.inward.1 * depth;
        debug_assert!(x >= 0 && z >= 0, "edge point ({x}, {z}) outside block");
        (x as u32, z as u32)
    }

    fn emit(&self, batch: &mut IndexBatch<'_>, a: (u32, u32), b: (u32, u32), c: (u32, u32)) {
        if self.mirrored {
            batch.triangle(a, c, b);
        } else {
            batch.triangle(a, b, c);
        }
    }
}

/// Shape of the bulk of one fan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FanBody {
    /// Two triangles meeting at the inner midpoint of the far half.
    Split,
    /// One triangle from the apex to the far border vertex, leaving the
    /// corner square to the adjacent side.
    Blob,
}

/// Which triangles one fan increment emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FanPlan {
    pub body: FanBody,
    pub near_triangle: bool,
}

impl FanPlan {
    /// Plan for an increment given its position on the edge and whether the
    /// adjacent sides are also stitched.
    pub fn for_increment(first: bool, last: bool, near_aligned: bool, far_aligned: bool) -> Self {
        Self {
            body: if last && far_aligned {
                FanBody::Blob
            } else {
                FanBody::Split
            },
            near_triangle: !(first && near_aligned),
        }
    }
}

/// Emit the triangle-list fans stitching `side` to a neighbour one level
/// coarser than `step`.
///
/// `aligned` is the full set of stitched sides for this block; it decides
/// how the corners are shared.
///
/// # Panics
///
/// Panics if the block is too small to hold a fan at this step.
pub fn emit_edge(
    batch: &mut IndexBatch<'_>,
    block_size: u32,
    step: u32,
    side: Side,
    aligned: AlignedSides,
) {
    let span = block_size - 1;
    assert!(
        step > 0 && 2 * step <= span,
        "step {step} too coarse to stitch a block of size {block_size}"
    );

    let frame = EdgeFrame::new(side, block_size);
    let near_aligned = aligned.contains(frame.near);
    let far_aligned = aligned.contains(frame.far);
    let increments = span / (2 * step);

    for k in 0..increments {
        let t = k * 2 * step;
        let plan = FanPlan::for_increment(k == 0, k + 1 == increments, near_aligned, far_aligned);

        let apex = frame.point(t, 0);
        let inner_near = frame.point(t, step);
        let inner_mid = frame.point(t + step, step);
        let inner_far = frame.point(t + 2 * step, step);
        let border_far = frame.point(t + 2 * step, 0);

        match plan.body {
            FanBody::Split => {
                frame.emit(batch, apex, inner_far, border_far);
                frame.emit(batch, apex, inner_mid, inner_far);
            }
            FanBody::Blob => frame.emit(batch, apex, inner_mid, border_far),
        }
        if plan.near_triangle {
            frame.emit(batch, apex, inner_near, inner_mid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Topology;
    use crate::test_support::{assert_facing_up, flat_mesh, list_triangles};

    fn edge_triangles(block_size: u32, step: u32, side: Side, aligned: AlignedSides) -> Vec<[(u32, u32); 3]> {
        let mut mesh = flat_mesh(block_size);
        emit_edge(
            &mut mesh.lock_indices(Topology::TriangleList),
            block_size,
            step,
            side,
            aligned,
        );
        list_triangles(mesh.indices(), block_size)
    }

    #[test]
    fn test_frames_stay_on_their_edge() {
        for side in Side::ALL {
            let frame = EdgeFrame::new(side, 9);
            for t in 0..=8 {
                let (x, z) = frame.point(t, 0);
                let on_edge = match side {
                    Side::North => z == 0,
                    Side::South => z == 8,
                    Side::West => x == 0,
                    Side::East => x == 8,
                };
                assert!(on_edge, "{side:?} t={t} gave ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_fan_plan_corners() {
        let open = FanPlan::for_increment(true, true, false, false);
        assert_eq!(open.body, FanBody::Split);
        assert!(open.near_triangle);

        let closed = FanPlan::for_increment(true, true, true, true);
        assert_eq!(closed.body, FanBody::Blob);
        assert!(!closed.near_triangle);

        let middle = FanPlan::for_increment(false, false, true, true);
        assert_eq!(middle.body, FanBody::Split);
        assert!(middle.near_triangle);
    }

    #[test]
    fn test_north_only_fan() {
        let aligned = AlignedSides::from_sides(&[Side::North]);
        let triangles = edge_triangles(5, 2, Side::North, aligned);
        assert_eq!(
            triangles,
            vec![
                [(0, 0), (4, 2), (4, 0)],
                [(0, 0), (2, 2), (4, 2)],
                [(0, 0), (0, 2), (2, 2)],
            ]
        );
    }

    #[test]
    fn test_north_west_corner_is_shared() {
        let aligned = AlignedSides::from_sides(&[Side::North, Side::West]);
        let west = edge_triangles(5, 2, Side::West, aligned);
        let north = edge_triangles(5, 2, Side::North, aligned);
        assert_eq!(west, vec![[(0, 0), (0, 4), (2, 4)], [(0, 0), (2, 4), (2, 2)]]);
        assert_eq!(north, vec![[(0, 0), (4, 2), (4, 0)], [(0, 0), (2, 2), (4, 2)]]);
    }

    #[test]
    fn test_north_east_corner_uses_blob() {
        let aligned = AlignedSides::from_sides(&[Side::North, Side::East]);
        let north = edge_triangles(9, 2, Side::North, aligned);
        // Two increments: a full fan, then the blob ending at (8, 0).
        assert_eq!(north.len(), 3 + 2);
        assert!(north.contains(&[(4, 0), (6, 2), (8, 0)]));
        assert!(!north.iter().any(|tri| tri.contains(&(8, 2))));

        let east = edge_triangles(9, 2, Side::East, aligned);
        assert!(east.contains(&[(8, 4), (8, 0), (6, 2)]));
    }

    #[test]
    fn test_edges_face_up() {
        for side in Side::ALL {
            for aligned in AlignedSides::all_combinations().filter(|a| a.contains(side)) {
                assert_facing_up(&edge_triangles(9, 2, side, aligned));
                assert_facing_up(&edge_triangles(9, 4, side, aligned));
            }
        }
    }

    #[test]
    fn test_triangle_count_per_side() {
        // 17 samples at step 1: 8 increments of 3 triangles.
        let aligned = AlignedSides::from_sides(&[Side::South]);
        assert_eq!(edge_triangles(17, 1, Side::South, aligned).len(), 24);
        // Both corners shared: one near triangle dropped, last body is a blob.
        let aligned = AlignedSides::ALL;
        assert_eq!(edge_triangles(17, 1, Side::South, aligned).len(), 24 - 1 - 1);
    }

    #[test]
    #[should_panic(expected = "too coarse to stitch")]
    fn test_rejects_step_wider_than_block() {
        edge_triangles(5, 4, Side::North, AlignedSides::from_sides(&[Side::North]));
    }
}
