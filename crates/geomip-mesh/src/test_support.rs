//! Triangle extraction and coverage checks shared by the mesher tests.

use geomip_heightfield::HeightGrid;

use crate::builder::initialize_mesh;
use crate::mesh::{TerrainMesh, Topology};

/// Triangle as three block-local `(x, z)` grid coordinates.
pub type Triangle = [(u32, u32); 3];

/// Sample offsets inside each unit cell. Chosen off every diagonal a mesh of
/// power-of-two steps can produce.
const CELL_SAMPLES: [(f64, f64); 5] = [
    (0.237, 0.619),
    (0.781, 0.143),
    (0.5123, 0.4871),
    (0.117, 0.903),
    (0.91, 0.88),
];

/// Mesh over a flat single-block field.
pub fn flat_mesh(block_size: u32) -> TerrainMesh {
    let n = block_size as usize;
    let grid = HeightGrid::new(vec![0.0; n * n], block_size, block_size).unwrap();
    initialize_mesh(&grid, 0, 0, block_size)
}

fn coords(index: u32, block_size: u32) -> (u32, u32) {
    (index % block_size, index / block_size)
}

/// Non-degenerate triangles of a strip, with odd triangles re-wound.
pub fn strip_triangles(indices: &[u32], block_size: u32) -> Vec<Triangle> {
    indices
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1] && w[1] != w[2] && w[0] != w[2])
        .map(|(i, w)| {
            let [a, b, c] = if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            };
            [
                coords(a, block_size),
                coords(b, block_size),
                coords(c, block_size),
            ]
        })
        .collect()
}

/// Triangles of a plain list.
pub fn list_triangles(indices: &[u32], block_size: u32) -> Vec<Triangle> {
    assert_eq!(indices.len() % 3, 0, "list length {} not a multiple of 3", indices.len());
    indices
        .chunks_exact(3)
        .map(|c| {
            [
                coords(c[0], block_size),
                coords(c[1], block_size),
                coords(c[2], block_size),
            ]
        })
        .collect()
}

/// Every triangle the mesh's current draw groups produce.
pub fn mesh_triangles(mesh: &TerrainMesh) -> Vec<Triangle> {
    let n = mesh.block_size();
    mesh.groups()
        .iter()
        .flat_map(|group| {
            let indices = mesh.group_indices(group);
            match group.topology {
                Topology::TriangleStrip => strip_triangles(indices, n),
                Topology::TriangleList => list_triangles(indices, n),
            }
        })
        .collect()
}

/// Expected strip length for an uninset block.
pub fn strip_length(block_size: u32, step: u32) -> usize {
    let cells = ((block_size - 1) / step) as usize;
    2 * cells * (cells + 1) + 4 * (cells / 2)
}

/// Twice the signed area seen from above; positive when the triangle's
/// normal points along +Y.
fn up_area2(tri: &Triangle) -> i64 {
    let [a, b, c] = tri.map(|(x, z)| (i64::from(x), i64::from(z)));
    let (dx1, dz1) = (b.0 - a.0, b.1 - a.1);
    let (dx2, dz2) = (c.0 - a.0, c.1 - a.1);
    dz1 * dx2 - dx1 * dz2
}

fn contains(tri: &Triangle, px: f64, pz: f64) -> bool {
    let edge = |(ax, az): (u32, u32), (bx, bz): (u32, u32)| {
        let (ax, az, bx, bz) = (f64::from(ax), f64::from(az), f64::from(bx), f64::from(bz));
        (bz - az) * (px - ax) - (bx - ax) * (pz - az)
    };
    let e0 = edge(tri[0], tri[1]);
    let e1 = edge(tri[1], tri[2]);
    let e2 = edge(tri[2], tri[0]);
    (e0 > 0.0 && e1 > 0.0 && e2 > 0.0) || (e0 < 0.0 && e1 < 0.0 && e2 < 0.0)
}

/// Number of triangles covering each unit cell, in row-major order.
///
/// Panics if a cell is only partly covered.
pub fn grid_coverage(triangles: &[Triangle], block_size: u32) -> Vec<u32> {
    let cells = block_size - 1;
    let mut coverage = Vec::with_capacity((cells * cells) as usize);
    for cz in 0..cells {
        for cx in 0..cells {
            let counts: Vec<u32> = CELL_SAMPLES
                .iter()
                .map(|&(ox, oz)| {
                    let (px, pz) = (f64::from(cx) + ox, f64::from(cz) + oz);
                    triangles.iter().filter(|t| contains(t, px, pz)).count() as u32
                })
                .collect();
            assert!(
                counts.iter().all(|&c| c == counts[0]),
                "cell ({cx}, {cz}) partly covered: {counts:?}"
            );
            coverage.push(counts[0]);
        }
    }
    coverage
}

/// Every triangle is non-degenerate and faces +Y.
pub fn assert_facing_up(triangles: &[Triangle]) {
    for tri in triangles {
        assert!(up_area2(tri) > 0, "triangle {tri:?} does not face up");
    }
}

/// The triangles tile the block exactly once with no duplicates.
pub fn assert_exact_cover(triangles: &[Triangle], block_size: u32) {
    assert_facing_up(triangles);

    let coverage = grid_coverage(triangles, block_size);
    for (cell, &count) in coverage.iter().enumerate() {
        assert_eq!(count, 1, "cell {cell} covered {count} times");
    }

    let area2: i64 = triangles.iter().map(up_area2).sum();
    let side = i64::from(block_size - 1);
    assert_eq!(area2, 2 * side * side, "total area mismatch");

    let mut keys: Vec<[(u32, u32); 3]> = triangles
        .iter()
        .map(|tri| {
            let mut key = *tri;
            key.sort_unstable();
            key
        })
        .collect();
    keys.sort_unstable();
    let total = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), total, "duplicate triangles");
}
