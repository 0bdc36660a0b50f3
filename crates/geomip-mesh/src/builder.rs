//! Static vertex buffer and bounds for one block, built once at init.

use geomip_heightfield::HeightField;

use crate::aabb::Aabb;
use crate::mesh::TerrainMesh;
use crate::vertex::TerrainVertex;

/// Build the block's bounding box and vertex buffer.
///
/// Vertex `(i, j)` of the block lands at index `i + j * block_size` and
/// samples the field at `(origin_x + i, origin_z + j)`. `uv0` spans `[0, 1]`
/// over the whole field with `v` flipped so north is at the top of the
/// texture; `uv1` is `uv0` times the field's detail scale.
pub fn initialize_mesh<F: HeightField + ?Sized>(
    field: &F,
    origin_x: u32,
    origin_z: u32,
    block_size: u32,
) -> TerrainMesh {
    let span = (field.dimension() - 1) as f32;
    let detail = field.detail_scale();

    let mut bounds = Aabb::from_point(field.sample(origin_x, origin_z).position);
    let mut vertices = Vec::with_capacity(block_size as usize * block_size as usize);

    for j in 0..block_size {
        let z = origin_z + j;
        for i in 0..block_size {
            let x = origin_x + i;
            let sample = field.sample(x, z);
            bounds.grow(sample.position);

            let u = x as f32 / span;
            let v = 1.0 - z as f32 / span;
            vertices.push(TerrainVertex {
                position: sample.position.to_array(),
                normal: sample.normal.to_array(),
                uv0: [u, v],
                uv1: [u * detail, v * detail],
            });
        }
    }

    TerrainMesh::new(block_size, vertices, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomip_heightfield::HeightGrid;
    use glam::Vec3;

    #[test]
    fn test_vertex_layout_and_uvs() {
        let grid = HeightGrid::from_fn(9, 5, |x, z| (x + z) as f32)
            .unwrap()
            .with_spacing(2.0)
            .unwrap()
            .with_detail_scale(4.0);
        let mesh = initialize_mesh(&grid, 4, 0, 5);

        assert_eq!(mesh.vertices().len(), 25);
        // Vertex (1, 2) of the block samples field point (5, 2).
        let v = mesh.vertices()[1 + 2 * 5];
        assert_eq!(v.position, [10.0, 7.0, 4.0]);
        assert_eq!(v.uv0, [5.0 / 8.0, 1.0 - 2.0 / 8.0]);
        assert_eq!(v.uv1, [5.0 / 8.0 * 4.0, (1.0 - 2.0 / 8.0) * 4.0]);
    }

    #[test]
    fn test_uv_spans_whole_field() {
        let grid = HeightGrid::new(vec![0.0; 81], 9, 5).unwrap();
        let first = initialize_mesh(&grid, 0, 0, 5);
        let last = initialize_mesh(&grid, 4, 4, 5);
        assert_eq!(first.vertices()[0].uv0, [0.0, 1.0]);
        assert_eq!(last.vertices()[24].uv0, [1.0, 0.0]);
    }

    #[test]
    fn test_bounds_enclose_all_samples() {
        let grid = HeightGrid::from_fn(5, 5, |x, z| if (x, z) == (3, 1) { 9.0 } else { -1.0 })
            .unwrap();
        let mesh = initialize_mesh(&grid, 0, 0, 5);
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 9.0, 4.0));
        for v in mesh.vertices() {
            assert!(bounds.contains_point(Vec3::from_array(v.position)));
        }
    }

    #[test]
    fn test_starts_without_indices() {
        let grid = HeightGrid::new(vec![0.0; 25], 5, 5).unwrap();
        let mesh = initialize_mesh(&grid, 0, 0, 5);
        assert!(mesh.indices().is_empty());
        assert!(mesh.groups().is_empty());
        assert_eq!(mesh.index_capacity(), 6 * 25 + 4 * 16);
    }
}
