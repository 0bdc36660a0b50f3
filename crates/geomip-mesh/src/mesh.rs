//! Per-block mesh storage: a vertex buffer written once, an index buffer
//! refilled every frame through scoped [`IndexBatch`] locks, and the draw
//! groups those batches produce.

use crate::aabb::Aabb;
use crate::vertex::TerrainVertex;

/// Primitive topology of a draw group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Each index after the second forms a triangle with the previous two.
    TriangleStrip,
    /// Every three indices form an independent triangle.
    TriangleList,
}

impl Topology {
    /// Matching wgpu primitive topology.
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            Self::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// A contiguous index range drawn with one topology.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawGroup {
    /// How the indices are assembled into triangles.
    pub topology: Topology,
    /// Offset of the first index in the index buffer.
    pub first_index: u32,
    /// Number of indices in the group.
    pub index_count: u32,
    /// First vertex referenced by the group.
    pub first_vertex: u32,
    /// Number of vertices the group may reference.
    pub vertex_count: u32,
    /// Bounds used for culling.
    pub bounds: Aabb,
}

/// Worst-case index count for a block of `block_size` vertices per side:
/// the interior strip plus every possible edge fan.
pub fn index_capacity(block_size: u32) -> usize {
    let n = block_size as usize;
    6 * n * n + 4 * (n - 1) * (n - 1)
}

/// Vertex and index storage for one terrain block.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    block_size: u32,
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    index_capacity: usize,
    groups: Vec<DrawGroup>,
    bounds: Aabb,
}

impl TerrainMesh {
    /// Wrap a block's vertex buffer, laid out row by row (`z` major).
    ///
    /// # Panics
    ///
    /// Panics if `vertices` does not hold `block_size²` entries.
    pub fn new(block_size: u32, vertices: Vec<TerrainVertex>, bounds: Aabb) -> Self {
        assert_eq!(
            vertices.len(),
            block_size as usize * block_size as usize,
            "vertex buffer must hold block_size² vertices"
        );
        let index_capacity = index_capacity(block_size);
        Self {
            block_size,
            vertices,
            indices: Vec::with_capacity(index_capacity),
            index_capacity,
            groups: Vec::with_capacity(2),
            bounds,
        }
    }

    /// Vertices per block side.
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// The static vertex buffer.
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Index buffer contents for the current frame.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Fixed index buffer capacity.
    pub fn index_capacity(&self) -> usize {
        self.index_capacity
    }

    /// Draw groups recorded for the current frame, in submission order.
    pub fn groups(&self) -> &[DrawGroup] {
        &self.groups
    }

    /// Indices belonging to one draw group.
    pub fn group_indices(&self, group: &DrawGroup) -> &[u32] {
        let start = group.first_index as usize;
        &self.indices[start..start + group.index_count as usize]
    }

    /// Bounds of every vertex in the block.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Drop last frame's indices and draw groups.
    pub fn reset_frame(&mut self) {
        self.indices.clear();
        self.groups.clear();
    }

    /// Lock the index buffer for appending one draw group.
    ///
    /// The group is recorded when the returned batch is dropped.
    pub fn lock_indices(&mut self, topology: Topology) -> IndexBatch<'_> {
        let first = self.indices.len();
        IndexBatch {
            mesh: self,
            topology,
            first,
        }
    }

    /// Returns the vertex data as a byte slice for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the current frame's index data as a byte slice for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Exclusive, scoped access to a mesh's index buffer.
///
/// Dropping the batch, including during unwinding, releases the lock and
/// records the appended range as a [`DrawGroup`].
pub struct IndexBatch<'a> {
    mesh: &'a mut TerrainMesh,
    topology: Topology,
    first: usize,
}

impl IndexBatch<'_> {
    /// Topology the batch will be drawn with.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of indices appended so far.
    pub fn len(&self) -> usize {
        self.mesh.indices.len() - self.first
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a raw vertex index.
    ///
    /// # Panics
    ///
    /// Panics when the index buffer capacity is exceeded.
    pub fn push(&mut self, index: u32) {
        assert!(
            self.mesh.indices.len() < self.mesh.index_capacity,
            "index buffer overflow: capacity {}",
            self.mesh.index_capacity
        );
        self.mesh.indices.push(index);
    }

    /// Append the vertex at block-local grid coordinates.
    pub fn push_vertex(&mut self, x: u32, z: u32) {
        let n = self.mesh.block_size;
        debug_assert!(x < n && z < n, "vertex ({x}, {z}) outside block of size {n}");
        self.push(x + z * n);
    }

    /// Append a triangle given three block-local grid coordinates.
    pub fn triangle(&mut self, a: (u32, u32), b: (u32, u32), c: (u32, u32)) {
        self.push_vertex(a.0, a.1);
        self.push_vertex(b.0, b.1);
        self.push_vertex(c.0, c.1);
    }
}

impl Drop for IndexBatch<'_> {
    fn drop(&mut self) {
        let count = self.mesh.indices.len() - self.first;
        let group = DrawGroup {
            topology: self.topology,
            first_index: self.first as u32,
            index_count: count as u32,
            first_vertex: 0,
            vertex_count: self.mesh.vertices.len() as u32,
            bounds: self.mesh.bounds,
        };
        self.mesh.groups.push(group);
    }
}
