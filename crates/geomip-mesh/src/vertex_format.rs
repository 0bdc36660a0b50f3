//! Canonical `wgpu::VertexBufferLayout` for terrain block rendering.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv0      |
//! | 3        | 32     | Float32x2 | uv1      |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::vertex::TerrainVertex;

/// Vertex attributes for [`TerrainVertex`].
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 4] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 32,
        shader_location: 3,
    },
];

/// The vertex buffer layout shared by every terrain pipeline.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

const _: () = assert!(
    mem::size_of::<TerrainVertex>() == 40,
    "TerrainVertex size changed, update TERRAIN_VERTEX_LAYOUT"
);
const _: () =
    assert!(TERRAIN_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(TerrainVertex, normal) as u64);
const _: () =
    assert!(TERRAIN_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(TerrainVertex, uv0) as u64);
const _: () =
    assert!(TERRAIN_VERTEX_ATTRIBUTES[3].offset == mem::offset_of!(TerrainVertex, uv1) as u64);
