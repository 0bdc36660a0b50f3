//! The static per-block vertex format.

/// One terrain vertex: position, normal, base UV over the whole field and
/// a detail UV pre-scaled for a tiled second texture layer.
///
/// Layout (40 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv0 `[f32; 2]`, in `[0, 1]` across the height field
///   - `[32..40]` uv1 `[f32; 2]`, uv0 times the detail scale
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Base texture coordinates.
    pub uv0: [f32; 2],
    /// Detail texture coordinates.
    pub uv1: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 40]);
