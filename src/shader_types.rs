//! Types and constants shared between host code and the WGSL shaders.
//!
//! This module is the compile-time vocabulary contract between the two
//! compilation environments: every slot, group, and binding number the host
//! passes to wgpu has a counterpart declared in `src/shaders/mesh.wgsl`, and
//! both sides must agree on the numeric values. The tests at the bottom of
//! this file check that agreement against the embedded shader source.

use bytemuck::{Pod, Zeroable};
use glam::{Mat2, Vec2};

/// Vertex-buffer slot identifiers shared between host and shader code.
///
/// The host binds vertex data with
/// `set_vertex_buffer(BufferIndex::VertexData.slot(), ..)`; the shader reads
/// its vertex inputs from the same slot.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferIndex {
    /// Slot carrying per-vertex mesh data.
    VertexData = 0,
}

impl BufferIndex {
    /// The raw slot number, as passed to
    /// [`wgpu::RenderPass::set_vertex_buffer`].
    #[must_use]
    pub const fn slot(self) -> u32 {
        self as u32
    }
}

/// Bind-group slots shared between host and shader code.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindGroupIndex {
    /// Per-frame globals (camera view transform).
    Global = 0,
    /// Per-mesh uniforms (local transform and offset).
    Mesh = 1,
    /// Material resources (color texture and sampler).
    Material = 2,
}

impl BindGroupIndex {
    /// The raw group number, as passed to
    /// [`wgpu::RenderPass::set_bind_group`].
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Texture bindings inside the material bind group.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureIndex {
    /// The mesh color texture.
    Color = 0,
}

impl TextureIndex {
    /// The raw binding number inside [`BindGroupIndex::Material`].
    #[must_use]
    pub const fn binding(self) -> u32 {
        self as u32
    }
}

/// Binding of the color sampler inside [`BindGroupIndex::Material`].
pub const MATERIAL_SAMPLER_BINDING: u32 = 1;

/// Per-vertex mesh data.
///
/// Field order and types must match the `VertexInput` struct in the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 2D position in mesh-local space.
    pub position: [f32; 2],
    /// RGBA vertex color.
    pub color: [f32; 4],
    /// Texture coordinate (0,0 = top-left).
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4,
        2 => Float32x2,
    ];

    /// Vertex buffer layout for the slot at [`BufferIndex::VertexData`].
    #[must_use]
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-mesh uniform data, bound at [`BindGroupIndex::Mesh`].
///
/// Layout matches the WGSL `MeshUniform` struct: a `mat2x2<f32>` occupies
/// 16 bytes (two 8-byte columns), the offset follows it, and the trailing
/// padding keeps the Rust and WGSL sizes in lockstep.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshUniform {
    /// Column-major 2x2 local transform.
    pub transform: [[f32; 2]; 2],
    /// 2D translation applied after the transform.
    pub offset: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl MeshUniform {
    /// Identity transform, zero offset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transform: Mat2::IDENTITY.to_cols_array_2d(),
            offset: [0.0; 2],
            _pad: [0.0; 2],
        }
    }

    /// Set the local transform.
    pub fn set_transform(&mut self, transform: Mat2) {
        self.transform = transform.to_cols_array_2d();
    }

    /// Set the translation offset.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset.to_array();
    }
}

impl Default for MeshUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame global uniform data, bound at [`BindGroupIndex::Global`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobalUniform {
    /// Column-major 2x2 view transform (aspect correction and zoom).
    pub view: [[f32; 2]; 2],
}

impl GlobalUniform {
    /// Identity view transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: Mat2::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Set the view transform.
    pub fn set_view(&mut self, view: Mat2) {
        self.view = view.to_cols_array_2d();
    }
}

impl Default for GlobalUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::pipeline::MESH_SHADER;

    fn declaration(group: u32, binding: u32) -> String {
        format!("@group({group}) @binding({binding})")
    }

    #[test]
    fn vertex_data_slot_is_zero() {
        assert_eq!(BufferIndex::VertexData.slot(), 0);
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(
            layout.array_stride as usize,
            size_of::<Vertex>()
        );
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[2].shader_location, 2);
    }

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        // mat2x2 (16) + vec2 offset (8) + padding (8)
        assert_eq!(size_of::<MeshUniform>(), 32);
        // mat2x2 (16)
        assert_eq!(size_of::<GlobalUniform>(), 16);
    }

    #[test]
    fn shader_declares_the_agreed_bind_groups() {
        assert!(MESH_SHADER
            .contains(&declaration(BindGroupIndex::Global.index(), 0)));
        assert!(
            MESH_SHADER.contains(&declaration(BindGroupIndex::Mesh.index(), 0))
        );
        assert!(MESH_SHADER.contains(&declaration(
            BindGroupIndex::Material.index(),
            TextureIndex::Color.binding()
        )));
        assert!(MESH_SHADER.contains(&declaration(
            BindGroupIndex::Material.index(),
            MATERIAL_SAMPLER_BINDING
        )));
    }

    #[test]
    fn shader_vertex_inputs_match_attribute_locations() {
        // All three vertex attributes come from the single buffer bound at
        // BufferIndex::VertexData.
        assert!(MESH_SHADER.contains("@location(0) position: vec2<f32>"));
        assert!(MESH_SHADER.contains("@location(1) color: vec4<f32>"));
        assert!(MESH_SHADER.contains("@location(2) tex_coord: vec2<f32>"));
    }

    #[test]
    fn mesh_uniform_transform_is_column_major() {
        let mut uniform = MeshUniform::new();
        let m = Mat2::from_cols(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        uniform.set_transform(m);
        assert_eq!(uniform.transform, [[1.0, 2.0], [3.0, 4.0]]);
    }
}
