//! Renderable meshes.
//!
//! [`Renderable`] is the minimal contract between the renderer and anything
//! it can draw: upload GPU state, then record draw commands into an active
//! render pass. [`Mesh`] is a flat vertex-colored triangle mesh;
//! [`TexturedMesh`] wraps one with a color texture and material bind group.

use glam::{Mat2, Vec2};
use wgpu::util::DeviceExt;

use crate::gpu::buffer::TypedBuffer;
use crate::gpu::pipeline::{BindGroupLayouts, MeshPipelines};
use crate::gpu::texture::Texture;
use crate::shader_types::{BindGroupIndex, BufferIndex, MeshUniform, Vertex};

/// Any object or set of objects which can be rendered.
pub trait Renderable {
    /// Upload per-object GPU state before the render pass begins.
    fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue);

    /// Record draw commands into an active render pass.
    ///
    /// The global bind group is already set; implementations choose a
    /// pipeline and bind their own groups.
    fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        pipelines: &'a MeshPipelines,
    );
}

/// A 2D renderable triangle mesh.
pub struct Mesh {
    vertices: Vec<Vertex>,
    vertex_buffer: TypedBuffer<Vertex>,
    /// CPU-side per-mesh uniform (transform and offset).
    pub uniform: MeshUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    topology: wgpu::PrimitiveTopology,
    vertices_dirty: bool,
}

impl Mesh {
    /// Create a mesh from initial vertex data.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        vertices: Vec<Vertex>,
        label: &str,
    ) -> Self {
        let vertex_buffer = TypedBuffer::new_with_data(
            device,
            label,
            &vertices,
            wgpu::BufferUsages::VERTEX,
        );

        let uniform = MeshUniform::new();
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Uniform")),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layouts.mesh,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!(target: "mesh", "created {label} ({} vertices)", vertices.len());

        Self {
            vertices,
            vertex_buffer,
            uniform,
            uniform_buffer,
            bind_group,
            topology: wgpu::PrimitiveTopology::TriangleList,
            vertices_dirty: false,
        }
    }

    /// A two-triangle quad spanning `±scale` with full texture coverage.
    #[must_use]
    pub fn quad(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        scale: f32,
    ) -> Self {
        Self::new(device, layouts, quad_vertices(scale), "Quad Mesh")
    }

    /// Replace the vertex data. Uploaded on the next [`Renderable::prepare`].
    pub fn set_vertices(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
        self.vertices_dirty = true;
    }

    /// Number of vertices to draw.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Set the mesh-local transform.
    pub fn set_transform(&mut self, transform: Mat2) {
        self.uniform.set_transform(transform);
    }

    /// Set the mesh translation offset.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.uniform.set_offset(offset);
    }

    /// The primitive topology used to interpret the vertex stream.
    #[must_use]
    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        self.topology
    }

    /// Select the primitive topology (triangles by default).
    pub fn set_topology(&mut self, topology: wgpu::PrimitiveTopology) {
        self.topology = topology;
    }

    /// Bind the mesh uniform group and vertex buffer, then draw.
    ///
    /// The caller has already set a pipeline.
    fn bind_and_draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.vertices.is_empty() {
            return;
        }
        pass.set_bind_group(
            BindGroupIndex::Mesh.index(),
            &self.bind_group,
            &[],
        );
        pass.set_vertex_buffer(
            BufferIndex::VertexData.slot(),
            self.vertex_buffer.buffer().slice(..),
        );
        pass.draw(0..self.vertex_count(), 0..1);
    }
}

impl Renderable for Mesh {
    fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if self.vertices_dirty {
            let _ = self.vertex_buffer.write(device, queue, &self.vertices);
            self.vertices_dirty = false;
        }
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniform),
        );
    }

    fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        pipelines: &'a MeshPipelines,
    ) {
        pass.set_pipeline(pipelines.colored(self.topology));
        self.bind_and_draw(pass);
    }
}

/// A 2D renderable mesh with a color texture.
pub struct TexturedMesh {
    mesh: Mesh,
    texture: Texture,
    material_bind_group: wgpu::BindGroup,
}

impl TexturedMesh {
    /// Create a textured mesh from vertex data and an uploaded texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        texture: Texture,
        vertices: Vec<Vertex>,
        label: &str,
    ) -> Self {
        let material_bind_group = texture.create_material_bind_group(
            device,
            layouts,
            &format!("{label} Material"),
        );
        let mesh = Mesh::new(device, layouts, vertices, label);
        Self {
            mesh,
            texture,
            material_bind_group,
        }
    }

    /// A textured two-triangle quad spanning `±scale`.
    #[must_use]
    pub fn quad(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        texture: Texture,
        scale: f32,
    ) -> Self {
        Self::new(
            device,
            layouts,
            texture,
            quad_vertices(scale),
            "Textured Quad",
        )
    }

    /// The underlying mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mutable access to the underlying mesh.
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// The mesh color texture.
    #[must_use]
    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

impl Renderable for TexturedMesh {
    fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.mesh.prepare(device, queue);
    }

    fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        pipelines: &'a MeshPipelines,
    ) {
        pass.set_pipeline(pipelines.textured(self.mesh.topology()));
        pass.set_bind_group(
            BindGroupIndex::Material.index(),
            &self.material_bind_group,
            &[],
        );
        self.mesh.bind_and_draw(pass);
    }
}

/// Vertices for a two-triangle quad spanning `±scale`, white, with texture
/// coordinates covering the full image (v grows downward).
#[must_use]
pub fn quad_vertices(scale: f32) -> Vec<Vertex> {
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    vec![
        Vertex {
            position: [-scale, -scale],
            color: WHITE,
            tex_coord: [0.0, 1.0],
        },
        Vertex {
            position: [scale, -scale],
            color: WHITE,
            tex_coord: [1.0, 1.0],
        },
        Vertex {
            position: [-scale, scale],
            color: WHITE,
            tex_coord: [0.0, 0.0],
        },
        Vertex {
            position: [scale, scale],
            color: WHITE,
            tex_coord: [1.0, 0.0],
        },
        Vertex {
            position: [scale, -scale],
            color: WHITE,
            tex_coord: [1.0, 1.0],
        },
        Vertex {
            position: [-scale, scale],
            color: WHITE,
            tex_coord: [0.0, 0.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles() {
        assert_eq!(quad_vertices(0.5).len(), 6);
    }

    #[test]
    fn quad_positions_span_scale() {
        let vertices = quad_vertices(0.25);
        for v in &vertices {
            assert!(v.position[0].abs() == 0.25);
            assert!(v.position[1].abs() == 0.25);
        }
    }

    #[test]
    fn quad_tex_coords_cover_unit_square() {
        let vertices = quad_vertices(1.0);
        let corners: Vec<[f32; 2]> =
            vertices.iter().map(|v| v.tex_coord).collect();
        assert!(corners.contains(&[0.0, 0.0]));
        assert!(corners.contains(&[1.0, 0.0]));
        assert!(corners.contains(&[0.0, 1.0]));
        assert!(corners.contains(&[1.0, 1.0]));
    }

    #[test]
    fn quad_top_left_maps_to_texture_origin() {
        // Position (-s, +s) is the visual top-left; v grows downward so it
        // samples (0, 0).
        let vertices = quad_vertices(1.0);
        let top_left = vertices
            .iter()
            .find(|v| v.position == [-1.0, 1.0])
            .map(|v| v.tex_coord);
        assert_eq!(top_left, Some([0.0, 0.0]));
    }
}
