//! Shared wgpu boilerplate helpers and mesh pipeline construction.

use crate::shader_types::{TextureIndex, Vertex, MATERIAL_SAMPLER_BINDING};

/// The embedded WGSL source for the 2D mesh pipelines.
///
/// Its `@group`/`@binding` declarations are the shader side of the contract
/// in [`crate::shader_types`].
pub const MESH_SHADER: &str = include_str!("../shaders/mesh.wgsl");

/// Vertex-visible uniform buffer binding.
#[must_use]
pub fn uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Fragment-visible, filterable float 2D texture binding.
#[must_use]
pub fn texture_2d(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Fragment-visible filtering sampler binding.
#[must_use]
pub fn filtering_sampler(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// The bind-group layouts shared by all mesh pipelines.
///
/// Group order mirrors [`crate::shader_types::BindGroupIndex`]: globals,
/// per-mesh uniforms, material.
pub struct BindGroupLayouts {
    /// Layout of the per-frame globals group.
    pub global: wgpu::BindGroupLayout,
    /// Layout of the per-mesh uniform group.
    pub mesh: wgpu::BindGroupLayout,
    /// Layout of the material (texture + sampler) group.
    pub material: wgpu::BindGroupLayout,
}

impl BindGroupLayouts {
    /// Create the shared layouts on the given device.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let global = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Global Bind Group Layout"),
                entries: &[uniform_buffer(0)],
            },
        );
        let mesh = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Bind Group Layout"),
                entries: &[uniform_buffer(0)],
            },
        );
        let material = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Bind Group Layout"),
                entries: &[
                    texture_2d(TextureIndex::Color.binding()),
                    filtering_sampler(MATERIAL_SAMPLER_BINDING),
                ],
            },
        );
        Self {
            global,
            mesh,
            material,
        }
    }
}

/// Every primitive topology a mesh may select.
const TOPOLOGIES: [wgpu::PrimitiveTopology; 5] = [
    wgpu::PrimitiveTopology::TriangleList,
    wgpu::PrimitiveTopology::TriangleStrip,
    wgpu::PrimitiveTopology::LineList,
    wgpu::PrimitiveTopology::LineStrip,
    wgpu::PrimitiveTopology::PointList,
];

struct PipelinePair {
    colored: wgpu::RenderPipeline,
    textured: wgpu::RenderPipeline,
}

/// The render pipelines for drawing 2D meshes: one colored/textured pair
/// per primitive topology.
pub struct MeshPipelines {
    variants: Vec<(wgpu::PrimitiveTopology, PipelinePair)>,
}

impl MeshPipelines {
    /// Build the mesh pipelines for every topology against the given
    /// surface format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &BindGroupLayouts,
    ) -> Self {
        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Mesh Shader"),
                source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
            });

        let variants = TOPOLOGIES
            .iter()
            .map(|&topology| {
                let colored = create_mesh_pipeline(
                    device,
                    "Colored Mesh",
                    &shader,
                    "fs_colored",
                    format,
                    &[&layouts.global, &layouts.mesh],
                    topology,
                );
                let textured = create_mesh_pipeline(
                    device,
                    "Textured Mesh",
                    &shader,
                    "fs_textured",
                    format,
                    &[&layouts.global, &layouts.mesh, &layouts.material],
                    topology,
                );
                (topology, PipelinePair { colored, textured })
            })
            .collect();

        Self { variants }
    }

    /// Pipeline for flat vertex-colored meshes with the given topology.
    #[must_use]
    pub fn colored(
        &self,
        topology: wgpu::PrimitiveTopology,
    ) -> &wgpu::RenderPipeline {
        &self.pair(topology).colored
    }

    /// Pipeline for textured meshes with the given topology.
    #[must_use]
    pub fn textured(
        &self,
        topology: wgpu::PrimitiveTopology,
    ) -> &wgpu::RenderPipeline {
        &self.pair(topology).textured
    }

    fn pair(&self, topology: wgpu::PrimitiveTopology) -> &PipelinePair {
        // TOPOLOGIES covers every wgpu topology, so the lookup always hits.
        self.variants
            .iter()
            .find(|(t, _)| *t == topology)
            .map_or(&self.variants[0].1, |(_, pair)| pair)
    }
}

/// Create a mesh render pipeline with the shared vertex layout and an
/// alpha-blended color target.
fn create_mesh_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    format: wgpu::TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Pipeline Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_has_all_entry_points() {
        assert!(MESH_SHADER.contains("fn vs_main"));
        assert!(MESH_SHADER.contains("fn fs_colored"));
        assert!(MESH_SHADER.contains("fn fs_textured"));
    }

    #[test]
    fn layout_entries_carry_requested_bindings() {
        assert_eq!(uniform_buffer(0).binding, 0);
        assert_eq!(texture_2d(0).binding, 0);
        assert_eq!(filtering_sampler(1).binding, 1);
    }

    #[test]
    fn every_wgpu_topology_has_a_pipeline_variant() {
        use wgpu::PrimitiveTopology as T;
        for topology in [
            T::PointList,
            T::LineList,
            T::LineStrip,
            T::TriangleList,
            T::TriangleStrip,
        ] {
            assert!(TOPOLOGIES.contains(&topology));
        }
    }
}
