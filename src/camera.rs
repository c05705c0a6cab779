//! 2D camera owning the per-frame global uniform.
//!
//! The camera tracks the viewport aspect ratio and a zoom factor, folds them
//! into a single 2x2 view transform, and uploads it to the GPU once per
//! frame. Meshes stay aspect-agnostic: their local transforms are composed
//! with this view transform in the vertex stage.

use glam::Mat2;
use wgpu::util::DeviceExt;

use crate::shader_types::GlobalUniform;
use crate::util::transform2;

/// Perspective-free 2D camera: aspect correction plus uniform zoom.
pub struct Camera2D {
    /// CPU-side copy of the global uniform.
    pub uniform: GlobalUniform,
    /// GPU buffer backing the global uniform.
    pub buffer: wgpu::Buffer,
    /// Bind group for [`crate::shader_types::BindGroupIndex::Global`].
    pub bind_group: wgpu::BindGroup,
    aspect: f32,
    zoom: f32,
}

impl Camera2D {
    /// Create the camera and its GPU resources for the given viewport size.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        width: u32,
        height: u32,
    ) -> Self {
        let aspect = aspect_ratio(width, height);
        let mut uniform = GlobalUniform::new();
        uniform.set_view(view_transform(aspect, 1.0));

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            uniform,
            buffer,
            bind_group,
            aspect,
            zoom: 1.0,
        }
    }

    /// Update the aspect ratio from a new viewport size. Zero-sized
    /// dimensions are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = aspect_ratio(width, height);
            log::debug!(target: "camera", "viewport aspect {}", self.aspect);
        }
    }

    /// Current aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Set the uniform zoom factor.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// The combined view transform: aspect correction times zoom.
    #[must_use]
    pub fn view_transform(&self) -> Mat2 {
        view_transform(self.aspect, self.zoom)
    }

    /// Refresh the CPU uniform and upload it to the GPU.
    pub fn upload(&mut self, queue: &wgpu::Queue) {
        self.uniform.set_view(self.view_transform());
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.uniform));
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

fn view_transform(aspect: f32, zoom: f32) -> Mat2 {
    transform2::scale(1.0, aspect) * transform2::scale(zoom, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn aspect_from_viewport() {
        assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        // Degenerate height clamps instead of dividing by zero.
        assert_eq!(aspect_ratio(100, 0), 100.0);
    }

    #[test]
    fn view_transform_scales_y_by_aspect() {
        let view = view_transform(2.0, 1.0);
        let mapped = view * Vec2::new(1.0, 1.0);
        assert_eq!(mapped, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn view_transform_applies_zoom_uniformly() {
        let view = view_transform(1.0, 0.5);
        let mapped = view * Vec2::new(1.0, 1.0);
        assert_eq!(mapped, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn uniform_tracks_view_transform() {
        let mut uniform = GlobalUniform::new();
        uniform.set_view(view_transform(2.0, 1.0));
        assert_eq!(uniform.view, [[1.0, 0.0], [0.0, 2.0]]);
    }
}
