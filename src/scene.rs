//! Scene traits and the built-in demo scene.
//!
//! A [`Scene`] is a renderable that also advances its own state each frame;
//! a [`SceneOwner`] is anything that can hold the current scene (the
//! renderer implements it).

use glam::Mat2;

use crate::gpu::pipeline::{BindGroupLayouts, MeshPipelines};
use crate::gpu::texture::Texture;
use crate::mesh::{Renderable, TexturedMesh};
use crate::options::SceneOptions;
use crate::util::transform2;

/// A renderable that advances its own state once per frame.
pub trait Scene: Renderable {
    /// Advance the scene by `dt` seconds.
    fn update(&mut self, dt: f32);
}

/// Anything that can hold the current scene.
pub trait SceneOwner {
    /// Replace the current scene (or clear it with `None`).
    fn set_scene(&mut self, scene: Option<Box<dyn Scene>>);
}

/// The built-in demo scene: a textured quad spinning about its center.
pub struct SpinningQuad {
    quad: TexturedMesh,
    rotation: f32,
    rotation_speed: f32,
}

impl SpinningQuad {
    /// Build the demo scene from options and an uploaded texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        texture: Texture,
        options: &SceneOptions,
    ) -> Self {
        let mut quad =
            TexturedMesh::quad(device, layouts, texture, options.quad_scale);
        quad.mesh_mut().set_transform(spin_transform(0.0));
        Self {
            quad,
            rotation: 0.0,
            rotation_speed: options.rotation_speed,
        }
    }

    /// Current rotation angle in radians.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Renderable for SpinningQuad {
    fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.quad.prepare(device, queue);
    }

    fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        pipelines: &'a MeshPipelines,
    ) {
        self.quad.draw(pass, pipelines);
    }
}

impl Scene for SpinningQuad {
    fn update(&mut self, dt: f32) {
        self.rotation += self.rotation_speed * dt;
        self.quad
            .mesh_mut()
            .set_transform(spin_transform(self.rotation));
    }
}

/// The spinning quad's local transform at the given angle: rotation followed
/// by a half-size shrink so the quad stays inside the viewport while
/// spinning.
#[must_use]
pub fn spin_transform(radians: f32) -> Mat2 {
    transform2::rotation(radians) * transform2::scale(0.5, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spin_transform_at_rest_is_half_scale() {
        let m = spin_transform(0.0);
        assert_eq!(m * Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.0));
        assert_eq!(m * Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn spin_transform_quarter_turn() {
        let m = spin_transform(std::f32::consts::FRAC_PI_2);
        let mapped = m * Vec2::new(1.0, 0.0);
        assert!((mapped.x - 0.0).abs() < 1e-6);
        assert!((mapped.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spin_transform_preserves_half_length() {
        let m = spin_transform(1.234);
        let mapped = m * Vec2::new(1.0, 0.0);
        assert!((mapped.length() - 0.5).abs() < 1e-6);
    }
}
