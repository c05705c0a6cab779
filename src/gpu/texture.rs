//! Color textures for mesh materials.
//!
//! Textures are decoded from encoded image bytes (PNG/JPEG) or generated
//! procedurally, uploaded as `Rgba8UnormSrgb`, and paired with a linear
//! sampler.

use crate::error::MicaError;
use crate::gpu::pipeline::BindGroupLayouts;
use crate::shader_types::{TextureIndex, MATERIAL_SAMPLER_BINDING};

/// A color texture with its default view and sampler.
pub struct Texture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Linear clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decode encoded image bytes (PNG or JPEG) and upload them.
    ///
    /// # Errors
    ///
    /// Returns [`MicaError::TextureDecode`] if the bytes are not a decodable
    /// image.
    pub fn from_encoded_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, MicaError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba_pixels(
            device,
            queue,
            rgba.as_raw(),
            width,
            height,
            label,
        ))
    }

    /// Upload raw RGBA8 pixel data (row-major, tightly packed).
    #[must_use]
    pub fn from_rgba_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// A generated two-tone checkerboard, used when no texture file is
    /// available.
    #[must_use]
    pub fn checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: u32,
        cell: u32,
    ) -> Self {
        let pixels = checkerboard_pixels(size, cell);
        Self::from_rgba_pixels(device, queue, &pixels, size, size, "Checkerboard")
    }

    /// Create the material bind group binding this texture and its sampler
    /// at the slots declared in [`crate::shader_types`].
    #[must_use]
    pub fn create_material_bind_group(
        &self,
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.material,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TextureIndex::Color.binding(),
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: MATERIAL_SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

/// Generate tightly packed RGBA8 checkerboard pixels.
fn checkerboard_pixels(size: u32, cell: u32) -> Vec<u8> {
    let cell = cell.max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            let shade = if even { 220 } else { 70 };
            pixels.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_pixel_count() {
        let pixels = checkerboard_pixels(8, 2);
        assert_eq!(pixels.len(), 8 * 8 * 4);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = checkerboard_pixels(4, 2);
        // (0,0) and (2,0) land in adjacent cells.
        let first = pixels[0];
        let neighbor = pixels[2 * 4];
        assert_ne!(first, neighbor);
    }

    #[test]
    fn checkerboard_is_opaque() {
        let pixels = checkerboard_pixels(4, 1);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
    }
}
