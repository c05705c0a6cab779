//! The per-frame rendering orchestrator.
//!
//! [`Renderer`] owns the GPU context, camera, and mesh pipelines, holds the
//! current scene, and encodes one render pass per frame: clear, bind
//! globals, record the scene's renderables, submit, present.

use crate::camera::Camera2D;
use crate::error::MicaError;
use crate::gpu::pipeline::{BindGroupLayouts, MeshPipelines};
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::scene::{Scene, SceneOwner};
use crate::shader_types::BindGroupIndex;

/// Owns all GPU state needed to render scenes into a window surface.
pub struct Renderer {
    context: RenderContext,
    layouts: BindGroupLayouts,
    pipelines: MeshPipelines,
    /// The 2D camera providing the global view transform.
    pub camera: Camera2D,
    scene: Option<Box<dyn Scene>>,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Bring up the GPU and build all shared pipeline state.
    ///
    /// # Errors
    ///
    /// Returns [`MicaError::Gpu`] if surface, adapter, or device
    /// initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, MicaError> {
        let context =
            RenderContext::new(window, size, options.rendering.vsync).await?;
        log::info!(target: "render", "created device and command queue");

        let layouts = BindGroupLayouts::new(&context.device);
        let pipelines =
            MeshPipelines::new(&context.device, context.format(), &layouts);
        log::info!(target: "render", "created mesh pipelines");

        let camera =
            Camera2D::new(&context.device, &layouts.global, size.0, size.1);
        log::info!(target: "camera", "created global uniform bind group");

        let [r, g, b, a] = options.rendering.clear_color;
        let clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        };

        Ok(Self {
            context,
            layouts,
            pipelines,
            camera,
            scene: None,
            clear_color,
        })
    }

    /// The wgpu logical device.
    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.context.device
    }

    /// The wgpu command queue.
    #[must_use]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.context.queue
    }

    /// The shared bind-group layouts, for constructing meshes and materials.
    #[must_use]
    pub fn layouts(&self) -> &BindGroupLayouts {
        &self.layouts
    }

    /// Reconfigure the surface and camera for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.set_viewport(width, height);
    }

    /// Advance the current scene by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if let Some(scene) = &mut self.scene {
            scene.update(dt);
        }
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; `Lost`/`Outdated` are recoverable by resizing.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.camera.upload(&self.context.queue);
        if let Some(scene) = &mut self.scene {
            scene.prepare(&self.context.device, &self.context.queue);
        }

        let frame = self.context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Primary Render Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            pass.set_bind_group(
                BindGroupIndex::Global.index(),
                &self.camera.bind_group,
                &[],
            );
            if let Some(scene) = &self.scene {
                scene.draw(&mut pass, &self.pipelines);
            }
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}

impl SceneOwner for Renderer {
    fn set_scene(&mut self, scene: Option<Box<dyn Scene>>) {
        log::info!(
            target: "render",
            "scene {}",
            if scene.is_some() { "installed" } else { "cleared" }
        );
        self.scene = scene;
    }
}
