//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use mica::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("Spinning Quad")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::MicaError;
use crate::gpu::texture::Texture;
use crate::options::Options;
use crate::renderer::Renderer;
use crate::scene::{SceneOwner, SpinningQuad};
use crate::util::frame_timing::FrameTiming;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title (overrides the options file).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Run the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`MicaError::Viewer`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(self) -> Result<(), MicaError> {
        let event_loop = EventLoop::new()
            .map_err(|e| MicaError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp::new(self.options);
        event_loop
            .run_app(&mut app)
            .map_err(|e| MicaError::Viewer(e.to_string()))
    }
}

// ── Application handler ──────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    frame_timing: FrameTiming,
    options: Options,
}

impl ViewerApp {
    fn new(options: Options) -> Self {
        let frame_timing = FrameTiming::new(options.rendering.target_fps);
        Self {
            window: None,
            renderer: None,
            frame_timing,
            options,
        }
    }

    /// Load the demo texture, falling back to a checkerboard when no path is
    /// configured or the file cannot be read.
    fn load_scene_texture(&self, renderer: &Renderer) -> Texture {
        if let Some(path) = &self.options.scene.texture_path {
            match std::fs::read(path) {
                Ok(bytes) => match Texture::from_encoded_bytes(
                    renderer.device(),
                    renderer.queue(),
                    &bytes,
                    "Scene Texture",
                ) {
                    Ok(texture) => {
                        log::info!(
                            target: "mesh",
                            "loaded texture {}",
                            path.display()
                        );
                        return texture;
                    }
                    Err(e) => {
                        log::error!(
                            target: "mesh",
                            "unable to decode texture {}: {e}",
                            path.display()
                        );
                    }
                },
                Err(e) => {
                    log::error!(
                        target: "mesh",
                        "unable to read texture {}: {e}",
                        path.display()
                    );
                }
            }
        }
        Texture::checkerboard(renderer.device(), renderer.queue(), 256, 32)
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.options.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.window.width,
                self.options.window.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!(target: "viewer", "window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let mut renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            (size.width.max(1), size.height.max(1)),
            &self.options,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!(target: "viewer", "renderer setup failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let texture = self.load_scene_texture(&renderer);
        let scene = SpinningQuad::new(
            renderer.device(),
            renderer.layouts(),
            texture,
            &self.options.scene,
        );
        renderer.set_scene(Some(Box::new(scene)));

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(renderer)) =
                    (&self.window, &mut self.renderer)
                {
                    if self.frame_timing.should_render() {
                        let dt = self.frame_timing.end_frame();
                        renderer.update(dt);

                        match renderer.render() {
                            Ok(()) => {}
                            Err(
                                wgpu::SurfaceError::Outdated
                                | wgpu::SurfaceError::Lost,
                            ) => {
                                let inner = window.inner_size();
                                renderer.resize(inner.width, inner.height);
                            }
                            Err(e) => {
                                log::error!(
                                    target: "render",
                                    "render error: {e:?}"
                                );
                            }
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key
                        == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}
