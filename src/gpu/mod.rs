//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, texture
//! loading, and mesh pipeline construction.

/// Growable GPU buffers with automatic reallocation.
pub mod buffer;
/// Bind-group layouts and mesh render pipelines.
pub mod pipeline;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Color textures for mesh materials.
pub mod texture;
