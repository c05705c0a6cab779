// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics allowances — casts are intentional and safe
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
// Tests may unwrap freely and assert exact float values
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]

//! GPU-accelerated 2D mesh renderer built on wgpu.
//!
//! Mica draws flat-colored and textured 2D triangle meshes through a small
//! scene abstraction, with a shared host/shader binding contract at its
//! core.
//!
//! # Key entry points
//!
//! - [`shader_types`] - the slot/group/binding contract shared between
//!   host code and the WGSL shaders
//! - [`renderer::Renderer`] - the per-frame rendering orchestrator
//! - [`scene::Scene`] - the trait for renderable, updatable content
//! - [`options::Options`] - runtime configuration (window, rendering,
//!   demo scene)
//! - [`viewer::Viewer`] - a standalone winit window driving the renderer
//!
//! # Architecture
//!
//! `shader_types` defines the contract; `gpu` owns device bring-up,
//! buffers, textures, and pipelines; `mesh` and `scene` provide the
//! renderable content; `renderer` encodes one clear-bind-draw pass per
//! frame; `viewer` (feature `viewer`) wraps it all in a winit event loop.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod shader_types;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::MicaError;
pub use renderer::Renderer;
pub use shader_types::{BindGroupIndex, BufferIndex, TextureIndex, Vertex};
