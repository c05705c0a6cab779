//! Shared utilities for the rendering engine.

pub mod frame_timing;
pub mod transform2;
