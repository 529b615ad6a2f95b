// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers around buffer and bind group creation shared by the renderer.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::UniformBuffer;
