// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Uniform layouts shared with the shader, and the depth buffer.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUniform, ObjectUniform};
pub use texture_resource::TextureResource;
