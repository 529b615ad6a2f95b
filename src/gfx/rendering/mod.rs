// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! The [`RenderDelegate`] trait the animation loop draws through, and the wgpu
//! implementation of it.

pub mod delegate;
pub mod mesh;
pub mod pipeline;
pub mod render_engine;
pub mod render_pass_ext;

// Re-export main types
pub use delegate::{RecordedFrame, RecordingRenderer, RenderDelegate, RenderError};
pub use render_engine::RenderEngine;
