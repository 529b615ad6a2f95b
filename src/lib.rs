//! Haunted House
//!
//! A small night scene built procedurally: a house with a pyramid roof and a
//! door, a few bushes, a ring of randomly tilted graves and three coloured
//! ghost lights circling it all, viewed through an orbit camera.
//!
//! The scene is plain data ([`gfx::scene::Scene`]) assembled by
//! [`gfx::scene::SceneBuilder`]. [`animation::AnimationDriver`] advances it
//! each frame and hands it to a [`gfx::rendering::RenderDelegate`], either the
//! wgpu [`gfx::rendering::RenderEngine`] or a headless recorder.

pub mod animation;
pub mod app;
pub mod config;
pub mod gfx;
pub mod wgpu_utils;
pub mod world;

// Re-export main types for convenience
pub use app::HauntedHouseApp;
pub use config::{ConfigError, WorldConfig};
pub use world::{Viewport, WorldContext};
