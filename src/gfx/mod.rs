//! # Graphics Module
//!
//! Everything between the scene description and the pixels.
//!
//! - **Camera System** ([`camera`]) - Orbit camera with damped pointer controls
//! - **Geometry** ([`geometry`]) - Procedural meshes for the scene primitives
//! - **Rendering Pipeline** ([`rendering`]) - Forward renderer and the render delegate seam
//! - **Scene Management** ([`scene`]) - The haunted house object tree, materials and lights
//! - **Resource Management** ([`resources`]) - Uniform layouts and the depth buffer

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
