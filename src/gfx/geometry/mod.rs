//! # Procedural Geometry Generation
//!
//! Turns the scene's [`Primitive`] descriptions into triangle meshes, so the
//! house needs no external model files.
//!
//! ## Supported Primitives
//!
//! - **Plane**: Flat rectangle in the XY plane facing +Z
//! - **Box**: Axis-aligned box with flat faces
//! - **Cone**: Faceted cone, apex up, with a closed base
//! - **Sphere**: UV sphere with configurable resolution
//!
//! ## Usage
//!
//! ```rust
//! use haunted_house::gfx::geometry::GeometryData;
//! use haunted_house::gfx::scene::Primitive;
//!
//! let roof = GeometryData::from_primitive(&Primitive::Cone {
//!     radius: 3.3,
//!     height: 2.0,
//!     radial_segments: 4,
//! });
//! assert_eq!(roof.triangle_count(), 8);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::{object::Primitive, vertex::Vertex3D};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the mesh for a scene primitive.
    pub fn from_primitive(primitive: &Primitive) -> Self {
        match *primitive {
            Primitive::Plane { width, height } => generate_plane(width, height, 1, 1),
            Primitive::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            Primitive::Cone {
                radius,
                height,
                radial_segments,
            } => generate_cone(radius, height, radial_segments),
            Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere(radius, width_segments, height_segments),
        }
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
