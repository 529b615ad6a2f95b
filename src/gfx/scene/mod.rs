//! # Scene Management Module
//!
//! Describes the haunted house world as plain data: a tree of positioned
//! primitives, the materials they are painted with and the lights that shine
//! on them.
//!
//! ## Key Components
//!
//! - [`HouseMeasurements`] - The measurement table every house part is sized from
//! - [`SceneBuilder`] - Lays out ground, house, bushes and graveyard
//! - [`Scene`] - The finished world handed to the renderer
//! - [`Group`] / [`PlacedObject`] - Scene graph nodes with local transforms
//! - [`Vertex3D`] - GPU vertex format for the generated meshes
//!
//! ## Usage
//!
//! ```no_run
//! use haunted_house::gfx::scene::SceneBuilder;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(7));
//! assert_eq!(scene.ghosts.len(), 3);
//! ```

pub mod builder;
pub mod lights;
pub mod material;
pub mod measurements;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use builder::{GraveyardLayout, SceneBuilder};
pub use lights::{AmbientLight, DirectionalLight, Fog, Lighting};
pub use material::{Material, MaterialId, MaterialLibrary, Shading};
pub use measurements::HouseMeasurements;
pub use object::{Group, PlacedObject, Primitive, SceneNode, Transform};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
