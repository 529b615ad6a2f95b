//! Static light sources and atmosphere. The moving ghost lights live in
//! [`crate::animation::ghost`].

use cgmath::{InnerSpace, Vector3};

use super::material::color_from_hex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Light arriving from infinitely far away, aimed at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene towards the light.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        if self.position.magnitude2() > 0.0 {
            self.position.normalize()
        } else {
            Vector3::unit_y()
        }
    }
}

/// Exponential-squared distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub density: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub fog: Option<Fog>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: color_from_hex(0xffffff),
                intensity: 0.5,
            },
            directional: DirectionalLight {
                color: color_from_hex(0xffffff),
                intensity: 1.5,
                position: Vector3::new(3.0, 2.0, -8.0),
            },
            fog: Some(Fog {
                color: color_from_hex(0x04343f),
                density: 0.1,
            }),
        }
    }
}
