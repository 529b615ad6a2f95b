//! # Ghost Lights
//!
//! Three coloured point lights circling the house. A ghost's position is a pure
//! function of the elapsed time: nothing is integrated, so evaluating the same
//! instant twice always lands on the same spot.

use cgmath::{Vector3, Zero};

use crate::gfx::scene::material::color_from_hex;

/// Frequency multipliers layered on the orbit angle to make the vertical bob look irregular.
pub const DEFAULT_HARMONICS: (f32, f32) = (2.34, 3.45);

/// Orbit parameters of a single ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostOrbit {
    /// Radians per second; the sign sets the direction of travel.
    pub angular_rate: f32,
    pub radius: f32,
    pub harmonics: (f32, f32),
}

impl GhostOrbit {
    /// Position on the orbit at `elapsed` seconds.
    ///
    /// ```text
    /// angle = elapsed * rate
    /// x = sin(angle) * radius
    /// z = cos(angle) * radius
    /// y = sin(angle) * sin(angle * k) * sin(angle * m)
    /// ```
    pub fn position_at(&self, elapsed: f32) -> Vector3<f32> {
        let angle = elapsed * self.angular_rate;
        let (k, m) = self.harmonics;
        Vector3::new(
            angle.sin() * self.radius,
            angle.sin() * (angle * k).sin() * (angle * m).sin(),
            angle.cos() * self.radius,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GhostLight {
    pub id: usize,
    pub orbit: GhostOrbit,
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
    position: Vector3<f32>,
}

impl GhostLight {
    pub fn new(id: usize, orbit: GhostOrbit, color: [f32; 3], intensity: f32) -> Self {
        let mut ghost = Self {
            id,
            orbit,
            color,
            intensity,
            position: Vector3::zero(),
        };
        ghost.update(0.0);
        ghost
    }

    /// The three ghosts of the haunted house: purple, pink and red, each on a
    /// wider orbit than the last.
    pub fn haunted_trio() -> Vec<GhostLight> {
        [
            (0.3, 4.0, 0x8800ff),
            (-0.6, 5.0, 0xff0088),
            (1.0, 6.0, 0xff0000),
        ]
        .into_iter()
        .enumerate()
        .map(|(id, (angular_rate, radius, hex))| {
            let orbit = GhostOrbit {
                angular_rate,
                radius,
                harmonics: DEFAULT_HARMONICS,
            };
            GhostLight::new(id, orbit, color_from_hex(hex), 6.0)
        })
        .collect()
    }

    /// Moves the ghost to where it is at `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        self.position = self.orbit.position_at(elapsed);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }
}
