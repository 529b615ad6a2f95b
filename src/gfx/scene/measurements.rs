//! # House Measurements
//!
//! The fixed measurement table every piece of the house is sized from. All derived
//! offsets are pure functions of the table so that layout code never repeats the
//! arithmetic.

use serde::{Deserialize, Serialize};

/// Radius of the world bound the graveyard ring is clipped against.
pub const WORLD_BOUND: f32 = 14.0;

/// Clearance kept between the house walls and the nearest grave.
pub const GRAVE_CLEARANCE: f32 = 2.5;

/// Dimensions of the house and its surroundings, in world units.
///
/// `door_height < height` is expected so that the door does not poke out above
/// the walls. It is not enforced; [`crate::config::WorldConfig::validate`] only warns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseMeasurements {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub roof_height: f32,
    pub roof_padding: f32,
    pub door_aspect_ratio: f32,
    pub door_height: f32,
    pub bush_radius: f32,
}

impl Default for HouseMeasurements {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 3.0,
            depth: 4.0,
            roof_height: 2.0,
            roof_padding: 0.5,
            door_aspect_ratio: 2.0 / 3.0,
            door_height: 1.4,
            bush_radius: 0.5,
        }
    }
}

impl HouseMeasurements {
    /// Radius of the four-sided roof so that it circumscribes the wall footprint.
    pub fn roof_radius(&self) -> f32 {
        self.width / std::f32::consts::SQRT_2 + self.roof_padding
    }

    pub fn door_width(&self) -> f32 {
        self.door_aspect_ratio * self.door_height
    }

    /// Height of the house group origin above the ground (the walls are centered on it).
    pub fn house_elevation(&self) -> f32 {
        self.height / 2.0
    }

    /// Roof offset relative to the house origin; the roof base sits flush on the wall top.
    pub fn roof_offset(&self) -> f32 {
        (self.height + self.roof_height) / 2.0
    }

    /// Door offset relative to the house origin; puts the door's bottom edge on the ground.
    pub fn door_offset(&self) -> f32 {
        (self.door_height - self.height) / 2.0
    }

    /// Door distance from the house origin along +Z, nudged off the wall to avoid z-fighting.
    pub fn door_depth_offset(&self) -> f32 {
        self.depth / 2.0 + 0.01
    }

    /// Distance from the origin to the farthest point of the walls or the roof.
    pub fn footprint_radius(&self) -> f32 {
        (self.width.hypot(self.depth) / 2.0).max(self.roof_radius())
    }

    /// Nearest distance from the origin a grave may be placed at.
    pub fn grave_inner_radius(&self) -> f32 {
        self.width / 2.0 + GRAVE_CLEARANCE
    }

    /// Width of the annulus graves are scattered across.
    pub fn grave_ring_span(&self) -> f32 {
        (WORLD_BOUND - self.width - 1.0) / 2.0
    }

    /// Exclusive upper bound of grave distances.
    pub fn grave_outer_radius(&self) -> f32 {
        self.grave_inner_radius() + self.grave_ring_span()
    }

    /// Returns the names of the fields that are not strictly positive.
    pub fn non_positive_fields(&self) -> Vec<&'static str> {
        [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("roof_height", self.roof_height),
            ("roof_padding", self.roof_padding),
            ("door_aspect_ratio", self.door_aspect_ratio),
            ("door_height", self.door_height),
            ("bush_radius", self.bush_radius),
        ]
        .into_iter()
        .filter(|(_, value)| !(*value > 0.0))
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roof_radius_circumscribes_walls() {
        let m = HouseMeasurements::default();
        assert_relative_eq!(m.roof_radius(), 4.0 / 2f32.sqrt() + 0.5);
        assert_relative_eq!(m.roof_radius(), 3.328, epsilon = 1e-3);
        // Half diagonal of the square footprint.
        assert!(m.roof_radius() > (m.width * m.width + m.depth * m.depth).sqrt() / 2.0);
    }

    #[test]
    fn test_door_bottom_touches_ground() {
        let m = HouseMeasurements {
            height: 3.0,
            door_height: 2.0,
            ..Default::default()
        };
        let door_center = m.house_elevation() + m.door_offset();
        assert_relative_eq!(door_center - m.door_height / 2.0, 0.0);
        assert_relative_eq!(m.door_offset(), -0.5);
    }

    #[test]
    fn test_door_width_from_aspect_ratio() {
        let m = HouseMeasurements::default();
        assert_relative_eq!(m.door_width(), 1.4 * 2.0 / 3.0);
    }

    #[test]
    fn test_grave_ring_for_default_table() {
        let m = HouseMeasurements::default();
        assert_relative_eq!(m.grave_inner_radius(), 4.5);
        assert_relative_eq!(m.grave_outer_radius(), 9.0);
        assert!(m.grave_outer_radius() < WORLD_BOUND);
        assert_relative_eq!(m.footprint_radius(), m.roof_radius());
        assert!(m.footprint_radius() < m.grave_inner_radius());
    }

    #[test]
    fn test_deep_house_footprint() {
        let m = HouseMeasurements {
            depth: 12.0,
            ..Default::default()
        };
        assert_relative_eq!(m.footprint_radius(), 160f32.sqrt() / 2.0);
        assert!(m.footprint_radius() > m.grave_inner_radius());
    }

    #[test]
    fn test_non_positive_fields() {
        assert!(HouseMeasurements::default().non_positive_fields().is_empty());

        let m = HouseMeasurements {
            depth: 0.0,
            bush_radius: -1.0,
            ..Default::default()
        };
        assert_eq!(m.non_positive_fields(), vec!["depth", "bush_radius"]);
    }
}
