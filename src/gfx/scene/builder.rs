//! # Scene Builder
//!
//! Lays out the haunted house world from a [`HouseMeasurements`] table: a ground
//! plane, the house (walls, roof, door), three art-directed bushes and a ring of
//! graves scattered around the house.
//!
//! The builder has no side effects. All randomness comes from the `Rng` handed
//! to [`SceneBuilder::build`], so a seeded generator reproduces a layout exactly.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use cgmath::Vector3;
use rand::Rng;

use crate::animation::ghost::GhostLight;

use super::{
    lights::Lighting,
    material::{MaterialId, MaterialLibrary},
    measurements::HouseMeasurements,
    object::{Group, PlacedObject, Primitive, Transform},
    scene::Scene,
};

/// Side length of the square ground plane.
pub const GROUND_SIZE: f32 = 20.0;

/// Number of graves in the graveyard.
pub const GRAVE_COUNT: usize = 30;

/// Width, height and thickness of a single grave.
pub const GRAVE_SIZE: (f32, f32, f32) = (0.6, 0.8, 0.2);

/// Largest height a grave may float above the ground.
pub const GRAVE_MAX_LIFT: f32 = 0.4;

/// Largest tilt, in radians, applied to each rotation axis of a grave.
pub const GRAVE_MAX_TILT: f32 = 0.2;

/// The randomized ring of graves around the house.
#[derive(Debug, Clone, PartialEq)]
pub struct GraveyardLayout {
    pub graves: Vec<PlacedObject>,
}

impl GraveyardLayout {
    /// Scatters [`GRAVE_COUNT`] graves across the annulus around the house.
    ///
    /// Each grave consumes six draws in a fixed order: angle, distance, lift,
    /// then the x, y and z tilts.
    pub fn generate<R: Rng + ?Sized>(measurements: &HouseMeasurements, rng: &mut R) -> Self {
        let inner = measurements.grave_inner_radius();
        let span = measurements.grave_ring_span();
        let (width, height, depth) = GRAVE_SIZE;

        let graves = (0..GRAVE_COUNT)
            .map(|i| {
                let angle = rng.random::<f32>() * TAU;
                let distance = rng.random::<f32>() * span + inner;
                let lift = GRAVE_MAX_LIFT * rng.random::<f32>();
                let mut tilt = || (rng.random::<f32>() - 0.5) * 2.0 * GRAVE_MAX_TILT;
                let rotation = Vector3::new(tilt(), tilt(), tilt());

                let position = Vector3::new(angle.sin() * distance, lift, angle.cos() * distance);
                PlacedObject::new(
                    format!("grave_{i}"),
                    Primitive::Box {
                        width,
                        height,
                        depth,
                    },
                    MaterialId::Grave,
                )
                .with_transform(Transform::from_position(position).with_rotation(rotation))
            })
            .collect();

        Self { graves }
    }

    /// Horizontal distance of every grave from the origin.
    pub fn distances(&self) -> impl Iterator<Item = f32> + '_ {
        self.graves.iter().map(|grave| {
            let p = grave.position();
            (p.x * p.x + p.z * p.z).sqrt()
        })
    }

    pub fn into_group(self) -> Group {
        let mut group = Group::new("graves");
        for grave in self.graves {
            group.add(grave);
        }
        group
    }
}

/// Builds the static haunted house world.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    measurements: HouseMeasurements,
    lighting: Lighting,
}

impl SceneBuilder {
    pub fn new(measurements: HouseMeasurements) -> Self {
        Self {
            measurements,
            lighting: Lighting::default(),
        }
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn measurements(&self) -> &HouseMeasurements {
        &self.measurements
    }

    /// Builds the whole world. Graves are the only randomized part.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Scene {
        let mut root = Group::new("scene");
        root.add(self.build_ground());
        root.add_group(self.build_house());
        for bush in self.build_bushes() {
            root.add(bush);
        }
        root.add_group(GraveyardLayout::generate(&self.measurements, rng).into_group());

        let mut scene = Scene::new(root, MaterialLibrary::haunted_house(), self.lighting);
        scene.ghosts = GhostLight::haunted_trio();
        scene
    }

    /// A horizontal plane centered on the origin, large enough to hold the graveyard.
    pub fn build_ground(&self) -> PlacedObject {
        PlacedObject::new(
            "ground",
            Primitive::Plane {
                width: GROUND_SIZE,
                height: GROUND_SIZE,
            },
            MaterialId::Ground,
        )
        .with_transform(Transform::default().with_rotation(Vector3::new(-FRAC_PI_2, 0.0, 0.0)))
    }

    /// Walls, roof and door, grouped around the center of the walls.
    pub fn build_house(&self) -> Group {
        let m = &self.measurements;

        let mut house = Group::new("house").with_transform(Transform::from_position(
            Vector3::new(0.0, m.house_elevation(), 0.0),
        ));

        let walls = PlacedObject::new(
            "walls",
            Primitive::Box {
                width: m.width,
                height: m.height,
                depth: m.depth,
            },
            MaterialId::Walls,
        );

        // Rotated a quarter of its four segments so its faces line up with the walls.
        let roof = PlacedObject::new(
            "roof",
            Primitive::Cone {
                radius: m.roof_radius(),
                height: m.roof_height,
                radial_segments: 4,
            },
            MaterialId::Roof,
        )
        .with_transform(
            Transform::from_position(Vector3::new(0.0, m.roof_offset(), 0.0))
                .with_rotation(Vector3::new(0.0, FRAC_PI_4, 0.0)),
        );

        let door = PlacedObject::new(
            "door",
            Primitive::Plane {
                width: m.door_width(),
                height: m.door_height,
            },
            MaterialId::Door,
        )
        .with_transform(Transform::from_position(Vector3::new(
            0.0,
            m.door_offset(),
            m.door_depth_offset(),
        )));

        house.add(walls).add(roof).add(door);
        house
    }

    /// Three hand-placed bushes flanking the door.
    pub fn build_bushes(&self) -> Vec<PlacedObject> {
        let m = &self.measurements;
        let r = m.bush_radius;
        let base_height = 0.5 * r;
        let front = m.depth / 2.0;

        let sphere = Primitive::Sphere {
            radius: r,
            width_segments: 16,
            height_segments: 16,
        };
        let bush = |name: &str, transform: Transform| {
            PlacedObject::new(name, sphere, MaterialId::Bush).with_transform(transform)
        };

        vec![
            bush(
                "bush_1",
                Transform::from_position(Vector3::new(1.0 + r, base_height, front + r)),
            ),
            bush(
                "bush_2",
                Transform::from_position(Vector3::new(0.8, base_height * 0.6, front + r * 0.8))
                    .with_scale(0.6),
            ),
            bush(
                "bush_3",
                Transform::from_position(Vector3::new(-1.0, base_height * 1.5, front + r))
                    .with_scale_xyz(Vector3::new(0.7, 1.2, 0.7)),
            ),
        ]
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(HouseMeasurements::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Point3, Transform as _};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::gfx::scene::measurements::WORLD_BOUND;

    #[test]
    fn test_graveyard_avoids_house_and_world_bound() {
        let m = HouseMeasurements::default();
        for seed in 0..50 {
            let layout = GraveyardLayout::generate(&m, &mut StdRng::seed_from_u64(seed));
            assert_eq!(layout.graves.len(), GRAVE_COUNT);
            for distance in layout.distances() {
                // The sin/cos round trip can shave an ulp off the sampled distance.
                assert!(distance >= m.grave_inner_radius() - 1e-4, "{distance}");
                assert!(distance < WORLD_BOUND);
                assert!(distance < m.grave_outer_radius() + 1e-4);
            }
        }
    }

    #[test]
    fn test_graveyard_is_reproducible() {
        let m = HouseMeasurements::default();
        let a = GraveyardLayout::generate(&m, &mut StdRng::seed_from_u64(7));
        let b = GraveyardLayout::generate(&m, &mut StdRng::seed_from_u64(7));
        let c = GraveyardLayout::generate(&m, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_grave_lift_and_tilt_ranges() {
        let layout = GraveyardLayout::generate(
            &HouseMeasurements::default(),
            &mut StdRng::seed_from_u64(42),
        );
        for grave in &layout.graves {
            let t = grave.transform;
            assert!((0.0..GRAVE_MAX_LIFT).contains(&t.position.y));
            for tilt in [t.rotation.x, t.rotation.y, t.rotation.z] {
                assert!(tilt.abs() <= GRAVE_MAX_TILT);
            }
        }
    }

    #[test]
    fn test_house_layout() {
        let builder = SceneBuilder::default();
        let house = builder.build_house();
        assert_relative_eq!(house.transform.position.y, 1.5);
        assert_eq!(house.children.len(), 3);

        let roof = house.find_object("roof").expect("roof");
        assert_relative_eq!(roof.transform.position.y, 2.5);
        assert_relative_eq!(roof.transform.rotation.y, FRAC_PI_4);
        match roof.primitive {
            Primitive::Cone {
                radius,
                radial_segments,
                ..
            } => {
                assert_relative_eq!(radius, 4.0 / 2f32.sqrt() + 0.5);
                assert_eq!(radial_segments, 4);
            }
            other => panic!("unexpected roof primitive {other:?}"),
        }

        let door = house.find_object("door").expect("door");
        assert_relative_eq!(door.transform.position.z, 2.01);
    }

    #[test]
    fn test_door_bottom_rests_on_ground_in_world_space() {
        let builder = SceneBuilder::new(HouseMeasurements {
            height: 3.0,
            door_height: 2.0,
            ..Default::default()
        });
        let scene = builder.build(&mut StdRng::seed_from_u64(0));
        let (_, world) = scene
            .world_objects()
            .into_iter()
            .find(|(object, _)| object.name == "door")
            .expect("door");

        // Plane spans -h/2..h/2 in local Y.
        let bottom = world.transform_point(Point3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(bottom.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ground_faces_up() {
        let ground = SceneBuilder::default().build_ground();
        let normal = ground.transform.matrix().transform_vector(Vector3::unit_z());
        assert_relative_eq!(normal.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bushes() {
        let bushes = SceneBuilder::default().build_bushes();
        assert_eq!(bushes.len(), 3);
        assert_eq!(bushes[0].transform.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(bushes[1].transform.scale, Vector3::new(0.6, 0.6, 0.6));
        assert_eq!(bushes[2].transform.scale, Vector3::new(0.7, 1.2, 0.7));
        assert_relative_eq!(bushes[0].position().x, 1.5);
        assert_relative_eq!(bushes[2].position().y, 0.375);
    }

    #[test]
    fn test_full_scene() {
        let scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(1));
        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 1 + 3 + 3 + GRAVE_COUNT);
        assert_eq!(stats.light_count, 5);
        assert_eq!(scene.ghosts.len(), 3);
        assert_eq!(
            scene.find_group("graves").map(|g| g.children.len()),
            Some(GRAVE_COUNT)
        );
    }
}
