use cgmath::{Matrix4, SquareMatrix};

use crate::animation::ghost::GhostLight;

use super::{
    lights::Lighting,
    material::{Material, MaterialLibrary},
    object::{Group, PlacedObject},
};

/// The complete world: static object tree, materials, lights and the ghosts.
///
/// Only the ghosts change after construction.
#[derive(Debug, Clone)]
pub struct Scene {
    pub root: Group,
    pub materials: MaterialLibrary,
    pub lighting: Lighting,
    pub ghosts: Vec<GhostLight>,
}

impl Scene {
    pub fn new(root: Group, materials: MaterialLibrary, lighting: Lighting) -> Self {
        Self {
            root,
            materials,
            lighting,
            ghosts: Vec::new(),
        }
    }

    /// Advances every ghost to its position at `elapsed` seconds.
    pub fn update_ghosts(&mut self, elapsed: f32) {
        for ghost in self.ghosts.iter_mut() {
            ghost.update(elapsed);
        }
    }

    /// Every placed object with its world matrix, in tree order.
    pub fn world_objects(&self) -> Vec<(&PlacedObject, Matrix4<f32>)> {
        let mut objects = Vec::new();
        self.root
            .visit_objects(Matrix4::identity(), &mut |object, world| objects.push((object, world)));
        objects
    }

    pub fn find_object(&self, name: &str) -> Option<&PlacedObject> {
        self.root.find_object(name)
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.root.find_group(name)
    }

    pub fn material_for(&self, object: &PlacedObject) -> &Material {
        self.materials.get(object.material)
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.root.object_count(),
            material_count: self.materials.len(),
            light_count: 2 + self.ghosts.len(),
        }
    }
}

/// Scene statistics for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub light_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{MaterialId, SceneBuilder};
    use rand::{rngs::StdRng, SeedableRng};

    fn scene() -> Scene {
        SceneBuilder::default().build(&mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_update_ghosts_only_moves_lights() {
        let mut scene = scene();
        let objects_before: Vec<_> = scene
            .world_objects()
            .into_iter()
            .map(|(object, world)| (object.clone(), world))
            .collect();

        scene.update_ghosts(4.0);

        for ghost in &scene.ghosts {
            assert_eq!(ghost.position(), ghost.orbit.position_at(4.0));
        }
        let objects_after: Vec<_> = scene
            .world_objects()
            .into_iter()
            .map(|(object, world)| (object.clone(), world))
            .collect();
        assert_eq!(objects_before, objects_after);
    }

    #[test]
    fn test_world_objects_are_in_tree_order() {
        let scene = scene();
        let names: Vec<_> = scene
            .world_objects()
            .iter()
            .map(|(object, _)| object.name.clone())
            .collect();
        assert_eq!(names[0], "ground");
        assert_eq!(&names[1..4], &["walls", "roof", "door"]);
        assert!(names[4].starts_with("bush"));
    }

    #[test]
    fn test_material_lookup() {
        let scene = scene();
        let door = scene.find_object("door").expect("door");
        assert_eq!(door.material, MaterialId::Door);
        assert_eq!(scene.material_for(door).name, "door");
        assert!(scene.find_group("graves").is_some());
    }
}
