use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Zero};

use super::material::MaterialId;

/// Position, Euler rotation and scale of a scene node relative to its parent.
///
/// Rotations are applied in X, Y, Z order (the matrix is `Rx * Ry * Rz`), so a
/// node rotated about X and Y turns about its own X axis last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Euler angles in radians.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn with_scale_xyz(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Local matrix: `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

/// Procedural shape a placed object is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Flat rectangle in the XY plane facing +Z.
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
    /// Pyramid-like cone with its apex on +Y, centered on its half height.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// A positioned primitive owned by the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub name: String,
    pub primitive: Primitive,
    pub material: MaterialId,
    pub transform: Transform,
}

impl PlacedObject {
    pub fn new(name: impl Into<String>, primitive: Primitive, material: MaterialId) -> Self {
        Self {
            name: name.into(),
            primitive,
            material,
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Object(PlacedObject),
    Group(Group),
}

/// A named parent node; children inherit its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub transform: Transform,
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn add(&mut self, object: PlacedObject) -> &mut Self {
        self.children.push(SceneNode::Object(object));
        self
    }

    pub fn add_group(&mut self, group: Group) -> &mut Self {
        self.children.push(SceneNode::Group(group));
        self
    }

    /// Iterates over the direct child objects, skipping nested groups.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.children.iter().filter_map(|child| match child {
            SceneNode::Object(object) => Some(object),
            SceneNode::Group(_) => None,
        })
    }

    /// Depth-first search for an object by name.
    pub fn find_object(&self, name: &str) -> Option<&PlacedObject> {
        self.children.iter().find_map(|child| match child {
            SceneNode::Object(object) if object.name == name => Some(object),
            SceneNode::Object(_) => None,
            SceneNode::Group(group) => group.find_object(name),
        })
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            SceneNode::Group(group) => group.find_group(name),
            SceneNode::Object(_) => None,
        })
    }

    /// Calls `visit` with every object in the subtree and its world matrix.
    pub fn visit_objects<'a, F>(&'a self, parent: Matrix4<f32>, visit: &mut F)
    where
        F: FnMut(&'a PlacedObject, Matrix4<f32>),
    {
        let world = parent * self.transform.matrix();
        for child in &self.children {
            match child {
                SceneNode::Object(object) => visit(object, world * object.transform.matrix()),
                SceneNode::Group(group) => group.visit_objects(world, visit),
            }
        }
    }

    /// Number of objects in the subtree.
    pub fn object_count(&self) -> usize {
        let mut count = 0;
        self.visit_objects(Matrix4::identity(), &mut |_, _| count += 1);
        count
    }
}
