//! Uniform data shared with the shader
//!
//! [`GlobalUniform`] carries everything constant across one frame (camera,
//! sun, ambient, fog and the ghost lights) and is bound at group 0.
//! [`ObjectUniform`] carries one object's transform and material and is bound
//! at group 1. Both structs MUST match `scene.wgsl` field for field.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::gfx::{
    camera::OrbitCamera,
    scene::{Material, Scene, Shading},
};
use crate::wgpu_utils::{binding_types, UniformBuffer};

/// Point lights beyond this count are not sent to the GPU.
pub const MAX_POINT_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    /// xyz position, w intensity
    pub position: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    /// rgb pre-multiplied by intensity
    pub ambient: [f32; 4],
    /// Unit vector towards the sun
    pub sun_direction: [f32; 4],
    /// rgb pre-multiplied by intensity
    pub sun_color: [f32; 4],
    /// rgb colour, w density; a zero density disables fog
    pub fog: [f32; 4],
    /// x: active point lights
    pub params: [u32; 4],
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

impl GlobalUniform {
    pub fn new(scene: &Scene, camera: &OrbitCamera) -> Self {
        let lighting = &scene.lighting;
        let ambient = lighting.ambient;
        let sun = lighting.directional;
        let sun_direction = sun.direction_to_light();
        let fog = lighting
            .fog
            .map(|fog| [fog.color[0], fog.color[1], fog.color[2], fog.density])
            .unwrap_or([0.0; 4]);

        let mut point_lights = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        let mut count = 0;
        for (slot, ghost) in point_lights.iter_mut().zip(&scene.ghosts) {
            let position = ghost.position();
            *slot = PointLightRaw {
                position: [position.x, position.y, position.z, ghost.intensity],
                color: [ghost.color[0], ghost.color[1], ghost.color[2], 1.0],
            };
            count += 1;
        }

        Self {
            view_proj: camera.uniform.view_proj,
            view_position: camera.uniform.view_position,
            ambient: scale(ambient.color, ambient.intensity),
            sun_direction: [sun_direction.x, sun_direction.y, sun_direction.z, 0.0],
            sun_color: scale(sun.color, sun.intensity),
            fog,
            params: [count, 0, 0, 0],
            point_lights,
        }
    }
}

/// Number of ghost lights in `scene` that do not fit the uniform's light array.
pub fn dropped_point_lights(scene: &Scene) -> usize {
    scene.ghosts.len().saturating_sub(MAX_POINT_LIGHTS)
}

fn scale(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`
    pub normal: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// x roughness, y 1.0 when unlit
    pub material: [f32; 4],
}

impl ObjectUniform {
    pub fn new(world: Matrix4<f32>, material: &Material) -> Self {
        let normal = world
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        let unlit = match material.shading {
            Shading::Lit => 0.0,
            Shading::Unlit => 1.0,
        };
        let [r, g, b] = material.base_color;

        Self {
            model: world.into(),
            normal: normal.into(),
            base_color: [r, g, b, 1.0],
            material: [material.roughness, unlit, 0.0, 0.0],
        }
    }
}

/// Group 0: the per-frame uniform buffer and its bind group.
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    ubo: UniformBuffer<GlobalUniform>,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, initial: &GlobalUniform) -> Self {
        let layout = binding_types::single_uniform_layout(device, "Globals Bind Group Layout");
        let ubo = UniformBuffer::new_with_data(device, initial);
        let bind_group = binding_types::single_uniform_bind_group(
            device,
            &layout,
            ubo.binding_resource(),
            "Globals Bind Group",
        );

        Self {
            layout,
            ubo,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, content: &GlobalUniform) {
        self.ubo.update_content(queue, content);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{MaterialId, MaterialLibrary, SceneBuilder};
    use approx::assert_relative_eq;
    use cgmath::{Vector3, Zero};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 32);
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 64 + 16 * 6 + 32 * MAX_POINT_LIGHTS);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 64 * 2 + 16 * 2);
    }

    #[test]
    fn test_global_uniform_packs_ghosts_and_fog() {
        let mut scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(5));
        scene.update_ghosts(2.0);
        let mut camera = OrbitCamera::new(5.0, 0.3, 0.2, Vector3::zero(), 1.5);
        camera.update_view_proj();

        let uniform = GlobalUniform::new(&scene, &camera);
        assert_eq!(uniform.params[0], 3);
        let ghost = &scene.ghosts[1];
        assert_eq!(uniform.point_lights[1].position[0], ghost.position().x);
        assert_eq!(uniform.point_lights[1].position[3], 6.0);
        assert_eq!(uniform.point_lights[3], PointLightRaw::default());
        assert_relative_eq!(uniform.fog[3], 0.1);
        assert_relative_eq!(uniform.ambient[0], 0.5, epsilon = 1e-5);
        assert_relative_eq!(uniform.sun_color[1], 1.5, epsilon = 1e-5);
        assert_eq!(uniform.view_proj, camera.uniform.view_proj);
    }

    #[test]
    fn test_extra_ghosts_are_dropped() {
        let mut scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(5));
        assert_eq!(dropped_point_lights(&scene), 0);

        let extra = scene.ghosts[0].clone();
        scene.ghosts.extend(std::iter::repeat(extra).take(3));
        assert_eq!(dropped_point_lights(&scene), 2);

        let camera = OrbitCamera::new(5.0, 0.3, 0.2, Vector3::zero(), 1.5);
        let uniform = GlobalUniform::new(&scene, &camera);
        assert_eq!(uniform.params[0], MAX_POINT_LIGHTS as u32);
    }

    #[test]
    fn test_global_uniform_without_fog() {
        let mut scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(5));
        scene.lighting.fog = None;
        let camera = OrbitCamera::new(5.0, 0.3, 0.2, Vector3::zero(), 1.5);
        assert_eq!(GlobalUniform::new(&scene, &camera).fog, [0.0; 4]);
    }

    #[test]
    fn test_object_uniform_normal_matrix() {
        let materials = MaterialLibrary::haunted_house();
        let world = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let uniform = ObjectUniform::new(world, materials.get(MaterialId::Walls));

        // Non-uniform scale inverts in the normal matrix
        assert_relative_eq!(uniform.normal[0][0], 0.5);
        assert_relative_eq!(uniform.normal[1][1], 1.0);
        assert_eq!(uniform.material[1], 0.0);

        let grave = ObjectUniform::new(world, materials.get(MaterialId::Grave));
        assert_eq!(grave.material[1], 1.0);
    }
}
