//! The mutable state shared by the frame loop: scene, camera, controls and viewport.

use cgmath::{Deg, Vector3};
use rand::Rng;

use crate::config::{ConfigError, WorldConfig};
use crate::gfx::{
    camera::{OrbitCamera, OrbitCameraBounds, OrbitControls},
    scene::{Scene, SceneBuilder},
};

/// Highest number of rendered pixels per logical pixel.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Scales a physical window size down so it renders at no more than
/// [`MAX_PIXEL_RATIO`] pixels per logical pixel.
pub fn capped_render_size(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    if !(scale_factor > MAX_PIXEL_RATIO) {
        return (width, height);
    }
    let ratio = MAX_PIXEL_RATIO / scale_factor;
    let scale = |side: u32| (side as f64 * ratio).round() as u32;
    (scale(width), scale(height))
}

/// Drawable area in physical pixels. Either side may be zero while minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for an empty viewport.
    pub fn aspect(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// Everything one frame reads and writes.
#[derive(Debug, Clone)]
pub struct WorldContext {
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
}

impl WorldContext {
    pub fn new(scene: Scene, camera: OrbitCamera, controls: OrbitControls, viewport: Viewport) -> Self {
        Self {
            scene,
            camera,
            controls,
            viewport,
        }
    }

    /// Builds the scene and camera described by `config`, drawing graves from `rng`.
    pub fn from_config<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let viewport = Viewport::new(config.window.width, config.window.height);
        let scene = SceneBuilder::new(config.house)
            .with_lighting(config.lighting()?)
            .build(rng);

        let camera_config = &config.camera;
        let mut camera = OrbitCamera::looking_at(
            Vector3::from(camera_config.position),
            Vector3::from(camera_config.target),
            viewport.aspect().unwrap_or(1.0),
        )
        .with_bounds(OrbitCameraBounds {
            min_distance: Some(camera_config.min_distance),
            max_distance: Some(camera_config.max_distance),
            ..OrbitCameraBounds::default()
        })
        .with_lens(
            Deg(camera_config.fov_degrees),
            camera_config.near,
            camera_config.far,
        );
        camera.update_view_proj();

        let controls = OrbitControls::new(camera_config.rotate_speed, camera_config.zoom_speed);
        let controls = match camera_config.damping {
            Some(damping) => controls.with_damping(damping),
            None => controls,
        };

        let stats = scene.get_statistics();
        log::info!(
            "Built haunted house: {} objects, {} materials, {} lights",
            stats.object_count,
            stats.material_count,
            stats.light_count
        );

        Ok(Self::new(scene, camera, controls, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_viewport_aspect() {
        let mut viewport = Viewport::new(1200, 800);
        assert_eq!(viewport.aspect(), Some(1.5));
        viewport.resize(0, 800);
        assert!(viewport.is_empty());
        assert_eq!(viewport.aspect(), None);
    }

    #[test]
    fn test_render_size_caps_pixel_ratio() {
        assert_eq!(capped_render_size(2400, 1600, 2.0), (2400, 1600));
        assert_eq!(capped_render_size(1200, 800, 1.0), (1200, 800));
        assert_eq!(capped_render_size(3600, 2400, 3.0), (2400, 1600));
        assert_eq!(capped_render_size(0, 2400, 3.0), (0, 1600));
    }

    #[test]
    fn test_world_from_default_config() {
        let config = WorldConfig::default();
        let world = WorldContext::from_config(&config, &mut StdRng::seed_from_u64(1)).expect("world");

        assert_relative_eq!(world.camera.eye.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(world.camera.eye.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(world.camera.eye.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(world.camera.aspect, 1.5);
        assert_relative_eq!(world.camera.fovy.0, 75f32.to_radians(), epsilon = 1e-6);
        assert_eq!(world.camera.zfar, 100.0);
        assert!(world.controls.enable_damping);
        assert_eq!(world.scene.ghosts.len(), 3);
    }

    #[test]
    fn test_far_camera_position_is_clamped() {
        let mut config = WorldConfig::default();
        config.camera.position = [0.0, 0.0, 50.0];
        let world = WorldContext::from_config(&config, &mut StdRng::seed_from_u64(1)).expect("world");

        assert_relative_eq!(world.camera.distance, config.camera.max_distance);
        assert_relative_eq!(world.camera.eye.z, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_world_rejects_invalid_config() {
        let mut config = WorldConfig::default();
        config.house.depth = 0.0;
        let result = WorldContext::from_config(&config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
