use super::camera_utils::{Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera orbiting a target point, Y up.
///
/// The eye is stored in spherical form (`distance`, `pitch`, `yaw`) around
/// `target`. The projection matrix is cached and only recomputed by
/// [`OrbitCamera::update_projection_matrix`], so callers that change `aspect`,
/// `fovy`, `znear` or `zfar` must call it before the next frame.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    projection: Matrix4<f32>,
    home: (f32, f32, f32, Vector3<f32>),
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        self.projection * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            projection: Matrix4::identity(),
            home: (distance, pitch, yaw, target),
        };
        camera.update();
        camera.update_projection_matrix();
        camera
    }

    /// Creates a camera whose eye starts at `position`, looking at `target`.
    pub fn looking_at(position: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let offset = position - target;
        let distance = offset.magnitude().max(f32::EPSILON);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(distance, pitch, yaw, target, aspect)
    }

    /// Sets the lens and recomputes the projection.
    pub fn with_lens(mut self, fovy: impl Into<Rad<f32>>, znear: f32, zfar: f32) -> Self {
        self.fovy = fovy.into();
        self.znear = znear;
        self.zfar = zfar;
        self.update_projection_matrix();
        self
    }

    /// Applies `bounds`, clamping the current orbit into them. The clamped orbit
    /// becomes the one [`OrbitCamera::reset_to_default`] returns to.
    pub fn with_bounds(mut self, bounds: OrbitCameraBounds) -> Self {
        self.bounds = bounds;
        self.set_distance(self.distance);
        self.set_pitch(self.pitch);
        self.set_yaw(self.yaw);
        self.home = (self.distance, self.pitch, self.yaw, self.target);
        self
    }

    /// Returns to the orbit the camera was created with.
    pub fn reset_to_default(&mut self) {
        let (distance, pitch, yaw, target) = self.home;
        self.distance = distance;
        self.pitch = pitch;
        self.yaw = yaw;
        self.target = target;

        self.update(); // Recalculate eye position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;
        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.target += movement;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch`, `yaw` or `target`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    /// Recomputes the cached projection from `fovy`, `aspect`, `znear` and `zfar`.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    /// Matches the aspect ratio to a `width` x `height` output and recomputes the projection.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    /// Refreshes [`OrbitCamera::uniform`] from the current eye and projection.
    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::new(self.eye, self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(16.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_looking_at_round_trips_position() {
        let camera = OrbitCamera::looking_at(Vector3::new(4.0, 2.0, 5.0), Vector3::zero(), 1.5);
        assert_relative_eq!(camera.eye.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(camera.distance, 45f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_resize_recomputes_projection() {
        let mut camera = OrbitCamera::looking_at(Vector3::new(4.0, 2.0, 5.0), Vector3::zero(), 1.0)
            .with_lens(Deg(75.0), 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.resize_projection(1920, 1080);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        let after = camera.projection_matrix();
        assert_ne!(before, after);

        // x scale is y scale divided by the aspect ratio
        assert_relative_eq!(after.x.x, after.y.y / camera.aspect, epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_and_distance_are_clamped() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.set_distance(100.0);
        assert_eq!(camera.distance, 16.0);
    }

    #[test]
    fn test_bounds_clamp_starting_orbit() {
        let bounds = OrbitCameraBounds {
            min_distance: Some(1.0),
            max_distance: Some(10.0),
            ..OrbitCameraBounds::default()
        };
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 30.0), Vector3::zero(), 1.0)
                .with_bounds(bounds);
        assert_eq!(camera.distance, 10.0);
        assert_relative_eq!(camera.eye.z, 10.0, epsilon = 1e-5);

        camera.set_distance(5.0);
        camera.reset_to_default();
        assert_eq!(camera.distance, 10.0);
    }

    #[test]
    fn test_reset_restores_home_orbit() {
        let mut camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0);
        camera.add_yaw(1.0);
        camera.pan((1.0, 0.5));
        camera.set_distance(9.0);
        camera.reset_to_default();
        assert_eq!(camera.distance, 5.0);
        assert_eq!(camera.yaw, 0.2);
        assert_eq!(camera.target, Vector3::zero());
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let offset = camera.eye - camera.target;
        camera.pan((0.3, -0.2));
        assert_ne!(camera.target, Vector3::zero());
        let new_offset = camera.eye - camera.target;
        assert_relative_eq!(offset.x, new_offset.x, epsilon = 1e-5);
        assert_relative_eq!(offset.y, new_offset.y, epsilon = 1e-5);
        assert_relative_eq!(offset.z, new_offset.z, epsilon = 1e-5);
    }
}
