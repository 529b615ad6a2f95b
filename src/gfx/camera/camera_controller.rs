use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Residual motion below this is dropped so a damped camera comes to rest.
const REST_THRESHOLD: f32 = 1e-5;

/// Orbit controls: pointer drag orbits, shift-drag pans, the wheel zooms.
///
/// Input only accumulates motion; [`OrbitControls::update`] applies it to the
/// camera once per frame. With damping enabled each frame applies
/// `damping_factor` of the pending motion and keeps the rest, which gives the
/// camera inertia after the pointer is released.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_delta: f32,
    pan_delta: (f32, f32),
}

impl OrbitControls {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            enable_damping: false,
            damping_factor: 0.05,
            is_shift_held: false,
            is_mouse_pressed: false,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_delta: 0.0,
            pan_delta: (0.0, 0.0),
        }
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = damping_factor.clamp(f32::EPSILON, 1.0);
        self
    }

    pub fn process_events(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => self.on_pointer_button(*state == ElementState::Pressed),
            DeviceEvent::MouseWheel { delta } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.on_wheel(scroll);
            }
            DeviceEvent::MouseMotion { delta } => {
                self.on_pointer_drag(delta.0 as f32, delta.1 as f32);
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to default position");
                    self.stop();
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    pub fn on_pointer_button(&mut self, pressed: bool) {
        self.is_mouse_pressed = pressed;
    }

    pub fn on_shift(&mut self, held: bool) {
        self.is_shift_held = held;
    }

    /// Pointer moved by (`dx`, `dy`) pixels; ignored unless the button is held.
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32) {
        if !self.is_mouse_pressed {
            return;
        }
        if self.is_shift_held {
            self.pan_delta.0 += -dx * self.pan_speed;
            self.pan_delta.1 += dy * self.pan_speed;
        } else {
            self.yaw_delta += -dx * self.rotate_speed;
            self.pitch_delta += dy * self.rotate_speed;
        }
    }

    /// Wheel scrolled by `scroll` lines; positive scrolls zoom in.
    pub fn on_wheel(&mut self, scroll: f32) {
        self.zoom_delta += -scroll * self.zoom_speed;
    }

    /// Applies pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        if !self.is_moving() {
            return false;
        }

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        camera.add_yaw(self.yaw_delta * share);
        camera.add_pitch(self.pitch_delta * share);
        if self.zoom_delta != 0.0 {
            let corrected_zoom = f32::log10(camera.distance.max(1.1)) * self.zoom_delta * share;
            camera.set_distance(camera.distance + corrected_zoom);
        }
        if self.pan_delta != (0.0, 0.0) {
            camera.pan((self.pan_delta.0 * share, self.pan_delta.1 * share));
        }

        let keep = 1.0 - share;
        self.yaw_delta = settle(self.yaw_delta * keep);
        self.pitch_delta = settle(self.pitch_delta * keep);
        self.zoom_delta = settle(self.zoom_delta * keep);
        self.pan_delta = (settle(self.pan_delta.0 * keep), settle(self.pan_delta.1 * keep));
        true
    }

    /// Whether motion is still pending.
    pub fn is_moving(&self) -> bool {
        self.yaw_delta != 0.0
            || self.pitch_delta != 0.0
            || self.zoom_delta != 0.0
            || self.pan_delta != (0.0, 0.0)
    }

    /// Drops all pending motion.
    pub fn stop(&mut self) {
        self.yaw_delta = 0.0;
        self.pitch_delta = 0.0;
        self.zoom_delta = 0.0;
        self.pan_delta = (0.0, 0.0);
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < REST_THRESHOLD {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0)
    }

    #[test]
    fn test_drag_without_button_is_ignored() {
        let mut controls = OrbitControls::new(0.005, 0.1);
        controls.on_pointer_drag(100.0, 40.0);
        assert!(!controls.is_moving());
        assert!(!controls.update(&mut camera()));
    }

    #[test]
    fn test_undamped_update_applies_everything_once() {
        let mut controls = OrbitControls::new(0.01, 0.1);
        let mut camera = camera();
        controls.on_pointer_button(true);
        controls.on_pointer_drag(-10.0, 0.0);

        assert!(controls.update(&mut camera));
        assert_relative_eq!(camera.yaw, 0.3, epsilon = 1e-6);
        assert!(!controls.is_moving());
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_damped_motion_decays_towards_full_drag() {
        let mut controls = OrbitControls::new(0.01, 0.1).with_damping(0.05);
        let mut camera = camera();
        controls.on_pointer_button(true);
        controls.on_pointer_drag(-10.0, 0.0);
        controls.on_pointer_button(false);

        controls.update(&mut camera);
        assert_relative_eq!(camera.yaw, 0.2 + 0.1 * 0.05, epsilon = 1e-6);

        let mut frames = 1;
        while controls.update(&mut camera) {
            frames += 1;
            assert!(frames < 1000, "damped motion never settled");
        }
        // The geometric series converges on the whole drag.
        assert_relative_eq!(camera.yaw, 0.3, epsilon = 1e-3);
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut controls = OrbitControls::new(0.01, 0.1);
        let mut camera = camera();
        controls.on_shift(true);
        controls.on_pointer_button(true);
        assert!(controls.is_panning());
        controls.on_pointer_drag(5.0, 5.0);
        controls.update(&mut camera);
        assert_ne!(camera.target, Vector3::zero());
        assert_eq!(camera.yaw, 0.2);
    }

    #[test]
    fn test_wheel_zooms_in() {
        let mut controls = OrbitControls::new(0.01, 0.5);
        let mut camera = camera();
        controls.on_wheel(1.0);
        controls.update(&mut camera);
        assert!(camera.distance < 5.0);
    }
}
