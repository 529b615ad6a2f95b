//! The seam between the animation loop and whatever draws the scene.

use cgmath::Vector3;

use crate::gfx::{camera::OrbitCamera, scene::Scene};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to acquire next surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("render delegate failed: {0}")]
    Delegate(String),
}

/// Draws a [`Scene`] through a camera.
///
/// The animation driver calls [`RenderDelegate::render`] exactly once per frame
/// and [`RenderDelegate::resize`] synchronously whenever the viewport changes.
pub trait RenderDelegate {
    fn render(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), RenderError>;

    /// Resizes the output surface to `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32);
}

/// What a [`RecordingRenderer`] saw during one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub ghost_positions: Vec<Vector3<f32>>,
    pub camera_eye: Vector3<f32>,
    pub camera_aspect: f32,
}

/// A delegate that draws nothing and remembers every call.
///
/// Useful headless and in tests; can be told to fail on a given frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RecordedFrame>,
    pub sizes: Vec<(u32, u32)>,
    fail_on_frame: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the render call with zero-based index `frame` return an error.
    pub fn failing_on_frame(frame: usize) -> Self {
        Self {
            fail_on_frame: Some(frame),
            ..Self::default()
        }
    }

    pub fn last_size(&self) -> Option<(u32, u32)> {
        self.sizes.last().copied()
    }
}

impl RenderDelegate for RecordingRenderer {
    fn render(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), RenderError> {
        if self.fail_on_frame == Some(self.frames.len()) {
            return Err(RenderError::Delegate(format!(
                "injected failure on frame {}",
                self.frames.len()
            )));
        }
        self.frames.push(RecordedFrame {
            ghost_positions: scene.ghosts.iter().map(|ghost| ghost.position()).collect(),
            camera_eye: camera.eye,
            camera_aspect: camera.aspect,
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }
}
