//! The per-frame loop.
//!
//! Each [`AnimationDriver::tick`] runs one frame in a fixed order:
//!
//! 1. latch the clock
//! 2. move the ghosts to their positions at the new elapsed time
//! 3. apply pending orbit-control motion to the camera
//! 4. refresh the camera's view-projection
//! 5. render exactly once
//!
//! The driver owns no scene state itself; everything it mutates lives in the
//! [`WorldContext`] passed in, so the windowed app and headless tests share
//! one code path.

use crate::gfx::rendering::delegate::{RenderDelegate, RenderError};
use crate::world::WorldContext;

use super::clock::Clock;

/// Decides whether the loop should produce another frame.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> bool;
}

impl<F: FnMut() -> bool> FrameScheduler for F {
    fn next_frame(&mut self) -> bool {
        self()
    }
}

/// Schedules exactly `n` frames.
#[derive(Debug, Clone, Copy)]
pub struct FixedFrames(pub u64);

impl FrameScheduler for FixedFrames {
    fn next_frame(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

pub struct AnimationDriver<C: Clock, R: RenderDelegate> {
    clock: C,
    renderer: R,
    frames: u64,
}

impl<C: Clock, R: RenderDelegate> AnimationDriver<C, R> {
    pub fn new(clock: C, renderer: R) -> Self {
        Self {
            clock,
            renderer,
            frames: 0,
        }
    }

    /// Runs one frame. A render failure is returned as is and the frame is not counted.
    pub fn tick(&mut self, world: &mut WorldContext) -> Result<(), RenderError> {
        self.clock.update();
        let elapsed = self.clock.elapsed();

        world.scene.update_ghosts(elapsed);
        world.controls.update(&mut world.camera);
        world.camera.update_view_proj();

        self.renderer.render(&world.scene, &world.camera)?;
        self.frames += 1;
        Ok(())
    }

    /// Applies a new viewport size.
    ///
    /// The viewport always records the new size. A zero width or height leaves
    /// the camera and renderer untouched, since neither has a meaningful state
    /// for an empty surface.
    pub fn resize(&mut self, world: &mut WorldContext, width: u32, height: u32) {
        world.viewport.resize(width, height);
        if world.viewport.is_empty() {
            log::debug!("Ignoring resize to empty viewport {width}x{height}");
            return;
        }

        world.camera.resize_projection(width, height);
        world.camera.update_view_proj();
        self.renderer.resize(width, height);
    }

    /// Ticks until `scheduler` declines another frame or rendering fails.
    ///
    /// Returns the number of frames rendered by this call.
    pub fn run(
        &mut self,
        world: &mut WorldContext,
        mut scheduler: impl FrameScheduler,
    ) -> Result<u64, RenderError> {
        let start = self.frames;
        while scheduler.next_frame() {
            if let Err(err) = self.tick(world) {
                log::error!("Frame {} failed: {err}", self.frames);
                return Err(err);
            }
        }
        Ok(self.frames - start)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Frames rendered successfully since the driver was created.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clock::ManualClock;
    use crate::config::WorldConfig;
    use crate::gfx::rendering::delegate::RecordingRenderer;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn world() -> WorldContext {
        WorldContext::from_config(&WorldConfig::default(), &mut StdRng::seed_from_u64(3))
            .expect("world")
    }

    #[test]
    fn test_tick_moves_ghosts_then_renders_once() {
        let mut world = world();
        let mut driver = AnimationDriver::new(ManualClock::new(), RecordingRenderer::new());

        driver.clock_mut().set(1.5);
        driver.tick(&mut world).expect("tick");

        assert_eq!(driver.frame_count(), 1);
        assert_eq!(driver.renderer().frames.len(), 1);

        let recorded = &driver.renderer().frames[0];
        for (ghost, seen) in world.scene.ghosts.iter().zip(&recorded.ghost_positions) {
            let expected = ghost.orbit.position_at(1.5);
            assert_relative_eq!(seen.x, expected.x, epsilon = 1e-6);
            assert_relative_eq!(seen.y, expected.y, epsilon = 1e-6);
            assert_relative_eq!(seen.z, expected.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_damped_controls_keep_moving_between_ticks() {
        let mut world = world();
        let mut driver = AnimationDriver::new(ManualClock::new(), RecordingRenderer::new());

        world.controls.on_pointer_button(true);
        world.controls.on_pointer_drag(-100.0, 0.0);
        world.controls.on_pointer_button(false);

        driver.tick(&mut world).expect("tick");
        driver.tick(&mut world).expect("tick");

        let frames = &driver.renderer().frames;
        assert_ne!(frames[0].camera_eye, frames[1].camera_eye);
        assert!(world.controls.is_moving());
    }

    #[test]
    fn test_resize_updates_camera_and_renderer() {
        let mut world = world();
        let mut driver = AnimationDriver::new(ManualClock::new(), RecordingRenderer::new());

        driver.resize(&mut world, 800, 400);
        assert_eq!(world.viewport.width, 800);
        assert_relative_eq!(world.camera.aspect, 2.0);
        assert_eq!(driver.renderer().last_size(), Some((800, 400)));
    }

    #[test]
    fn test_zero_sized_resize_only_records_viewport() {
        let mut world = world();
        let mut driver = AnimationDriver::new(ManualClock::new(), RecordingRenderer::new());
        let aspect = world.camera.aspect;

        driver.resize(&mut world, 0, 600);
        assert_eq!(world.viewport.width, 0);
        assert_eq!(world.camera.aspect, aspect);
        assert!(driver.renderer().sizes.is_empty());
    }

    #[test]
    fn test_run_counts_frames() {
        let mut world = world();
        let mut driver = AnimationDriver::new(ManualClock::new(), RecordingRenderer::new());

        assert_eq!(driver.run(&mut world, FixedFrames(5)).expect("run"), 5);
        assert_eq!(driver.frame_count(), 5);

        let mut remaining = 2;
        let rendered = driver
            .run(&mut world, || {
                remaining -= 1;
                remaining >= 0
            })
            .expect("run");
        assert_eq!(rendered, 2);
        assert_eq!(driver.frame_count(), 7);
    }

    #[test]
    fn test_run_stops_at_first_render_error() {
        let mut world = world();
        let mut driver =
            AnimationDriver::new(ManualClock::new(), RecordingRenderer::failing_on_frame(2));

        let err = driver.run(&mut world, FixedFrames(10)).unwrap_err();
        assert!(matches!(err, RenderError::Delegate(_)));
        assert_eq!(driver.frame_count(), 2);
    }
}
