use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    animation::{AnimationDriver, SystemClock},
    config::WindowConfig,
    gfx::rendering::RenderEngine,
    world::{capped_render_size, WorldContext},
};

/// Windowed host: owns the event loop glue and feeds the animation driver.
///
/// The GPU renderer only exists between `resumed` and exit. The first fatal
/// error stops the loop and is returned from [`HauntedHouseApp::run`].
pub struct HauntedHouseApp {
    world: WorldContext,
    window_config: WindowConfig,
    window: Option<Arc<Window>>,
    driver: Option<AnimationDriver<SystemClock, RenderEngine>>,
    error: Option<anyhow::Error>,
}

impl HauntedHouseApp {
    pub fn new(world: WorldContext, window_config: WindowConfig) -> Self {
        Self {
            world,
            window_config,
            window: None,
            driver: None,
            error: None,
        }
    }

    /// Runs until the window closes. Returns the number of frames rendered.
    pub fn run(mut self) -> anyhow::Result<u64> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .context("event loop terminated abnormally")?;

        if let Some(err) = self.error.take() {
            return Err(err);
        }
        Ok(self
            .driver
            .as_ref()
            .map(|driver| driver.frame_count())
            .unwrap_or(0))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let (width, height) = capped_render_size(width, height, window.scale_factor());
        let renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))
            .context("failed to initialise renderer")?;

        let mut driver = AnimationDriver::new(SystemClock::new(), renderer);
        // The physical size can differ from the configured logical size.
        driver.resize(&mut self.world, width, height);

        self.window = Some(window);
        self.driver = Some(driver);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
            && event.state == ElementState::Pressed
        {
            event_loop.exit();
            return;
        }
        self.world
            .controls
            .process_keyed_events(event, &mut self.world.camera);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.world.viewport.is_empty() {
            return;
        }
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        if let Err(err) = driver.tick(&mut self.world) {
            self.fail(event_loop, anyhow::Error::new(err).context("rendering failed"));
        }
    }
}

impl ApplicationHandler for HauntedHouseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_renderer(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => self
                .world
                .controls
                .on_pointer_button(state == ElementState::Pressed),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |window| window.scale_factor());
                let (width, height) = capped_render_size(width, height, scale_factor);
                if let Some(driver) = self.driver.as_mut() {
                    driver.resize(&mut self.world, width, height);
                } else {
                    self.world.viewport.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }
        self.world.controls.process_events(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
