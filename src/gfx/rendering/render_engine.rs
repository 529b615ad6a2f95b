//! WGPU-based forward renderer for the haunted house
//!
//! One pass, one pipeline: every placed object is drawn with its own uniform
//! buffer (transform + material) against a shared per-frame uniform (camera,
//! lights, fog). The frame clears to the fog colour so distant geometry fades
//! into the background.

use crate::gfx::{
    camera::OrbitCamera,
    geometry::GeometryData,
    resources::{
        global_bindings::{
            dropped_point_lights, GlobalBindings, GlobalUniform, ObjectUniform, MAX_POINT_LIGHTS,
        },
        texture_resource::TextureResource,
    },
    scene::{Primitive, Scene},
};
use crate::wgpu_utils::{binding_types, UniformBuffer};

use super::{
    delegate::{RenderDelegate, RenderError},
    mesh::GpuMesh,
    pipeline::{create_pipeline, PipelineConfig},
    render_pass_ext::DrawMesh,
};

const NIGHT_SKY: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.02,
    a: 1.0,
};

/// One scene object ready to draw.
struct DrawItem {
    mesh: usize,
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline: wgpu::RenderPipeline,
    global_bindings: GlobalBindings,
    object_layout: wgpu::BindGroupLayout,
    /// Meshes are shared between objects with identical primitives.
    meshes: Vec<(Primitive, GpuMesh)>,
    draw_items: Vec<DrawItem>,
}

impl RenderEngine {
    /// Creates a renderer presenting to `window` at `width` x `height` pixels.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Colours are linear; let the surface do the sRGB encode.
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| {
                RenderError::Delegate("surface reports no supported formats".to_string())
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device, &bytemuck::Zeroable::zeroed());
        let object_layout =
            binding_types::single_uniform_layout(&device, "Object Bind Group Layout");

        let shader = device.create_shader_module(wgpu::include_wgsl!("scene.wgsl"));
        // Planes (ground, door) are seen from both sides.
        let pipeline = create_pipeline(
            &device,
            &shader,
            &[global_bindings.bind_group_layout(), &object_layout],
            &PipelineConfig::default()
                .with_label("Scene")
                .with_cull_mode(None)
                .with_color_format(format),
        );

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline,
            global_bindings,
            object_layout,
            meshes: Vec::new(),
            draw_items: Vec::new(),
        })
    }

    /// Uploads object transforms and materials, creating GPU resources the first
    /// time the scene is seen or whenever its object count changes.
    fn sync_scene(&mut self, scene: &Scene) {
        let objects = scene.world_objects();

        if objects.len() != self.draw_items.len() {
            log::debug!("Uploading {} scene objects", objects.len());
            let dropped = dropped_point_lights(scene);
            if dropped > 0 {
                log::warn!(
                    "Scene has {} ghost lights, only {} are drawn",
                    scene.ghosts.len(),
                    MAX_POINT_LIGHTS
                );
            }
            self.draw_items.clear();
            for (object, world) in &objects {
                let mesh = self.mesh_for(&object.primitive, &object.name);
                let content = ObjectUniform::new(*world, scene.material_for(object));
                let uniform = UniformBuffer::new_with_data(&self.device, &content);
                let bind_group = binding_types::single_uniform_bind_group(
                    &self.device,
                    &self.object_layout,
                    uniform.binding_resource(),
                    &object.name,
                );
                self.draw_items.push(DrawItem {
                    mesh,
                    uniform,
                    bind_group,
                });
            }
            return;
        }

        for ((object, world), item) in objects.iter().zip(self.draw_items.iter_mut()) {
            let content = ObjectUniform::new(*world, scene.material_for(object));
            item.uniform.update_content(&self.queue, &content);
        }
    }

    fn mesh_for(&mut self, primitive: &Primitive, name: &str) -> usize {
        if let Some(index) = self.meshes.iter().position(|(known, _)| known == primitive) {
            return index;
        }
        let geometry = GeometryData::from_primitive(primitive);
        self.meshes
            .push((*primitive, GpuMesh::from_geometry(&self.device, &geometry, name)));
        self.meshes.len() - 1
    }
}

impl RenderDelegate for RenderEngine {
    fn render(&mut self, scene: &Scene, camera: &OrbitCamera) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        self.sync_scene(scene);
        self.global_bindings
            .update(&self.queue, &GlobalUniform::new(scene, camera));

        let clear_color = scene
            .lighting
            .fog
            .map(|fog| wgpu::Color {
                r: fog.color[0] as f64,
                g: fog.color[1] as f64,
                b: fog.color[2] as f64,
                a: 1.0,
            })
            .unwrap_or(NIGHT_SKY);

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for item in &self.draw_items {
                render_pass.set_bind_group(1, &item.bind_group, &[]);
                render_pass.draw_mesh(&self.meshes[item.mesh].1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Reconfigures the surface and recreates the depth buffer.
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }
}
