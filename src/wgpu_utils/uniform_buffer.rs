// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A GPU uniform buffer holding exactly one `Content`.
///
/// Writes are skipped when the bytes have not changed since the last upload,
/// so calling [`UniformBuffer::update_content`] every frame costs nothing for
/// static objects.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        match type_name.rfind(':') {
            Some(pos) => &type_name[(pos + 1)..],
            None => type_name,
        }
    }

    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("UniformBuffer: {}", Self::name())),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: bytes.to_vec(),
        }
    }

    /// Uploads `content` unless it matches what the buffer already holds.
    /// Returns whether a write was queued.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: &Content) -> bool {
        let new_content = bytemuck::bytes_of(content);
        if self.previous_content == new_content {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}
