//! Render pass helpers

use wgpu::*;

use super::mesh::GpuMesh;

/// Extension trait for RenderPass to draw a whole [`GpuMesh`] in one call
pub trait DrawMesh {
    fn draw_mesh(&mut self, mesh: &GpuMesh);
}

impl DrawMesh for RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
