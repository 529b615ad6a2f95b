use cgmath::{Matrix4, SquareMatrix, Vector3};

/// Anything that can produce a combined view-projection matrix.
pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera state as the shader sees it.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// Eye position; `w` is padding to keep the matrix 16-byte aligned.
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(eye: Vector3<f32>, view_proj: Matrix4<f32>) -> Self {
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(view_proj),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), Matrix4::identity())
    }
}

/// Column-major array layout expected by WGSL `mat4x4<f32>`.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(CameraUniform::default().view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(CameraUniform::default().view_position[3], 1.0);
    }
}
