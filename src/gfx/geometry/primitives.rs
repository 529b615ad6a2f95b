//! # Primitive Shape Generation
//!
//! All shapes are centered on the origin, Y up, with outward facing normals.

use super::GeometryData;
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Generate an axis-aligned box of the given size centered at the origin.
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-hw, -hh,  hd], [ hw, -hh,  hd], [ hw,  hh,  hd], [-hw,  hh,  hd],
        // Back face
        [-hw, -hh, -hd], [-hw,  hh, -hd], [ hw,  hh, -hd], [ hw, -hh, -hd],
        // Left face
        [-hw, -hh, -hd], [-hw, -hh,  hd], [-hw,  hh,  hd], [-hw,  hh, -hd],
        // Right face
        [ hw, -hh,  hd], [ hw, -hh, -hd], [ hw,  hh, -hd], [ hw,  hh,  hd],
        // Top face
        [-hw,  hh,  hd], [ hw,  hh,  hd], [ hw,  hh, -hd], [-hw,  hh, -hd],
        // Bottom face
        [-hw, -hh, -hd], [ hw, -hh, -hd], [ hw, -hh,  hd], [-hw, -hh,  hd],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    let mut data = GeometryData::new();
    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();
    data.indices = (0..6u32)
        .flat_map(|face| {
            let i = face * 4;
            [i, i + 1, i + 2, i + 2, i + 3, i]
        })
        .collect();
    data
}

/// Generate a UV sphere.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of vertical segments (longitude lines), at least 3
/// * `height_segments` - Number of horizontal segments (latitude lines), at least 2
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a plane in the XY plane facing +Z.
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    // Counter-clockwise when viewed from +Z
    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}

/// Generate a faceted cone with its apex on +Y and a closed base.
///
/// Segment `i` starts at angle `2π·i/segments` measured from +Z towards +X, so a
/// four segment cone has its corners on the axes. Every side face is flat shaded.
///
/// # Arguments
/// * `radius` - Radius of the base
/// * `height` - Distance from base to apex; the cone spans -height/2 to height/2
/// * `radial_segments` - Number of side faces, at least 3
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    let apex = Vector3::new(0.0, half_height, 0.0);
    let rim = |i: u32| {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        Vector3::new(radius * angle.sin(), -half_height, radius * angle.cos())
    };

    // Side faces
    for i in 0..segs {
        let (a, b) = (rim(i), rim(i + 1));
        let mut normal = (b - a).cross(apex - a).normalize();
        let outward = Vector3::new(a.x + b.x, 0.0, a.z + b.z);
        if normal.dot(outward) < 0.0 {
            normal = -normal;
        }

        let base = data.vertices.len() as u32;
        data.vertices.extend([a, b, apex].map(Into::<[f32; 3]>::into));
        data.normals.extend([Into::<[f32; 3]>::into(normal); 3]);
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    // Base cap
    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    for i in 0..segs {
        data.vertices.push(rim(i).into());
        data.normals.push([0.0, -1.0, 0.0]);
    }
    for i in 0..segs {
        let current = center + 1 + i;
        let next = center + 1 + (i + 1) % segs;
        data.indices.extend_from_slice(&[center, next, current]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_generation() {
        let cube = generate_box(4.0, 3.0, 2.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.normals.len(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let max_y = cube.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_z = cube.vertices.iter().map(|v| v[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 1.5);
        assert_eq!(min_z, -1.0);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 16, 16);
        assert_eq!(sphere.vertices.len(), 17 * 17);
        assert_eq!(sphere.triangle_count(), 16 * 16 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        for v in &sphere.vertices {
            assert_relative_eq!(Vector3::from(*v).magnitude(), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_four_sided_cone() {
        let cone = generate_cone(2.0, 2.0, 4);
        // 4 side triangles + 4 cap triangles
        assert_eq!(cone.triangle_count(), 8);
        assert_eq!(cone.vertices.len(), 4 * 3 + 1 + 4);

        // First rim corner sits on +Z
        assert_relative_eq!(cone.vertices[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(cone.vertices[0][2], 2.0, epsilon = 1e-6);

        // Side normals tilt upwards and away from the axis
        for face in 0..4 {
            let n = Vector3::from(cone.normals[face * 3]);
            assert!(n.y > 0.0);
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_segment_minimums() {
        assert_eq!(generate_cone(1.0, 1.0, 1).triangle_count(), 6);
        assert_eq!(generate_sphere(1.0, 0, 0).vertices.len(), 4 * 3);
    }
}
