use super::{ensure_positive, push_quad};
use crate::{Error, Point3f, Result, TriangleMesh, Uv, Vector3f};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Capsule aligned with the Y axis.
///
/// `length` is the length of the straight middle section; the two
/// hemispherical caps add `radius` at each end. The profile runs from the
/// south pole up to the north pole and is revolved around Y with
/// `radial_segments + 1` columns so the seam carries its own UVs.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> Result<TriangleMesh> {
    ensure_positive("radius", radius)?;
    if !length.is_finite() || length < 0.0 {
        return Err(Error::InvalidData(format!("length must be non-negative, got {}", length)));
    }

    let cap_segments = cap_segments.max(1) as usize;
    let radial_segments = radial_segments.max(3) as usize;
    let half_length = length / 2.0;

    // (distance from axis, height, profile normal x, profile normal y)
    let mut profile = Vec::with_capacity(2 * (cap_segments + 1));
    for k in 0..=cap_segments {
        let a = -FRAC_PI_2 + FRAC_PI_2 * k as f32 / cap_segments as f32;
        profile.push((radius * a.cos(), -half_length + radius * a.sin(), a.cos(), a.sin()));
    }
    for k in 0..=cap_segments {
        let a = FRAC_PI_2 * k as f32 / cap_segments as f32;
        profile.push((radius * a.cos(), half_length + radius * a.sin(), a.cos(), a.sin()));
    }

    let rows = profile.len();
    let stride = radial_segments + 1;
    let mut vertices = Vec::with_capacity(rows * stride);
    let mut normals = Vec::with_capacity(rows * stride);
    let mut uvs: Vec<Uv> = Vec::with_capacity(rows * stride);

    for (row, &(x, y, nx, ny)) in profile.iter().enumerate() {
        for col in 0..=radial_segments {
            let u = col as f32 / radial_segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            vertices.push(Point3f::new(x * sin, y, x * cos));
            normals.push(Vector3f::new(nx * sin, ny, nx * cos));
            uvs.push([u, row as f32 / (rows - 1) as f32]);
        }
    }

    let mut faces = Vec::with_capacity((rows - 1) * radial_segments * 2);
    for row in 0..rows - 1 {
        for col in 0..radial_segments {
            push_quad(&mut faces, row * stride + col, stride);
        }
    }

    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.set_normals(normals);
    mesh.set_uvs(uvs);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_height_includes_both_caps() {
        let mesh = capsule(0.02, 1.2, 5, 16).unwrap();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_relative_eq!(max.y, 0.62, epsilon = 1e-5);
        assert_relative_eq!(min.y, -0.62, epsilon = 1e-5);
    }

    #[test]
    fn test_vertices_stay_within_radius_of_axis() {
        let mesh = capsule(0.5, 2.0, 4, 12).unwrap();
        for v in &mesh.vertices {
            assert!((v.x * v.x + v.z * v.z).sqrt() <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn test_vertex_count() {
        let mesh = capsule(0.02, 0.5, 5, 16).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * 6 * 17);
        assert_eq!(mesh.face_count(), (2 * 6 - 1) * 16 * 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_normals_point_away_from_axis_segment() {
        let mesh = capsule(0.3, 1.0, 3, 8).unwrap();
        for (v, n) in mesh.vertices.iter().zip(mesh.normals.as_ref().unwrap()) {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
            // Closest point on the inner segment
            let axis = Point3f::new(0.0, v.y.clamp(-0.5, 0.5), 0.0);
            let outward = v - axis;
            assert_relative_eq!(outward.norm(), 0.3, epsilon = 1e-5);
            assert!(outward.dot(n) > 0.0);
        }
    }

    #[test]
    fn test_zero_length_is_a_sphere() {
        let mesh = capsule(1.0, 0.0, 8, 8).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(v.coords.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(capsule(0.0, 1.0, 4, 8).is_err());
        assert!(capsule(0.1, -1.0, 4, 8).is_err());
        // segment counts are clamped instead of rejected
        assert!(capsule(0.1, 1.0, 0, 0).is_ok());
    }
}
