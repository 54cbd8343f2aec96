use super::ensure_positive;
use crate::{Point3f, Result, TriangleMesh, Uv, Vector3f};
use std::f32::consts::TAU;

/// Flat disc in the XY plane facing +Z, built as a triangle fan.
pub fn circle(radius: f32, segments: u32) -> Result<TriangleMesh> {
    ensure_positive("radius", radius)?;
    let segments = segments.max(3) as usize;

    let mut vertices = Vec::with_capacity(segments + 2);
    let mut uvs: Vec<Uv> = Vec::with_capacity(segments + 2);
    vertices.push(Point3f::origin());
    uvs.push([0.5, 0.5]);

    for k in 0..=segments {
        let (sin, cos) = (TAU * k as f32 / segments as f32).sin_cos();
        vertices.push(Point3f::new(radius * cos, radius * sin, 0.0));
        uvs.push([(cos + 1.0) / 2.0, (sin + 1.0) / 2.0]);
    }

    let faces = (1..=segments).map(|k| [0, k, k + 1]).collect();
    let normals = vec![Vector3f::z(); vertices.len()];

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
    fn test_fan_layout() {
        let mesh = circle(5.0, 5).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.face_count(), 5);
        for v in &mesh.vertices[1..] {
            assert_relative_eq!(v.coords.norm(), 5.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_faces_wind_towards_normal() {
        let mesh = circle(1.0, 6).unwrap();
        for n in mesh.calculate_face_normals() {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_segments_clamped() {
        assert_eq!(circle(1.0, 1).unwrap().face_count(), 3);
    }
}
