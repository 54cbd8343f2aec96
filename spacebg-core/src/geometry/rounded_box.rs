use super::{ensure_positive, push_quad};
use crate::{Point3f, Result, TriangleMesh, Uv, Vector3f};

/// Face directions as (outward normal, u axis, v axis) with `u x v == normal`
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Box with rounded edges and corners.
///
/// Each face is a grid of `2 * segments + 1` cells per side. The odd cell
/// count guarantees a single flat strip through the middle of every face,
/// while the cells on either side wrap around the rounded edges. `radius` is
/// clamped so it never exceeds half of the shortest side; `segments == 0`
/// yields a plain box.
pub fn rounded_box(width: f32, height: f32, depth: f32, segments: u32, radius: f32) -> Result<TriangleMesh> {
    ensure_positive("width", width)?;
    ensure_positive("height", height)?;
    ensure_positive("depth", depth)?;

    let cells = segments as usize * 2 + 1;
    let half = Vector3f::new(width, height, depth) / 2.0;
    let radius = radius.max(0.0).min(half.min());
    let inner = half.add_scalar(-radius);
    let half_cell = 0.5 / cells as f32;

    let stride = cells + 1;
    let mut vertices = Vec::with_capacity(6 * stride * stride);
    let mut normals = Vec::with_capacity(6 * stride * stride);
    let mut uvs: Vec<Uv> = Vec::with_capacity(6 * stride * stride);
    let mut faces = Vec::with_capacity(6 * cells * cells * 2);

    for (normal, u_axis, v_axis) in FACES {
        let normal = Vector3f::from(normal);
        let u_axis = Vector3f::from(u_axis);
        let v_axis = Vector3f::from(v_axis);
        let base = vertices.len();

        for j in 0..=cells {
            for i in 0..=cells {
                let u = i as f32 / cells as f32;
                let v = j as f32 / cells as f32;
                // Point on the surface of the unit box
                let p = normal * 0.5 + u_axis * (u - 0.5) + v_axis * (v - 0.5);

                if cells == 1 {
                    vertices.push(Point3f::from(p.component_mul(&(half * 2.0))));
                    normals.push(normal);
                } else {
                    let sign = p.map(f32::signum);
                    let n = (p - sign * half_cell).normalize();
                    vertices.push(Point3f::from(sign.component_mul(&inner) + n * radius));
                    normals.push(n);
                }
                uvs.push([u, v]);
            }
        }

        for j in 0..cells {
            for i in 0..cells {
                push_quad(&mut faces, base + j * stride + i, stride);
            }
        }
    }

    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.set_normals(normals);
    mesh.set_uvs(uvs);
    Ok(mesh)
}
