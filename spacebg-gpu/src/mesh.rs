//! Vertex format and mesh upload

use crate::GpuContext;
use bytemuck::{Pod, Zeroable};
use spacebg_core::{Error, Result, TriangleMesh};

/// Vertex data for mesh rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Create a new mesh vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Interleave mesh attributes into GPU vertices.
///
/// Meshes without normals get +Z normals, meshes without UVs get (0, 0).
pub fn mesh_vertices(mesh: &TriangleMesh) -> Vec<MeshVertex> {
    mesh.vertices
        .iter()
        .enumerate()
        .map(|(i, vertex)| {
            let normal = mesh
                .normals
                .as_ref()
                .and_then(|n| n.get(i))
                .map(|n| [n.x, n.y, n.z])
                .unwrap_or([0.0, 0.0, 1.0]);

            let uv = mesh
                .uvs
                .as_ref()
                .and_then(|uvs| uvs.get(i))
                .copied()
                .unwrap_or([0.0, 0.0]);

            MeshVertex::new([vertex.x, vertex.y, vertex.z], normal, uv)
        })
        .collect()
}

/// Flatten faces into a 32-bit index list
pub fn mesh_indices(mesh: &TriangleMesh) -> Result<Vec<u32>> {
    if mesh.vertex_count() > u32::MAX as usize {
        return Err(Error::Unsupported(format!(
            "mesh has {} vertices, more than 32-bit indices can address",
            mesh.vertex_count()
        )));
    }
    Ok(mesh
        .faces
        .iter()
        .flat_map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
        .collect())
}

/// A mesh resident in GPU memory
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Validate and upload a mesh
    pub fn upload(context: &GpuContext, label: &str, mesh: &TriangleMesh) -> Result<Self> {
        mesh.validate()?;
        if mesh.is_empty() {
            return Err(Error::InvalidData(format!("mesh '{}' has no triangles", label)));
        }

        let vertices = mesh_vertices(mesh);
        let indices = mesh_indices(mesh)?;

        Ok(Self {
            vertex_buffer: context.create_buffer_init(
                &format!("{} vertices", label),
                &vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: context.create_buffer_init(
                &format!("{} indices", label),
                &indices,
                wgpu::BufferUsages::INDEX,
            ),
            index_count: indices.len() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacebg_core::{capsule, Point3f};

    #[test]
    fn test_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        let layout = MeshVertex::desc();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_missing_attributes_get_defaults() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(1.0, 2.0, 3.0), Point3f::origin(), Point3f::origin()],
            vec![[0, 1, 2]],
        );
        let vertices = mesh_vertices(&mesh);
        assert_eq!(vertices[0], MeshVertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.0, 0.0]));
    }

    #[test]
    fn test_generated_mesh_flattens() {
        let mesh = capsule(0.02, 0.8, 5, 16).unwrap();
        let vertices = mesh_vertices(&mesh);
        let indices = mesh_indices(&mesh).unwrap();
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(indices.len(), mesh.face_count() * 3);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
