//! # spacebg GPU
//!
//! wgpu rendering for the space background: device and surface setup, vertex
//! formats, texture upload and the [`SceneRenderer`] that draws a list of
//! meshes with basic, matcap or lambert materials.
//!
//! The renderer is deliberately scene-agnostic. It owns GPU resources behind
//! integer handles and draws whatever [`DrawCall`]s it is given each frame.

pub mod device;
pub mod mesh;
pub mod texture;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use mesh::{GpuMesh, MeshVertex, mesh_indices, mesh_vertices};
pub use texture::{GpuTexture, decode_rgba, generated_env, generated_matcap, load_rgba_or};
pub use renderer::{
    DrawCall, FrameParams, MaterialDesc, MaterialHandle, MeshHandle, RendererConfig, SceneRenderer,
};
