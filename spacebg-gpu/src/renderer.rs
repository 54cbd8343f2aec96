//! Forward renderer for the space background scene

use crate::device::GpuContext;
use crate::mesh::{GpuMesh, MeshVertex};
use crate::texture::{GpuTexture, DEPTH_FORMAT};
use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use nalgebra::{Matrix3, Matrix4, Vector3};
use spacebg_core::{Color, Error, MaterialKind, Result, TriangleMesh};
use std::sync::Arc;
use tracing::{debug, info, warn};
use winit::window::Window;

const MSAA_SAMPLES: u32 = 4;

/// Handle to a mesh uploaded with [`SceneRenderer::upload_mesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

/// Handle to a material created with [`SceneRenderer::create_material`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub usize);

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub background: Color,
    pub antialias: bool,
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            antialias: true,
            vsync: true,
        }
    }
}

/// Everything a material needs before it can be uploaded.
///
/// Missing images are replaced by a white texel, so a matcap material without
/// a colour map is shaded by the matcap alone.
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub kind: MaterialKind,
    pub color: Color,
    pub matcap: Option<RgbaImage>,
    pub map: Option<RgbaImage>,
}

impl MaterialDesc {
    pub fn basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            matcap: None,
            map: None,
        }
    }
}

/// Per-frame camera and light state
#[derive(Debug, Clone)]
pub struct FrameParams {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub camera_position: Vector3<f32>,
    pub sky_color: Color,
    pub ground_color: Color,
    pub hemisphere_intensity: f32,
    pub point_color: Color,
    pub point_intensity: f32,
    pub point_position: Vector3<f32>,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            camera_position: Vector3::zeros(),
            sky_color: Color::WHITE,
            ground_color: Color::WHITE,
            hemisphere_intensity: 0.0,
            point_color: Color::WHITE,
            point_intensity: 0.0,
            point_position: Vector3::zeros(),
        }
    }
}

/// One mesh drawn with one material at a world transform
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub model: Matrix4<f32>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FrameUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    sky: [f32; 4],
    ground: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
}

impl FrameUniform {
    fn new(frame: &FrameParams) -> Self {
        let p = frame.camera_position;
        let l = frame.point_position;
        Self {
            view: frame.view.into(),
            proj: frame.projection.into(),
            camera_pos: [p.x, p.y, p.z, 1.0],
            sky: frame.sky_color.with_w(frame.hemisphere_intensity),
            ground: frame.ground_color.with_w(1.0),
            point_pos: [l.x, l.y, l.z, 1.0],
            point_color: frame.point_color.with_w(frame.point_intensity),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    fn new(model: &Matrix4<f32>) -> Self {
        let normal = model
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or_else(Matrix3::identity);
        Self {
            model: (*model).into(),
            normal: normal.to_homogeneous().into(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct MaterialUniform {
    color: [f32; 4],
}

/// Round `size` up to a multiple of `alignment`
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

struct GpuMaterial {
    kind: MaterialKind,
    bind_group: wgpu::BindGroup,
    _uniform: wgpu::Buffer,
    _textures: Vec<GpuTexture>,
}

struct ObjectBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: usize,
}

struct Pipelines {
    basic: wgpu::RenderPipeline,
    matcap: wgpu::RenderPipeline,
    lambert: wgpu::RenderPipeline,
}

impl Pipelines {
    fn for_kind(&self, kind: MaterialKind) -> &wgpu::RenderPipeline {
        match kind {
            MaterialKind::Basic => &self.basic,
            MaterialKind::Matcap => &self.matcap,
            MaterialKind::Lambert => &self.lambert,
        }
    }
}

/// Draws meshes with basic, matcap or lambert materials into a window surface
pub struct SceneRenderer {
    pub context: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    config: RendererConfig,
    sample_count: u32,
    depth: GpuTexture,
    msaa: Option<GpuTexture>,
    pipelines: Pipelines,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_stride: u64,
    objects: ObjectBuffer,
    material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    meshes: Vec<GpuMesh>,
    materials: Vec<GpuMaterial>,
}

impl SceneRenderer {
    /// Create a renderer presenting to `window`
    pub async fn new(window: Arc<Window>, config: RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let (context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&context.device, &surface_config);

        let msaa_supported = context
            .adapter
            .get_texture_format_features(surface_format)
            .flags
            .sample_count_supported(MSAA_SAMPLES);
        let sample_count = if config.antialias && msaa_supported {
            MSAA_SAMPLES
        } else {
            if config.antialias {
                warn!(format = ?surface_format, "4x MSAA unsupported, rendering without antialiasing");
            }
            1
        };

        info!(
            width = surface_config.width,
            height = surface_config.height,
            format = ?surface_format,
            sample_count,
            "configured surface"
        );

        // Frame uniforms
        let frame_layout = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame bind group layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, false)],
        });
        let frame_buffer = context.create_buffer(
            "frame uniforms",
            std::mem::size_of::<FrameUniform>() as u64,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let frame_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Per-object uniforms, one dynamic offset per draw call
        let object_layout = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object bind group layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX, true)],
        });
        let object_stride = aligned_stride(
            std::mem::size_of::<ObjectUniform>() as u64,
            context.uniform_alignment(),
        );
        let objects = create_object_buffer(&context, &object_layout, object_stride, 32);

        let material_layout = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material bind group layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::FRAGMENT, false),
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = context.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shader = context.create_shader_module("scene shader", include_str!("shaders/scene.wgsl"));
        let pipeline_layout = context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let pipeline = |entry_point: &str| {
            create_pipeline(&context, &pipeline_layout, &shader, entry_point, surface_format, sample_count)
        };
        let pipelines = Pipelines {
            basic: pipeline("fs_basic"),
            matcap: pipeline("fs_matcap"),
            lambert: pipeline("fs_lambert"),
        };

        let depth = GpuTexture::attachment(
            &context,
            "depth texture",
            DEPTH_FORMAT,
            surface_config.width,
            surface_config.height,
            sample_count,
        );
        let msaa = (sample_count > 1).then(|| {
            GpuTexture::attachment(
                &context,
                "msaa colour texture",
                surface_format,
                surface_config.width,
                surface_config.height,
                sample_count,
            )
        });
        let white = GpuTexture::white(&context);

        Ok(Self {
            context,
            surface,
            surface_config,
            config,
            sample_count,
            depth,
            msaa,
            pipelines,
            frame_buffer,
            frame_bind_group,
            object_layout,
            object_stride,
            objects,
            material_layout,
            sampler,
            white,
            meshes: Vec::new(),
            materials: Vec::new(),
        })
    }

    /// Current surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Upload a mesh; the handle stays valid for the renderer's lifetime
    pub fn upload_mesh(&mut self, label: &str, mesh: &TriangleMesh) -> Result<MeshHandle> {
        let gpu_mesh = GpuMesh::upload(&self.context, label, mesh)?;
        debug!(label, triangles = mesh.face_count(), "uploaded mesh");
        self.meshes.push(gpu_mesh);
        Ok(MeshHandle(self.meshes.len() - 1))
    }

    /// Upload a material's uniforms and textures
    pub fn create_material(&mut self, label: &str, desc: &MaterialDesc) -> Result<MaterialHandle> {
        let uniform = MaterialUniform {
            color: desc.color.with_w(1.0),
        };
        let buffer = self.context.create_buffer_init(
            &format!("{} uniforms", label),
            &[uniform],
            wgpu::BufferUsages::UNIFORM,
        );

        let mut textures = Vec::new();
        let mut upload = |image: &Option<RgbaImage>, name: &str| {
            image.as_ref().map(|image| {
                if image.width() == 0 || image.height() == 0 {
                    return Err(Error::Texture(format!("{} {} texture is empty", label, name)));
                }
                textures.push(GpuTexture::from_rgba(&self.context, &format!("{} {}", label, name), image));
                Ok(textures.len() - 1)
            })
        };
        let matcap = upload(&desc.matcap, "matcap").transpose()?;
        let map = upload(&desc.map, "map").transpose()?;

        let view = |index: Option<usize>| match index {
            Some(i) => &textures[i].view,
            None => &self.white.view,
        };

        let bind_group = self.context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view(matcap)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(view(map)),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        debug!(label, kind = ?desc.kind, "created material");
        self.materials.push(GpuMaterial {
            kind: desc.kind,
            bind_group,
            _uniform: buffer,
            _textures: textures,
        });
        Ok(MaterialHandle(self.materials.len() - 1))
    }

    /// Resize the surface and its attachments; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.context.device, &self.surface_config);
        self.depth = GpuTexture::attachment(
            &self.context,
            "depth texture",
            DEPTH_FORMAT,
            width,
            height,
            self.sample_count,
        );
        if self.msaa.is_some() {
            self.msaa = Some(GpuTexture::attachment(
                &self.context,
                "msaa colour texture",
                self.surface_config.format,
                width,
                height,
                self.sample_count,
            ));
        }
        debug!(width, height, "resized surface");
    }

    /// Render one frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, frame: &FrameParams, draws: &[DrawCall]) -> Result<()> {
        for draw in draws {
            if draw.mesh.0 >= self.meshes.len() {
                return Err(Error::InvalidData(format!("unknown mesh handle {}", draw.mesh.0)));
            }
            if draw.material.0 >= self.materials.len() {
                return Err(Error::InvalidData(format!("unknown material handle {}", draw.material.0)));
            }
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                self.surface.configure(&self.context.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {}", e))),
        };

        if draws.len() > self.objects.capacity {
            let capacity = draws.len().next_power_of_two();
            self.objects = create_object_buffer(&self.context, &self.object_layout, self.object_stride, capacity);
        }

        self.context
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&FrameUniform::new(frame)));

        let stride = self.object_stride as usize;
        let mut object_data = vec![0u8; stride * draws.len()];
        for (i, draw) in draws.iter().enumerate() {
            let uniform = ObjectUniform::new(&draw.model);
            let bytes = bytemuck::bytes_of(&uniform);
            object_data[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !object_data.is_empty() {
            self.context.queue.write_buffer(&self.objects.buffer, 0, &object_data);
        }

        let surface_view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (&msaa.view, Some(&surface_view)),
            None => (&surface_view, None),
        };

        let [r, g, b, a] = self.config.background.to_clear_rgba();
        let mut encoder = self.context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (i, draw) in draws.iter().enumerate() {
                let mesh = &self.meshes[draw.mesh.0];
                let material = &self.materials[draw.material.0];
                render_pass.set_pipeline(self.pipelines.for_kind(material.kind));
                render_pass.set_bind_group(1, &self.objects.bind_group, &[(i * stride) as u32]);
                render_pass.set_bind_group(2, &material.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn create_object_buffer(
    context: &GpuContext,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> ObjectBuffer {
    let buffer = context.create_buffer(
        "object uniforms",
        stride * capacity as u64,
        wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    );
    let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            }),
        }],
    });
    ObjectBuffer {
        buffer,
        bind_group,
        capacity,
    }
}

fn create_pipeline(
    context: &GpuContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(fragment_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[MeshVertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: fragment_entry,
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 208);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 16);
    }

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(128, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(300, 256), 512);
        assert_eq!(aligned_stride(128, 0), 128);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let model = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0));
        let uniform = ObjectUniform::new(&model);
        // column 0, row 0
        assert_relative_eq!(uniform.normal[0][0], 0.5);
        assert_relative_eq!(uniform.normal[1][1], 1.0);
        assert_relative_eq!(uniform.normal[3][3], 1.0);
    }

    #[test]
    fn test_singular_model_falls_back_to_identity_normals() {
        let model = Matrix4::new_nonuniform_scaling(&Vector3::new(0.0, 1.0, 1.0));
        let uniform = ObjectUniform::new(&model);
        assert_eq!(uniform.normal, <[[f32; 4]; 4]>::from(Matrix4::<f32>::identity()));
    }

    #[test]
    fn test_frame_uniform_packs_intensities() {
        let frame = FrameParams {
            hemisphere_intensity: 1.0,
            point_intensity: 0.2,
            point_position: Vector3::new(1.0, 5.0, 1.0),
            ..Default::default()
        };
        let uniform = FrameUniform::new(&frame);
        assert_relative_eq!(uniform.sky[3], 1.0);
        assert_relative_eq!(uniform.point_color[3], 0.2);
        assert_eq!(uniform.point_pos, [1.0, 5.0, 1.0, 1.0]);
    }
}
