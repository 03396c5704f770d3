use super::helpers::{self, ADDITIVE_BLENDING, DEPTH_FORMAT, MULTISAMPLE};
use crate::constants::{CENTERPIECE_DETAIL, CENTERPIECE_RADIUS, GLOW_RADIUS, GLOW_SEGMENTS};
use crate::core::geometry::{icosphere, uv_sphere, MeshData, MeshVertex};
use crate::core::MeshUniforms;
use wgpu::util::DeviceExt;

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRIBUTES,
    }
}

/// One indexed, shader-driven object with its own uniform block.
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MeshPass {
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &MeshUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

struct MeshPassDesc<'a> {
    label: &'static str,
    source: &'static str,
    mesh: &'a MeshData,
    indices: &'a [u32],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_write: bool,
}

fn build_mesh_pass(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    mesh_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    desc: &MeshPassDesc,
) -> MeshPass {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[scene_bgl, mesh_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: MULTISAMPLE,
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(desc.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(desc.label),
        contents: bytemuck::cast_slice(&desc.mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(desc.label),
        contents: bytemuck::cast_slice(desc.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer =
        helpers::create_uniform_buffer(device, desc.label, std::mem::size_of::<MeshUniforms>());
    let bind_group = helpers::single_buffer_bind_group(device, desc.label, mesh_bgl, &uniform_buffer);

    MeshPass {
        pipeline,
        vertex_buffer,
        index_buffer,
        index_count: desc.indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

/// GPU half of the centerpiece. Either object may be missing if its shader
/// failed to build.
pub(crate) struct CenterpieceGpu {
    pub(crate) wireframe: Option<MeshPass>,
    pub(crate) glow: Option<MeshPass>,
}

pub(crate) async fn create_centerpiece(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    mesh_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> CenterpieceGpu {
    let ico = icosphere(CENTERPIECE_RADIUS, CENTERPIECE_DETAIL);
    let lines = ico.wireframe_indices();
    let wireframe = helpers::validated(device, "centerpiece_wireframe", || {
        build_mesh_pass(
            device,
            scene_bgl,
            mesh_bgl,
            color_format,
            &MeshPassDesc {
                label: "centerpiece_wireframe",
                source: crate::core::WIREFRAME_WGSL,
                mesh: &ico,
                indices: &lines,
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        )
    })
    .await;

    let shell = uv_sphere(GLOW_RADIUS, GLOW_SEGMENTS, GLOW_SEGMENTS);
    let glow = helpers::validated(device, "centerpiece_glow", || {
        build_mesh_pass(
            device,
            scene_bgl,
            mesh_bgl,
            color_format,
            &MeshPassDesc {
                label: "centerpiece_glow",
                source: crate::core::GLOW_WGSL,
                mesh: &shell,
                indices: &shell.indices,
                topology: wgpu::PrimitiveTopology::TriangleList,
                // inside of the shell only
                cull_mode: Some(wgpu::Face::Front),
                blend: ADDITIVE_BLENDING,
                depth_write: false,
            },
        )
    })
    .await;

    log::info!(
        "[centerpiece] wireframe={} ({} edges) glow={} ({} tris)",
        wireframe.is_some(),
        lines.len() / 2,
        glow.is_some(),
        shell.triangle_count()
    );
    CenterpieceGpu { wireframe, glow }
}
