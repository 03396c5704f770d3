use super::helpers::{self, ADDITIVE_BLENDING, DEPTH_FORMAT, MULTISAMPLE};
use crate::core::{MeshUniforms, PointCloudState, PointVertex};
use glam::Mat4;
use wgpu::util::DeviceExt;

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Six vertices per sprite, expanded in the vertex shader.
const QUAD_VERTICES: u32 = 6;

/// Background point cloud: one instance per point.
pub(crate) struct PointsPass {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl PointsPass {
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, cloud: &PointCloudState) {
        let uniforms = MeshUniforms {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
            params: [cloud.time(), 0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }
}

fn build_points_pass(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    mesh_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    points: &[PointVertex],
) -> PointsPass {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particle_points"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POINTS_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particle_points_layout"),
        bind_group_layouts: &[scene_bgl, mesh_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("particle_points"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
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
                blend: Some(ADDITIVE_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_points_instances"),
        contents: bytemuck::cast_slice(points),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "particle_points_uniforms",
        std::mem::size_of::<MeshUniforms>(),
    );
    let bind_group =
        helpers::single_buffer_bind_group(device, "particle_points_bg", mesh_bgl, &uniform_buffer);

    PointsPass {
        pipeline,
        instance_buffer,
        instance_count: points.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

pub(crate) async fn create_points(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    mesh_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    cloud: &PointCloudState,
) -> Option<PointsPass> {
    let pass = helpers::validated(device, "particle_points", || {
        build_points_pass(device, scene_bgl, mesh_bgl, color_format, cloud.points())
    })
    .await;
    log::info!(
        "[particles] point cloud={} ({} points)",
        pass.is_some(),
        cloud.points().len()
    );
    pass
}
