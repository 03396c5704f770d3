use crate::core::{Scene, SceneUniforms};
use crate::error::InitError;
use web_sys as web;

mod centerpiece;
mod helpers;
mod points;
mod targets;
use centerpiece::CenterpieceGpu;
use points::PointsPass;
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    centerpiece: CenterpieceGpu,
    points: Option<PointsPass>,

    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Result<Self, InitError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or(InitError::NoSurfaceFormat)?;
        // the page shows through wherever nothing is drawn
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[surface] {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_layout_entry(0, stages)],
        });
        let mesh_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bgl"),
            entries: &[helpers::uniform_layout_entry(0, stages)],
        });
        let scene_buffer = helpers::create_uniform_buffer(
            &device,
            "scene_uniforms",
            std::mem::size_of::<SceneUniforms>(),
        );
        let scene_bind_group =
            helpers::single_buffer_bind_group(&device, "scene_bg", &scene_bgl, &scene_buffer);

        let centerpiece =
            centerpiece::create_centerpiece(&device, &scene_bgl, &mesh_bgl, format).await;
        let points = points::create_points(
            &device,
            &scene_bgl,
            &mesh_bgl,
            format,
            scene.particles.points(),
        )
        .await;

        Ok(Self {
            targets: RenderTargets::new(&device, format, width, height),
            surface,
            device,
            queue,
            config,
            scene_buffer,
            scene_bind_group,
            centerpiece,
            points,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame. `Ok(false)` means the surface had to be reconfigured
    /// and nothing was presented.
    pub fn render(&mut self, scene: &Scene) -> Result<bool, wgpu::SurfaceError> {
        let uniforms = scene.uniforms(self.width, self.height);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));
        if let Some(pass) = &self.centerpiece.wireframe {
            pass.write_uniforms(&self.queue, &scene.centerpiece.wireframe_packed());
        }
        if let Some(pass) = &self.centerpiece.glow {
            pass.write_uniforms(&self.queue, &scene.centerpiece.glow_packed());
        }
        if let Some(pass) = &self.points {
            pass.write_uniforms(&self.queue, scene.particles.points());
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        // only the resolved image is kept
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            // opaque-ish wireframe first, then the additive layers over it
            if let Some(pass) = &self.centerpiece.wireframe {
                pass.draw(&mut rpass);
            }
            if let Some(pass) = &self.centerpiece.glow {
                pass.draw(&mut rpass);
            }
            if let Some(pass) = &self.points {
                pass.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(true)
    }

    /// Free GPU textures ahead of drop.
    pub fn release(&self) {
        self.targets.release();
        self.scene_buffer.destroy();
    }
}
