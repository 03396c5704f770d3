use super::helpers;

/// Offscreen attachments that track the surface size.
///
/// A multisampled colour target that resolves into the swapchain image, and
/// a depth buffer with the same sample count. The additive layers drawn after
/// the wireframe test against its depth.
pub(crate) struct RenderTargets {
    format: wgpu::TextureFormat,
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (msaa_tex, msaa_view) =
            helpers::create_msaa_texture(device, "msaa_color_tex", width, height, format);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "depth_tex", width, height);
        Self {
            format,
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.release();
        *self = Self::new(device, self.format, width, height);
    }

    pub(crate) fn release(&self) {
        self.msaa_tex.destroy();
        self.depth_tex.destroy();
    }
}
