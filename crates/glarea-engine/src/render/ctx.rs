use crate::coords::{Rect, Viewport};
use crate::paint::Color;

/// Renderer-facing context (device/queue + surface format + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport, // logical px
    pub scale_factor: f32,
    /// Surface size in physical pixels.
    pub physical_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
        physical_size: (u32, u32),
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor,
            physical_size,
        }
    }

    /// Logical rect to a physical `(x, y, w, h)` clamped to the surface.
    #[inline]
    pub fn physical_rect(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        rect.to_physical(self.scale_factor, self.physical_size)
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Starts a pass that keeps what earlier passes drew.
    pub(crate) fn load_pass(&mut self, label: &'static str) -> wgpu::RenderPass<'_> {
        self.pass(label, wgpu::LoadOp::Load)
    }

    /// Fills the whole target with `color`.
    pub(crate) fn clear(&mut self, color: Color) {
        let _pass = self.pass("glarea clear", wgpu::LoadOp::Clear(color.to_wgpu()));
    }

    fn pass(
        &mut self,
        label: &'static str,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
