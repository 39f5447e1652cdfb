/// Initialization parameters for the GPU layer.
///
/// Keep this structure minimal; a flag belongs here only when a concrete
/// harness requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO makes presentation the loop's sole suspension point: the frame
    /// rate is gated by the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Required wgpu features.
    ///
    /// Wireframe rendering adds `POLYGON_MODE_LINE`; everything else runs
    /// with an empty set for portability.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
