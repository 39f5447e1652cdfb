//! Pipeline linking.
//!
//! Creating the render pipeline is this API's link step: it joins the
//! compiled vertex and fragment modules against the vertex layout and the
//! surface format. Both shader modules are consumed here, succeed or fail;
//! the pipeline retains the compiled code.

use crate::error::HarnessError;
use crate::geometry::VertexFormat;
use crate::shader::{CompiledShader, ShaderStage};

/// Session-wide rasterization mode, read once before the loop starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
}

impl RenderMode {
    /// Maps the optional CLI argument: the literal `"wireframe"` selects
    /// line rendering; anything else (or absence) keeps filled triangles.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("wireframe") => Self::Wireframe,
            _ => Self::Filled,
        }
    }

    pub fn polygon_mode(self) -> wgpu::PolygonMode {
        match self {
            Self::Filled => wgpu::PolygonMode::Fill,
            Self::Wireframe => wgpu::PolygonMode::Line,
        }
    }

    /// Extra device features this mode needs.
    pub fn required_features(self) -> wgpu::Features {
        match self {
            Self::Filled => wgpu::Features::empty(),
            Self::Wireframe => wgpu::Features::POLYGON_MODE_LINE,
        }
    }
}

/// A linked, usable render pipeline.
pub struct QuadPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl QuadPipeline {
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// Links a compiled vertex/fragment pair into a render pipeline.
///
/// `texture_layout` is present only for the textured fragment shader; the
/// flat-color path uses no bind groups at all. A validation failure during
/// pipeline creation is the link error, captured with its diagnostic log.
/// The shader modules are dropped on return along every path.
pub fn link(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    vertex: CompiledShader,
    fragment: CompiledShader,
    format: &VertexFormat,
    texture_layout: Option<&wgpu::BindGroupLayout>,
    mode: RenderMode,
) -> Result<QuadPipeline, HarnessError> {
    debug_assert_eq!(vertex.stage, ShaderStage::Vertex);
    debug_assert_eq!(fragment.stage, ShaderStage::Fragment);

    let attrs = format.wgpu_attributes();

    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = texture_layout.into_iter().collect();

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glint quad pipeline layout"),
        bind_group_layouts: &bind_group_layouts,
        immediate_size: 0,
    });

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glint quad pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vertex.module,
            entry_point: Some(ShaderStage::Vertex.entry_point()),
            compilation_options: Default::default(),
            buffers: &[format.layout(&attrs)],
        },

        fragment: Some(wgpu::FragmentState {
            module: &fragment.module,
            entry_point: Some(ShaderStage::Fragment.entry_point()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: mode.polygon_mode(),
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(HarnessError::Link { log: err.to_string() });
    }

    log::info!("linked quad pipeline ({mode:?})");

    Ok(QuadPipeline { pipeline })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── RenderMode::from_arg ──────────────────────────────────────────────

    #[test]
    fn wireframe_literal_selects_line_mode() {
        assert_eq!(RenderMode::from_arg(Some("wireframe")), RenderMode::Wireframe);
    }

    #[test]
    fn absent_argument_selects_filled() {
        assert_eq!(RenderMode::from_arg(None), RenderMode::Filled);
    }

    #[test]
    fn other_strings_select_filled() {
        assert_eq!(RenderMode::from_arg(Some("WIREFRAME")), RenderMode::Filled);
        assert_eq!(RenderMode::from_arg(Some("wire")), RenderMode::Filled);
        assert_eq!(RenderMode::from_arg(Some("")), RenderMode::Filled);
    }

    // ── mode mapping ──────────────────────────────────────────────────────

    #[test]
    fn polygon_mode_mapping() {
        assert_eq!(RenderMode::Filled.polygon_mode(), wgpu::PolygonMode::Fill);
        assert_eq!(RenderMode::Wireframe.polygon_mode(), wgpu::PolygonMode::Line);
    }

    #[test]
    fn only_wireframe_needs_extra_features() {
        assert!(RenderMode::Filled.required_features().is_empty());
        assert!(
            RenderMode::Wireframe
                .required_features()
                .contains(wgpu::Features::POLYGON_MODE_LINE)
        );
    }
}
