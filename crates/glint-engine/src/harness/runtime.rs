use std::sync::Arc;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::error::HarnessError;
use crate::geometry::{GeometryBuffer, QUAD_INDICES, QUAD_VERTICES, QuadVertex};
use crate::pipeline::{self, QuadPipeline};
use crate::shader::{ShaderSource, ShaderStage, compile_stage};
use crate::texture::{self, DecodedImage, Texture};

use super::{HarnessConfig, LoopState, full_viewport};

/// Entry point for the render loop.
pub struct Harness;

impl Harness {
    /// Runs the harness to completion.
    ///
    /// Returns `Ok(())` only for a user-initiated close; any initialization
    /// failure surfaces here before a single frame is drawn.
    pub fn run(config: HarnessConfig) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = LoopDriver::new(config);

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        if let Some(err) = driver.fatal.take() {
            return Err(err).context("harness startup failed");
        }

        log::info!("bye");
        Ok(())
    }
}

/// GPU resources for the one scene the harness draws.
///
/// Field order is the reverse of acquisition order; `LoopDriver::teardown`
/// releases them explicitly in this order.
struct Scene {
    texture: Option<Texture>,
    geometry: GeometryBuffer,
    pipeline: QuadPipeline,
    gpu: Gpu,
}

struct LoopDriver {
    config: HarnessConfig,
    state: LoopState,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    fatal: Option<HarnessError>,
}

impl LoopDriver {
    fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            state: LoopState::default(),
            window: None,
            scene: None,
            fatal: None,
        }
    }

    /// Builds every GPU resource, in strict acquisition order:
    /// context → shaders → pipeline → geometry → optional texture.
    ///
    /// Any failure aborts startup; nothing already acquired outlives the
    /// error since `Scene` is only assembled on full success.
    fn init_scene(&self, window: Arc<Window>) -> Result<Scene, HarnessError> {
        let gpu_init = GpuInit {
            required_features: self.config.mode.required_features(),
            ..GpuInit::default()
        };
        let gpu = pollster::block_on(Gpu::new(window, gpu_init))?;

        let vertex_src = ShaderSource::from_file(&self.config.vertex_shader, ShaderStage::Vertex)?;
        let fragment_src =
            ShaderSource::from_file(&self.config.fragment_shader, ShaderStage::Fragment)?;

        let vertex = compile_stage(gpu.device(), &vertex_src)?;
        let fragment = compile_stage(gpu.device(), &fragment_src)?;

        // The binding layout exists independently of the texture itself, so
        // the pipeline links before the image is even decoded.
        let texture_layout = self
            .config
            .texture
            .as_ref()
            .map(|_| texture::bind_group_layout(gpu.device()));

        let format = QuadVertex::format();

        let pipeline = pipeline::link(
            gpu.device(),
            gpu.surface_format(),
            vertex,
            fragment,
            &format,
            texture_layout.as_ref(),
            self.config.mode,
        )?;

        let geometry = GeometryBuffer::create(
            gpu.device(),
            &format,
            QUAD_VERTICES.len() as u32,
            QUAD_INDICES.len() as u32,
        )?;
        geometry.upload(gpu.queue(), bytemuck::cast_slice(&QUAD_VERTICES), &QUAD_INDICES)?;

        let texture = match (&self.config.texture, texture_layout) {
            (Some(path), Some(layout)) => {
                let decoded = DecodedImage::load(path)?;
                Some(Texture::upload(gpu.device(), gpu.queue(), decoded, &layout))
            }
            _ => None,
        };

        Ok(Scene { texture, geometry, pipeline, gpu })
    }

    // Fatal errors propagate out of `run`; the binary's top-level handler
    // owns the logging and the non-zero exit.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: HarnessError) {
        self.fatal = Some(err);
        self.state.request_close();
        self.teardown(event_loop);
    }

    /// Deterministic teardown in exact reverse acquisition order, then exit.
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.scene.take() {
            let Scene { texture, geometry, pipeline, gpu } = scene;
            drop(texture);
            drop(geometry);
            drop(pipeline);
            drop(gpu);
        }
        self.window = None;
        self.state.terminate();
        event_loop.exit();
    }

    /// One iteration body: clear → bind → draw → present.
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scene) = self.scene.as_mut() else { return };

        let mut frame = match scene.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => match scene.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => return,
                SurfaceErrorAction::Fatal => {
                    self.fail(event_loop, HarnessError::init("surface ran out of memory"));
                    return;
                }
            },
        };

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("glint quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            // Resize notifications have already reconfigured the surface, so
            // the viewport always spans the current framebuffer exactly.
            let (x, y, w, h) = full_viewport(scene.gpu.size());
            rpass.set_viewport(x, y, w, h, 0.0, 1.0);

            rpass.set_pipeline(scene.pipeline.pipeline());
            if let Some(texture) = scene.texture.as_ref() {
                rpass.set_bind_group(0, texture.bind_group(), &[]);
            }
            rpass.set_vertex_buffer(0, scene.geometry.vertex_buffer().slice(..));
            rpass.set_index_buffer(
                scene.geometry.index_buffer().slice(..),
                wgpu::IndexFormat::Uint32,
            );
            rpass.draw_indexed(0..scene.geometry.index_count(), 0, 0..1);
        }

        scene.gpu.submit(frame);
    }
}

impl ApplicationHandler for LoopDriver {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(
                    event_loop,
                    HarnessError::init(format!("failed to create window: {e}")),
                );
                return;
            }
        };

        match self.init_scene(window.clone()) {
            Ok(scene) => {
                self.scene = Some(scene);
                self.window = Some(window);
            }
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        if let Some(w) = self.window.as_ref() {
            w.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        // Continuous redraw: one frame per event-loop turn, presentation
        // gated by FIFO at display rate.
        if let Some(w) = self.window.as_ref() {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.state.request_close();
                self.teardown(event_loop);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("escape pressed");
                self.state.request_close();
                self.teardown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.gpu.resize(new_size);
                }
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(scene), Some(w)) = (self.scene.as_mut(), self.window.as_ref()) {
                    let new_size = w.inner_size();
                    scene.gpu.resize(new_size);
                    w.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if self.state.is_running() {
                    self.render_frame(event_loop);
                }
            }

            _ => {}
        }
    }
}
