//! The render loop and its resource lifecycle.
//!
//! One window, one pipeline, one quad. Resources are acquired once at
//! startup in strict order (context → shaders → pipeline → geometry →
//! optional texture) and torn down in the exact reverse order.

mod runtime;

use std::path::PathBuf;

use winit::dpi::{LogicalSize, PhysicalSize};

use crate::color::Rgba8;
use crate::pipeline::RenderMode;

pub use runtime::Harness;

/// Everything the harness needs, assembled by the caller before startup.
///
/// Nothing here changes after the loop starts; in particular the render
/// mode is read once and holds for the whole session.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Optional texture image; `None` renders the flat-color quad.
    pub texture: Option<PathBuf>,
    pub mode: RenderMode,
    pub clear_color: Rgba8,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            vertex_shader: PathBuf::from("shaders/quad.vert.wgsl"),
            fragment_shader: PathBuf::from("shaders/quad.frag.wgsl"),
            texture: None,
            mode: RenderMode::Filled,
            clear_color: Rgba8::default(),
        }
    }
}

/// Loop lifecycle.
///
/// `Running → ClosingRequested` on the close key or window-close signal;
/// `ClosingRequested → Terminated` after teardown completes. `Terminated`
/// is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopState {
    #[default]
    Running,
    ClosingRequested,
    Terminated,
}

impl LoopState {
    /// Records a close request; only meaningful while running.
    pub fn request_close(&mut self) {
        if *self == Self::Running {
            *self = Self::ClosingRequested;
        }
    }

    /// Marks teardown complete.
    ///
    /// Valid from `ClosingRequested`; transitioning straight from `Running`
    /// would skip teardown, so it is ignored.
    pub fn terminate(&mut self) {
        if *self == Self::ClosingRequested {
            *self = Self::Terminated;
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Viewport rectangle covering the whole framebuffer.
///
/// Resize notifications land before the next redraw, so the rectangle for a
/// surface of (W, H) is always exactly (0, 0, W, H).
pub(crate) fn full_viewport(size: PhysicalSize<u32>) -> (f32, f32, f32, f32) {
    (0.0, 0.0, size.width as f32, size.height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── loop state ────────────────────────────────────────────────────────

    #[test]
    fn initial_state_is_running() {
        assert_eq!(LoopState::default(), LoopState::Running);
        assert!(LoopState::default().is_running());
    }

    #[test]
    fn close_request_leaves_running() {
        let mut s = LoopState::Running;
        s.request_close();
        assert_eq!(s, LoopState::ClosingRequested);
        assert!(!s.is_running());
    }

    #[test]
    fn close_request_is_idempotent() {
        let mut s = LoopState::ClosingRequested;
        s.request_close();
        assert_eq!(s, LoopState::ClosingRequested);
    }

    #[test]
    fn terminate_requires_a_close_request_first() {
        let mut s = LoopState::Running;
        s.terminate();
        assert_eq!(s, LoopState::Running);

        s.request_close();
        s.terminate();
        assert_eq!(s, LoopState::Terminated);
    }

    #[test]
    fn terminated_is_terminal() {
        let mut s = LoopState::Terminated;
        s.request_close();
        s.terminate();
        assert_eq!(s, LoopState::Terminated);
    }

    // ── viewport ──────────────────────────────────────────────────────────

    #[test]
    fn viewport_covers_the_framebuffer_exactly() {
        let v = full_viewport(PhysicalSize::new(800, 600));
        assert_eq!(v, (0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn viewport_tracks_a_resize() {
        let v = full_viewport(PhysicalSize::new(1920, 1080));
        assert_eq!(v, (0.0, 0.0, 1920.0, 1080.0));
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_config_is_filled_mode_untextured() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.mode, RenderMode::Filled);
        assert!(cfg.texture.is_none());
        assert_eq!(cfg.clear_color, Rgba8::new(42, 94, 140, 255));
    }
}
