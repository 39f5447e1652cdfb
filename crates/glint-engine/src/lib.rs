//! Glint engine crate.
//!
//! This crate owns the windowed GPU bootstrap and the frame loop: shader
//! compile/link with diagnostics, quad geometry upload, optional texture
//! upload, and the per-frame render/resize cycle.

pub mod color;
pub mod device;
pub mod error;
pub mod geometry;
pub mod harness;
pub mod logging;
pub mod pipeline;
pub mod shader;
pub mod texture;

pub use error::HarnessError;
pub use harness::{Harness, HarnessConfig};
pub use pipeline::RenderMode;
