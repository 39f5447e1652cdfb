//! Shader compilation.
//!
//! Two-phase compile-then-link mirrors the underlying GPU API: each stage is
//! compiled to a module here, and the pipeline module performs the link.
//! Keeping the phases separate lets a failure name the exact stage.

mod compile;
mod source;

pub use compile::{CompiledShader, compile_stage};
pub use source::{MAX_SOURCE_LEN, ShaderSource, ShaderStage};
