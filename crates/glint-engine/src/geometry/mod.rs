//! Quad geometry: vertex format description, validation, and GPU buffers.
//!
//! The underlying API does not reject a stride/offset mismatch between the
//! declared layout and the actual vertex data; it silently corrupts the
//! rendered output. Validation therefore happens here, before any upload.

mod buffer;
mod format;

pub use buffer::{GeometryBuffer, QUAD_INDICES, QUAD_VERTICES, QuadVertex, validate_indices};
pub use format::{GeometryError, VertexAttributeDesc, VertexFormat};
