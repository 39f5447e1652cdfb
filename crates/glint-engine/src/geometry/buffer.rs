use bytemuck::{Pod, Zeroable};

use super::{GeometryError, VertexAttributeDesc, VertexFormat};

/// CPU-side vertex for the quad: position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

/// The planar quad, centered on the origin, half a unit in each direction.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-0.5, -0.5, 0.0], uv: [0.0, 1.0] },
    QuadVertex { pos: [0.5, -0.5, 0.0], uv: [1.0, 1.0] },
    QuadVertex { pos: [-0.5, 0.5, 0.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [0.5, 0.5, 0.0], uv: [1.0, 0.0] },
];

/// Two triangles sharing the diagonal edge 1–2.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

impl QuadVertex {
    /// The format describing this vertex type.
    pub fn format() -> VertexFormat {
        VertexFormat {
            attributes: vec![
                VertexAttributeDesc { location: 0, components: 3, offset: 0 },
                VertexAttributeDesc { location: 1, components: 2, offset: 12 },
            ],
            stride: std::mem::size_of::<QuadVertex>() as u64,
        }
    }
}

/// Rejects any index referring past the last vertex.
///
/// An out-of-range index is not caught by the API; the GPU reads whatever
/// bytes follow the buffer. This check runs before every upload.
pub fn validate_indices(indices: &[u32], vertex_count: u32) -> Result<(), GeometryError> {
    for &index in indices {
        if index >= vertex_count {
            return Err(GeometryError::IndexOutOfRange { index, vertex_count });
        }
    }
    Ok(())
}

/// GPU-resident vertex + index buffers for one draw call.
///
/// Created once with fixed capacities; contents are uploaded once and
/// treated as immutable for the run.
pub struct GeometryBuffer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_count: u32,
    stride: u64,
}

impl GeometryBuffer {
    /// Allocates vertex and index buffers for the given counts.
    ///
    /// The format is validated here so a bad layout never reaches pipeline
    /// creation or upload.
    pub fn create(
        device: &wgpu::Device,
        format: &VertexFormat,
        vertex_count: u32,
        index_count: u32,
    ) -> Result<Self, GeometryError> {
        format.validate()?;

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint quad vbo"),
            size: vertex_count as u64 * format.stride,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint quad ibo"),
            size: index_count as u64 * std::mem::size_of::<u32>() as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count,
            stride: format.stride,
        })
    }

    /// One-shot static upload of vertex and index data.
    ///
    /// Replaces any prior contents. Data that does not match the declared
    /// counts, or an index referring past the last vertex, is rejected
    /// before any GPU write happens.
    pub fn upload(
        &self,
        queue: &wgpu::Queue,
        vertex_bytes: &[u8],
        indices: &[u32],
    ) -> Result<(), GeometryError> {
        let expected = self.vertex_count as u64 * self.stride;
        if vertex_bytes.len() as u64 != expected {
            return Err(GeometryError::VertexBytesMismatch {
                len: vertex_bytes.len() as u64,
                expected,
            });
        }

        if indices.len() as u32 != self.index_count {
            return Err(GeometryError::IndexCountMismatch {
                len: indices.len() as u32,
                expected: self.index_count,
            });
        }

        validate_indices(indices, self.vertex_count)?;

        queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(indices));

        log::debug!(
            "uploaded {} vertices / {} indices",
            self.vertex_count,
            self.index_count
        );

        Ok(())
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    /// Number of indices issued by the draw call.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── quad data ─────────────────────────────────────────────────────────

    #[test]
    fn quad_format_matches_the_vertex_struct() {
        let fmt = QuadVertex::format();
        assert_eq!(fmt.validate(), Ok(()));
        assert_eq!(fmt.stride, std::mem::size_of::<QuadVertex>() as u64);
        assert_eq!(fmt.stride, 20);
    }

    #[test]
    fn quad_indices_are_in_range() {
        assert_eq!(
            validate_indices(&QUAD_INDICES, QUAD_VERTICES.len() as u32),
            Ok(())
        );
    }

    #[test]
    fn quad_is_planar() {
        for v in &QUAD_VERTICES {
            assert_eq!(v.pos[2], 0.0);
        }
    }

    // ── index validation ──────────────────────────────────────────────────

    #[test]
    fn index_equal_to_vertex_count_is_rejected() {
        let err = validate_indices(&[0, 1, 4], 4).unwrap_err();
        assert_eq!(err, GeometryError::IndexOutOfRange { index: 4, vertex_count: 4 });
    }

    #[test]
    fn last_valid_index_is_accepted() {
        assert_eq!(validate_indices(&[3], 4), Ok(()));
    }

    #[test]
    fn empty_index_list_is_accepted() {
        assert_eq!(validate_indices(&[], 4), Ok(()));
    }
}
