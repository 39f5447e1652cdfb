use std::fmt;

use crate::error::HarnessError;

/// A geometry-configuration error caught before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Attribute spans do not add up to the declared stride.
    StrideMismatch { span_sum: u64, stride: u64 },
    /// An attribute does not start where the previous one ended.
    MisplacedAttribute { location: u32, expected_offset: u64, offset: u64 },
    /// Component count outside 1..=4.
    BadComponentCount { location: u32, components: u32 },
    /// Two attributes claim the same shader location.
    DuplicateLocation { location: u32 },
    /// The format describes no attributes at all.
    Empty,
    /// Vertex byte length is not `vertex_count * stride`.
    VertexBytesMismatch { len: u64, expected: u64 },
    /// Index slice length differs from the declared index count.
    IndexCountMismatch { len: u32, expected: u32 },
    /// An index refers past the last vertex.
    IndexOutOfRange { index: u32, vertex_count: u32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideMismatch { span_sum, stride } => write!(
                f,
                "attribute spans sum to {span_sum} bytes but the declared stride is {stride}"
            ),
            Self::MisplacedAttribute { location, expected_offset, offset } => write!(
                f,
                "attribute at location {location} starts at byte {offset}, expected {expected_offset}"
            ),
            Self::BadComponentCount { location, components } => write!(
                f,
                "attribute at location {location} has {components} components (must be 1..=4)"
            ),
            Self::DuplicateLocation { location } => {
                write!(f, "shader location {location} is declared twice")
            }
            Self::Empty => f.write_str("vertex format declares no attributes"),
            Self::VertexBytesMismatch { len, expected } => write!(
                f,
                "vertex data is {len} bytes, expected {expected} for the declared count and stride"
            ),
            Self::IndexCountMismatch { len, expected } => {
                write!(f, "index data has {len} entries, expected {expected}")
            }
            Self::IndexOutOfRange { index, vertex_count } => write!(
                f,
                "index {index} is out of range for {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

impl From<GeometryError> for HarnessError {
    fn from(err: GeometryError) -> Self {
        HarnessError::init(err.to_string())
    }
}

/// One vertex attribute: a float span bound to a shader input location.
///
/// Components are `f32`; `components` is the vector width (1..=4).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttributeDesc {
    pub location: u32,
    pub components: u32,
    pub offset: u64,
}

impl VertexAttributeDesc {
    /// Byte span this attribute covers within a vertex.
    pub fn span(&self) -> u64 {
        self.components as u64 * 4
    }

    fn wgpu_format(&self) -> Option<wgpu::VertexFormat> {
        match self.components {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}

/// Ordered attribute list plus the declared per-vertex stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexFormat {
    pub attributes: Vec<VertexAttributeDesc>,
    pub stride: u64,
}

impl VertexFormat {
    /// Checks that attributes tile the stride exactly: consecutive, no gaps,
    /// no overlaps, and their spans sum to the declared stride.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.attributes.is_empty() {
            return Err(GeometryError::Empty);
        }

        let mut cursor = 0u64;
        let mut span_sum = 0u64;

        for attr in &self.attributes {
            if attr.wgpu_format().is_none() {
                return Err(GeometryError::BadComponentCount {
                    location: attr.location,
                    components: attr.components,
                });
            }

            if self
                .attributes
                .iter()
                .filter(|a| a.location == attr.location)
                .count()
                > 1
            {
                return Err(GeometryError::DuplicateLocation { location: attr.location });
            }

            if attr.offset != cursor {
                return Err(GeometryError::MisplacedAttribute {
                    location: attr.location,
                    expected_offset: cursor,
                    offset: attr.offset,
                });
            }

            cursor += attr.span();
            span_sum += attr.span();
        }

        if span_sum != self.stride {
            return Err(GeometryError::StrideMismatch { span_sum, stride: self.stride });
        }

        Ok(())
    }

    /// Converts to wgpu attribute descriptors.
    ///
    /// Call [`validate`](Self::validate) first; unvalidated formats may
    /// contain component counts wgpu cannot express.
    pub fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .filter_map(|a| {
                a.wgpu_format().map(|format| wgpu::VertexAttribute {
                    format,
                    offset: a.offset,
                    shader_location: a.location,
                })
            })
            .collect()
    }

    /// Builds the buffer layout over attribute storage owned by the caller.
    pub fn layout<'a>(&self, attrs: &'a [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(location: u32, components: u32, offset: u64) -> VertexAttributeDesc {
        VertexAttributeDesc { location, components, offset }
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn tightly_packed_format_is_valid() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0), attr(1, 2, 12)],
            stride: 20,
        };
        assert_eq!(fmt.validate(), Ok(()));
    }

    #[test]
    fn short_stride_is_rejected() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0), attr(1, 2, 12)],
            stride: 16,
        };
        assert_eq!(
            fmt.validate(),
            Err(GeometryError::StrideMismatch { span_sum: 20, stride: 16 })
        );
    }

    #[test]
    fn padded_stride_is_rejected() {
        // Sum of spans must equal the stride exactly; trailing padding counts
        // as a mismatch.
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0)],
            stride: 16,
        };
        assert_eq!(
            fmt.validate(),
            Err(GeometryError::StrideMismatch { span_sum: 12, stride: 16 })
        );
    }

    #[test]
    fn gap_between_attributes_is_rejected() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0), attr(1, 2, 16)],
            stride: 24,
        };
        assert_eq!(
            fmt.validate(),
            Err(GeometryError::MisplacedAttribute {
                location: 1,
                expected_offset: 12,
                offset: 16
            })
        );
    }

    #[test]
    fn overlapping_attributes_are_rejected() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0), attr(1, 2, 8)],
            stride: 20,
        };
        assert!(matches!(
            fmt.validate(),
            Err(GeometryError::MisplacedAttribute { location: 1, .. })
        ));
    }

    #[test]
    fn five_components_are_rejected() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 5, 0)],
            stride: 20,
        };
        assert_eq!(
            fmt.validate(),
            Err(GeometryError::BadComponentCount { location: 0, components: 5 })
        );
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 2, 0), attr(0, 2, 8)],
            stride: 16,
        };
        assert_eq!(
            fmt.validate(),
            Err(GeometryError::DuplicateLocation { location: 0 })
        );
    }

    #[test]
    fn empty_format_is_rejected() {
        let fmt = VertexFormat { attributes: vec![], stride: 0 };
        assert_eq!(fmt.validate(), Err(GeometryError::Empty));
    }

    // ── wgpu conversion ───────────────────────────────────────────────────

    #[test]
    fn conversion_preserves_locations_and_offsets() {
        let fmt = VertexFormat {
            attributes: vec![attr(0, 3, 0), attr(1, 2, 12)],
            stride: 20,
        };
        let attrs = fmt.wgpu_attributes();

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[0].shader_location, 0);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(attrs[1].offset, 12);

        let layout = fmt.layout(&attrs);
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    }
}
