use std::fmt;
use std::path::PathBuf;

use crate::shader::ShaderStage;

/// A fatal initialization error from the rendering harness.
///
/// Every variant aborts startup before the render loop is entered; there is
/// no partial-resource state to recover from. The binary's top-level handler
/// logs the message and exits non-zero.
#[derive(Debug)]
pub enum HarnessError {
    /// A shader or image file could not be read.
    Io { path: PathBuf, source: std::io::Error },

    /// A shader source file exceeds the accepted size ceiling.
    ///
    /// Checked before any GPU object is created, so an oversized file never
    /// leaks a shader handle.
    SourceTooLarge { path: PathBuf, len: u64, limit: u64 },

    /// The GPU compiler rejected shader source for the named stage.
    Compile { stage: ShaderStage, log: String },

    /// Pipeline creation (the API's link step) was rejected.
    Link { log: String },

    /// An image file was found but could not be decoded.
    Decode { path: PathBuf, message: String },

    /// Window/adapter/device initialization failed, or startup-time
    /// validation (vertex format, index range) rejected the configuration.
    Init { message: String },
}

impl HarnessError {
    pub(crate) fn init(message: impl Into<String>) -> Self {
        Self::Init { message: message.into() }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::SourceTooLarge { path, len, limit } => {
                write!(
                    f,
                    "shader source {} is {len} bytes, exceeds the {limit}-byte ceiling",
                    path.display()
                )
            }
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            Self::Link { log } => {
                write!(f, "pipeline link failed: {}", log.trim_end())
            }
            Self::Decode { path, message } => {
                write!(f, "cannot decode image {}: {message}", path.display())
            }
            Self::Init { message } => write!(f, "initialization failed: {message}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn compile_error_names_the_stage() {
        let err = HarnessError::Compile {
            stage: ShaderStage::Fragment,
            log: "expected ';'\n".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"), "got: {text}");
        assert!(text.contains("expected ';'"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn source_too_large_reports_both_sizes() {
        let err = HarnessError::SourceTooLarge {
            path: Path::new("shaders/quad.vert.wgsl").to_path_buf(),
            len: 70_000,
            limit: 65_536,
        };
        let text = err.to_string();
        assert!(text.contains("70000"));
        assert!(text.contains("65536"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = HarnessError::Io {
            path: Path::new("missing.wgsl").to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.source().is_some());
    }
}
