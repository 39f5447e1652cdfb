use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// Ceiling on accepted shader source size.
///
/// Files above this fail loudly with `SourceTooLarge` rather than being
/// silently truncated. The value is generous for WGSL; a real shader pair
/// sits in the low kilobytes.
pub const MAX_SOURCE_LEN: u64 = 64 * 1024;

/// Pipeline stage a shader source belongs to.
///
/// A runtime tag (not a type parameter) so both stages flow through one
/// compile path and error messages can name the stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point name expected in the WGSL source for this stage.
    pub fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => "vs_main",
            Self::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader source text plus its stage tag, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub path: PathBuf,
    pub stage: ShaderStage,
    pub text: String,
}

impl ShaderSource {
    /// Reads a whole UTF-8 source file into an owned string.
    ///
    /// The size ceiling is checked against file metadata before the read, so
    /// an oversized file costs no allocation and never reaches the GPU.
    pub fn from_file(path: impl AsRef<Path>, stage: ShaderStage) -> Result<Self, HarnessError> {
        let path = path.as_ref();

        let len = fs::metadata(path)
            .map_err(|source| HarnessError::Io { path: path.to_path_buf(), source })?
            .len();

        if len > MAX_SOURCE_LEN {
            return Err(HarnessError::SourceTooLarge {
                path: path.to_path_buf(),
                len,
                limit: MAX_SOURCE_LEN,
            });
        }

        let text = fs::read_to_string(path)
            .map_err(|source| HarnessError::Io { path: path.to_path_buf(), source })?;

        log::debug!("loaded {stage} shader source from {} ({len} bytes)", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            stage,
            text,
        })
    }
}
