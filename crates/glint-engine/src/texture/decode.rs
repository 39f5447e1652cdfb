use std::path::Path;

use crate::error::HarnessError;

/// A decoded image, pixels converted to tightly packed RGBA8.
///
/// The pixel buffer is owned exclusively by this value until upload, which
/// consumes it; the decoded bytes are freed exactly once, when the value is
/// dropped or moved into the upload.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file, before RGBA conversion.
    pub channels: u8,
    /// `width * height * 4` bytes, row-major RGBA.
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// Decodes an image file.
    ///
    /// A missing file is an I/O error; a present-but-malformed file is a
    /// decode error. Both are fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();

        // image::open folds "not found" into its own error type; probe first
        // so the taxonomy distinguishes missing from undecodable.
        std::fs::metadata(path)
            .map_err(|source| HarnessError::Io { path: path.to_path_buf(), source })?;

        let img = image::open(path).map_err(|e| HarnessError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let channels = img.color().channel_count();
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!(
            "decoded {}: {width}x{height}, {channels} source channels",
            path.display()
        );

        Ok(Self {
            width,
            height,
            channels,
            bytes: rgba.into_raw(),
        })
    }

    /// Constructs a decoded image from raw RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), (width * height * 4) as usize);
        Self { width, height, channels: 4, bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("glint-texture-test-{}-{name}", std::process::id()));
        p
    }

    #[test]
    fn png_round_trips_dimensions_and_channels() {
        let path = temp_path("rt.png");
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let decoded = DecodedImage::load(&path).unwrap();
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.bytes.len(), 4 * 2 * 4);
        assert_eq!(&decoded.bytes[0..4], &[10, 20, 30, 255]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DecodedImage::load(temp_path("absent.png")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }), "got: {err:?}");
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let err = DecodedImage::load(&path).unwrap_err();
        assert!(matches!(err, HarnessError::Decode { .. }), "got: {err:?}");

        std::fs::remove_file(&path).ok();
    }
}
