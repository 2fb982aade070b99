//! Wound image payload types.
//!
//! Images are read once into memory, validated by magic-number sniffing,
//! and discarded after the outbound request is encoded. Only JPEG and PNG
//! are accepted.

use crate::error::{MendError, Result};
use std::fmt;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Supported wound image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Returns the MIME type used in the outbound data URI.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Detects the format from the leading bytes of the file.
    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }
}

/// A wound photo held in memory for a single assessment request.
#[derive(Clone, PartialEq, Eq)]
pub struct WoundImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl WoundImage {
    /// Builds an image from raw bytes, validating the format by signature.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
            MendError::validation("Unsupported image format; please provide a JPEG or PNG file")
        })?;
        Ok(Self { bytes, format })
    }

    /// Reads and validates an image file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            MendError::validation(format!("Could not read image file {}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the raw payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for WoundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WoundImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal valid-looking JPEG header followed by filler.
    fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(b"JFIF-test-payload");
        bytes
    }

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(b"IHDR-test-payload");
        bytes
    }

    #[test]
    fn test_sniff_jpeg() {
        let image = WoundImage::from_bytes(jpeg_bytes()).unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_sniff_png() {
        let image = WoundImage::from_bytes(png_bytes()).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = WoundImage::from_bytes(b"GIF89a-not-supported".to_vec());
        assert!(matches!(result, Err(MendError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_bytes() {
        let result = WoundImage::from_bytes(Vec::new());
        assert!(matches!(result, Err(MendError::Validation(_))));
    }

    #[test]
    fn test_from_path_missing_file_is_validation_error() {
        let result = WoundImage::from_path("/nonexistent/wound.jpg");
        assert!(matches!(result, Err(MendError::Validation(_))));
    }
}
