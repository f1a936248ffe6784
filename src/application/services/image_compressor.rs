//! Low-quality JPEG re-encoding.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::domain::entities::CompressedImage;
use crate::domain::errors::ImageError;

/// Encoder quality on the 1-100 scale. Visibly degraded output is the point.
pub const JPEG_QUALITY: u8 = 5;

pub struct ImageCompressor;

impl ImageCompressor {
    /// Re-encodes a bitmap as a quality-5 JPEG.
    ///
    /// Alpha is dropped; JPEG has no transparency.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Encode` if the encoder rejects the bitmap.
    pub fn compress(image: &DynamicImage) -> Result<CompressedImage, ImageError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
            .encode_image(&rgb)
            .map_err(|e| ImageError::encode(e.to_string()))?;

        Ok(CompressedImage::new(buffer, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures;

    #[test]
    fn test_output_is_jpeg() {
        let compressed = ImageCompressor::compress(&fixtures::gradient(32, 16)).unwrap();

        assert!(compressed.data().starts_with(&[0xFF, 0xD8]));
        assert!(compressed.data().ends_with(&[0xFF, 0xD9]));
        assert_eq!(compressed.dimensions(), (32, 16));
    }

    #[test]
    fn test_compression_is_deterministic() {
        let image = fixtures::gradient(24, 24);

        let first = ImageCompressor::compress(&image).unwrap();
        let second = ImageCompressor::compress(&image).unwrap();

        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_alpha_input_is_accepted() {
        let rgba = DynamicImage::ImageRgba8(fixtures::gradient(10, 10).to_rgba8());
        let compressed = ImageCompressor::compress(&rgba).unwrap();
        assert!(!compressed.is_empty());
    }

    #[test]
    fn test_quality_is_lower_than_default() {
        let image = fixtures::gradient(64, 64);
        let low = ImageCompressor::compress(&image).unwrap();

        let mut default_quality = Vec::new();
        JpegEncoder::new_with_quality(&mut default_quality, 90)
            .encode_image(&image.to_rgb8())
            .unwrap();

        assert!(low.len() < default_quality.len());
    }
}
