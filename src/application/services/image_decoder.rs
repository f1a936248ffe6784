//! Format detection and decoding of downloaded attachments.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::domain::errors::ImageError;

/// Leading bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A decoded bitmap and the format it was read from.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl DecodedImage {
    #[must_use]
    pub const fn image(&self) -> &DynamicImage {
        &self.image
    }

    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Short lowercase name of the source format.
    #[must_use]
    pub fn format_label(&self) -> &'static str {
        format_label(self.format)
    }

    #[must_use]
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Returns a short lowercase name for a format.
#[must_use]
pub fn format_label(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::WebP => "webp",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}

pub struct ImageDecoder;

impl ImageDecoder {
    /// Decodes raw attachment bytes.
    ///
    /// Detection order:
    /// 1. PNG signature: decode as PNG, failure is final.
    /// 2. Signature sniffing for the remaining formats except WebP.
    /// 3. WebP.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Decode` when a PNG-signed input is corrupt and
    /// `ImageError::UnsupportedFormat` when nothing else can read the input.
    pub fn decode(data: &[u8]) -> Result<DecodedImage, ImageError> {
        if data.starts_with(&PNG_SIGNATURE) {
            let image = image::load_from_memory_with_format(data, ImageFormat::Png)
                .map_err(|e| ImageError::decode("PNG", e.to_string()))?;
            return Ok(DecodedImage {
                image,
                format: ImageFormat::Png,
            });
        }

        if let Some(decoded) = Self::decode_sniffed(data) {
            return Ok(decoded);
        }

        match image::load_from_memory_with_format(data, ImageFormat::WebP) {
            Ok(image) => Ok(DecodedImage {
                image,
                format: ImageFormat::WebP,
            }),
            Err(e) => {
                debug!(error = %e, len = data.len(), "WebP fallback failed");
                Err(ImageError::UnsupportedFormat)
            }
        }
    }

    fn decode_sniffed(data: &[u8]) -> Option<DecodedImage> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?;

        let format = reader.format().filter(|f| *f != ImageFormat::WebP)?;

        match reader.decode() {
            Ok(image) => Some(DecodedImage { image, format }),
            Err(e) => {
                debug!(format = format_label(format), error = %e, "Sniffed decode failed");
                None
            }
        }
    }
}
