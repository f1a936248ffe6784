pub mod attachment_collector;
pub mod image_compressor;
pub mod image_decoder;

#[cfg(test)]
pub(crate) mod fixtures;

pub use attachment_collector::AttachmentCollector;
pub use image_compressor::{ImageCompressor, JPEG_QUALITY};
pub use image_decoder::{DecodedImage, ImageDecoder, PNG_SIGNATURE};
