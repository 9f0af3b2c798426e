//! Blob encoding for export.
//!
//! This module turns a rendered RGBA frame into encoded bytes using the
//! `image` crate's encoders. JPEG output is flattened to RGB first (JPEG
//! carries no alpha channel), PNG and WebP keep the alpha channel intact.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use super::ExportFormat;
use crate::decode::PixelBuffer;

/// Errors that can occur during blob encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Encode an RGBA frame to bytes in the requested export format.
///
/// # Arguments
///
/// * `image` - RGBA frame to encode (4 bytes per pixel, row-major order)
/// * `format` - Target container format (JPEG, PNG or WebP)
/// * `quality` - Encoder quality (1-100, clamped; ignored for PNG and
///   lossless WebP)
///
/// # Returns
///
/// Encoded bytes on success, or an error if validation or encoding fails.
///
/// # Format Notes
///
/// * JPEG: alpha is composited over black before encoding, matching what a
///   browser canvas does when exporting `image/jpeg`
/// * PNG: alpha preserved, quality ignored
/// * WebP: lossless, alpha preserved, quality ignored
///
/// # Example
///
/// ```
/// use snapcrop_core::decode::PixelBuffer;
/// use snapcrop_core::encode::{encode_image, ExportFormat};
///
/// let frame = PixelBuffer::filled(100, 100, [128, 128, 128, 255]);
/// let jpeg = encode_image(&frame, ExportFormat::Jpeg, 90).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_image(
    image: &PixelBuffer,
    format: ExportFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    // Validate pixel data length
    let expected_len = image.pixel_count() * 4;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    // Create output buffer
    let mut buffer = Cursor::new(Vec::new());

    match format {
        ExportFormat::Jpeg => {
            let rgb = flatten_to_rgb(&image.pixels);
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            encoder
                .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed {
                    format: "JPEG",
                    message: e.to_string(),
                })?;
        }
        ExportFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed {
                    format: "PNG",
                    message: e.to_string(),
                })?;
        }
        ExportFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            encoder
                .write_image(
                    &image.pixels,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed {
                    format: "WebP",
                    message: e.to_string(),
                })?;
        }
    }

    Ok(buffer.into_inner())
}

/// Composite RGBA pixels over black and drop the alpha channel.
///
/// A fully transparent pixel becomes black, a fully opaque pixel keeps its
/// color. This mirrors canvas `toBlob("image/jpeg")` behavior.
fn flatten_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        let alpha = pixel[3] as u16;
        rgb.push((pixel[0] as u16 * alpha / 255) as u8);
        rgb.push((pixel[1] as u16 * alpha / 255) as u8);
        rgb.push((pixel[2] as u16 * alpha / 255) as u8);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_frame(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, [128, 128, 128, 255])
    }

    #[test]
    fn test_encode_jpeg_magic_bytes() {
        let frame = gray_frame(100, 100);

        let bytes = encode_image(&frame, ExportFormat::Jpeg, 90).unwrap();

        // SOI marker at the start, EOI marker at the end
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let len = bytes.len();
        assert_eq!(&bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let frame = gray_frame(100, 100);

        let bytes = encode_image(&frame, ExportFormat::Png, 90).unwrap();

        assert_eq!(&bytes[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_webp_magic_bytes() {
        let frame = gray_frame(100, 100);

        let bytes = encode_image(&frame, ExportFormat::WebP, 90).unwrap();

        // RIFF container with a WEBP fourcc
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_png_preserves_alpha() {
        let frame = PixelBuffer::filled(10, 10, [200, 50, 25, 128]);

        let bytes = encode_image(&frame, ExportFormat::Png, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.get_pixel(5, 5).0, [200, 50, 25, 128]);
    }

    #[test]
    fn test_encode_webp_is_lossless() {
        let mut frame = PixelBuffer::filled(8, 8, [10, 20, 30, 255]);
        frame.pixels[0..4].copy_from_slice(&[250, 0, 120, 64]);

        let bytes = encode_image(&frame, ExportFormat::WebP, 1).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.get_pixel(0, 0).0, [250, 0, 120, 64]);
        assert_eq!(decoded.get_pixel(4, 4).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_encode_jpeg_flattens_transparency_to_black() {
        // Fully transparent red must come out black, not red
        let frame = PixelBuffer::filled(16, 16, [255, 0, 0, 0]);

        let bytes = encode_image(&frame, ExportFormat::Jpeg, 95).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        let [r, g, b, _] = decoded.get_pixel(8, 8).0;
        assert!(r < 10 && g < 10 && b < 10, "got ({r}, {g}, {b})");
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let width = 100u32;
        let height = 100u32;
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x + y) % 256) as u8);
                pixels.push(255);
            }
        }
        let frame = PixelBuffer::new(width, height, pixels);

        let low_q = encode_image(&frame, ExportFormat::Jpeg, 20).unwrap();
        let high_q = encode_image(&frame, ExportFormat::Jpeg, 95).unwrap();

        assert!(high_q.len() > low_q.len());
    }

    #[test]
    fn test_encode_quality_clamping() {
        let frame = gray_frame(10, 10);

        // Quality 0 is clamped to 1, 255 to 100
        assert!(encode_image(&frame, ExportFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&frame, ExportFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let mut frame = gray_frame(10, 10);
        frame.pixels.pop();

        let result = encode_image(&frame, ExportFormat::Png, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let frame = PixelBuffer {
            width: 0,
            height: 100,
            pixels: vec![],
        };

        let result = encode_image(&frame, ExportFormat::Jpeg, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));

        let frame = PixelBuffer {
            width: 100,
            height: 0,
            pixels: vec![],
        };

        let result = encode_image(&frame, ExportFormat::Png, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_single_pixel() {
        let frame = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);

        for format in [ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::WebP] {
            let result = encode_image(&frame, format, 90);
            assert!(result.is_ok(), "1x1 {format} encode failed");
        }
    }

    #[test]
    fn test_flatten_to_rgb_composites_over_black() {
        let rgba = [255, 255, 255, 255, 255, 255, 255, 0, 100, 200, 50, 128];

        let rgb = flatten_to_rgb(&rgba);

        assert_eq!(&rgb[0..3], &[255, 255, 255]);
        assert_eq!(&rgb[3..6], &[0, 0, 0]);
        assert_eq!(&rgb[6..9], &[50, 100, 25]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
