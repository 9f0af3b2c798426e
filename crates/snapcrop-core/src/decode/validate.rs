//! Upload validation for source images.
//!
//! Runs before the full decode so oversized or unsupported files are
//! rejected from their header alone. Checks run in a fixed order: container
//! format, file size, then pixel dimensions.

use image::ImageFormat;
use thiserror::Error;

use super::load::{probe_dimensions, sniff_format};
use super::DecodeError;

/// Smallest accepted edge length in pixels.
pub const MIN_IMAGE_SIZE: u32 = 256;

/// Largest accepted edge length in pixels.
pub const MAX_IMAGE_SIZE: u32 = 8000;

/// Largest accepted file size in bytes (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Error types for source validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Magic bytes do not match JPEG, PNG, WebP or GIF.
    #[error("Unsupported image format; use JPG, PNG, WEBP or GIF")]
    UnsupportedFormat,

    /// File exceeds [`MAX_FILE_SIZE`].
    #[error("Image file is too large ({size} bytes, max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    /// Either edge is below [`MIN_IMAGE_SIZE`].
    #[error("Image is too small ({width}x{height}, min {min}x{min})")]
    ImageTooSmall { width: u32, height: u32, min: u32 },

    /// Either edge is above [`MAX_IMAGE_SIZE`].
    #[error("Image is too large ({width}x{height}, max {max}x{max})")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    /// Header looked valid but could not be read.
    #[error("Could not read image: {0}")]
    Unreadable(String),
}

/// Validate an uploaded file without decoding its pixels.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as uploaded
///
/// # Returns
///
/// The oriented `(width, height)` of the image on success.
///
/// # Errors
///
/// The first failing check wins: [`ValidationError::UnsupportedFormat`],
/// then [`ValidationError::FileTooLarge`], then the dimension checks.
pub fn validate_source(bytes: &[u8]) -> Result<(u32, u32), ValidationError> {
    let format = sniff_format(bytes).map_err(|_| ValidationError::UnsupportedFormat)?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Gif
    ) {
        return Err(ValidationError::UnsupportedFormat);
    }

    if bytes.len() > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge {
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let (width, height) = probe_dimensions(bytes).map_err(|e| match e {
        DecodeError::UnsupportedFormat => ValidationError::UnsupportedFormat,
        DecodeError::DecodeFailed(msg) => ValidationError::Unreadable(msg),
    })?;

    if width < MIN_IMAGE_SIZE || height < MIN_IMAGE_SIZE {
        return Err(ValidationError::ImageTooSmall {
            width,
            height,
            min: MIN_IMAGE_SIZE,
        });
    }

    if width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
        return Err(ValidationError::ImageTooLarge {
            width,
            height,
            max: MAX_IMAGE_SIZE,
        });
    }

    Ok((width, height))
}
