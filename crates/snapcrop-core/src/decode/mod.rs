//! Image decoding pipeline for SnapCrop.
//!
//! This module provides functionality for:
//! - Validating uploaded files (format, file size, pixel dimensions)
//! - Decoding JPEG, PNG, WebP and GIF sources into RGBA buffers
//! - Applying EXIF orientation so geometry works in display coordinates
//!
//! # Architecture
//!
//! The decode pipeline is designed to be used from Web Workers via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.
//! Validation is header-only so a 10 MB reject never allocates pixel data.
//!
//! # Examples
//!
//! ```ignore
//! use snapcrop_core::decode::{decode_image, validate_source};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (width, height) = validate_source(&bytes).unwrap();
//! let image = decode_image(&bytes).unwrap();
//! assert_eq!((image.width, image.height), (width, height));
//! ```

mod load;
mod types;
mod validate;

pub use load::{decode_image, probe_dimensions, sniff_format};
pub use types::{DecodeError, Orientation, PixelBuffer};
pub use validate::{
    validate_source, ValidationError, MAX_FILE_SIZE, MAX_IMAGE_SIZE, MIN_IMAGE_SIZE,
};
