//! Image encoding pipeline for SnapCrop.
//!
//! This module provides functionality for:
//! - Choosing an export container format (JPEG, PNG, WebP)
//! - Encoding rendered RGBA frames to bytes with configurable quality
//!
//! # Architecture
//!
//! The encoding pipeline is designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use snapcrop_core::decode::PixelBuffer;
//! use snapcrop_core::encode::{encode_image, ExportFormat};
//!
//! let frame = PixelBuffer::filled(100, 100, [128, 128, 128, 255]);
//! let jpeg_bytes = encode_image(&frame, ExportFormat::Jpeg, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod blob;
mod format;

pub use blob::{encode_image, EncodeError};
pub use format::ExportFormat;
