//! Image decoding and validation WASM bindings.
//!
//! This module exposes the snapcrop-core upload pipeline to JavaScript:
//! decoding an uploaded file to RGBA pixels, probing its dimensions without
//! a full decode, and running the upload validation rules.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an uploaded image file to RGBA pixels
//! - [`probe_dimensions`] - Read image dimensions without decoding pixels
//! - [`validate_source`] - Check an upload against format and size rules
//! - [`max_file_size`], [`min_image_size`], [`max_image_size`] - Validation limits
//!
//! # Example
//!
//! ```typescript
//! import { validate_source, decode_image } from '@snapcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//!
//! const { width, height } = validate_source(bytes); // throws when rejected
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsImage;
use snapcrop_core::decode;
use wasm_bindgen::prelude::*;

/// Image dimensions returned to JavaScript as `{ width, height }`.
#[derive(serde::Serialize)]
struct JsDimensions {
    width: u32,
    height: u32,
}

fn dimensions_to_js(width: u32, height: u32) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&JsDimensions { width, height })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an uploaded image file from bytes.
///
/// Supports JPEG, PNG, WebP and GIF (first frame). EXIF orientation is
/// applied automatically so the pixels are always upright.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsImage` containing the decoded RGBA pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not one of the supported formats
/// - The file is corrupted or truncated
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the dimensions of an image without decoding its pixels.
///
/// Dimensions are orientation-corrected: a portrait JPEG stored rotated
/// reports its upright width and height.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// An object `{ width, height }`, or an error if the format is not
/// recognized.
///
/// # Example
///
/// ```typescript
/// const { width, height } = probe_dimensions(bytes);
/// ```
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let (width, height) =
        decode::probe_dimensions(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    dimensions_to_js(width, height)
}

/// Validate an upload against the editor's acceptance rules.
///
/// Checks run in order: supported format (JPEG, PNG, WebP, GIF), file size
/// (10 MiB max), then dimensions (256 to 8000 pixels per edge). The first
/// failing rule is reported.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// An object `{ width, height }` when the upload is acceptable, or an error
/// naming the first failed rule.
///
/// # Example
///
/// ```typescript
/// try {
///   const { width, height } = validate_source(bytes);
/// } catch (e) {
///   showUploadError(String(e));
/// }
/// ```
#[wasm_bindgen]
pub fn validate_source(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let (width, height) =
        decode::validate_source(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    dimensions_to_js(width, height)
}

/// Maximum accepted upload size in bytes (10 MiB).
#[wasm_bindgen]
pub fn max_file_size() -> usize {
    decode::MAX_FILE_SIZE
}

/// Minimum accepted image edge in pixels.
#[wasm_bindgen]
pub fn min_image_size() -> u32 {
    decode::MIN_IMAGE_SIZE
}

/// Maximum accepted image edge in pixels.
#[wasm_bindgen]
pub fn max_image_size() -> u32 {
    decode::MAX_IMAGE_SIZE
}

/// Tests for decode bindings.
///
/// Note: Most decode bindings return `Result<T, JsValue>`, which only works
/// on wasm32 targets. The limit getters are the exception as they return
/// plain numbers. For comprehensive decode testing, see the tests in
/// `snapcrop_core::decode` which cover the underlying functionality.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_match_core() {
        assert_eq!(max_file_size(), 10 * 1024 * 1024);
        assert_eq!(min_image_size(), 256);
        assert_eq!(max_image_size(), 8000);
    }

    #[test]
    fn test_js_image_roundtrip_through_buffer() {
        let buffer = snapcrop_core::decode::PixelBuffer::filled(4, 2, [9, 8, 7, 255]);
        let img = JsImage::from_buffer(buffer);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 32);
    }
}
