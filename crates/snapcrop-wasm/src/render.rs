//! Output rendering WASM bindings.
//!
//! This module exposes the two SnapCrop render paths to JavaScript: crop
//! extraction (rectangular or round) and fill compositing (contain-scale
//! into an aspect frame over a background color). Both take a decoded
//! [`JsImage`] and return a new one, leaving the source untouched.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, render_crop, render_fill } from '@snapcrop/wasm';
//!
//! const image = decode_image(bytes);
//!
//! // Crop a 300x300 circle starting at (100, 50)
//! const badge = render_crop(image, 100, 50, 300, 300, "round");
//!
//! // Fit the image into a 16:9 frame over white, panned 40px right
//! const banner = render_fill(image, "16:9", 40, 0, "#ffffff", 2);
//! ```

use crate::types::{filter_from_u8, parse_aspect, JsImage};
use snapcrop_core::geometry::{CropRect, CropShape, FillGeometry, PanOffset};
use snapcrop_core::render;
use snapcrop_core::FillColor;
use wasm_bindgen::prelude::*;

/// Extract a crop area from an image at source resolution.
///
/// The rectangle may overhang the image edges; uncovered output pixels stay
/// transparent. With `shape = "round"` the inscribed ellipse is kept and
/// everything outside it is cleared.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y` - Top-left corner of the crop area in source pixels (may be
///   negative)
/// * `width`, `height` - Output dimensions in pixels
/// * `shape` - "rect" or "round"
///
/// # Returns
///
/// A new `JsImage` of exactly `width` x `height` RGBA pixels.
///
/// # Errors
///
/// Returns an error if the crop area is empty or the shape string is
/// unknown.
///
/// # Example
///
/// ```typescript
/// const avatar = render_crop(image, 100, 50, 300, 300, "round");
/// // avatar.width === 300, corners are transparent
/// ```
#[wasm_bindgen]
pub fn render_crop(
    image: &JsImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    shape: &str,
) -> Result<JsImage, JsValue> {
    let shape: CropShape = shape.parse().map_err(|e: String| JsValue::from_str(&e))?;
    let source = image.to_buffer();
    let area = CropRect::new(x, y, width, height);

    render::render_crop(&source, &area, shape)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Composite an image into an aspect-ratio frame over a background color.
///
/// The image is contain-scaled so it fits entirely inside the frame, then
/// drawn centered plus the pan offset. The pan is clamped to the movable
/// range first, so callers can pass raw drag deltas.
///
/// # Arguments
///
/// * `image` - Source image
/// * `aspect` - Aspect ratio: a preset ("16:9", "9:16", "1:1", "4:3",
///   "3:4") or a positive number string for a custom ratio
/// * `pan_x`, `pan_y` - Offset from the centered position, in frame pixels
/// * `fill_color` - Background: "transparent", "#rgb", "#rrggbb",
///   "#rrggbbaa", "rgb(...)" or "rgba(...)"
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear, 2=Lanczos3
///
/// # Returns
///
/// A new `JsImage` with the frame dimensions of the aspect ratio.
///
/// # Errors
///
/// Returns an error if the aspect or color string is invalid, or the source
/// image is empty.
///
/// # Example
///
/// ```typescript
/// const banner = render_fill(image, "16:9", 0, 0, "transparent", 1);
/// // banner.width === 1920, banner.height === 1080
/// ```
#[wasm_bindgen]
pub fn render_fill(
    image: &JsImage,
    aspect: &str,
    pan_x: i32,
    pan_y: i32,
    fill_color: &str,
    filter: u8,
) -> Result<JsImage, JsValue> {
    let aspect = parse_aspect(aspect).map_err(|e| JsValue::from_str(&e))?;
    let color: FillColor = fill_color
        .parse()
        .map_err(|e: snapcrop_core::color::ColorError| JsValue::from_str(&e.to_string()))?;
    let source = image.to_buffer();

    let geometry = FillGeometry::compute(source.width, source.height, aspect)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let pan = geometry.clamp_pan(PanOffset::new(pan_x, pan_y));

    render::render_fill(&source, &geometry, pan, color, filter_from_u8(filter))
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// One color picker preset.
#[derive(serde::Serialize, serde::Deserialize)]
struct PresetColor {
    name: String,
    value: String,
}

/// Fill color presets for the picker, in display order.
///
/// # Returns
///
/// An array of `{ name, value }` objects, where `value` is accepted by
/// [`render_fill`]'s `fill_color` parameter.
///
/// # Example
///
/// ```typescript
/// const presets = preset_fill_colors();
/// // [{ name: "White", value: "#ffffff" }, ...]
/// ```
#[wasm_bindgen]
pub fn preset_fill_colors() -> Result<JsValue, JsValue> {
    let presets: Vec<PresetColor> = snapcrop_core::color::PRESET_COLORS
        .iter()
        .map(|(name, color)| PresetColor {
            name: (*name).to_string(),
            value: color.to_string(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&presets).map_err(|e| JsValue::from_str(&e.to_string()))
}
