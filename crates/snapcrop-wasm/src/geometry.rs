//! Frame geometry WASM bindings.
//!
//! This module exposes the snapcrop-core layout math to JavaScript so the
//! editor UI can draw overlays and drag handles without re-implementing any
//! of it: fill layout (scaled size, background bands, pan limits), default
//! crop rectangles, and pan clamping.
//!
//! All functions are pure; they take source dimensions and an aspect ratio
//! string and return plain objects.
//!
//! # Example
//!
//! ```typescript
//! import { compute_fill_geometry, clamp_pan } from '@snapcrop/wasm';
//!
//! const geo = compute_fill_geometry(800, 800, "16:9");
//! console.log(`movable: ${geo.can_move_x}, max ${geo.max_move_x}px`);
//!
//! const pan = clamp_pan(800, 800, "16:9", dragX, dragY);
//! drawImage(geo, pan);
//! ```

use crate::types::parse_aspect;
use snapcrop_core::geometry;
use wasm_bindgen::prelude::*;

/// Compute the fill layout for a source image under an aspect ratio.
///
/// # Arguments
///
/// * `source_width` - Source image width in pixels
/// * `source_height` - Source image height in pixels
/// * `aspect` - Aspect ratio: a preset ("16:9", "9:16", "1:1", "4:3", "3:4")
///   or a positive number for a custom ratio, e.g. "2.35"
///
/// # Returns
///
/// An object with the frame size, scaled image size, background band widths
/// (`fill_left` etc.), pan mobility flags and pan limits.
///
/// # Errors
///
/// Returns an error if the aspect string is invalid or a source edge is zero.
///
/// # Example
///
/// ```typescript
/// const geo = compute_fill_geometry(800, 800, "16:9");
/// // geo.scaled_width === 1080, geo.fill_left === 420
/// ```
#[wasm_bindgen]
pub fn compute_fill_geometry(
    source_width: u32,
    source_height: u32,
    aspect: &str,
) -> Result<JsValue, JsValue> {
    let aspect = parse_aspect(aspect).map_err(|e| JsValue::from_str(&e))?;
    let geo = geometry::FillGeometry::compute(source_width, source_height, aspect)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&geo).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Largest centered crop rectangle with the given aspect ratio.
///
/// This is the rectangle the editor starts from before the user drags the
/// crop handles.
///
/// # Arguments
///
/// * `source_width` - Source image width in pixels
/// * `source_height` - Source image height in pixels
/// * `aspect` - Aspect ratio string, see [`compute_fill_geometry`]
///
/// # Returns
///
/// An object `{ x, y, width, height }` in source pixel coordinates.
///
/// # Example
///
/// ```typescript
/// const rect = centered_crop_rect(800, 800, "16:9");
/// // rect => { x: 0, y: 175, width: 800, height: 450 }
/// ```
#[wasm_bindgen]
pub fn centered_crop_rect(
    source_width: u32,
    source_height: u32,
    aspect: &str,
) -> Result<JsValue, JsValue> {
    let aspect = parse_aspect(aspect).map_err(|e| JsValue::from_str(&e))?;
    let rect = geometry::centered_crop_rect(source_width, source_height, aspect)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Clamp a pan offset to the movable range of the fill layout.
///
/// # Arguments
///
/// * `source_width` - Source image width in pixels
/// * `source_height` - Source image height in pixels
/// * `aspect` - Aspect ratio string, see [`compute_fill_geometry`]
/// * `pan_x` - Requested horizontal offset from center, in frame pixels
/// * `pan_y` - Requested vertical offset from center, in frame pixels
///
/// # Returns
///
/// An object `{ x, y }` with both offsets clamped so the image never leaves
/// its background band.
///
/// # Example
///
/// ```typescript
/// const pan = clamp_pan(800, 800, "16:9", 1000, 50);
/// // pan => { x: 420, y: 0 }
/// ```
#[wasm_bindgen]
pub fn clamp_pan(
    source_width: u32,
    source_height: u32,
    aspect: &str,
    pan_x: i32,
    pan_y: i32,
) -> Result<JsValue, JsValue> {
    let aspect = parse_aspect(aspect).map_err(|e| JsValue::from_str(&e))?;
    let geo = geometry::FillGeometry::compute(source_width, source_height, aspect)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let pan = geo.clamp_pan(geometry::PanOffset::new(pan_x, pan_y));
    serde_wasm_bindgen::to_value(&pan).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// All geometry bindings return JS objects, so everything here runs under
/// `wasm-pack test`. The layout math itself is covered natively in
/// `snapcrop_core::geometry`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use snapcrop_core::{CropRect, FillGeometry, PanOffset};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compute_fill_geometry_square_in_widescreen() {
        let value = compute_fill_geometry(800, 800, "16:9").unwrap();
        let geo: FillGeometry = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!((geo.frame_width, geo.frame_height), (1920, 1080));
        assert_eq!((geo.scaled_width, geo.scaled_height), (1080, 1080));
        assert_eq!((geo.fill_left, geo.fill_right), (420, 420));
        assert!(geo.can_move_x);
        assert!(!geo.can_move_y);
    }

    #[wasm_bindgen_test]
    fn test_compute_fill_geometry_rejects_bad_aspect() {
        assert!(compute_fill_geometry(800, 800, "wide").is_err());
        assert!(compute_fill_geometry(800, 800, "-1").is_err());
    }

    #[wasm_bindgen_test]
    fn test_compute_fill_geometry_rejects_zero_source() {
        assert!(compute_fill_geometry(0, 800, "16:9").is_err());
    }

    #[wasm_bindgen_test]
    fn test_centered_crop_rect() {
        let value = centered_crop_rect(800, 800, "16:9").unwrap();
        let rect: CropRect = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(rect, CropRect::new(0, 175, 800, 450));
    }

    #[wasm_bindgen_test]
    fn test_clamp_pan_limits_offset() {
        let value = clamp_pan(800, 800, "16:9", 1000, 50).unwrap();
        let pan: PanOffset = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(pan, PanOffset::new(420, 0));
    }

    #[wasm_bindgen_test]
    fn test_clamp_pan_custom_aspect() {
        let value = clamp_pan(1080, 1080, "2.0", 9999, 9999).unwrap();
        let pan: PanOffset = serde_wasm_bindgen::from_value(value).unwrap();

        // 2.0 frame is 2160x1080; the square source scales to 1080x1080
        assert_eq!(pan, PanOffset::new(540, 0));
    }
}
