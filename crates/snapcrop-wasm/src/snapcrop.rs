//! Stateful editor session WASM binding.
//!
//! [`SnapCrop`] is the one object a front end needs: it owns the decoded
//! image and a core [`Session`], exposes the mode/aspect/shape/color/pan
//! setters, and runs the export pipeline. The stateless bindings in
//! `render` and `geometry` remain available for UIs that manage their own
//! state.
//!
//! # Example
//!
//! ```typescript
//! import { SnapCrop } from '@snapcrop/wasm';
//!
//! const editor = new SnapCrop();
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! editor.set_aspect("1:1");
//! editor.set_crop_shape("round");
//! editor.set_crop_area(100, 50, 300, 300);
//!
//! const blob = editor.export("jpeg", 90);       // round crop: comes back PNG
//! download(new Blob([blob.bytes()], { type: blob.mime_type }), blob.filename);
//! ```

use crate::types::{filter_from_u8, parse_aspect, JsImage};
use snapcrop_core::decode::{self, PixelBuffer};
use snapcrop_core::export::{ExportRequest, ExportedBlob};
use snapcrop_core::geometry::CropRect;
use snapcrop_core::{CropShape, ExportFormat, FillColor, Mode, Session};
use wasm_bindgen::prelude::*;

/// An encoded export ready to be downloaded from JavaScript.
#[wasm_bindgen]
pub struct JsExportedBlob {
    bytes: Vec<u8>,
    mime_type: &'static str,
    filename: String,
}

#[wasm_bindgen]
impl JsExportedBlob {
    /// Encoded file bytes as a Uint8Array (copies out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Number of encoded bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// MIME type of the encoded bytes, e.g. "image/png"
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.to_string()
    }

    /// Suggested download filename, including extension
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsExportedBlob {
    pub(crate) fn from_blob(blob: ExportedBlob) -> Self {
        Self {
            mime_type: blob.mime_type(),
            bytes: blob.bytes,
            filename: blob.filename,
        }
    }
}

/// Stateful editor session for JavaScript.
///
/// Owns the decoded source image and all editing state. Loading a new
/// image, switching mode or changing the aspect ratio resets pan, zoom and
/// the crop area, so the UI never has to worry about stale coordinates.
#[wasm_bindgen]
pub struct SnapCrop {
    source: Option<PixelBuffer>,
    session: Session,
    exporting: bool,
}

#[wasm_bindgen]
impl SnapCrop {
    /// Create an editor session with default settings and no image.
    #[wasm_bindgen(constructor)]
    pub fn new() -> SnapCrop {
        SnapCrop {
            source: None,
            session: Session::new(),
            exporting: false,
        }
    }

    /// Load an image from uploaded file bytes.
    ///
    /// Runs the full upload validation (format, file size, dimensions)
    /// before decoding, then resets the view state.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first failed validation rule, or a
    /// decode error for corrupted files.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        decode::validate_source(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let buffer =
            decode::decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session
            .load_source(buffer.width, buffer.height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.source = Some(buffer);
        Ok(())
    }

    /// Load an already-decoded image, skipping byte-level validation.
    ///
    /// Useful when the UI has decoded the file once for display and wants
    /// to hand the same pixels to the editor.
    pub fn load_pixels(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let buffer = image.to_buffer();
        self.session
            .load_source(buffer.width, buffer.height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.source = Some(buffer);
        Ok(())
    }

    /// Whether an image is currently loaded
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Width of the loaded image in pixels (0 when none)
    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.source.as_ref().map_or(0, |s| s.width)
    }

    /// Height of the loaded image in pixels (0 when none)
    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.source.as_ref().map_or(0, |s| s.height)
    }

    /// Switch editing mode: "crop" or "fill".
    ///
    /// Switching resets pan, zoom and crop area.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: Mode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.session.set_mode(mode);
        Ok(())
    }

    /// Current editing mode ("crop" or "fill")
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.session.mode().to_string()
    }

    /// Set the target aspect ratio.
    ///
    /// Accepts a preset ("16:9", "9:16", "1:1", "4:3", "3:4") or a positive
    /// number string for a custom ratio. Changing the aspect resets pan,
    /// zoom and crop area.
    pub fn set_aspect(&mut self, aspect: &str) -> Result<(), JsValue> {
        let aspect = parse_aspect(aspect).map_err(|e| JsValue::from_str(&e))?;
        self.session.set_aspect(aspect);
        Ok(())
    }

    /// Set a custom aspect ratio from a number (width / height).
    ///
    /// # Errors
    ///
    /// Returns an error for zero, negative or non-finite ratios.
    pub fn set_custom_aspect(&mut self, ratio: f64) -> Result<(), JsValue> {
        let aspect = snapcrop_core::AspectRatio::custom(ratio)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.set_aspect(aspect);
        Ok(())
    }

    /// Current aspect ratio as a string ("16:9" or a number for custom)
    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> String {
        self.session.aspect().to_string()
    }

    /// Set the crop shape: "rect" or "round". The crop area is kept.
    pub fn set_crop_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        let shape: CropShape = shape.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.session.set_crop_shape(shape);
        Ok(())
    }

    /// Current crop shape ("rect" or "round")
    #[wasm_bindgen(getter)]
    pub fn crop_shape(&self) -> String {
        self.session.crop_shape().name().to_string()
    }

    /// Set the fill background color.
    ///
    /// Accepts "transparent", "#rgb", "#rrggbb", "#rrggbbaa", "rgb(...)"
    /// or "rgba(...)".
    pub fn set_fill_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color: FillColor = color
            .parse()
            .map_err(|e: snapcrop_core::color::ColorError| JsValue::from_str(&e.to_string()))?;
        self.session.set_fill_color(color);
        Ok(())
    }

    /// Current fill background color in CSS form
    #[wasm_bindgen(getter)]
    pub fn fill_color(&self) -> String {
        self.session.fill_color().to_string()
    }

    /// Set the zoom factor, clamped to 1.0..=3.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.session.set_zoom(zoom);
    }

    /// Current zoom factor
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.session.zoom()
    }

    /// Record the crop area selected in the UI, in source pixels.
    pub fn set_crop_area(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.session.set_crop_area(CropRect::new(x, y, width, height));
    }

    /// Move the fill pan by a delta, clamped to the movable range.
    ///
    /// # Returns
    ///
    /// The stored pan as `{ x, y }`.
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded.
    pub fn pan_by(&mut self, dx: i32, dy: i32) -> Result<JsValue, JsValue> {
        let pan = self
            .session
            .pan_by(dx, dy)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&pan).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Reset pan, zoom and crop area. Matches a double-click on the canvas.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Fill layout for the loaded image under the current aspect ratio.
    ///
    /// # Returns
    ///
    /// The same object as `compute_fill_geometry`.
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded.
    pub fn fill_geometry(&self) -> Result<JsValue, JsValue> {
        let geo = self
            .session
            .fill_geometry()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&geo).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Largest centered crop area with the current aspect ratio, as
    /// `{ x, y, width, height }`.
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded.
    pub fn default_crop_area(&self) -> Result<JsValue, JsValue> {
        let rect = self
            .session
            .default_crop_area()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render the output frame for the current mode and settings.
    ///
    /// # Arguments
    ///
    /// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear, 2=Lanczos3
    ///   (only used in fill mode)
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded, or in crop mode before a crop area
    /// has been set.
    pub fn preview(&self, filter: u8) -> Result<JsImage, JsValue> {
        let source = self.require_source()?;
        self.session
            .render(source, filter_from_u8(filter))
            .map(JsImage::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render and encode the current frame, returning raw bytes.
    ///
    /// The format is overridden to PNG when the frame carries transparency
    /// JPEG cannot store. Use [`SnapCrop::export`] to also get the MIME
    /// type and a download filename.
    ///
    /// # Arguments
    ///
    /// * `format` - "jpeg", "png" or "webp"
    /// * `quality` - Quality percent (0-100); only meaningful for JPEG
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded, in crop mode without a crop area, or
    /// when encoding fails.
    pub fn get_blob(&self, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
        let blob = self.build_export(format, quality, None)?;
        Ok(blob.bytes)
    }

    /// Export the current frame as a downloadable blob.
    ///
    /// Only one export runs at a time; a second call while
    /// [`SnapCrop::is_exporting`] is true fails immediately. The filename
    /// defaults to `image_<aspect>_<timestamp>.<ext>`.
    ///
    /// # Arguments
    ///
    /// * `format` - "jpeg", "png" or "webp"
    /// * `quality` - Quality percent (0-100); only meaningful for JPEG
    /// * `filename` - Optional explicit filename used verbatim
    ///
    /// # Errors
    ///
    /// Fails when an export is already running, no image is loaded, or the
    /// pipeline reports an error.
    pub fn export(
        &mut self,
        format: &str,
        quality: u8,
        filename: Option<String>,
    ) -> Result<JsExportedBlob, JsValue> {
        if self.exporting {
            return Err(JsValue::from_str("Export already in progress"));
        }
        self.exporting = true;
        let result = self
            .build_export(format, quality, filename)
            .map(JsExportedBlob::from_blob);
        self.exporting = false;
        result
    }

    /// Whether an export is currently running
    #[wasm_bindgen(getter)]
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }
}

impl SnapCrop {
    fn require_source(&self) -> Result<&PixelBuffer, JsValue> {
        self.source
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No image loaded"))
    }

    fn build_export(
        &self,
        format: &str,
        quality: u8,
        filename: Option<String>,
    ) -> Result<ExportedBlob, JsValue> {
        let source = self.require_source()?;
        let format: ExportFormat = format.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let request = ExportRequest {
            format,
            quality,
            filename,
        };
        let timestamp = js_sys::Date::now() as u64;
        self.session
            .export(source, &request, timestamp)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for SnapCrop {
    fn default() -> Self {
        Self::new()
    }
}

/// WASM-specific tests that require JsValue.
///
/// Everything on `SnapCrop` can fail with a `JsValue`, so the session
/// binding is tested under `wasm-pack test`. The state machine itself is
/// covered natively in `snapcrop_core::session`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use snapcrop_core::encode;
    use snapcrop_core::geometry::PanOffset;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Encode a solid 400x400 PNG that passes upload validation.
    fn sample_png() -> Vec<u8> {
        let buffer = PixelBuffer::filled(400, 400, [255, 0, 0, 255]);
        encode::encode_image(&buffer, ExportFormat::Png, 90).unwrap()
    }

    fn loaded_editor() -> SnapCrop {
        let mut editor = SnapCrop::new();
        editor.load_image(&sample_png()).unwrap();
        editor
    }

    #[wasm_bindgen_test]
    fn test_new_editor_is_empty() {
        let editor = SnapCrop::new();
        assert!(!editor.has_image());
        assert_eq!(editor.source_width(), 0);
        assert_eq!(editor.mode(), "crop");
        assert_eq!(editor.aspect(), "16:9");
    }

    #[wasm_bindgen_test]
    fn test_load_image() {
        let editor = loaded_editor();
        assert!(editor.has_image());
        assert_eq!(editor.source_width(), 400);
        assert_eq!(editor.source_height(), 400);
    }

    #[wasm_bindgen_test]
    fn test_load_image_rejects_garbage() {
        let mut editor = SnapCrop::new();
        assert!(editor.load_image(&[0, 1, 2, 3]).is_err());
        assert!(!editor.has_image());
    }

    #[wasm_bindgen_test]
    fn test_load_image_rejects_small_image() {
        let buffer = PixelBuffer::filled(100, 100, [255, 0, 0, 255]);
        let png = encode::encode_image(&buffer, ExportFormat::Png, 90).unwrap();

        let mut editor = SnapCrop::new();
        assert!(editor.load_image(&png).is_err());
    }

    #[wasm_bindgen_test]
    fn test_set_aspect_resets_pan() {
        let mut editor = loaded_editor();
        editor.set_mode("fill").unwrap();
        editor.pan_by(50, 0).unwrap();

        editor.set_aspect("1:1").unwrap();

        let value = editor.pan_by(0, 0).unwrap();
        let pan: PanOffset = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(pan, PanOffset::ZERO);
    }

    #[wasm_bindgen_test]
    fn test_export_without_crop_area_fails() {
        let mut editor = loaded_editor();

        let result = editor.export("jpeg", 90, None);

        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_round_crop_becomes_png() {
        let mut editor = loaded_editor();
        editor.set_crop_shape("round").unwrap();
        editor.set_crop_area(50, 50, 300, 300);

        let blob = editor.export("jpeg", 90, None).unwrap();

        assert_eq!(blob.mime_type(), "image/png");
        assert!(blob.filename().starts_with("image_16x9_"));
        assert!(blob.filename().ends_with(".png"));
        assert_eq!(&blob.bytes()[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[wasm_bindgen_test]
    fn test_export_clears_busy_flag_after_failure() {
        let mut editor = loaded_editor();

        // Crop mode without a crop area fails, but must not leave the
        // editor stuck in the exporting state.
        assert!(editor.export("jpeg", 90, None).is_err());
        assert!(!editor.is_exporting());

        editor.set_crop_area(0, 0, 400, 400);
        assert!(editor.export("jpeg", 90, None).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_get_blob_jpeg() {
        let mut editor = loaded_editor();
        editor.set_crop_area(0, 0, 400, 400);

        let bytes = editor.get_blob("jpeg", 90).unwrap();

        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_preview_fill_mode() {
        let mut editor = loaded_editor();
        editor.set_mode("fill").unwrap();

        let out = editor.preview(1).unwrap();

        assert_eq!(out.width(), 1920);
        assert_eq!(out.height(), 1080);
    }

    #[wasm_bindgen_test]
    fn test_custom_aspect_filename_label() {
        let mut editor = loaded_editor();
        editor.set_mode("fill").unwrap();
        editor.set_custom_aspect(2.0).unwrap();

        let blob = editor.export("png", 90, None).unwrap();

        assert!(blob.filename().starts_with("image_2_"));
    }
}
