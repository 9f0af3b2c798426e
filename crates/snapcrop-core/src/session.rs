//! Editing session state.
//!
//! A [`Session`] tracks everything the editor UI manipulates between loading
//! an image and exporting it: mode, aspect ratio, crop area, crop shape,
//! fill color, zoom and pan. The session never owns pixel data; callers keep
//! the decoded [`PixelBuffer`] and pass it in for rendering and export.
//!
//! State changes that invalidate the current view (new image, new mode, new
//! aspect ratio) reset pan, zoom and the crop area so stale coordinates can
//! never leak into the next layout.

use crate::aspect::AspectRatio;
use crate::color::FillColor;
use crate::decode::PixelBuffer;
use crate::encode::encode_image;
use crate::export::{
    default_filename, resolve_format, ExportError, ExportRequest, ExportedBlob, FileSaver,
};
use crate::geometry::{
    centered_crop_rect, CropRect, CropShape, FillGeometry, GeometryError, PanOffset,
};
use crate::render::{render_crop, render_fill, FilterType};
use crate::Mode;

/// Minimum zoom factor (1:1 view).
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Mutable editing state for one loaded image.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    aspect: AspectRatio,
    crop_shape: CropShape,
    fill_color: FillColor,
    zoom: f64,
    pan: PanOffset,
    crop_area: Option<CropRect>,
    source_size: Option<(u32, u32)>,
}

impl Session {
    /// Create a session with default settings and no image loaded.
    pub fn new() -> Self {
        Session {
            mode: Mode::default(),
            aspect: AspectRatio::default(),
            crop_shape: CropShape::default(),
            fill_color: FillColor::default(),
            zoom: MIN_ZOOM,
            pan: PanOffset::ZERO,
            crop_area: None,
            source_size: None,
        }
    }

    /// Record the dimensions of a newly loaded image and reset the view.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSourceDimensions`] when either edge
    /// is zero.
    pub fn load_source(&mut self, width: u32, height: u32) -> Result<(), GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidSourceDimensions { width, height });
        }
        self.source_size = Some((width, height));
        self.reset_view();
        Ok(())
    }

    /// Switch between crop and fill mode.
    ///
    /// Switching resets pan, zoom and crop area; setting the current mode
    /// again is a no-op.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.reset_view();
        }
    }

    /// Change the target aspect ratio.
    ///
    /// Changing the aspect resets pan, zoom and crop area since all three
    /// are only meaningful relative to the previous frame layout.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        if aspect != self.aspect {
            self.aspect = aspect;
            self.reset_view();
        }
    }

    /// Change the crop shape. The crop area is kept.
    pub fn set_crop_shape(&mut self, shape: CropShape) {
        self.crop_shape = shape;
    }

    /// Change the fill background color. View state is kept.
    pub fn set_fill_color(&mut self, color: FillColor) {
        self.fill_color = color;
    }

    /// Set the zoom factor, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Record the crop area selected in the UI.
    pub fn set_crop_area(&mut self, area: CropRect) {
        self.crop_area = Some(area);
    }

    /// Move the fill pan by a delta, clamping the result to the movable
    /// range. Returns the pan actually stored.
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded, since the movable range depends on
    /// the fill layout.
    pub fn pan_by(&mut self, dx: i32, dy: i32) -> Result<PanOffset, GeometryError> {
        let target = PanOffset::new(
            self.pan.x.saturating_add(dx),
            self.pan.y.saturating_add(dy),
        );
        self.set_pan(target)
    }

    /// Set the fill pan to an absolute offset, clamping it to the movable
    /// range. Returns the pan actually stored.
    ///
    /// # Errors
    ///
    /// Fails when no image is loaded.
    pub fn set_pan(&mut self, pan: PanOffset) -> Result<PanOffset, GeometryError> {
        let geometry = self.fill_geometry()?;
        self.pan = geometry.clamp_pan(pan);
        Ok(self.pan)
    }

    /// Reset pan, zoom and crop area without touching mode, aspect, shape
    /// or color. Matches a double-click on the fill canvas.
    pub fn reset(&mut self) {
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.pan = PanOffset::ZERO;
        self.zoom = MIN_ZOOM;
        self.crop_area = None;
    }

    /// Fill layout for the loaded image under the current aspect ratio.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::InvalidSourceDimensions`] when no image
    /// is loaded.
    pub fn fill_geometry(&self) -> Result<FillGeometry, GeometryError> {
        let (width, height) = self.source_size.unwrap_or((0, 0));
        FillGeometry::compute(width, height, self.aspect)
    }

    /// Largest centered crop area with the current aspect ratio.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::InvalidSourceDimensions`] when no image
    /// is loaded.
    pub fn default_crop_area(&self) -> Result<CropRect, GeometryError> {
        let (width, height) = self.source_size.unwrap_or((0, 0));
        centered_crop_rect(width, height, self.aspect)
    }

    /// Whether the current settings produce output with transparency.
    ///
    /// True for a round crop, and for fill with a transparent background.
    /// Export uses this to keep transparent output out of JPEG.
    pub fn needs_alpha(&self) -> bool {
        match self.mode {
            Mode::Crop => self.crop_shape == CropShape::Round,
            Mode::Fill => self.fill_color.has_alpha(),
        }
    }

    /// Render the output frame for the current mode and settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoActiveCropArea`] in crop mode before a crop
    /// area has been set; geometry and render failures are forwarded.
    pub fn render(
        &self,
        source: &PixelBuffer,
        filter: FilterType,
    ) -> Result<PixelBuffer, ExportError> {
        match self.mode {
            Mode::Crop => {
                let area = self.crop_area.ok_or(ExportError::NoActiveCropArea)?;
                Ok(render_crop(source, &area, self.crop_shape)?)
            }
            Mode::Fill => {
                let geometry = FillGeometry::compute(source.width, source.height, self.aspect)?;
                Ok(render_fill(
                    source,
                    &geometry,
                    self.pan,
                    self.fill_color,
                    filter,
                )?)
            }
        }
    }

    /// Render and encode the current frame.
    ///
    /// The requested format is overridden to PNG when the frame carries
    /// transparency the format cannot store. When the request has no
    /// filename, one is synthesized from the aspect label, `timestamp_ms`
    /// and the final format's extension.
    ///
    /// # Errors
    ///
    /// Forwards render and encode failures; see [`Session::render`].
    pub fn export(
        &self,
        source: &PixelBuffer,
        request: &ExportRequest,
        timestamp_ms: u64,
    ) -> Result<ExportedBlob, ExportError> {
        let frame = self.render(source, FilterType::Lanczos3)?;
        let format = resolve_format(request.format, self.needs_alpha());
        let bytes = encode_image(&frame, format, request.quality)?;
        let filename = match &request.filename {
            Some(name) => name.clone(),
            None => default_filename(self.aspect, format, timestamp_ms),
        };
        Ok(ExportedBlob {
            bytes,
            format,
            filename,
        })
    }

    /// Export and hand the blob to a [`FileSaver`]. Returns the blob so the
    /// caller can inspect what was saved.
    ///
    /// # Errors
    ///
    /// Forwards export failures and [`crate::export::SaveError`] from the
    /// saver.
    pub fn export_to<S: FileSaver>(
        &self,
        source: &PixelBuffer,
        request: &ExportRequest,
        timestamp_ms: u64,
        saver: &mut S,
    ) -> Result<ExportedBlob, ExportError> {
        let blob = self.export(source, request, timestamp_ms)?;
        saver.save(&blob)?;
        Ok(blob)
    }

    /// Current editing mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current target aspect ratio.
    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// Current crop shape.
    pub fn crop_shape(&self) -> CropShape {
        self.crop_shape
    }

    /// Current fill background color.
    pub fn fill_color(&self) -> FillColor {
        self.fill_color
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current fill pan offset.
    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    /// Crop area selected in the UI, if any.
    pub fn crop_area(&self) -> Option<CropRect> {
        self.crop_area
    }

    /// Dimensions of the loaded image, if any.
    pub fn source_size(&self) -> Option<(u32, u32)> {
        self.source_size
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
