//! Fill rendering: paint the frame background, then composite the scaled
//! source at its panned position.
//!
//! The layout (scale, centering, pan limits) comes from [`FillGeometry`];
//! this module only executes it. The pan offset is used as given, so
//! callers clamp it with [`FillGeometry::clamp_pan`] beforehand.

use image::{imageops, Rgba, RgbaImage};

use super::{FilterType, RenderError};
use crate::color::FillColor;
use crate::decode::PixelBuffer;
use crate::geometry::{FillGeometry, PanOffset};

/// Render a fill mode frame.
///
/// The frame is painted with `color` (or left fully transparent), the
/// source is resampled to the layout's scaled size, and the result is
/// alpha-composited at the centered position shifted by `pan`.
///
/// # Arguments
///
/// * `source` - Decoded source image
/// * `geometry` - Layout from [`FillGeometry::compute`] for this source
/// * `pan` - Offset from center, normally pre-clamped
/// * `color` - Background color behind the image
/// * `filter` - Resampling filter for the scale step
///
/// # Returns
///
/// A new `PixelBuffer` with the frame dimensions of `geometry`.
///
/// # Errors
///
/// Returns `RenderError::InvalidSourceImage` when the source buffer is
/// empty or malformed.
pub fn render_fill(
    source: &PixelBuffer,
    geometry: &FillGeometry,
    pan: PanOffset,
    color: FillColor,
    filter: FilterType,
) -> Result<PixelBuffer, RenderError> {
    if source.is_empty() {
        return Err(RenderError::InvalidSourceImage);
    }
    let source_img = source
        .to_rgba_image()
        .ok_or(RenderError::InvalidSourceImage)?;

    let mut frame = RgbaImage::from_pixel(
        geometry.frame_width,
        geometry.frame_height,
        Rgba(color.to_rgba()),
    );

    // Resample only when the contain fit actually changes the size
    let scaled = if (source.width, source.height) == (geometry.scaled_width, geometry.scaled_height)
    {
        source_img
    } else {
        imageops::resize(
            &source_img,
            geometry.scaled_width,
            geometry.scaled_height,
            filter.to_image_filter(),
        )
    };

    let (draw_x, draw_y) = geometry.draw_origin(pan);
    imageops::overlay(&mut frame, &scaled, draw_x, draw_y);

    Ok(PixelBuffer::from_rgba_image(frame))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
