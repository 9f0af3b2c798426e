//! Crop rendering: extract a rectangle from the source at 1:1 scale.
//!
//! Output dimensions always equal the crop rectangle. Where the rectangle
//! hangs past the source edges the output stays transparent, and a round
//! shape additionally clears everything outside the inscribed ellipse.

use super::RenderError;
use crate::decode::PixelBuffer;
use crate::geometry::{CropRect, CropShape};

/// Render a crop area from the source image.
///
/// Pixels are copied without resampling. The overlap of `area` with the
/// source is copied row by row; any part of the output the source does not
/// cover is left fully transparent.
///
/// # Arguments
///
/// * `source` - Decoded source image
/// * `area` - Crop rectangle in source pixel coordinates
/// * `shape` - Rectangular output, or with an ellipse mask applied
///
/// # Returns
///
/// A new `PixelBuffer` with dimensions `area.width` x `area.height`.
///
/// # Errors
///
/// Returns `RenderError::EmptyCropArea` when the rectangle has no area and
/// `RenderError::InvalidSourceImage` when the source buffer is malformed.
///
/// # Example
///
/// ```ignore
/// use snapcrop_core::decode::PixelBuffer;
/// use snapcrop_core::geometry::{CropRect, CropShape};
/// use snapcrop_core::render::render_crop;
///
/// let source = PixelBuffer::filled(400, 300, [9, 9, 9, 255]);
/// let out = render_crop(&source, &CropRect::new(50, 50, 100, 100), CropShape::Rect).unwrap();
/// assert_eq!((out.width, out.height), (100, 100));
/// ```
pub fn render_crop(
    source: &PixelBuffer,
    area: &CropRect,
    shape: CropShape,
) -> Result<PixelBuffer, RenderError> {
    if area.is_empty() {
        return Err(RenderError::EmptyCropArea);
    }

    let expected = (source.width as usize) * (source.height as usize) * 4;
    if source.pixels.len() != expected {
        return Err(RenderError::InvalidSourceImage);
    }

    let mut output = PixelBuffer::transparent(area.width, area.height);

    if let Some(overlap) = area.source_overlap(source.width, source.height) {
        let src_stride = source.width as usize * 4;
        let dst_stride = area.width as usize * 4;
        let row_bytes = overlap.width as usize * 4;

        // Copy pixel data row by row for efficiency
        for row in 0..overlap.height as usize {
            let src_start =
                (overlap.src_y as usize + row) * src_stride + overlap.src_x as usize * 4;
            let dst_start =
                (overlap.dest_y as usize + row) * dst_stride + overlap.dest_x as usize * 4;

            output.pixels[dst_start..dst_start + row_bytes]
                .copy_from_slice(&source.pixels[src_start..src_start + row_bytes]);
        }
    }

    if shape == CropShape::Round {
        apply_round_mask(&mut output);
    }

    Ok(output)
}

/// Clear every pixel outside the ellipse inscribed in the buffer.
///
/// A pixel survives when its center lies inside the ellipse, so the edge
/// is hard: no feathering and no partial alpha. Pixels on the boundary
/// itself (normalized distance exactly 1) are kept.
fn apply_round_mask(buffer: &mut PixelBuffer) {
    let rx = buffer.width as f64 / 2.0;
    let ry = buffer.height as f64 / 2.0;
    let stride = buffer.width as usize * 4;

    for y in 0..buffer.height {
        // Normalized offset of the pixel center from the ellipse center
        let ny = (y as f64 + 0.5 - ry) / ry;
        let row_start = y as usize * stride;

        for x in 0..buffer.width {
            let nx = (x as f64 + 0.5 - rx) / rx;
            if nx * nx + ny * ny > 1.0 {
                let idx = row_start + x as usize * 4;
                buffer.pixels[idx..idx + 4].fill(0);
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
