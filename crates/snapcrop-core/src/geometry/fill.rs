//! Fill mode layout: scale-to-fit, centering and pan limits.
//!
//! The source image is scaled so it fits entirely inside the output frame
//! (contain fit), leaving background bands on the slack axis. The user can
//! pan the image along that axis up to the point where it touches a frame
//! edge. All results are integer pixels; scaling rounds to the nearest
//! pixel and centering rounds down on the odd-slack side.

use serde::{Deserialize, Serialize};

use super::GeometryError;
use crate::aspect::AspectRatio;

/// User pan offset from the centered position, in frame pixels.
///
/// Positive x moves the image right, positive y moves it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: i32,
    pub y: i32,
}

impl PanOffset {
    pub const ZERO: PanOffset = PanOffset { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Complete fill mode layout for one source image and aspect ratio.
///
/// # Example
///
/// ```ignore
/// use snapcrop_core::aspect::AspectRatio;
/// use snapcrop_core::geometry::FillGeometry;
///
/// // A wide panorama in a square frame leaves bands above and below
/// let geo = FillGeometry::compute(4000, 2000, AspectRatio::Square).unwrap();
/// assert_eq!((geo.scaled_width, geo.scaled_height), (1080, 540));
/// assert_eq!((geo.fill_top, geo.fill_bottom), (270, 270));
/// assert_eq!(geo.max_move_y, 270);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillGeometry {
    /// Output frame width in pixels.
    pub frame_width: u32,
    /// Output frame height in pixels.
    pub frame_height: u32,
    /// Scaled image width after contain fit.
    pub scaled_width: u32,
    /// Scaled image height after contain fit.
    pub scaled_height: u32,
    /// Background band left of the centered image.
    pub fill_left: u32,
    /// Background band right of the centered image.
    pub fill_right: u32,
    /// Background band above the centered image.
    pub fill_top: u32,
    /// Background band below the centered image.
    pub fill_bottom: u32,
    /// True when the image is narrower than the frame.
    pub can_move_x: bool,
    /// True when the image is shorter than the frame.
    pub can_move_y: bool,
    /// Maximum pan distance from center along x, in pixels.
    pub max_move_x: u32,
    /// Maximum pan distance from center along y, in pixels.
    pub max_move_y: u32,
}

impl FillGeometry {
    /// Compute the fill layout for a source image inside the aspect's frame.
    ///
    /// The scale factor is `min(frame_w / source_w, frame_h / source_h)`, so
    /// the scaled image touches the frame exactly on at least one axis.
    /// Scaled edges round to the nearest pixel; band splits round down, so
    /// an odd slack puts the extra pixel on the right/bottom band.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSourceDimensions`] when either source
    /// edge is zero.
    pub fn compute(
        source_width: u32,
        source_height: u32,
        aspect: AspectRatio,
    ) -> Result<Self, GeometryError> {
        if source_width == 0 || source_height == 0 {
            return Err(GeometryError::InvalidSourceDimensions {
                width: source_width,
                height: source_height,
            });
        }

        let (frame_width, frame_height) = aspect.frame_size();

        // Contain fit: the smaller ratio keeps both edges inside the frame
        let scale_x = frame_width as f64 / source_width as f64;
        let scale_y = frame_height as f64 / source_height as f64;
        let scale = scale_x.min(scale_y);

        let scaled_width = (source_width as f64 * scale).round() as u32;
        let scaled_height = (source_height as f64 * scale).round() as u32;

        let slack_x = frame_width.saturating_sub(scaled_width);
        let slack_y = frame_height.saturating_sub(scaled_height);

        let fill_left = slack_x / 2;
        let fill_right = slack_x - fill_left;
        let fill_top = slack_y / 2;
        let fill_bottom = slack_y - fill_top;

        let can_move_x = scaled_width < frame_width;
        let can_move_y = scaled_height < frame_height;
        let max_move_x = if can_move_x { slack_x / 2 } else { 0 };
        let max_move_y = if can_move_y { slack_y / 2 } else { 0 };

        Ok(Self {
            frame_width,
            frame_height,
            scaled_width,
            scaled_height,
            fill_left,
            fill_right,
            fill_top,
            fill_bottom,
            can_move_x,
            can_move_y,
            max_move_x,
            max_move_y,
        })
    }

    /// Clamp a pan offset to the movement limits of this layout.
    ///
    /// Axes without slack clamp to zero, so a perfectly fitting image
    /// cannot move at all.
    pub fn clamp_pan(&self, pan: PanOffset) -> PanOffset {
        let max_x = self.max_move_x.min(i32::MAX as u32) as i32;
        let max_y = self.max_move_y.min(i32::MAX as u32) as i32;
        PanOffset {
            x: pan.x.clamp(-max_x, max_x),
            y: pan.y.clamp(-max_y, max_y),
        }
    }

    /// Top-left corner where the scaled image is drawn for a given pan.
    pub fn draw_origin(&self, pan: PanOffset) -> (i64, i64) {
        (
            self.fill_left as i64 + pan.x as i64,
            self.fill_top as i64 + pan.y as i64,
        )
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
