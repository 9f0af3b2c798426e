//! Crop rectangles and shapes in source pixel coordinates.
//!
//! A crop area comes from interactive selection, so its origin is signed:
//! the rectangle may hang past the source edges while dragging. The
//! renderer only samples the overlapping part and leaves the rest
//! transparent, which [`CropRect::source_overlap`] computes here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GeometryError;
use crate::aspect::AspectRatio;

/// Crop area shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropShape {
    /// Straight-edged rectangle.
    #[default]
    Rect,
    /// Ellipse inscribed in the crop rectangle.
    Round,
}

impl CropShape {
    /// Wire name as used by front ends (`"rect"` / `"round"`).
    pub fn name(&self) -> &'static str {
        match self {
            CropShape::Rect => "rect",
            CropShape::Round => "round",
        }
    }
}

impl FromStr for CropShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(CropShape::Rect),
            "round" => Ok(CropShape::Round),
            other => Err(format!("Unknown crop shape: {other:?}")),
        }
    }
}

/// Crop area in source pixel coordinates.
///
/// The origin is signed so the rectangle can overhang the source image;
/// `width` and `height` are the output dimensions of the cropped result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Intersection of a crop rectangle with the source image.
///
/// `src_*` locate the copied region in the source, `dest_*` locate it in
/// the crop output. Both regions share `width` and `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropOverlap {
    pub src_x: u32,
    pub src_y: u32,
    pub dest_x: u32,
    pub dest_y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Part of this rectangle that overlaps the source image, or None when
    /// they are disjoint (or the rectangle is empty).
    pub fn source_overlap(&self, source_width: u32, source_height: u32) -> Option<CropOverlap> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = (self.x as i64 + self.width as i64).min(source_width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(source_height as i64);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(CropOverlap {
            src_x: x0 as u32,
            src_y: y0 as u32,
            dest_x: (x0 - self.x as i64) as u32,
            dest_y: (y0 - self.y as i64) as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Largest crop rectangle of the given aspect, centered in the source.
///
/// This is the initial selection before the user adjusts it: full height
/// with trimmed sides when the source is wider than the target ratio, full
/// width with trimmed top and bottom otherwise.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSourceDimensions`] when either source
/// edge is zero.
pub fn centered_crop_rect(
    source_width: u32,
    source_height: u32,
    aspect: AspectRatio,
) -> Result<CropRect, GeometryError> {
    if source_width == 0 || source_height == 0 {
        return Err(GeometryError::InvalidSourceDimensions {
            width: source_width,
            height: source_height,
        });
    }

    let ratio = aspect.value();
    let source_ratio = source_width as f64 / source_height as f64;

    let (width, height) = if source_ratio > ratio {
        // Source wider than target: keep full height, trim the sides
        let h = source_height;
        let w = ((h as f64 * ratio).round() as u32).clamp(1, source_width);
        (w, h)
    } else {
        // Source taller (or equal): keep full width, trim top and bottom
        let w = source_width;
        let h = ((w as f64 / ratio).round() as u32).clamp(1, source_height);
        (w, h)
    };

    let x = ((source_width - width) / 2) as i32;
    let y = ((source_height - height) / 2) as i32;

    Ok(CropRect::new(x, y, width, height))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
