//! Frame and crop geometry.
//!
//! Pure integer math shared by the renderer and an interactive front end:
//! fill mode layout (scale-to-fit, centering, pan limits) and crop
//! rectangles in source pixel coordinates. Nothing here touches pixels,
//! which keeps the contracts cheap to test natively.

mod crop;
mod fill;

pub use crop::{centered_crop_rect, CropOverlap, CropRect, CropShape};
pub use fill::{FillGeometry, PanOffset};

use thiserror::Error;

/// Error types for geometry calculations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Source width or height is zero.
    #[error("Invalid source dimensions: {width}x{height}")]
    InvalidSourceDimensions { width: u32, height: u32 },
}
