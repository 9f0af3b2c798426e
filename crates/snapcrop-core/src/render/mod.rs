//! Compositing pipeline: crop extraction and fill layout rendering.
//!
//! Both renderers take a decoded source and produce an RGBA `PixelBuffer`
//! sized to their target: the crop rectangle in crop mode, the aspect
//! frame in fill mode. Outputs go straight to the encoders.

mod crop;
mod fill;

pub use crop::render_crop;
pub use fill::render_fill;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Crop rectangle has zero area.
    #[error("Crop area is empty")]
    EmptyCropArea,

    /// Source buffer length does not match its stated dimensions.
    #[error("Source image buffer is invalid")]
    InvalidSourceImage,
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_default_filter_is_bilinear() {
        assert_eq!(FilterType::default(), FilterType::Bilinear);
    }
}
