//! SnapCrop Core - Crop and fill engine
//!
//! This crate provides the core image functionality for SnapCrop: decoding
//! and validating uploads, aspect-ratio frame geometry, crop extraction,
//! fill compositing with pan, and export encoding.

use std::str::FromStr;

pub mod aspect;
pub mod color;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod render;
pub mod session;

pub use aspect::AspectRatio;
pub use color::FillColor;
pub use encode::ExportFormat;
pub use export::{ExportRequest, ExportedBlob, FileSaver};
pub use geometry::{CropRect, CropShape, FillGeometry, PanOffset};
pub use render::FilterType;
pub use session::Session;

/// Editing mode: cut a region out of the image, or fit the whole image
/// into a padded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Extract a crop area at source resolution
    #[default]
    Crop,
    /// Contain-scale the image into the aspect's frame with a background
    Fill,
}

impl Mode {
    /// Wire name of the mode ("crop" or "fill").
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Crop => "crop",
            Mode::Fill => "fill",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crop" => Ok(Mode::Crop),
            "fill" => Ok(Mode::Fill),
            other => Err(format!("Unknown mode: {other:?}")),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
