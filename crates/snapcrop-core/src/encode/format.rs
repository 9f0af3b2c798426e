//! Export format selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output container for exports.
///
/// JPEG is the default. Formats without alpha support get overridden to
/// PNG by the export pipeline whenever the rendered result can contain
/// transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossy JPEG, no alpha channel.
    #[default]
    Jpeg,
    /// Lossless PNG with alpha.
    Png,
    /// Lossless WebP with alpha.
    WebP,
}

impl ExportFormat {
    /// Wire name as used by front ends (`"jpeg"`, `"png"`, `"webp"`).
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
            ExportFormat::WebP => "webp",
        }
    }

    /// MIME type for the encoded blob.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
            ExportFormat::WebP => "image/webp",
        }
    }

    /// File extension without the dot. JPEG uses the short `jpg` form.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::WebP => "webp",
        }
    }

    /// True when the container can carry an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }

    /// True when encoding does not discard pixel data. WebP counts because
    /// the encoder here only emits lossless WebP.
    pub fn is_lossless(&self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "png" => Ok(ExportFormat::Png),
            "webp" => Ok(ExportFormat::WebP),
            other => Err(format!("Unknown export format: {other:?}")),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
