//! Export pipeline: format resolution, filename synthesis and saving.
//!
//! Rendering produces an RGBA frame; this module handles everything after
//! that. It resolves the final container format (transparent output must
//! never land in JPEG), builds the download filename, and hands the encoded
//! blob to a [`FileSaver`] collaborator. The core never touches the
//! filesystem or the DOM itself.

use thiserror::Error;

use crate::aspect::AspectRatio;
use crate::encode::{EncodeError, ExportFormat};
use crate::geometry::GeometryError;
use crate::render::RenderError;

/// Default export quality in percent, matching the editor's slider default.
pub const DEFAULT_QUALITY: u8 = 90;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export was requested in crop mode before any crop area was set
    #[error("No crop area defined")]
    NoActiveCropArea,

    /// Frame layout failed
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Rendering the output frame failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Encoding the rendered frame failed
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The save collaborator reported a failure
    #[error("Save error: {0}")]
    Save(#[from] SaveError),
}

/// Errors reported by a [`FileSaver`] implementation.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The blob could not be delivered to its destination
    #[error("Failed to save {filename}: {message}")]
    Failed { filename: String, message: String },
}

/// Parameters for a single export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Requested container format (may be overridden, see
    /// [`resolve_format`])
    pub format: ExportFormat,
    /// Quality in percent (0-100); only meaningful for JPEG
    pub quality: u8,
    /// Explicit filename; when `None` one is synthesized from the aspect
    /// ratio and a timestamp
    pub filename: Option<String>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        ExportRequest {
            format: ExportFormat::default(),
            quality: DEFAULT_QUALITY,
            filename: None,
        }
    }
}

/// A fully encoded export, ready to be saved or handed to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedBlob {
    /// Encoded file contents
    pub bytes: Vec<u8>,
    /// Format the bytes were actually encoded in (after alpha override)
    pub format: ExportFormat,
    /// Suggested download filename, including extension
    pub filename: String,
}

impl ExportedBlob {
    /// MIME type matching the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Resolve the format an export will actually be encoded in.
///
/// When the rendered frame carries transparency (round crop, or fill with a
/// transparent background) and the requested format cannot store an alpha
/// channel, the format is overridden to PNG. Alpha-capable requests pass
/// through unchanged.
pub fn resolve_format(requested: ExportFormat, needs_alpha: bool) -> ExportFormat {
    if needs_alpha && !requested.supports_alpha() {
        ExportFormat::Png
    } else {
        requested
    }
}

/// Build the default download filename: `image_<aspect>_<timestamp>.<ext>`.
///
/// The aspect label uses `x` instead of `:` so the name stays safe on every
/// filesystem, e.g. `image_16x9_1724630400000.jpg`.
pub fn default_filename(aspect: AspectRatio, format: ExportFormat, timestamp_ms: u64) -> String {
    format!(
        "image_{}_{}.{}",
        aspect.file_label(),
        timestamp_ms,
        format.extension()
    )
}

/// Delivers an encoded blob to its destination.
///
/// In the browser this is a download trigger; natively it is a file write.
/// Implementations receive the blob with its final format and filename
/// already resolved.
pub trait FileSaver {
    /// Save the blob, consuming it logically (the caller keeps ownership).
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] when the destination rejects the blob.
    fn save(&mut self, blob: &ExportedBlob) -> Result<(), SaveError>;
}
