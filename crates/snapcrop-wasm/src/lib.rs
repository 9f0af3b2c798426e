//! SnapCrop WASM - WebAssembly bindings for SnapCrop
//!
//! This crate provides WASM bindings to expose the snapcrop-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Upload decoding and validation bindings
//! - `geometry` - Fill layout and crop rectangle bindings
//! - `render` - Stateless crop and fill rendering bindings
//! - `snapcrop` - Stateful editor session with export
//!
//! # Usage
//!
//! ```typescript
//! import init, { SnapCrop } from '@snapcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new SnapCrop();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.load_image(bytes);
//! console.log(`Loaded ${editor.source_width}x${editor.source_height}`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod geometry;
mod render;
mod snapcrop;
mod types;

// Re-export public types
pub use decode::{
    decode_image, max_file_size, max_image_size, min_image_size, probe_dimensions,
    validate_source,
};
pub use geometry::{centered_crop_rect, clamp_pan, compute_fill_geometry};
pub use render::{preset_fill_colors, render_crop, render_fill};
pub use snapcrop::{JsExportedBlob, SnapCrop};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
