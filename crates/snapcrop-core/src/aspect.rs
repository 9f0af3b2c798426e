//! Aspect ratio presets and output frame resolution.
//!
//! An aspect ratio is either one of five named presets, each bound to a
//! canonical output frame (the fixed-resolution canvas used in fill mode),
//! or an arbitrary positive width/height ratio. Custom ratios derive their
//! frame from a fixed short edge so exports keep a predictable resolution.

use thiserror::Error;

/// Short edge used when deriving an absolute frame for custom ratios.
pub const CUSTOM_FRAME_SHORT_EDGE: u32 = 1080;

/// Errors from aspect ratio construction and parsing.
#[derive(Debug, Error)]
pub enum AspectError {
    /// Ratio is non-finite or not strictly positive.
    #[error("Invalid aspect ratio: {0} (must be finite and greater than zero)")]
    InvalidRatio(f64),

    /// String is not one of the known preset names.
    #[error("Unknown aspect ratio preset: {0:?}")]
    UnknownPreset(String),
}

/// Target aspect ratio for both crop and fill modes.
///
/// Presets resolve to a fixed ratio and a canonical absolute frame size;
/// custom values resolve to the ratio only, with the frame derived from
/// [`CUSTOM_FRAME_SHORT_EDGE`].
///
/// # Example
///
/// ```ignore
/// use snapcrop_core::aspect::AspectRatio;
///
/// let wide = AspectRatio::Widescreen;
/// assert_eq!(wide.frame_size(), (1920, 1080));
///
/// let cinema = AspectRatio::custom(2.35).unwrap();
/// assert_eq!(cinema.frame_size(), (2538, 1080));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectRatio {
    /// 16:9 widescreen, 1920×1080.
    #[default]
    Widescreen,
    /// 9:16 vertical, 1080×1920.
    Vertical,
    /// 1:1 square, 1080×1080.
    Square,
    /// 4:3 standard, 1920×1440.
    Standard,
    /// 3:4 portrait, 1440×1920.
    Portrait,
    /// Arbitrary width/height ratio, validated at construction.
    Custom(f64),
}

impl AspectRatio {
    /// All named presets in toolbar order.
    pub const PRESETS: [AspectRatio; 5] = [
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
        AspectRatio::Square,
        AspectRatio::Standard,
        AspectRatio::Portrait,
    ];

    /// Create a custom aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns [`AspectError::InvalidRatio`] if `ratio` is non-finite,
    /// zero, or negative.
    pub fn custom(ratio: f64) -> Result<Self, AspectError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(AspectError::InvalidRatio(ratio));
        }
        Ok(AspectRatio::Custom(ratio))
    }

    /// Parse a preset name (`"16:9"`, `"1:1"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`AspectError::UnknownPreset`] for anything else. Custom
    /// ratios are numeric and go through [`AspectRatio::custom`] instead.
    pub fn from_preset(name: &str) -> Result<Self, AspectError> {
        match name {
            "16:9" => Ok(AspectRatio::Widescreen),
            "9:16" => Ok(AspectRatio::Vertical),
            "1:1" => Ok(AspectRatio::Square),
            "4:3" => Ok(AspectRatio::Standard),
            "3:4" => Ok(AspectRatio::Portrait),
            other => Err(AspectError::UnknownPreset(other.to_string())),
        }
    }

    /// Numeric width/height ratio.
    pub fn value(&self) -> f64 {
        match self {
            AspectRatio::Widescreen => 16.0 / 9.0,
            AspectRatio::Vertical => 9.0 / 16.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Standard => 4.0 / 3.0,
            AspectRatio::Portrait => 3.0 / 4.0,
            AspectRatio::Custom(v) => *v,
        }
    }

    /// Absolute output frame `(width, height)` in pixels.
    ///
    /// Presets use their canonical sizes. Custom ratios pin the short edge
    /// to [`CUSTOM_FRAME_SHORT_EDGE`] and round the long edge: landscape
    /// (ratio ≥ 1) frames are `round(1080 × ratio) × 1080`, portrait frames
    /// are `1080 × round(1080 / ratio)`.
    pub fn frame_size(&self) -> (u32, u32) {
        match self {
            AspectRatio::Widescreen => (1920, 1080),
            AspectRatio::Vertical => (1080, 1920),
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Standard => (1920, 1440),
            AspectRatio::Portrait => (1440, 1920),
            AspectRatio::Custom(ratio) => {
                let short = CUSTOM_FRAME_SHORT_EDGE as f64;
                if *ratio >= 1.0 {
                    ((short * ratio).round() as u32, CUSTOM_FRAME_SHORT_EDGE)
                } else {
                    (CUSTOM_FRAME_SHORT_EDGE, (short / ratio).round() as u32)
                }
            }
        }
    }

    /// Filename-safe label: preset colons become `x` (`16:9` → `16x9`),
    /// custom ratios format as trimmed decimals (`1.50` → `1.5`).
    pub fn file_label(&self) -> String {
        match self {
            AspectRatio::Custom(v) => format_ratio(*v),
            preset => preset.to_string().replace(':', "x"),
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AspectRatio::Widescreen => write!(f, "16:9"),
            AspectRatio::Vertical => write!(f, "9:16"),
            AspectRatio::Square => write!(f, "1:1"),
            AspectRatio::Standard => write!(f, "4:3"),
            AspectRatio::Portrait => write!(f, "3:4"),
            AspectRatio::Custom(v) => write!(f, "{}", format_ratio(*v)),
        }
    }
}

/// Format a ratio with two decimals, trimming trailing zeros and the dot.
fn format_ratio(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
