//! Fill color parsing: hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`),
//! CSS functional forms (`rgb()`, `rgba()`) and the `transparent` keyword.
//!
//! Fill mode paints the frame with this color before compositing the
//! image on top. `Transparent` leaves the frame unpainted, which forces
//! PNG output at export time since JPEG cannot carry alpha.

use std::str::FromStr;

use thiserror::Error;

/// Error from fill color parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    /// Not a recognized hex, functional, or keyword form.
    #[error("Invalid fill color: {0:?}")]
    Invalid(String),
}

/// Background color for fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillColor {
    /// No background paint; exposed frame area stays fully transparent.
    Transparent,
    /// Solid sRGB color with alpha.
    Solid { r: u8, g: u8, b: u8, a: u8 },
}

/// Picker presets in display order. Format: (label, color).
pub const PRESET_COLORS: [(&str, FillColor); 4] = [
    ("White", FillColor::WHITE),
    ("Black", FillColor::BLACK),
    (
        "Light Gray",
        FillColor::Solid {
            r: 245,
            g: 245,
            b: 245,
            a: 255,
        },
    ),
    ("Transparent", FillColor::Transparent),
];

impl FillColor {
    pub const WHITE: FillColor = FillColor::Solid {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub const BLACK: FillColor = FillColor::Solid {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// True when any composited output can contain non-opaque pixels.
    pub fn has_alpha(&self) -> bool {
        match self {
            FillColor::Transparent => true,
            FillColor::Solid { a, .. } => *a < 255,
        }
    }

    /// RGBA bytes for painting. `Transparent` maps to `[0, 0, 0, 0]`.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            FillColor::Transparent => [0, 0, 0, 0],
            FillColor::Solid { r, g, b, a } => [r, g, b, a],
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        FillColor::WHITE
    }
}

impl FromStr for FillColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Invalid(s.to_string()));
        }

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(FillColor::Transparent);
        }

        if let Some(color) = parse_functional(trimmed) {
            return Ok(color);
        }

        // Strip optional leading '#'
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        parse_hex(hex).ok_or_else(|| ColorError::Invalid(s.to_string()))
    }
}

impl std::fmt::Display for FillColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillColor::Transparent => write!(f, "transparent"),
            FillColor::Solid { r, g, b, a: 255 } => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            FillColor::Solid { r, g, b, a } => {
                write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
            }
        }
    }
}

fn parse_hex(hex: &str) -> Option<FillColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            // RGB → RRGGBB, alpha = FF
            let r = expand_nibble(bytes[0])?;
            let g = expand_nibble(bytes[1])?;
            let b = expand_nibble(bytes[2])?;
            Some(FillColor::Solid { r, g, b, a: 255 })
        }
        4 => {
            // RGBA → RRGGBBAA
            let r = expand_nibble(bytes[0])?;
            let g = expand_nibble(bytes[1])?;
            let b = expand_nibble(bytes[2])?;
            let a = expand_nibble(bytes[3])?;
            Some(FillColor::Solid { r, g, b, a })
        }
        6 => {
            let r = parse_byte(&hex[0..2])?;
            let g = parse_byte(&hex[2..4])?;
            let b = parse_byte(&hex[4..6])?;
            Some(FillColor::Solid { r, g, b, a: 255 })
        }
        8 => {
            let r = parse_byte(&hex[0..2])?;
            let g = parse_byte(&hex[2..4])?;
            let b = parse_byte(&hex[4..6])?;
            let a = parse_byte(&hex[6..8])?;
            Some(FillColor::Solid { r, g, b, a })
        }
        _ => None,
    }
}

/// Parse `rgb(r, g, b)` and `rgba(r, g, b, a)` with a 0.0..=1.0 alpha.
fn parse_functional(s: &str) -> Option<FillColor> {
    let lower = s.to_ascii_lowercase();
    let (body, expect_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != if expect_alpha { 4 } else { 3 } {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if expect_alpha {
        let alpha = parts[3].parse::<f64>().ok()?;
        if !alpha.is_finite() {
            return None;
        }
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };

    Some(FillColor::Solid { r, g, b, a })
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(s: &str) -> Option<u8> {
    let hi = hex_val(s.as_bytes()[0])?;
    let lo = hex_val(s.as_bytes()[1])?;
    Some(hi << 4 | lo)
}
