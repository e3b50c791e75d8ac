//! Theme service for the Easter palette.

use anyhow::Result;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Palette file contents, colors as "#RRGGBB".
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteFile {
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub card: String,
    pub muted: String,
}

/// Theme with ratatui colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Screen background (dark blue).
    pub background: Color,
    /// Typed text.
    pub foreground: Color,
    /// Title, button and sample text (orange).
    pub accent: Color,
    /// Sample row background (translucent pink).
    pub card: Color,
    /// Placeholder and headings (70% white).
    pub muted: Color,
}

impl Theme {
    /// Load theme from an optional palette file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => Self::from_file(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "invalid theme file, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load theme from a specific file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let palette: PaletteFile = serde_json::from_str(&content)?;
        Ok(Self::from_palette(palette))
    }

    /// Convert a palette file to a theme.
    fn from_palette(palette: PaletteFile) -> Self {
        Self {
            background: parse_hex(&palette.background),
            foreground: parse_hex(&palette.foreground),
            accent: parse_hex(&palette.accent),
            card: parse_hex(&palette.card),
            muted: parse_hex(&palette.muted),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x0d, 0x1b, 0x2a),
            foreground: Color::White,
            accent: Color::Rgb(0xff, 0x98, 0x00),
            // Pink40 at 20% over the background
            card: Color::Rgb(0x2a, 0x2a, 0x3d),
            muted: Color::Rgb(0xb3, 0xb3, 0xb3),
        }
    }
}

/// Parse a hex color string like "#RRGGBB" to a ratatui Color.
fn parse_hex(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::White;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    Color::Rgb(r, g, b)
}
