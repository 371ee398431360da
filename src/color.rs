use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use thiserror::Error;

use crate::data::model::ClusterId;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("invalid hex colour {value:?}: {reason}")]
    InvalidHex { value: String, reason: String },
    #[error("expected {expected} cluster colours, got {got}")]
    WrongCount { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// Hex parsing and shading
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (or `rrggbb`) into an egui colour.
pub fn parse_hex(value: &str) -> Result<Color32, ColorError> {
    let rgb: Srgb<u8> = value.trim().parse().map_err(|e| ColorError::InvalidHex {
        value: value.to_string(),
        reason: format!("{e}"),
    })?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// A darker variant of `fill` for bar outlines.
pub fn outline_for(fill: Color32) -> Color32 {
    let rgb = Srgb::new(fill.r(), fill.g(), fill.b()).into_format::<f32>();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness - 0.2).max(0.0);
    let out: Srgb = hsl.into_color();
    Color32::from_rgb(
        (out.red * 255.0).round() as u8,
        (out.green * 255.0).round() as u8,
        (out.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Resolved colours for every chart on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColors {
    pub line: Color32,
    pub background: Color32,
    clusters: [Color32; 4],
}

impl Default for ChartColors {
    fn default() -> Self {
        let highlight = Color32::from_rgb(0x64, 0xB5, 0xF6);
        let muted = Color32::from_rgb(0x80, 0x80, 0x80);
        ChartColors {
            line: highlight,
            background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            clusters: [highlight, highlight, muted, muted],
        }
    }
}

impl ChartColors {
    /// Build from hex strings; exactly four cluster colours are required.
    pub fn from_hex(line: &str, background: &str, clusters: &[String]) -> Result<Self, ColorError> {
        if clusters.len() != ClusterId::ALL.len() {
            return Err(ColorError::WrongCount {
                expected: ClusterId::ALL.len(),
                got: clusters.len(),
            });
        }
        let mut resolved = [Color32::GRAY; 4];
        for (slot, hex) in resolved.iter_mut().zip(clusters) {
            *slot = parse_hex(hex)?;
        }
        Ok(ChartColors {
            line: parse_hex(line)?,
            background: parse_hex(background)?,
            clusters: resolved,
        })
    }

    pub fn cluster(&self, id: ClusterId) -> Color32 {
        self.clusters[id.get() as usize]
    }
}
