//! Color utilities for waveform drawing.

use std::sync::OnceLock;

use regex::Regex;

static HEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_regex() -> &'static Regex {
    HEX_REGEX.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("invalid regex pattern")
    })
}

/// RGB color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a new color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive).
    ///
    /// Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex_regex().captures(hex)?.get(1)?.as_str();
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        let rgb = if digits.len() == 3 {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = channel(&c.to_string())?;
                out[i] = v * 17;
            }
            out
        } else {
            [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ]
        };
        Some(Self::from_rgb8(rgb))
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Move `t` of the way toward white.
    pub fn lighten(&self, t: f64) -> Color {
        self.lerp(&Color::white(), t)
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex_six_digits() {
        assert_eq!(Color::from_hex("#00FF00").unwrap().to_rgb8(), [0, 255, 0]);
        assert_eq!(Color::from_hex("#00ffff").unwrap().to_rgb8(), [0, 255, 255]);
        assert_eq!(Color::from_hex("#1a2B3c").unwrap().to_rgb8(), [0x1a, 0x2b, 0x3c]);
    }

    #[test]
    fn test_from_hex_three_digits() {
        assert_eq!(Color::from_hex("#0f0").unwrap().to_rgb8(), [0, 255, 0]);
        assert_eq!(Color::from_hex("#abc").unwrap().to_rgb8(), [0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "#", "00FF00", "#00FF0", "#00FF000", "#GG0000", "green", "#ff 000"] {
            assert!(Color::from_hex(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn test_lerp_and_lighten() {
        let black = Color::black();
        let white = Color::white();
        assert_eq!(black.lerp(&white, 0.5).to_rgb8(), [128, 128, 128]);
        assert_eq!(black.lerp(&white, 2.0), white);
        assert_eq!(Color::from_hex("#00FF00").unwrap().lighten(0.5).to_rgb8(), [128, 255, 128]);
    }

    #[test]
    fn test_rgb8_roundtrip() {
        let c = Color::from_rgb8([12, 34, 56]);
        assert_eq!(c.to_rgb8(), [12, 34, 56]);
    }
}
