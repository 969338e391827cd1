//! Colors and HSL conversions.
//!
//! Two HSL conversions live here because the algorithms disagree on
//! rounding: Dots and Blockies round each channel to nearest, Jdenticon
//! truncates and applies a per-hue lightness correction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// An RGBA color with 8-bit channels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether the alpha channel is fully opaque.
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Whether the alpha channel is zero.
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex_str(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let invalid = |_| ColorParseError::InvalidDigit(s.to_string());

        match digits.len() {
            3 => Ok(Self::rgb(
                nibble(0).map_err(invalid)?,
                nibble(1).map_err(invalid)?,
                nibble(2).map_err(invalid)?,
            )),
            4 => Ok(Self::rgba(
                nibble(0).map_err(invalid)?,
                nibble(1).map_err(invalid)?,
                nibble(2).map_err(invalid)?,
                nibble(3).map_err(invalid)?,
            )),
            6 => Ok(Self::rgb(
                byte(0).map_err(invalid)?,
                byte(2).map_err(invalid)?,
                byte(4).map_err(invalid)?,
            )),
            8 => Ok(Self::rgba(
                byte(0).map_err(invalid)?,
                byte(2).map_err(invalid)?,
                byte(4).map_err(invalid)?,
                byte(6).map_err(invalid)?,
            )),
            len => Err(ColorParseError::InvalidLength {
                input: s.to_string(),
                len,
            }),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse a fill-color string, falling back to opaque black.
///
/// A malformed fill color is cosmetic: the render continues with black.
pub fn parse_fill_or_black(s: &str) -> Color {
    match Color::from_hex_str(s) {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!("unparseable fill color, using black: {}", e);
            Color::BLACK
        }
    }
}

/// A color in HSL space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation, `[0, 1]`.
    pub saturation: f64,
    /// Lightness, `[0, 1]`.
    pub lightness: f64,
}

impl Hsl {
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to an opaque sRGB color, rounding each channel to nearest.
    pub fn to_rgb(&self) -> Color {
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Color::rgb(round_channel(r + m), round_channel(g + m), round_channel(b + m))
    }
}

fn round_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn truncate_channel(v: f64) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Lightness correctors indexed by hue sextant (rounded).
///
/// Yellow and cyan read lighter than blue at equal HSL lightness.
const LIGHTNESS_CORRECTORS: [f64; 7] = [0.55, 0.5, 0.5, 0.46, 0.6, 0.55, 0.55];

/// HSL to RGB with perceptual lightness correction.
///
/// `hue` is normalized to `[0, 1)`. Channels are truncated.
pub fn corrected_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    let index = ((hue * 6.0 + 0.5).max(0.0) as usize).min(LIGHTNESS_CORRECTORS.len() - 1);
    let corrector = LIGHTNESS_CORRECTORS[index];

    let lightness = if lightness < 0.5 {
        lightness * corrector * 2.0
    } else {
        corrector + (lightness - 0.5) * (1.0 - corrector) * 2.0
    };

    truncating_hsl(hue, saturation, lightness)
}

fn truncating_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    if saturation == 0.0 {
        let v = truncate_channel(lightness);
        return Color::rgb(v, v, v);
    }

    let m2 = if lightness <= 0.5 {
        lightness * (saturation + 1.0)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = lightness * 2.0 - m2;

    Color::rgb(
        truncate_channel(hue_to_channel(m1, m2, hue * 6.0 + 2.0)),
        truncate_channel(hue_to_channel(m1, m2, hue * 6.0)),
        truncate_channel(hue_to_channel(m1, m2, hue * 6.0 - 2.0)),
    )
}

fn hue_to_channel(m1: f64, m2: f64, h: f64) -> f64 {
    let h = if h < 0.0 {
        h + 6.0
    } else if h > 6.0 {
        h - 6.0
    } else {
        h
    };

    if h < 1.0 {
        m1 + (m2 - m1) * h
    } else if h < 3.0 {
        m2
    } else if h < 4.0 {
        m1 + (m2 - m1) * (4.0 - h)
    } else {
        m1
    }
}
