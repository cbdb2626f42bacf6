use crate::error::PhasorError;
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color, stored the way the pixel buffer stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const BLACK: Color = Color::rgb8(0, 0, 0);

    /// Opaque color from 8-bit channels
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub fn as_rgba8(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Mixes `self` over `base` with the given coverage in [0, 1]
    pub fn blend_over(self, base: Color, coverage: f64) -> Color {
        let t = coverage.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (bottom as f64 + (top as f64 - bottom as f64) * t).round() as u8
        };
        Color {
            r: mix(self.r, base.r),
            g: mix(self.g, base.g),
            b: mix(self.b, base.b),
            a: 255,
        }
    }

    /// Perceptual brightness used when several pixels compete for one cell
    pub fn luminance(self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PhasorError;

    /// Parses `#rgb` or `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PhasorError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Color::rgb8(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        crossterm::style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#ff00ff".parse::<Color>().unwrap(), Color::rgb8(255, 0, 255));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("94a3b8".parse::<Color>().unwrap(), Color::rgb8(0x94, 0xa3, 0xb8));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#ff00f".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let c = Color::rgb8(0, 255, 255);
        assert_eq!(c.to_string(), "#00ffff");
    }

    #[test]
    fn test_blend_over() {
        let base = Color::BLACK;
        assert_eq!(Color::WHITE.blend_over(base, 1.0), Color::WHITE);
        assert_eq!(Color::WHITE.blend_over(base, 0.0), base);
        let half = Color::WHITE.blend_over(base, 0.5);
        assert!(half.r == 127 || half.r == 128);
    }
}
