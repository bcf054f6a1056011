//! 8-bit RGB color with hex string parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// An opaque RGB color with 8-bit channels.
///
/// Used as the accent color for the post-dither recoloring pass. Parsing
/// from hex strings reports malformed input as a typed error rather than
/// falling back to black, so callers can surface the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new color from 8-bit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use mono_dither::Rgb;
    ///
    /// let accent: Rgb = "#1A2B3C".parse().unwrap();
    /// assert_eq!(accent, Rgb::new(26, 43, 60));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let value = u16::from_str_radix(s, 16)?;
                let r = ((value >> 8) & 0xF) as u8 * 17;
                let g = ((value >> 4) & 0xF) as u8 * 17;
                let b = (value & 0xF) as u8 * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let value = u32::from_str_radix(s, 16)?;
                Ok(Self::new(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
