//! Error types for bitmap construction and color parsing.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for bitmap construction.
///
/// Returned when a raw pixel buffer does not match the declared
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum BitmapError {
    /// Buffer length does not equal width * height * 4
    BufferSize {
        /// Expected buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer size mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for BitmapError {}

/// Error type for parsing effect selector names.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEffectError {
    /// The unrecognized selector string
    pub name: String,
}

impl fmt::Display for ParseEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown effect '{}' (expected atkinson, halftone, or ascii)",
            self.name
        )
    }
}

impl std::error::Error for ParseEffectError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_error_display() {
        assert_eq!(
            ParseColorError::InvalidLength.to_string(),
            "invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_parse_color_error_source() {
        use std::error::Error;
        let err = u8::from_str_radix("zz", 16).unwrap_err();
        let wrapped = ParseColorError::from(err);
        assert!(wrapped.source().is_some(), "InvalidHex should carry a source");
        assert!(ParseColorError::InvalidLength.source().is_none());
    }

    #[test]
    fn test_bitmap_error_display() {
        let err = BitmapError::BufferSize {
            expected: 64,
            actual: 60,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer size mismatch: expected 64 bytes, got 60"
        );
    }

    #[test]
    fn test_parse_effect_error_display() {
        let err = ParseEffectError {
            name: "bayer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown effect 'bayer' (expected atkinson, halftone, or ascii)"
        );
    }
}
