//! Effect selectors.
//!
//! Effects form a closed set of named strategies so new algorithms slot in
//! as variants instead of growing a conditional chain. Halftone and ASCII
//! are placeholders that run the same 1-bit Atkinson pass; they exist so
//! callers can already select them without the output changing when real
//! implementations land.

use std::fmt;
use std::str::FromStr;

use crate::bitmap::Bitmap;
use crate::diffusion;
use crate::error::ParseEffectError;
use crate::kernel::{Kernel, ATKINSON};

/// A dithering effect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectKind {
    /// Atkinson error diffusion (the default).
    #[default]
    Atkinson,
    /// Halftone placeholder; currently runs the Atkinson pass.
    Halftone,
    /// ASCII placeholder; currently runs the Atkinson pass.
    Ascii,
}

impl EffectKind {
    /// All selectable effects, in display order.
    pub const ALL: [EffectKind; 3] = [EffectKind::Atkinson, EffectKind::Halftone, EffectKind::Ascii];

    /// The diffusion kernel this effect runs with.
    pub fn kernel(&self) -> &'static Kernel {
        match self {
            EffectKind::Atkinson => &ATKINSON,
            EffectKind::Halftone => &ATKINSON,
            EffectKind::Ascii => &ATKINSON,
        }
    }

    /// Run the effect's dither pass in place.
    pub fn apply(&self, bitmap: &mut Bitmap, threshold: f32) {
        diffusion::dither(bitmap, threshold, self.kernel());
    }
}

impl FromStr for EffectKind {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atkinson" => Ok(EffectKind::Atkinson),
            "halftone" => Ok(EffectKind::Halftone),
            "ascii" => Ok(EffectKind::Ascii),
            other => Err(ParseEffectError {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectKind::Atkinson => "atkinson",
            EffectKind::Halftone => "halftone",
            EffectKind::Ascii => "ascii",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_all_selectors() {
        assert_eq!("atkinson".parse::<EffectKind>().unwrap(), EffectKind::Atkinson);
        assert_eq!("halftone".parse::<EffectKind>().unwrap(), EffectKind::Halftone);
        assert_eq!("ascii".parse::<EffectKind>().unwrap(), EffectKind::Ascii);
        assert_eq!("ATKINSON".parse::<EffectKind>().unwrap(), EffectKind::Atkinson);
    }

    #[test]
    fn test_from_str_rejects_unknown_selector() {
        let err = "bayer".parse::<EffectKind>().unwrap_err();
        assert_eq!(err.name, "bayer");
    }

    #[test]
    fn test_display_round_trip() {
        for effect in EffectKind::ALL {
            let text = effect.to_string();
            assert_eq!(text.parse::<EffectKind>().unwrap(), effect);
        }
    }

    #[test]
    fn test_placeholders_alias_atkinson() {
        let source = {
            let mut bitmap = Bitmap::new(8, 8);
            for y in 0..8 {
                for x in 0..8 {
                    let v = (x * 32) as u8;
                    bitmap.set_pixel(x, y, [v, v, v, 255]);
                }
            }
            bitmap
        };

        let mut atkinson = source.clone();
        let mut halftone = source.clone();
        let mut ascii = source;
        EffectKind::Atkinson.apply(&mut atkinson, 128.0);
        EffectKind::Halftone.apply(&mut halftone, 128.0);
        EffectKind::Ascii.apply(&mut ascii, 128.0);

        assert_eq!(atkinson, halftone, "halftone must alias the 1-bit pass");
        assert_eq!(atkinson, ascii, "ascii must alias the 1-bit pass");
    }

    #[test]
    fn test_default_is_atkinson() {
        assert_eq!(EffectKind::default(), EffectKind::Atkinson);
    }
}
