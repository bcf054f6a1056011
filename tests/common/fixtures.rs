//! Test fixtures: source bitmaps and parameter builders.

use inkdrift::models::EffectParams;
use mono_dither::Bitmap;

/// Reference sizes used across scenario tests
pub mod sizes {
    /// Smallest bitmap the end-to-end scenarios dither
    pub const TINY: usize = 4;

    /// Large enough for diffusion to reach visual equilibrium
    pub const PATTERN: usize = 32;
}

/// Uniform RGBA bitmap.
pub fn uniform(width: usize, height: usize, value: [u8; 4]) -> Bitmap {
    Bitmap::filled(width, height, value)
}

/// Horizontal luminance ramp from black to near-white.
pub fn gradient(width: usize, height: usize) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(1)) as u8;
            bitmap.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    bitmap
}

/// Two-tone checkerboard.
pub fn checkerboard(width: usize, height: usize, dark: u8, light: u8) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { dark } else { light };
            bitmap.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    bitmap
}

/// Build pipeline parameters, panicking on invalid test input.
pub fn params(effect: &str, pixel_scale: u32, contrast: f32, accent: &str) -> EffectParams {
    EffectParams::parse(effect, pixel_scale, contrast, accent).expect("valid test params")
}
