//! Accent color remapping for dithered bitmaps.

use crate::bitmap::Bitmap;
use crate::color::Rgb;

/// Recolor a 1-bit bitmap in place, treating it as a stencil.
///
/// For every pixel: if the first channel is below 128 (a black pixel), the
/// RGB channels are set to `accent` and alpha to 255; otherwise RGB is left
/// untouched and alpha is set to 0, so white pixels vanish and black pixels
/// become accent-colored shapes over transparency.
///
/// The decision reads only the first channel, never prior alpha, so a
/// stale alpha channel in the input cannot leak into the output.
///
/// Expects a bitmap produced by [`dither`](crate::diffusion::dither); on
/// arbitrary input the 128 cut simply splits dark from light pixels.
pub fn apply_color_map(bitmap: &mut Bitmap, accent: Rgb) {
    for px in bitmap.data_mut().chunks_exact_mut(4) {
        if px[0] < 128 {
            px[0] = accent.r;
            px[1] = accent.g;
            px[2] = accent.b;
            px[3] = 255;
        } else {
            px[3] = 0;
        }
    }
}
