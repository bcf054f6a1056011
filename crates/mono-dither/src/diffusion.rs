//! Greyscale conversion and 1-bit error diffusion.
//!
//! The dither pass converts a bitmap to greyscale (BT.601 luma), then walks
//! it in raster order quantizing each pixel against a threshold and
//! diffusing the quantization error to forward neighbors through a
//! [`Kernel`]. Diffusion must stay strictly row-major: each pixel's
//! effective luminance depends on error accumulated from already-visited
//! predecessors, so the rows cannot be processed in parallel.

use crate::bitmap::Bitmap;
use crate::kernel::Kernel;

/// BT.601 luma of an RGB triple.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Convert every pixel to greyscale in place (R = G = B = luma).
///
/// Alpha is untouched.
pub fn grayscale(bitmap: &mut Bitmap) {
    for px in bitmap.data_mut().chunks_exact_mut(4) {
        let l = luminance(px[0], px[1], px[2]);
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}

/// Dither a bitmap to pure black and white in place.
///
/// Runs the greyscale pass, then a single raster-order error diffusion
/// pass: each pixel's working luminance is quantized to 0 or 255 against
/// `threshold`, and `error * weight / divisor` is added to the working
/// luminance of each in-bounds kernel neighbor. Error that would land
/// outside the image is discarded, so edges lose a little tonal energy;
/// that is standard error diffusion behavior.
///
/// The threshold is deliberately not clamped to 0..=255. Callers derive it
/// as `128 / contrast`, and an out-of-range threshold is the correct
/// meaning of extreme contrast: the output saturates to a single value.
///
/// Working luminance is kept in a side buffer so accumulated error may
/// leave 0..=255 until the pixel is visited; only the quantized value is
/// ever written back. Accumulation is bounded by 255 / (1 - 6/8) = 1020
/// for the Atkinson kernel, well inside i16.
///
/// After this pass every pixel satisfies R = G = B with value 0 or 255,
/// and alpha is untouched.
pub fn dither(bitmap: &mut Bitmap, threshold: f32, kernel: &Kernel) {
    grayscale(bitmap);

    let width = bitmap.width();
    let height = bitmap.height();
    let data = bitmap.data_mut();

    let mut work: Vec<i16> = data.chunks_exact(4).map(|px| px[0] as i16).collect();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = work[idx];
            let new: u8 = if (old as f32) < threshold { 0 } else { 255 };

            let base = idx * 4;
            data[base] = new;
            data[base + 1] = new;
            data[base + 2] = new;

            let err = old as i32 - new as i32;
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let nidx = ny as usize * width + nx as usize;
                work[nidx] += (err * weight as i32 / kernel.divisor as i32) as i16;
            }
        }
    }
}
