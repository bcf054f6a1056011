//! Decoding and downscaling of source images.
//!
//! The pixelated look of the editor comes from here: sources are resized
//! to `floor(intrinsic / pixel_scale)` with nearest-neighbor sampling, so
//! every output pixel is one unblended source sample. Smoothing filters
//! would defeat the 1-bit aesthetic downstream.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use mono_dither::{Bitmap, BitmapError};

use crate::error::PipelineError;

/// Decodes any supported image format into RGBA pixels.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgba8())
}

/// Output dimensions for a pixel-scale downscale, or DegenerateScale when
/// the factor swallows the whole image.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    pixel_scale: u32,
) -> Result<(u32, u32), PipelineError> {
    let scale = pixel_scale.max(1);
    let scaled = (width / scale, height / scale);
    if scaled.0 == 0 || scaled.1 == 0 {
        return Err(PipelineError::DegenerateScale {
            width,
            height,
            pixel_scale: scale,
        });
    }
    Ok(scaled)
}

/// Downscales by the pixel-scale factor into a bitmap ready for dithering.
pub fn downscale(image: &RgbaImage, pixel_scale: u32) -> Result<Bitmap, PipelineError> {
    let (width, height) = image.dimensions();
    let (out_w, out_h) = scaled_dimensions(width, height, pixel_scale)?;
    if (out_w, out_h) == (width, height) {
        return image_to_bitmap(image);
    }
    let small = imageops::resize(image, out_w, out_h, FilterType::Nearest);
    image_to_bitmap(&small)
}

pub fn image_to_bitmap(image: &RgbaImage) -> Result<Bitmap, PipelineError> {
    let (width, height) = image.dimensions();
    let bitmap = Bitmap::from_raw(width as usize, height as usize, image.as_raw().clone())?;
    Ok(bitmap)
}

pub fn bitmap_to_image(bitmap: &Bitmap) -> Result<RgbaImage, PipelineError> {
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    RgbaImage::from_raw(width, height, bitmap.data().to_vec()).ok_or_else(|| {
        PipelineError::Bitmap(BitmapError::BufferSize {
            expected: (width * height * 4) as usize,
            actual: bitmap.data().len(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 12) as u8, (y * 12) as u8, 0, 255])
        })
    }

    #[test]
    fn test_scaled_dimensions_floor() {
        assert_eq!(scaled_dimensions(10, 10, 3).unwrap(), (3, 3));
        assert_eq!(scaled_dimensions(20, 7, 4).unwrap(), (5, 1));
        assert_eq!(scaled_dimensions(16, 16, 1).unwrap(), (16, 16));
    }

    #[test]
    fn test_scaled_dimensions_degenerate() {
        let err = scaled_dimensions(3, 10, 4).unwrap_err();
        match err {
            PipelineError::DegenerateScale {
                width,
                height,
                pixel_scale,
            } => {
                assert_eq!((width, height, pixel_scale), (3, 10, 4));
            }
            other => panic!("expected DegenerateScale, got {other:?}"),
        }
        assert!(scaled_dimensions(10, 3, 4).is_err());
    }

    #[test]
    fn test_downscale_samples_without_blending() {
        // 2x2 blocks of solid color collapse to single exact pixels.
        let image = RgbaImage::from_fn(4, 4, |x, y| {
            if x < 2 && y < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let bitmap = downscale(&image, 2).unwrap();
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(bitmap.pixel(1, 1), [0, 0, 255, 255], "no color blending");
    }

    #[test]
    fn test_downscale_identity_at_scale_one() {
        let image = gradient(6, 5);
        let bitmap = downscale(&image, 1).unwrap();
        assert_eq!(bitmap.width(), 6);
        assert_eq!(bitmap.height(), 5);
        assert_eq!(bitmap.data(), image.as_raw().as_slice());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn test_bitmap_image_round_trip() {
        let image = gradient(5, 4);
        let bitmap = image_to_bitmap(&image).unwrap();
        let back = bitmap_to_image(&bitmap).unwrap();
        assert_eq!(back.as_raw(), image.as_raw());
    }
}
