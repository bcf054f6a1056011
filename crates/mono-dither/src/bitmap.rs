//! Mutable RGBA pixel buffer.

use crate::error::BitmapError;

/// A mutable 2D grid of RGBA pixels.
///
/// Pixels are stored row-major as `[R, G, B, A]` byte quadruples, each
/// channel in 0..=255. The dither and recolor passes mutate the buffer in
/// place; the caller keeps ownership throughout.
///
/// Invariant: `data.len() == width * height * 4` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap filled with transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Create a bitmap with every pixel set to the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// Fails if the buffer length does not match the declared dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(BitmapError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the bitmap and return the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// Read the RGBA value at (x, y).
    ///
    /// # Panics
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write the RGBA value at (x, y).
    ///
    /// # Panics
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// True when every pixel's R, G and B channels are exactly 0 or 255.
    ///
    /// This is the postcondition of the dither pass and the precondition
    /// of the recolor pass. Alpha is not inspected.
    pub fn is_one_bit(&self) -> bool {
        self.data.chunks_exact(4).all(|px| {
            px[..3].iter().all(|&c| c == 0 || c == 255) && px[0] == px[1] && px[1] == px[2]
        })
    }
}
