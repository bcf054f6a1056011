//! Error diffusion kernel definitions.
//!
//! A kernel specifies how quantization error is distributed to neighboring
//! pixels that have not been processed yet.

/// An error diffusion kernel.
///
/// Each entry specifies an offset (dx, dy) and a weight for that neighbor.
/// The neighbor receives `error * weight / divisor`.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Atkinson
/// intentionally propagates only 75%, which keeps highlights and shadows
/// crisp at the cost of some tonal accuracy near the extremes.
///
/// # Ordering
///
/// Every entry must point at a pixel that comes later in row-major raster
/// order (dy > 0, or dy == 0 with dx > 0), so a single forward pass visits
/// each pixel after all of its incoming error has arrived.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,

    /// Maximum dy value in entries; the diffusion reaches this many rows ahead.
    pub max_dy: usize,
}

/// Atkinson dithering kernel.
///
/// Distributes error to 6 neighbors with 75% total propagation (6/8).
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Originally developed by Bill Atkinson for the Apple Macintosh.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
};
