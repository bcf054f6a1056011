//! mono-dither: 1-bit error diffusion and accent recoloring
//!
//! This library implements the pixel transforms behind a monochrome
//! dithering editor: BT.601 greyscale conversion, Atkinson error diffusion
//! to pure black and white, and a stencil-style recoloring pass that maps
//! black pixels to an accent color and white pixels to transparency.
//!
//! All transforms mutate the caller's [`Bitmap`] in place; the caller keeps
//! ownership and no copies are made on the hot path.
//!
//! # Quick Start
//!
//! ```
//! use mono_dither::{apply_color_map, Bitmap, EffectKind, Rgb};
//!
//! let mut bitmap = Bitmap::filled(4, 4, [10, 10, 10, 255]);
//!
//! // Pixel values quantize against a threshold of 128 / contrast.
//! EffectKind::Atkinson.apply(&mut bitmap, 128.0);
//! assert!(bitmap.is_one_bit());
//!
//! let accent: Rgb = "#FF0000".parse().unwrap();
//! apply_color_map(&mut bitmap, accent);
//! assert_eq!(bitmap.pixel(0, 0), [255, 0, 0, 255]);
//! ```
//!
//! # Pipeline Contract
//!
//! The dither pass guarantees that afterwards every pixel satisfies
//! R = G = B with value 0 or 255 and alpha untouched; the recolor pass
//! consumes exactly that shape. Both passes are deterministic: the same
//! input and parameters produce bit-identical output.
//!
//! # Thresholds
//!
//! Callers derive the quantization threshold as `128 / contrast`. The
//! threshold is accepted unclamped; extreme contrast legitimately
//! saturates the output to a single value.

pub mod bitmap;
pub mod color;
pub mod diffusion;
pub mod effect;
pub mod error;
pub mod kernel;
pub mod remap;


pub use bitmap::Bitmap;
pub use color::Rgb;
pub use diffusion::{dither, grayscale, luminance};
pub use effect::EffectKind;
pub use error::{BitmapError, ParseColorError, ParseEffectError};
pub use kernel::{Kernel, ATKINSON};
pub use remap::apply_color_map;
