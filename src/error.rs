use thiserror::Error;

/// Errors from the image processing pipeline.
///
/// Interactive physics/camera paths never raise; they degrade to no-ops so
/// the simulation loop cannot be crashed by a teardown race. Everything
/// that can actually fail funnels through here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Degenerate scale: {width}x{height} at pixel scale {pixel_scale} leaves no pixels")]
    DegenerateScale {
        width: u32,
        height: u32,
        pixel_scale: u32,
    },

    #[error("Invalid accent color: {0}")]
    Color(#[from] mono_dither::ParseColorError),

    #[error("Invalid effect: {0}")]
    Effect(#[from] mono_dither::ParseEffectError),

    #[error("Malformed bitmap: {0}")]
    Bitmap(#[from] mono_dither::BitmapError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}
