//! The dither pipeline: decode, downscale, quantize, recolor, encode.
//!
//! Each run is a pure function of its inputs. Nothing is cached here;
//! per-layer caching and staleness handling live in the processor
//! service, which calls into this module from blocking tasks.

use std::io::Cursor;

use mono_dither::{apply_color_map, Bitmap};
use tracing::debug;

use crate::error::PipelineError;
use crate::models::EffectParams;
use crate::rendering::raster;

/// Finished output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub width: u32,
    pub height: u32,
    /// RGBA PNG bytes, ready to hand to any downstream consumer.
    pub png: Vec<u8>,
}

/// Runs the full pipeline on an encoded source image.
pub fn process(bytes: &[u8], params: &EffectParams) -> Result<Artifact, PipelineError> {
    let image = raster::decode(bytes)?;
    let bitmap = raster::downscale(&image, params.pixel_scale)?;
    finish(bitmap, params)
}

/// Runs the pipeline stages after decode, for sources the host already
/// holds as raw pixels (layer source bitmaps).
pub fn process_source(source: &Bitmap, params: &EffectParams) -> Result<Artifact, PipelineError> {
    let image = raster::bitmap_to_image(source)?;
    let bitmap = raster::downscale(&image, params.pixel_scale)?;
    finish(bitmap, params)
}

fn finish(mut bitmap: Bitmap, params: &EffectParams) -> Result<Artifact, PipelineError> {
    let threshold = params.threshold();
    params.effect.apply(&mut bitmap, threshold);
    apply_color_map(&mut bitmap, params.accent);

    let png = encode_png(&bitmap)?;
    debug!(
        effect = %params.effect,
        width = bitmap.width(),
        height = bitmap.height(),
        bytes = png.len(),
        "pipeline run complete"
    );
    Ok(Artifact {
        width: bitmap.width() as u32,
        height: bitmap.height() as u32,
        png,
    })
}

/// Encodes a bitmap as an RGBA PNG.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, bitmap.width() as u32, bitmap.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(bitmap.data())
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
