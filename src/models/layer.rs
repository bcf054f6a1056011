use std::fmt;

use glam::Vec2;
use mono_dither::{Bitmap, EffectKind, Rgb};

use crate::error::PipelineError;

/// Opaque layer identifier, unique within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Parameters for one pipeline run.
///
/// `pixel_scale` and `contrast` are clamped to their documented ranges
/// (1..=20 and 0.1..=3.0); the quantization threshold derived from contrast
/// is deliberately left unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    pub effect: EffectKind,
    pub pixel_scale: u32,
    pub contrast: f32,
    pub accent: Rgb,
}

impl EffectParams {
    /// Parse CLI-shaped arguments into typed parameters.
    pub fn parse(
        effect: &str,
        pixel_scale: u32,
        contrast: f32,
        accent: &str,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            effect: effect.parse()?,
            pixel_scale: pixel_scale.clamp(1, 20),
            contrast: contrast.clamp(0.1, 3.0),
            accent: accent.parse()?,
        })
    }

    /// Quantization threshold for the dither pass.
    #[inline]
    pub fn threshold(&self) -> f32 {
        128.0 / self.contrast
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            effect: EffectKind::Atkinson,
            pixel_scale: 4,
            contrast: 1.0,
            accent: Rgb::BLACK,
        }
    }
}

/// A visual asset on the canvas.
///
/// The layer list is the single owner of layer state. The physics world
/// holds only a non-owning body keyed back to the layer's id; the cached
/// processed artifact is replaced wholesale by the processor service.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    /// Opacity in percent (0..=100)
    pub opacity: u8,
    /// The imported source pixels, shown unprocessed until an effect is armed
    pub source: Bitmap,
    /// PNG artifact from the most recent completed pipeline run
    pub processed: Option<Vec<u8>>,
    pub params: EffectParams,
    /// World-space position of the layer's center
    pub position: Vec2,
    /// Whether the effect output (rather than the raw source) is displayed
    pub armed: bool,
}

/// Ordered collection of layers; index order is z-order.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    next_id: u64,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer from an imported bitmap at a world position.
    pub fn add(&mut self, name: impl Into<String>, source: Bitmap, position: Vec2) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            name: name.into(),
            visible: true,
            opacity: 100,
            source,
            processed: None,
            params: EffectParams::default(),
            position,
            armed: false,
        });
        id
    }

    /// Remove a layer. Returns the removed layer, or None if absent.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|l| l.id == id)?;
        Some(self.layers.remove(index))
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Layers in z-order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
