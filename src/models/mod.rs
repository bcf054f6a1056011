pub mod config;
pub mod layer;

pub use config::{CameraConfig, EngineConfig, InteractionConfig, MaterialConfig, WorldConfig};
pub use layer::{EffectParams, Layer, LayerId, LayerRegistry};
