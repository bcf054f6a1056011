//! The board composes the layer registry, the physics world, the camera,
//! and one element binding per layer. It is the headless equivalent of
//! the canvas surface: hosts feed it imports, gestures, and ticks, and it
//! answers with screen placements.

use std::collections::BTreeMap;

use glam::Vec2;
use mono_dither::Bitmap;

use crate::canvas::binding::{ElementBinding, Placement};
use crate::canvas::camera::Camera;
use crate::models::{EngineConfig, LayerId, LayerRegistry};
use crate::physics::World;

#[derive(Debug)]
pub struct Board {
    pub layers: LayerRegistry,
    pub world: World,
    pub camera: Camera,
    // BTreeMap keeps publish order stable (ascending id is z-order).
    bindings: BTreeMap<LayerId, ElementBinding>,
    fallback_ticks: u32,
    drop_impulse: f32,
}

impl Board {
    pub fn new(config: &EngineConfig) -> Self {
        let hz = config.world.tick_hz.max(1) as u64;
        let fallback_ticks = ((config.interaction.attach_delay_ms * hz + 999) / 1000).max(1);
        Self {
            layers: LayerRegistry::new(),
            world: World::new(config),
            camera: Camera::new(&config.camera),
            bindings: BTreeMap::new(),
            fallback_ticks: fallback_ticks as u32,
            drop_impulse: config.interaction.drop_impulse,
        }
    }

    /// Imports a bitmap as a new layer dropped at a screen point, usually
    /// the viewport center. The body spawns at the camera inverse of that
    /// point once the element's size is known.
    pub fn add_layer(
        &mut self,
        name: impl Into<String>,
        source: Bitmap,
        screen_pos: Vec2,
    ) -> LayerId {
        let spawn = self.camera.screen_to_world(screen_pos);
        let size_hint = Vec2::new(source.width() as f32, source.height() as f32);
        let id = self.layers.add(name, source, spawn);
        self.bindings
            .insert(id, ElementBinding::new(id, size_hint, spawn, self.fallback_ticks));
        id
    }

    /// Reports the rendered size of a layer's element, attaching its body
    /// immediately instead of waiting out the fallback delay.
    pub fn measure_layer(&mut self, id: LayerId, size: Vec2) {
        if let Some(binding) = self.bindings.get_mut(&id) {
            binding.on_measured(&mut self.world, size);
        }
    }

    /// Deletes the layer and tears down its body. Unknown ids are a no-op.
    pub fn remove_layer(&mut self, id: LayerId) {
        if let Some(mut binding) = self.bindings.remove(&id) {
            binding.detach(&mut self.world);
        }
        self.layers.remove(id);
    }

    pub fn binding(&self, id: LayerId) -> Option<&ElementBinding> {
        self.bindings.get(&id)
    }

    pub fn begin_drag(&mut self, id: LayerId, pointer: Vec2) -> bool {
        match self.bindings.get_mut(&id) {
            Some(binding) => binding.begin_drag(&mut self.world, pointer),
            None => false,
        }
    }

    pub fn drag_move(&mut self, id: LayerId, pointer: Vec2) -> bool {
        match self.bindings.get_mut(&id) {
            Some(binding) => binding.drag_move(&mut self.world, pointer, self.camera.zoom()),
            None => false,
        }
    }

    pub fn end_drag(&mut self, id: LayerId) -> bool {
        match self.bindings.get_mut(&id) {
            Some(binding) => binding.end_drag(&mut self.world, self.drop_impulse),
            None => false,
        }
    }

    /// Advances the simulation one tick and republishes every live
    /// element's screen transform, in z-order. Layers whose bodies are
    /// still pending publish nothing.
    pub fn tick(&mut self) -> Vec<(LayerId, Placement)> {
        self.world.step();
        let mut placements = Vec::with_capacity(self.bindings.len());
        for (id, binding) in self.bindings.iter_mut() {
            let Some(placement) = binding.tick(&mut self.world, &self.camera) else {
                continue;
            };
            if let Some(snapshot) = binding.body().and_then(|b| self.world.snapshot(b)) {
                if let Some(layer) = self.layers.get_mut(*id) {
                    layer.position = snapshot.position;
                }
            }
            placements.push((*id, placement));
        }
        placements
    }
}
