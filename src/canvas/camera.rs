use glam::Vec2;

use crate::models::CameraConfig;

/// Pan/zoom view transform over the world.
///
/// The camera is a plain affine transform, `screen = world * zoom +
/// translation`, layered on top of the simulation. It never feeds back
/// into physics; bodies live in world space and only their presentation
/// moves with the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    translation: Vec2,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    step: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let min_zoom = config.min_zoom.max(1e-3);
        let max_zoom = config.max_zoom.max(min_zoom);
        Self {
            translation: Vec2::ZERO,
            zoom: 1.0f32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            step: config.zoom_step.max(1.0 + 1e-3),
        }
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Current zoom factor, always within the configured range.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Additive pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    pub fn zoom_in_at(&mut self, cursor: Vec2) {
        self.zoom_at(cursor, self.step);
    }

    pub fn zoom_out_at(&mut self, cursor: Vec2) {
        self.zoom_at(cursor, 1.0 / self.step);
    }

    /// Multiplies zoom by `factor` (clamped to the configured range) and
    /// repans so the world point under `cursor` stays under `cursor`.
    pub fn zoom_at(&mut self, cursor: Vec2, factor: f32) {
        let next = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let ratio = next / self.zoom;
        self.translation = cursor - (cursor - self.translation) * ratio;
        self.zoom = next;
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.translation
    }

    /// Inverse transform, used when placing new assets at a screen point.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.translation) / self.zoom
    }
}
