//! Per-layer binding between a rigid body and its on-screen element.
//!
//! Each layer that lands on the canvas gets one binding. The binding owns
//! the body's lifecycle (create on measure, destroy on detach) and routes
//! drag gestures into the world, but it never owns the body itself; it
//! keeps only a [`BodyId`] and degrades to a no-op whenever the handle has
//! gone stale. That makes every transition safe against teardown races.

use glam::Vec2;
use tracing::debug;

use crate::canvas::camera::Camera;
use crate::models::LayerId;
use crate::physics::{BodyId, World};

/// Screen-space transform published for one element each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub screen_position: Vec2,
    /// Visual rotation in degrees, ready for the presentation layer.
    pub rotation_degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Waiting for the element to be measured. `fallback_ticks` counts
    /// down to a size-hint attach in case no measurement ever arrives.
    Unattached { fallback_ticks: u32 },
    Attached {
        body: BodyId,
    },
    Dragging {
        body: BodyId,
        pointer_start: Vec2,
        body_start: Vec2,
    },
    /// Terminal. The body is gone and no transition leaves this state.
    Detached,
}

/// Lifecycle: `Unattached -> Attached <-> Dragging`, with `Detached` as
/// the terminal state reachable from anywhere.
#[derive(Debug)]
pub struct ElementBinding {
    layer: LayerId,
    size_hint: Vec2,
    spawn: Vec2,
    state: State,
}

impl ElementBinding {
    /// `fallback_ticks` is how many ticks to wait for a measurement
    /// before attaching with `size_hint` anyway.
    pub fn new(layer: LayerId, size_hint: Vec2, spawn: Vec2, fallback_ticks: u32) -> Self {
        Self {
            layer,
            size_hint,
            spawn,
            state: State::Unattached {
                fallback_ticks: fallback_ticks.max(1),
            },
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn body(&self) -> Option<BodyId> {
        match self.state {
            State::Attached { body } | State::Dragging { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, State::Attached { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    pub fn is_detached(&self) -> bool {
        self.state == State::Detached
    }

    fn attach(&mut self, world: &mut World, size: Vec2) {
        let body = world.add_body(size.x, size.y, self.spawn.x, self.spawn.y);
        debug!(layer = %self.layer, %body, width = size.x, height = size.y, "element attached");
        self.state = State::Attached { body };
    }

    /// Primary attach path: the presentation layer reports the element's
    /// rendered size. Cancels the pending fallback. Measurements arriving
    /// once a body exists (or after detach) are ignored.
    pub fn on_measured(&mut self, world: &mut World, size: Vec2) {
        if let State::Unattached { .. } = self.state {
            self.attach(world, size);
        }
    }

    /// Advances the binding one simulation tick and republishes the
    /// element's transform. Returns None while there is nothing to show.
    pub fn tick(&mut self, world: &mut World, camera: &Camera) -> Option<Placement> {
        if let State::Unattached { fallback_ticks } = &mut self.state {
            *fallback_ticks -= 1;
            if *fallback_ticks == 0 {
                let size = self.size_hint;
                self.attach(world, size);
            } else {
                return None;
            }
        }

        let body = self.body()?;
        let snapshot = world.snapshot(body)?;
        Some(Placement {
            screen_position: camera.world_to_screen(snapshot.position),
            rotation_degrees: snapshot.rotation.to_degrees(),
        })
    }

    /// Pointer-down on the element. Pins the body and records the drag
    /// origin in both spaces. No-op unless currently attached.
    pub fn begin_drag(&mut self, world: &mut World, pointer: Vec2) -> bool {
        let State::Attached { body } = self.state else {
            return false;
        };
        let Some(start) = world.snapshot(body) else {
            return false;
        };
        if !world.hold(body) {
            return false;
        }
        self.state = State::Dragging {
            body,
            pointer_start: pointer,
            body_start: start.position,
        };
        true
    }

    /// Pointer-move during a drag. The body teleports to the drag origin
    /// plus the screen delta converted to world units, so it tracks the
    /// pointer exactly regardless of damping or collisions.
    pub fn drag_move(&mut self, world: &mut World, pointer: Vec2, zoom: f32) -> bool {
        let State::Dragging {
            body,
            pointer_start,
            body_start,
        } = self.state
        else {
            return false;
        };
        let world_delta = (pointer - pointer_start) / zoom;
        world.set_position(body, body_start + world_delta)
    }

    /// Pointer-up. Restores dynamics and drops the body with a small
    /// downward impulse. No-op unless currently dragging.
    pub fn end_drag(&mut self, world: &mut World, drop_impulse: f32) -> bool {
        let State::Dragging { body, .. } = self.state else {
            return false;
        };
        let released = world.release(body, Vec2::new(0.0, drop_impulse));
        self.state = State::Attached { body };
        released
    }

    /// Tears the binding down: cancels a pending attach or removes the
    /// live body. Safe to call repeatedly and in any state.
    pub fn detach(&mut self, world: &mut World) {
        match self.state {
            State::Attached { body } | State::Dragging { body, .. } => {
                world.remove_body(body);
                debug!(layer = %self.layer, %body, "element detached");
            }
            State::Unattached { .. } => {
                debug!(layer = %self.layer, "pending attach canceled");
            }
            State::Detached => return,
        }
        self.state = State::Detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineConfig, LayerId};

    const FALLBACK: u32 = 3;

    fn setup() -> (World, Camera, ElementBinding) {
        let config = EngineConfig::default();
        let world = World::new(&config);
        let camera = Camera::new(&config.camera);
        let binding = ElementBinding::new(
            LayerId::new(7),
            Vec2::new(64.0, 48.0),
            Vec2::new(10.0, 20.0),
            FALLBACK,
        );
        (world, camera, binding)
    }

    #[test]
    fn test_fallback_attach_after_countdown() {
        let (mut world, camera, mut binding) = setup();
        let walls = world.body_count();

        for _ in 0..FALLBACK - 1 {
            assert!(binding.tick(&mut world, &camera).is_none());
            assert!(!binding.is_attached());
        }
        let placement = binding.tick(&mut world, &camera);
        assert!(binding.is_attached(), "fallback tick must attach");
        assert!(placement.is_some(), "attach tick must already publish");
        assert_eq!(world.body_count(), walls + 1);

        let body = binding.body().and_then(|id| world.body(id).cloned());
        let body = body.unwrap();
        assert_eq!(body.width(), 64.0, "fallback uses the size hint");
        assert_eq!(body.height(), 48.0);
        assert_eq!(body.position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_measurement_attaches_immediately() {
        let (mut world, camera, mut binding) = setup();
        binding.on_measured(&mut world, Vec2::new(100.0, 30.0));
        assert!(binding.is_attached());

        let first = binding.body();
        // The canceled fallback must not spawn a second body later.
        for _ in 0..FALLBACK + 2 {
            binding.tick(&mut world, &camera);
        }
        assert_eq!(binding.body(), first);
        assert_eq!(world.body_count(), 5);

        let body = world.body(first.unwrap()).unwrap();
        assert_eq!(body.width(), 100.0, "measured size wins over the hint");
    }

    #[test]
    fn test_late_measurement_is_ignored() {
        let (mut world, camera, mut binding) = setup();
        for _ in 0..FALLBACK {
            binding.tick(&mut world, &camera);
        }
        let body = binding.body().unwrap();

        binding.on_measured(&mut world, Vec2::new(999.0, 999.0));
        assert_eq!(binding.body(), Some(body));
        assert_eq!(world.body(body).unwrap().width(), 64.0);
    }

    #[test]
    fn test_detach_cancels_pending_attach() {
        let (mut world, camera, mut binding) = setup();
        let walls = world.body_count();

        binding.tick(&mut world, &camera);
        binding.detach(&mut world);
        assert!(binding.is_detached());

        for _ in 0..FALLBACK + 2 {
            assert!(binding.tick(&mut world, &camera).is_none());
        }
        assert_eq!(world.body_count(), walls, "no orphan body may appear");
    }

    #[test]
    fn test_drag_teleports_by_screen_delta_over_zoom() {
        let (mut world, mut camera, mut binding) = setup();
        binding.on_measured(&mut world, Vec2::new(64.0, 48.0));
        let body = binding.body().unwrap();
        world.set_velocity(body, Vec2::new(5.0, 5.0));

        // Double the zoom so screen deltas halve in world space.
        camera.zoom_at(Vec2::ZERO, 2.0);
        assert!(binding.begin_drag(&mut world, Vec2::new(100.0, 100.0)));
        assert!(binding.is_dragging());
        assert_eq!(world.body(body).unwrap().velocity, Vec2::ZERO);

        assert!(binding.drag_move(&mut world, Vec2::new(110.0, 106.0), camera.zoom()));
        assert_eq!(
            world.body(body).unwrap().position,
            Vec2::new(15.0, 23.0),
            "world delta must be screen delta divided by zoom"
        );

        // Deltas are measured from the drag start, not from the last move.
        assert!(binding.drag_move(&mut world, Vec2::new(104.0, 100.0), camera.zoom()));
        assert_eq!(world.body(body).unwrap().position, Vec2::new(12.0, 20.0));
    }

    #[test]
    fn test_drop_restores_dynamics_with_impulse() {
        let (mut world, _camera, mut binding) = setup();
        binding.on_measured(&mut world, Vec2::new(64.0, 48.0));
        let body = binding.body().unwrap();

        binding.begin_drag(&mut world, Vec2::ZERO);
        assert!(binding.end_drag(&mut world, 0.02));
        assert!(binding.is_attached());
        assert_eq!(world.body(body).unwrap().velocity, Vec2::new(0.0, 0.02));
    }

    #[test]
    fn test_gestures_in_wrong_state_are_no_ops() {
        let (mut world, _camera, mut binding) = setup();

        // Nothing is attached yet.
        assert!(!binding.begin_drag(&mut world, Vec2::ZERO));
        assert!(!binding.drag_move(&mut world, Vec2::ONE, 1.0));
        assert!(!binding.end_drag(&mut world, 0.02));

        binding.on_measured(&mut world, Vec2::new(10.0, 10.0));
        assert!(!binding.drag_move(&mut world, Vec2::ONE, 1.0));
        assert!(!binding.end_drag(&mut world, 0.02));
        assert!(binding.is_attached());
    }

    #[test]
    fn test_detach_mid_drag_removes_body() {
        let (mut world, _camera, mut binding) = setup();
        let walls = world.body_count();
        binding.on_measured(&mut world, Vec2::new(10.0, 10.0));
        binding.begin_drag(&mut world, Vec2::ZERO);

        binding.detach(&mut world);
        assert!(binding.is_detached());
        assert_eq!(world.body_count(), walls);

        // Repeated teardown and further gestures stay silent.
        binding.detach(&mut world);
        assert!(!binding.begin_drag(&mut world, Vec2::ZERO));
        assert!(binding.body().is_none());
    }

    #[test]
    fn test_stale_body_degrades_to_no_op() {
        let (mut world, camera, mut binding) = setup();
        binding.on_measured(&mut world, Vec2::new(10.0, 10.0));
        let body = binding.body().unwrap();

        // Something else tore the body down behind the binding's back.
        world.remove_body(body);
        assert!(binding.tick(&mut world, &camera).is_none());
        assert!(!binding.begin_drag(&mut world, Vec2::ZERO));
    }

    #[test]
    fn test_placement_composes_camera_transform() {
        let (mut world, mut camera, mut binding) = setup();
        binding.on_measured(&mut world, Vec2::new(10.0, 10.0));
        let body = binding.body().unwrap();
        world.set_velocity(body, Vec2::ZERO);
        world.set_position(body, Vec2::new(30.0, -40.0));

        camera.pan(Vec2::new(100.0, 200.0));
        let placement = binding.tick(&mut world, &camera).unwrap();
        let expected = Vec2::new(30.0, -40.0) * camera.zoom() + Vec2::new(100.0, 200.0);
        assert!((placement.screen_position - expected).length() < 1e-3);
        assert_eq!(placement.rotation_degrees, 0.0);
    }
}
