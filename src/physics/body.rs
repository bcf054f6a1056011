use std::fmt;

use glam::Vec2;

use crate::models::MaterialConfig;

/// Generation-checked handle to a body slot.
///
/// Handles are the only way components outside the world refer to bodies.
/// Removing a body bumps its slot generation, so handles held elsewhere go
/// stale instead of dangling: lookups with them simply return None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body-{}v{}", self.index, self.generation)
    }
}

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Boundary wall; immovable, never repositioned.
    Static,
    /// Normal simulated body.
    Dynamic,
    /// Temporarily pinned by a drag; immovable for the solver but
    /// repositionable by the binding that holds it.
    Held,
}

/// Material parameters for collision response and drift decay.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Bounciness of collisions (0 = inelastic, 1 = perfectly elastic)
    pub restitution: f32,
    /// Contact friction applied to tangential velocity
    pub friction: f32,
    /// Per-tick velocity decay so unforced motion dies out
    pub air_friction: f32,
}

impl From<MaterialConfig> for Material {
    fn from(config: MaterialConfig) -> Self {
        Self {
            restitution: config.restitution,
            friction: config.friction,
            air_friction: config.air_friction,
        }
    }
}

/// A rectangular rigid body.
///
/// Positions are world units with the body centered on `position`.
/// Rotation is radians and purely visual: collision shapes stay
/// axis-aligned. Dynamic bodies have unit mass.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub half_extents: Vec2,
    pub kind: BodyKind,
    pub material: Material,
}

impl RigidBody {
    pub fn new(kind: BodyKind, width: f32, height: f32, x: f32, y: f32, material: Material) -> Self {
        Self {
            position: Vec2::new(x, y),
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            half_extents: Vec2::new(width / 2.0, height / 2.0),
            kind,
            material,
        }
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Inverse mass: 0 for anything the solver must not move.
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic => 1.0,
            BodyKind::Static | BodyKind::Held => 0.0,
        }
    }

    /// Inverse moment of inertia of a unit-mass box, (w^2 + h^2) / 12.
    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic => {
                let w = self.width();
                let h = self.height();
                12.0 / (w * w + h * h).max(f32::EPSILON)
            }
            BodyKind::Static | BodyKind::Held => 0.0,
        }
    }
}

/// Per-tick position/rotation snapshot published to consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    /// Radians
    pub rotation: f32,
}
