//! Bounded zero-gravity world for the drifting canvas.
//!
//! The world is a large square region fenced by four thick static walls,
//! so dynamic bodies can drift and bounce but never escape. Gravity is
//! zero; all motion comes from impulses (spawn kicks, drag drops) and
//! decays under air friction.
//!
//! Bodies live in an arena of generation-checked slots. A [`BodyId`]
//! captures the slot index plus the generation it was issued for, so a
//! handle kept across a remove never resolves to the slot's next tenant.

use glam::Vec2;
use rand::Rng;

use crate::models::EngineConfig;
use crate::physics::body::{BodyId, BodyKind, BodySnapshot, Material, RigidBody};

/// One arena slot. `body` is None while the slot sits on the free list.
#[derive(Debug)]
struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Fixed-step rigid-body world.
///
/// All coordinates are world units. The playable interior spans
/// `[-size/2, size/2]` on both axes; walls sit just outside it.
/// Velocities are world units per tick and [`World::step`] advances
/// exactly one tick, so hosts control time by controlling the tick rate.
#[derive(Debug)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    material: Material,
    spawn_impulse: f32,
    half_size: f32,
}

impl World {
    /// Builds the world and its four boundary walls.
    pub fn new(config: &EngineConfig) -> Self {
        let material = Material::from(config.material);
        let mut world = Self {
            slots: Vec::new(),
            free: Vec::new(),
            material,
            spawn_impulse: config.interaction.spawn_impulse,
            half_size: config.world.size / 2.0,
        };

        let size = config.world.size;
        let thick = config.world.wall_thickness;
        let reach = (size + thick) / 2.0;
        // Walls overhang the corners so nothing slips out diagonally.
        let span = size + 2.0 * thick;

        world.insert(RigidBody::new(BodyKind::Static, span, thick, 0.0, -reach, material));
        world.insert(RigidBody::new(BodyKind::Static, span, thick, 0.0, reach, material));
        world.insert(RigidBody::new(BodyKind::Static, thick, span, -reach, 0.0, material));
        world.insert(RigidBody::new(BodyKind::Static, thick, span, reach, 0.0, material));
        world
    }

    fn insert(&mut self, body: RigidBody) -> BodyId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                BodyId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Adds a dynamic body centered at `(x, y)` and kicks it with a small
    /// zero-mean random impulse so fresh layers drift instead of sitting
    /// perfectly still.
    pub fn add_body(&mut self, width: f32, height: f32, x: f32, y: f32) -> BodyId {
        let mut body = RigidBody::new(BodyKind::Dynamic, width, height, x, y, self.material);
        if self.spawn_impulse > 0.0 {
            let mut rng = rand::thread_rng();
            let s = self.spawn_impulse;
            body.velocity = Vec2::new(rng.gen_range(-s..=s), rng.gen_range(-s..=s));
        }
        self.insert(body)
    }

    /// Removes a body. Stale or repeated ids are a no-op, so callers can
    /// tear down in any order without tracking what already died.
    pub fn remove_body(&mut self, id: BodyId) {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return;
        };
        if slot.generation != id.generation || slot.body.is_none() {
            return;
        }
        slot.body = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.body.as_ref()
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Number of live bodies, walls included.
    pub fn body_count(&self) -> usize {
        self.slots.iter().filter(|s| s.body.is_some()).count()
    }

    /// Live bodies in slot order, walls included.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body.as_ref().map(|body| {
                (
                    BodyId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    body,
                )
            })
        })
    }

    /// Position/rotation snapshot for one body.
    pub fn snapshot(&self, id: BodyId) -> Option<BodySnapshot> {
        self.body(id).map(|body| BodySnapshot {
            position: body.position,
            rotation: body.rotation,
        })
    }

    /// Teleports a body, leaving its velocities alone. Used by drags,
    /// where the pointer dictates position directly.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    /// Adds to a body's velocity (unit mass, so impulse equals delta-v).
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) if body.kind == BodyKind::Dynamic => {
                body.velocity += impulse;
                true
            }
            _ => false,
        }
    }

    /// Pins a dynamic body for the duration of a drag: the solver treats
    /// it as immovable and both velocities are zeroed so it does not
    /// carry momentum into the grab.
    pub fn hold(&mut self, id: BodyId) -> bool {
        match self.body_mut(id) {
            Some(body) if body.kind == BodyKind::Dynamic => {
                body.kind = BodyKind::Held;
                body.velocity = Vec2::ZERO;
                body.angular_velocity = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Restores a held body to dynamic and applies the drop impulse.
    pub fn release(&mut self, id: BodyId, impulse: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) if body.kind == BodyKind::Held => {
                body.kind = BodyKind::Dynamic;
                body.velocity += impulse;
                true
            }
            _ => false,
        }
    }

    /// Advances the simulation one tick: integrate dynamic bodies, decay
    /// their motion by air friction, then resolve overlaps pairwise.
    pub fn step(&mut self) {
        for slot in &mut self.slots {
            let Some(body) = slot.body.as_mut() else {
                continue;
            };
            if body.kind != BodyKind::Dynamic {
                continue;
            }
            body.position += body.velocity;
            body.rotation += body.angular_velocity;
            let decay = 1.0 - body.material.air_friction;
            body.velocity *= decay;
            body.angular_velocity *= decay;
        }

        let alive: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.body.is_some())
            .map(|(index, _)| index)
            .collect();

        for (n, &i) in alive.iter().enumerate() {
            for &j in &alive[n + 1..] {
                let (a, b) = self.pair_mut(i, j);
                resolve_pair(a, b);
            }
        }
    }

    /// Disjoint mutable borrows of two slots' bodies; requires `i < j`
    /// and both slots occupied.
    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
        debug_assert!(i < j);
        let (left, right) = self.slots.split_at_mut(j);
        let a = left[i].body.as_mut();
        let b = right[0].body.as_mut();
        match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => unreachable!("pair_mut called on empty slot"),
        }
    }
}

/// Resolves one potentially overlapping pair with axis-aligned boxes:
/// separate along the axis of least penetration, then exchange a normal
/// impulse scaled by restitution and a friction impulse along the
/// tangent. Glancing contacts convert some friction into spin.
fn resolve_pair(a: &mut RigidBody, b: &mut RigidBody) {
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return;
    }

    let delta = b.position - a.position;
    let overlap_x = a.half_extents.x + b.half_extents.x - delta.x.abs();
    let overlap_y = a.half_extents.y + b.half_extents.y - delta.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return;
    }

    // Contact normal points from a toward b along the shallow axis.
    let (normal, depth) = if overlap_x < overlap_y {
        (Vec2::new(delta.x.signum(), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, delta.y.signum()), overlap_y)
    };

    // Push the movable side(s) apart so the pair no longer overlaps.
    let correction = normal * (depth / inv_sum);
    a.position -= correction * inv_a;
    b.position += correction * inv_b;

    let relative = b.velocity - a.velocity;
    let along_normal = relative.dot(normal);
    if along_normal > 0.0 {
        return;
    }

    let restitution = a.material.restitution.max(b.material.restitution);
    let j = -(1.0 + restitution) * along_normal / inv_sum;
    let impulse = normal * j;
    a.velocity -= impulse * inv_a;
    b.velocity += impulse * inv_b;

    let tangent = Vec2::new(-normal.y, normal.x);
    let along_tangent = relative.dot(tangent);
    let friction = 0.5 * (a.material.friction + b.material.friction);
    let max_friction = friction * j.abs();
    let jt = (-along_tangent / inv_sum).clamp(-max_friction, max_friction);
    let friction_impulse = tangent * jt;
    a.velocity -= friction_impulse * inv_a;
    b.velocity += friction_impulse * inv_b;

    // Friction acts on the contact face, not the center, so it torques.
    let arm_a = a.half_extents.dot(normal.abs());
    let arm_b = b.half_extents.dot(normal.abs());
    a.angular_velocity -= jt * arm_a * a.inv_inertia();
    b.angular_velocity -= jt * arm_b * b.inv_inertia();
}
