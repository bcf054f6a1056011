pub mod body;
pub mod world;

pub use body::{BodyId, BodyKind, BodySnapshot, Material, RigidBody};
pub use world::World;
