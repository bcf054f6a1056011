pub mod binding;
pub mod board;
pub mod camera;

pub use binding::{ElementBinding, Placement};
pub use board::Board;
pub use camera::Camera;
