pub mod clock;
pub mod processor;

pub use clock::{Clock, ClockHandle, FrameSnapshot};
pub use processor::{Completion, Processor};
