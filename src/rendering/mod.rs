pub mod pipeline;
pub mod raster;

pub use pipeline::{encode_png, process, process_source, Artifact};
