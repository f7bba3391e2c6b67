//! Surface mesh extraction and the sinks that consume it

pub mod tables;
pub mod buffer;
pub mod marching_cubes;
pub mod sink;

pub use buffer::MeshBuffer;
pub use marching_cubes::MarchingCubes;
pub use sink::{BlockSink, MeshSink};
