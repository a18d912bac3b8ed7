//! Geometry ingestion.
//!
//! Reads OBJ-style `v x y z` lines, derives a color for every vertex from its
//! position and packs both attributes into a single interleaved `f32` buffer
//! that can be uploaded to the GPU as-is.
//!
//! Only vertex lines are significant. Faces, normals, texture coordinates and
//! comments are skipped, and the result is drawn as an unindexed triangle list.

mod buffer;
mod loader;
mod scan;

pub use buffer::{
    vertex_color, ColoredVertex, InterleavedBuffer, MeshData, COLOR_OFFSET, FLOATS_PER_VERTEX,
    VERTEX_STRIDE,
};
pub use loader::{load, load_from_reader, parse_str, MeshError};
pub use scan::{scan_vertex_line, ScannedVertex, VERTEX_PREFIX};
