//! Turntable engine crate.
//!
//! Loads a vertex-only geometry file, builds a WGSL program for it and spins
//! the result in a window. The platform + GPU runtime is kept apart from the
//! loading and transform code so the latter can be used and tested headless.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod transform;
pub mod viewer;
