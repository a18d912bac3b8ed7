//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and
//! create them lazily from the first [`RenderCtx`] they see. Attachments are
//! cleared by the frame context before renderers run, so render passes here
//! always load.

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
