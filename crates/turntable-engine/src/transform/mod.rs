//! Per-frame model, view and projection matrices.
//!
//! All matrices are column-major `glam::Mat4`.

mod camera;
mod frame;

pub use camera::CameraConfig;
pub use frame::{aspect_ratio, compute_frame, FrameState, FrameTransform};
