use glam::{Mat4, Vec3};

use super::CameraConfig;

/// Matrices for one frame. Rebuilt every frame, never retained.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameState {
    /// Seconds since the render loop started.
    pub elapsed: f32,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameState {
    /// Column-major bytes, ready for a 64-byte uniform block.
    #[inline]
    pub fn model_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.model)
    }

    #[inline]
    pub fn view_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.view)
    }

    #[inline]
    pub fn projection_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.projection)
    }
}

/// Builds per-frame matrices for a turntable: the model spins about world Y at
/// one radian per second in front of a fixed camera.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTransform {
    pub camera: CameraConfig,
}

impl FrameTransform {
    pub fn new(camera: CameraConfig) -> Self {
        Self { camera }
    }

    pub fn compute_frame(&self, elapsed_seconds: f32, aspect_ratio: f32) -> FrameState {
        FrameState {
            elapsed: elapsed_seconds,
            model: Mat4::from_axis_angle(Vec3::Y, elapsed_seconds),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(aspect_ratio),
        }
    }
}

/// [`FrameTransform::compute_frame`] with the default camera.
pub fn compute_frame(elapsed_seconds: f32, aspect_ratio: f32) -> FrameState {
    FrameTransform::default().compute_frame(elapsed_seconds, aspect_ratio)
}

/// Width over height. A zero height (minimized window) yields 1.0.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const ASPECT: f32 = 800.0 / 600.0;

    #[test]
    fn model_is_identity_at_start() {
        assert_eq!(compute_frame(0.0, ASPECT).model, Mat4::IDENTITY);
    }

    #[test]
    fn model_repeats_every_full_turn() {
        let start = compute_frame(0.0, ASPECT).model;
        let turn = compute_frame(TAU, ASPECT).model;
        assert!(turn.abs_diff_eq(start, 1e-5));

        let later = compute_frame(1.0 + 3.0 * TAU, ASPECT).model;
        assert!(later.abs_diff_eq(compute_frame(1.0, ASPECT).model, 1e-4));
    }

    #[test]
    fn quarter_turn_sends_x_to_minus_z() {
        let model = compute_frame(FRAC_PI_2, ASPECT).model;
        let x = model.transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-6));

        let y = model.transform_vector3(Vec3::Y);
        assert!(y.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn view_and_projection_do_not_depend_on_time() {
        let a = compute_frame(0.0, ASPECT);
        for t in [0.016, 1.0, 12.5, 1000.0] {
            let b = compute_frame(t, ASPECT);
            assert_eq!(a.view, b.view);
            assert_eq!(a.projection, b.projection);
        }
    }

    #[test]
    fn elapsed_is_recorded() {
        assert_eq!(compute_frame(2.5, ASPECT).elapsed, 2.5);
    }

    #[test]
    fn custom_camera_is_used() {
        let camera = CameraConfig {
            eye: Vec3::new(0.0, 0.0, 5.0),
            ..CameraConfig::default()
        };
        let frame = FrameTransform::new(camera).compute_frame(0.0, ASPECT);
        let eye = frame.view.transform_point3(camera.eye);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert_ne!(frame.view, compute_frame(0.0, ASPECT).view);
    }

    #[test]
    fn matrices_upload_as_64_bytes() {
        let frame = compute_frame(0.3, ASPECT);
        assert_eq!(frame.model_bytes().len(), 64);
        assert_eq!(frame.view_bytes().len(), 64);
        assert_eq!(frame.projection_bytes().len(), 64);
        assert_eq!(
            &frame.model_bytes()[..4],
            &frame.model.x_axis.x.to_ne_bytes()
        );
    }

    #[test]
    fn aspect_ratio_handles_zero_height() {
        assert_eq!(aspect_ratio(800, 600), 800.0 / 600.0);
        assert_eq!(aspect_ratio(800, 0), 1.0);
    }
}
