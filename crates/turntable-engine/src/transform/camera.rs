use glam::{Mat4, Vec3};

/// Fixed camera and lens used to build the view and projection matrices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl CameraConfig {
    /// Right-handed look-at from `eye` towards `target`.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range, as wgpu expects.
    #[inline]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = CameraConfig::default();
        let eye = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn view_puts_target_in_front_of_camera() {
        let camera = CameraConfig::default();
        let target = camera.view_matrix().transform_point3(camera.target);
        assert!(target.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-6));
    }

    #[test]
    fn projection_uses_vertical_fov() {
        let proj = CameraConfig::default().projection_matrix(800.0 / 600.0);
        let focal = 1.0 / 22.5_f32.to_radians().tan();

        assert!((proj.y_axis.y - focal).abs() < 1e-5);
        assert!((proj.x_axis.x - focal / (800.0 / 600.0)).abs() < 1e-5);
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let proj = CameraConfig::default().projection_matrix(1.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -10.0, 1.0);

        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }
}
