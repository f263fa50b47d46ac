use glam::{EulerRot, Mat4, Quat, Vec3};

/// Perspective camera described by a position and an Euler rotation.
///
/// Rotation follows the usual right-handed convention: `pitch` turns around
/// the camera's x axis, `yaw` around its y axis, applied in XYZ order. With
/// zero rotation the camera looks down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position of the camera
    pub position: Vec3,
    /// Rotation around the x axis, in radians
    pub pitch: f32,
    /// Rotation around the y axis, in radians
    pub yaw: f32,
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// Width over height of the drawing surface
    pub aspect_ratio: f32,
    /// The near plane of the camera, anything closer than this will not be rendered
    pub near: f32,
    /// The far plane of the camera, anything beyond this will not be rendered
    pub far: f32,
}

impl Camera {
    pub const DEFAULT_FOV: f32 = 75.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 5.0;
    pub const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 4.0);

    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            fov: Self::DEFAULT_FOV,
            aspect_ratio,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    pub fn with_far(mut self, far: f32) -> Self {
        self.far = far;
        self
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Adds to the current pitch/yaw. Angles are not clamped or wrapped.
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.pitch += delta_pitch;
        self.yaw += delta_yaw;
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// World to view space. Inverse of the camera's own placement.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Self::START_POSITION, 800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrotated_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let cam = Camera::default();
        let p = cam.view_matrix().transform_point3(cam.position);
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn positive_yaw_turns_left() {
        let mut cam = Camera::default();
        cam.rotate(0.0, std::f32::consts::FRAC_PI_2);
        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-5);
    }
}
