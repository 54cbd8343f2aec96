//! Perspective camera

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use spacebg_core::CameraConfig;

/// Maps OpenGL clip depth (-1..1) onto the 0..1 range wgpu expects
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// A perspective camera looking from `position` towards `target`
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    /// Create a new camera
    pub fn new(position: Point3<f32>, fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Point3::origin(),
            up: Vector3::y(),
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Camera described by the scene configuration, looking at the origin
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let [x, y, z] = config.position;
        Self::new(
            Point3::new(x, y, z),
            config.fov_degrees.to_radians(),
            aspect_ratio,
            config.near,
            config.far,
        )
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    /// Update the aspect ratio from a viewport size; a zero height is ignored
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix, with depth mapped to 0..1
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        opengl_to_wgpu() * perspective.into_inner()
    }

    /// Unit vector from the camera towards its target
    pub fn forward_vector(&self) -> Vector3<f32> {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3::z())
    }

    /// Screen-right direction in world space
    pub fn right_vector(&self) -> Vector3<f32> {
        self.forward_vector()
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::x)
    }

    /// Screen-up direction in world space
    pub fn up_vector(&self) -> Vector3<f32> {
        self.right_vector().cross(&self.forward_vector())
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn test_default_matches_config() {
        let camera = PerspectiveCamera::default();
        assert_relative_eq!(camera.position, Point3::new(5.0, -1.7, 8.0));
        assert_relative_eq!(camera.fov, 35f32.to_radians());
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = PerspectiveCamera::new(Point3::new(0.0, 0.0, 5.0), 1.0, 1.0, 0.1, 100.0);
        let proj = camera.projection_matrix();

        let near = proj * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = PerspectiveCamera::default();
        let clip = camera.projection_matrix() * camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_aspect_ignores_zero_height() {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(800, 400);
        assert_relative_eq!(camera.aspect_ratio, 2.0);
        camera.set_aspect(800, 0);
        assert_relative_eq!(camera.aspect_ratio, 2.0);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = PerspectiveCamera::default();
        let (f, r, u) = (camera.forward_vector(), camera.right_vector(), camera.up_vector());
        assert_relative_eq!(f.dot(&r), 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.dot(&u), 0.0, epsilon = 1e-6);
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-6);
        assert!(u.y > 0.0);
    }
}
