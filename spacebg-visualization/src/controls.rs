//! Orbit camera controls
//!
//! The camera orbits a target point. Input is accumulated as deltas between
//! frames and folded into the camera position by [`OrbitControls::update`],
//! which the render loop calls once per frame. With damping enabled only a
//! fraction of each delta is applied per frame and the rest decays, giving the
//! camera inertia.

use crate::camera::PerspectiveCamera;
use nalgebra::{Point3, Vector3};
use spacebg_core::ControlsConfig;
use std::f32::consts::PI;
use tracing::debug;

const EPS: f32 = 1e-6;

/// What a held mouse button does while the cursor moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Spherical coordinates around the Y axis; `phi` is measured from +Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_vector(v: &Vector3<f32>) -> Self {
        let radius = v.norm();
        if radius < EPS {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vector(&self) -> Vector3<f32> {
        let sin_phi = self.phi.sin();
        Vector3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct SavedState {
    target: Point3<f32>,
    position: Point3<f32>,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_zoom: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vector3<f32>,
    scale: f32,
    saved: SavedState,
    drag: Option<DragMode>,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    /// Controls orbiting the origin, with the camera's current placement saved
    /// for [`reset`](Self::reset)
    pub fn new(config: &ControlsConfig, camera: &PerspectiveCamera) -> Self {
        let target = Point3::origin();
        Self {
            target,
            enable_zoom: config.enable_zoom,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            enable_pan: config.enable_pan,
            pan_speed: config.pan_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vector3::zeros(),
            scale: 1.0,
            saved: SavedState {
                target,
                position: camera.position,
            },
            drag: None,
            last_cursor: None,
        }
    }

    /// Queue a rotation from a cursor movement in pixels
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= 2.0 * PI * dx * self.rotate_speed / viewport_height;
        self.delta_phi -= 2.0 * PI * dy * self.rotate_speed / viewport_height;
    }

    /// Queue a pan from a cursor movement in pixels.
    ///
    /// The distance moved is scaled so the point under the cursor at the
    /// target's depth follows the cursor.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        if !self.enable_pan || viewport_height <= 0.0 {
            return;
        }
        let distance = (camera.position - self.target).norm() * (camera.fov / 2.0).tan();
        let dx = dx * self.pan_speed;
        let dy = dy * self.pan_speed;
        self.pan_offset -= camera.right_vector() * (2.0 * dx * distance / viewport_height);
        self.pan_offset += camera.up_vector() * (2.0 * dy * distance / viewport_height);
    }

    /// Queue a dolly; positive steps move towards the target
    pub fn zoom(&mut self, wheel_steps: f32) {
        if !self.enable_zoom {
            return;
        }
        self.scale *= self.zoom_scale().powf(wheel_steps);
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    pub fn begin_drag(&mut self, mode: DragMode) {
        self.drag = Some(mode);
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Feed an absolute cursor position; deltas turn into rotation or pan
    /// while a drag is active
    pub fn cursor_moved(&mut self, x: f64, y: f64, viewport_height: f32, camera: &PerspectiveCamera) {
        if let (Some(mode), Some((last_x, last_y))) = (self.drag, self.last_cursor) {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            match mode {
                DragMode::Rotate => self.rotate_by_pixels(dx, dy, viewport_height),
                DragMode::Pan => self.pan_by_pixels(dx, dy, viewport_height, camera),
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Apply queued input to the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vector(&offset);

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let previous = camera.position;
        camera.position = self.target + spherical.to_vector();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vector3::zeros();
        }
        self.scale = 1.0;

        (camera.position - previous).norm_squared() > EPS
    }

    /// Restore the saved placement and drop any queued input
    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        self.target = self.saved.target;
        camera.position = self.saved.position;
        camera.look_at(self.target);
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vector3::zeros();
        self.scale = 1.0;
        self.drag = None;
        debug!("orbit controls reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup(damping: bool) -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::new(Point3::new(0.0, 0.0, 10.0), 1.0, 1.0, 0.1, 100.0);
        let config = ControlsConfig {
            enable_zoom: true,
            enable_damping: damping,
            damping_factor: 0.1,
            ..ControlsConfig::default()
        };
        (OrbitControls::new(&config, &camera), camera)
    }

    #[test]
    fn test_spherical_conversion() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let back = Spherical::from_vector(&v).to_vector();
        assert_relative_eq!(back, v, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let (mut controls, mut camera) = setup(false);
        controls.rotate_by_pixels(100.0, 0.0, 500.0);
        assert!(controls.update(&mut camera));
        assert_relative_eq!(camera.position.coords.norm(), 10.0, epsilon = 1e-4);
        // dragging right swings the camera towards -X
        assert!(camera.position.x < 0.0);
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn test_update_without_input_is_stable() {
        let (mut controls, mut camera) = setup(false);
        assert!(!controls.update(&mut camera));
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup(false);
        controls.rotate_by_pixels(0.0, 10_000.0, 100.0);
        controls.update(&mut camera);
        assert!(camera.position.x.is_finite());
        assert!(camera.position.y > 9.99);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let (mut controls, mut camera) = setup(true);
        controls.rotate_by_pixels(100.0, 0.0, 500.0);
        controls.update(&mut camera);
        let first = camera.position;
        controls.update(&mut camera);
        let second = camera.position;
        assert!((second - first).norm() > 0.0);
        assert!(second.x < first.x);
    }

    #[test]
    fn test_zero_damping_factor_is_inert() {
        let (mut controls, mut camera) = setup(true);
        controls.damping_factor = 0.0;
        controls.rotate_by_pixels(100.0, 50.0, 500.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_in_and_disabled_zoom() {
        let (mut controls, mut camera) = setup(false);
        controls.zoom(1.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 9.5, epsilon = 1e-4);

        controls.enable_zoom = false;
        controls.zoom(5.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 9.5, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let camera = PerspectiveCamera::new(Point3::new(0.0, 0.0, 10.0), 1.0, 1.0, 0.1, 100.0);
        let config = ControlsConfig {
            enable_zoom: true,
            enable_damping: false,
            min_distance: 9.0,
            max_distance: 11.0,
            ..ControlsConfig::default()
        };
        let mut controls = OrbitControls::new(&config, &camera);
        let mut camera = camera;

        controls.zoom(10.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 9.0, epsilon = 1e-4);

        controls.zoom(-20.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.z, 11.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pan_moves_target_with_camera() {
        let (mut controls, mut camera) = setup(false);
        controls.pan_by_pixels(50.0, 0.0, 500.0, &camera);
        controls.update(&mut camera);
        // dragging right drags the scene right, so the view moves left
        assert!(controls.target.x < 0.0);
        assert_relative_eq!(camera.position.x, controls.target.x, epsilon = 1e-5);
        assert_relative_eq!(camera.position.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_drag_routes_cursor_deltas() {
        let (mut controls, mut camera) = setup(false);
        controls.cursor_moved(10.0, 10.0, 500.0, &camera);
        controls.cursor_moved(60.0, 10.0, 500.0, &camera);
        assert!(!controls.update(&mut camera));

        controls.begin_drag(DragMode::Rotate);
        controls.cursor_moved(110.0, 10.0, 500.0, &camera);
        controls.end_drag();
        assert!(controls.update(&mut camera));
    }

    #[test]
    fn test_reset_restores_saved_state() {
        let (mut controls, mut camera) = setup(false);
        controls.rotate_by_pixels(80.0, 40.0, 500.0);
        controls.pan_by_pixels(20.0, 20.0, 500.0, &camera);
        controls.update(&mut camera);
        controls.reset(&mut camera);
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, 10.0));
        assert_eq!(controls.target, Point3::origin());
    }
}
