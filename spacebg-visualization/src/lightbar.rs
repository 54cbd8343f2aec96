//! Ring of capsule light bars

use nalgebra::Vector3;
use rand::Rng;
use spacebg_core::{capsule, LightBarConfig, NodeTransform, Result, TriangleMesh};

/// One capsule in the ring.
///
/// Bars sit on a circle of `ring_radius` around the Y axis, stepping
/// `angle_step` radians per bar, each with a random length and height.
#[derive(Debug, Clone, PartialEq)]
pub struct LightBar {
    pub uid: u32,
    /// Length of the cylindrical section
    pub length: f32,
    pub position: Vector3<f32>,
}

impl LightBar {
    /// Place bar `uid`. Draws three random numbers: length, then two for height.
    pub fn place<R: Rng>(uid: u32, rng: &mut R, config: &LightBarConfig) -> Self {
        let length = config.base_length + rng.gen::<f32>() * config.length_jitter;

        let half_amplitude = config.amplitude / 2.0;
        let y = -rng.gen::<f32>() * half_amplitude + rng.gen::<f32>() * half_amplitude;

        let angle = uid as f32 * config.angle_step;
        let x = -angle.sin() * config.ring_radius;
        let z = -angle.cos() * config.ring_radius;

        Self {
            uid,
            length,
            position: Vector3::new(x, y, z),
        }
    }

    /// Place every bar of the ring
    pub fn ring<R: Rng>(rng: &mut R, config: &LightBarConfig) -> Vec<Self> {
        (0..config.count).map(|uid| Self::place(uid, rng, config)).collect()
    }

    pub fn mesh(&self, config: &LightBarConfig) -> Result<TriangleMesh> {
        capsule(
            config.capsule_radius,
            self.length,
            config.cap_segments,
            config.radial_segments,
        )
    }

    pub fn transform(&self) -> NodeTransform {
        NodeTransform::at(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    #[test]
    fn test_first_bar_sits_on_negative_z() {
        let mut rng = StdRng::seed_from_u64(7);
        let bar = LightBar::place(0, &mut rng, &LightBarConfig::default());
        assert_relative_eq!(bar.position.x, 0.0);
        assert_relative_eq!(bar.position.z, -PI);
    }

    #[test]
    fn test_bars_step_around_the_ring() {
        let config = LightBarConfig::default();
        let bars = LightBar::ring(&mut StdRng::seed_from_u64(7), &config);

        // uid 5 sits 1.5 rad round from -Z, on the -X side
        let bar = &bars[5];
        assert_relative_eq!(bar.position.x, -(1.5f32).sin() * PI, epsilon = 1e-5);
        assert_relative_eq!(bar.position.z, -(1.5f32).cos() * PI, epsilon = 1e-5);
        assert!(bar.position.x < 0.0);

        // past half a turn the ring wraps over to +X
        let bar = &bars[12];
        assert_relative_eq!(bar.position.x, -(3.6f32).sin() * PI, epsilon = 1e-5);
        assert!(bar.position.x > 0.0 && bar.position.z > 0.0);
    }

    #[test]
    fn test_ring_stays_within_bounds() {
        let config = LightBarConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let bars = LightBar::ring(&mut rng, &config);

        assert_eq!(bars.len(), 21);
        for bar in &bars {
            let radial = (bar.position.x.powi(2) + bar.position.z.powi(2)).sqrt();
            assert_relative_eq!(radial, PI, epsilon = 1e-5);
            assert!(bar.position.y.abs() <= 0.5);
            assert!(bar.length >= 0.5 && bar.length < 1.5);
        }
    }

    #[test]
    fn test_same_seed_same_ring() {
        let config = LightBarConfig::default();
        let a = LightBar::ring(&mut StdRng::seed_from_u64(3), &config);
        let b = LightBar::ring(&mut StdRng::seed_from_u64(3), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bar_mesh_spans_length() {
        let config = LightBarConfig::default();
        let bar = LightBar {
            uid: 0,
            length: 0.8,
            position: Vector3::zeros(),
        };
        let mesh = bar.mesh(&config).unwrap();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_relative_eq!(max.y - min.y, 0.8 + 2.0 * config.capsule_radius, epsilon = 1e-5);
    }
}
