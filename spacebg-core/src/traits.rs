//! Core traits for spacebg

use crate::{mesh::TriangleMesh, point::*, transform::Transform3D};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Axis-aligned bounds of the object, `None` when it has no geometry
    fn bounds(&self) -> Option<(Point3f, Point3f)>;

    /// Get the center point of the object
    fn center(&self) -> Option<Point3f> {
        self.bounds().map(|(min, max)| nalgebra::center(&min, &max))
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Drawable for TriangleMesh {
    fn bounds(&self) -> Option<(Point3f, Point3f)> {
        self.bounding_box()
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for vertex in &mut self.vertices {
            *vertex = transform.transform_point(vertex);
        }

        // Normals need the inverse transpose so non-uniform scales stay correct
        if let Some(normals) = self.normals.as_mut() {
            let normal_matrix = transform.normal_matrix();
            for normal in normals.iter_mut() {
                *normal = (normal_matrix * *normal)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or(*normal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::circle;
    use crate::transform::NodeTransform;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotated_disc_faces_down() {
        let mut disc = circle(1.0, 8).unwrap();
        let mut node = NodeTransform::default();
        node.rotate_x(std::f32::consts::FRAC_PI_2);
        disc.transform(&Transform3D::from(node.matrix()));

        for n in disc.normals.as_ref().unwrap() {
            assert_relative_eq!(n.y, -1.0, epsilon = 1e-5);
        }
        let center = disc.center().unwrap();
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
    }
}
