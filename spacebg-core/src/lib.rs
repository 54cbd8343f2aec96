//! Core data structures and traits for spacebg
//!
//! This crate provides the CPU-side building blocks of the space background:
//! meshes and the geometry generators that fill them, node transforms,
//! colours, scene configuration and the shared error type.

pub mod point;
pub mod mesh;
pub mod geometry;
pub mod traits;
pub mod transform;
pub mod color;
pub mod config;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use geometry::*;
pub use traits::*;
pub use transform::*;
pub use color::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4, Rotation3, UnitQuaternion};

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = TriangleMesh;
