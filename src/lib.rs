//! # spacebg
//!
//! A rotating decorative 3D space background for Rust.
//!
//! This is the umbrella crate that re-exports the individual spacebg crates.
//! Use it to get everything in one place, or depend on the individual crates
//! for finer control over dependencies.
//!
//! ## Crates
//!
//! - **Core**: meshes, geometry generators, transforms, colours, configuration
//! - **GPU**: wgpu renderer with basic, matcap and lambert materials
//! - **Visualization**: scene graph, orbit controls and the windowed viewer
//!
//! ## Quick Start
//!
//! ```no_run
//! use spacebg::prelude::*;
//!
//! let mut config = SceneConfig::default();
//! config.seed = Some(7);
//! show_space_background(config).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: enables `visualization`
//! - `gpu`: the wgpu renderer
//! - `visualization`: scene, controls and viewer (implies `gpu`)

// Re-export core functionality
pub use spacebg_core::*;

#[cfg(feature = "gpu")]
pub use spacebg_gpu as gpu;

#[cfg(feature = "visualization")]
pub use spacebg_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use spacebg_core::*;

    #[cfg(feature = "gpu")]
    pub use spacebg_gpu::*;

    #[cfg(feature = "visualization")]
    pub use spacebg_visualization::*;
}
