//! Scene graph, camera controls and windowed viewer for the space background
//!
//! This crate turns a [`SceneConfig`](spacebg_core::SceneConfig) into a
//! running animation using wgpu and winit:
//! - Retained scene graph with a rotating root
//! - The cube and light-bar space scene
//! - Perspective camera with orbit controls
//! - Render loop timing

pub mod camera;
pub mod clock;
pub mod controls;
pub mod lightbar;
pub mod scene;
pub mod space;
pub mod viewer;

pub use camera::*;
pub use clock::*;
pub use controls::*;
pub use lightbar::*;
pub use scene::*;
pub use space::*;
pub use viewer::*;

use spacebg_core::{Result, SceneConfig};

/// Show the space background in a window until it is closed
pub fn show_space_background(config: SceneConfig) -> Result<()> {
    SpaceViewer::new(config)?.run()
}
