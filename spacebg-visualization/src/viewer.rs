//! Windowed viewer running the space background render loop

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use crate::camera::PerspectiveCamera;
use crate::clock::Clock;
use crate::controls::{DragMode, OrbitControls};
use crate::scene::Scene;
use crate::space::{seeded_rng, SceneTextures, SpaceScene};
use spacebg_core::{Error, Result, SceneConfig};
use spacebg_gpu::{DrawCall, MaterialHandle, MeshHandle, RendererConfig, SceneRenderer};
use tracing::{debug, error, info};

/// Pixel scroll distance treated as one wheel step
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Renderer handles for every mesh and material of a scene, indexed like the
/// scene's own ids
#[derive(Debug, Clone, Default)]
pub struct GpuScene {
    meshes: Vec<MeshHandle>,
    materials: Vec<MaterialHandle>,
}

impl GpuScene {
    /// Upload all meshes and materials of `scene` once
    pub fn upload(renderer: &mut SceneRenderer, scene: &Scene) -> Result<Self> {
        let meshes = scene
            .meshes()
            .map(|(label, mesh)| renderer.upload_mesh(label, mesh))
            .collect::<Result<Vec<_>>>()?;
        let materials = scene
            .materials()
            .map(|(label, material)| renderer.create_material(label, &material.to_desc()))
            .collect::<Result<Vec<_>>>()?;
        info!(meshes = meshes.len(), materials = materials.len(), "uploaded scene");
        Ok(Self { meshes, materials })
    }

    /// Resolve the scene's visible objects into renderer draw calls
    pub fn draw_calls(&self, scene: &Scene) -> Result<Vec<DrawCall>> {
        scene
            .draw_list()
            .into_iter()
            .map(|draw| {
                let mesh = self.meshes.get(draw.mesh.0).copied();
                let material = self.materials.get(draw.material.0).copied();
                match (mesh, material) {
                    (Some(mesh), Some(material)) => Ok(DrawCall {
                        mesh,
                        material,
                        model: draw.world,
                    }),
                    _ => Err(Error::Visualization(format!(
                        "mesh {} or material {} was never uploaded",
                        draw.mesh.0, draw.material.0
                    ))),
                }
            })
            .collect()
    }
}

/// Opens a window and draws the space background until it is closed.
///
/// Left drag orbits, right drag pans, the wheel zooms when enabled, `R`
/// resets the camera and `Escape` quits.
pub struct SpaceViewer {
    config: SceneConfig,
    space: SpaceScene,
}

impl SpaceViewer {
    /// Build the scene described by `config`
    pub fn new(config: SceneConfig) -> Result<Self> {
        let textures = SceneTextures::load(&config.textures);
        let mut rng = seeded_rng(config.seed);
        let space = SpaceScene::build(&config, &mut rng, &textures)?;
        Ok(Self { config, space })
    }

    /// Run the render loop; returns when the window closes
    pub fn run(self) -> Result<()> {
        let Self { config, mut space } = self;

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(config.window.title.as_str())
                .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let renderer_config = RendererConfig {
            background: config.background,
            antialias: config.render.antialias,
            vsync: config.render.vsync,
        };
        let mut renderer = pollster::block_on(SceneRenderer::new(window.clone(), renderer_config))?;
        let gpu_scene = GpuScene::upload(&mut renderer, &space.scene)?;

        let (width, height) = renderer.size();
        let mut camera = PerspectiveCamera::from_config(&config.camera, width as f32 / height as f32);
        let mut controls = OrbitControls::new(&config.controls, &camera);
        let mut clock = Clock::new();
        clock.start();

        info!("viewer running");

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(size) => {
                            renderer.resize(size.width, size.height);
                            camera.set_aspect(size.width, size.height);
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            let mode = match button {
                                MouseButton::Left => Some(DragMode::Rotate),
                                MouseButton::Right => Some(DragMode::Pan),
                                _ => None,
                            };
                            match (mode, state) {
                                (Some(mode), ElementState::Pressed) => controls.begin_drag(mode),
                                (Some(_), ElementState::Released) => controls.end_drag(),
                                _ => {}
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            let viewport_height = renderer.size().1 as f32;
                            controls.cursor_moved(position.x, position.y, viewport_height, &camera);
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            let steps = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_WHEEL_STEP,
                            };
                            controls.zoom(steps);
                        }
                        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                            match &event.logical_key {
                                Key::Named(NamedKey::Escape) => target.exit(),
                                Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                                    controls.reset(&mut camera);
                                }
                                _ => {}
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let elapsed = clock.elapsed_time();
                            space.frame(&mut camera, elapsed);

                            let frame = space.scene.frame_params(&camera);
                            let result = gpu_scene
                                .draw_calls(&space.scene)
                                .and_then(|draws| renderer.render(&frame, &draws));
                            if let Err(e) = result {
                                error!("render failed: {}", e);
                            }

                            controls.update(&mut camera);
                        }
                        _ => {}
                    },
                    Event::AboutToWait => window.request_redraw(),
                    Event::LoopExiting => debug!("event loop exiting"),
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, SceneObject};
    use spacebg_core::{circle, Color, NodeTransform};

    #[test]
    fn test_draw_calls_map_ids_to_handles() {
        let mut scene = Scene::new(Color::BLACK);
        let mesh = scene.add_mesh("disc", circle(1.0, 6).unwrap());
        let material = scene.add_material("white", Material::Basic { color: Color::WHITE });
        scene
            .add_object(SceneObject {
                name: "disc".to_string(),
                mesh,
                material,
                transform: NodeTransform::default(),
                visible: true,
            })
            .unwrap();

        let gpu_scene = GpuScene {
            meshes: vec![MeshHandle(7)],
            materials: vec![MaterialHandle(3)],
        };
        let draws = gpu_scene.draw_calls(&scene).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].mesh, MeshHandle(7));
        assert_eq!(draws[0].material, MaterialHandle(3));

        assert!(GpuScene::default().draw_calls(&scene).is_err());
    }
}
