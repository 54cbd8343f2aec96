//! The space background scene: a rounded cube inside a ring of light bars,
//! lit by a hemisphere light and a point light, slowly rotating about Y.

use crate::camera::PerspectiveCamera;
use crate::lightbar::LightBar;
use crate::scene::{Light, Material, MaterialId, Scene, SceneObject};
use image::RgbaImage;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spacebg_core::{
    circle, rounded_box, Color, MaterialKind, NodeTransform, Result, SceneConfig, TextureConfig,
    MAX_SEED,
};
use spacebg_gpu::{generated_env, generated_matcap, load_rgba_or};
use std::f32::consts::FRAC_PI_2;
use std::f64::consts::TAU;
use tracing::{debug, info};

const GENERATED_TEXTURE_SIZE: u32 = 256;

/// Vertical travel of the bobbing cube
const BOB_AMPLITUDE: f32 = 0.2;

/// Random generator for the light-bar layout. Without a configured seed one is
/// drawn and logged so the layout can be reproduced; drawn seeds stay within
/// [`MAX_SEED`] so they can be written back into a config file.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..=MAX_SEED));
    info!(seed, "light bar layout seed");
    StdRng::seed_from_u64(seed)
}

/// Images used by the textured materials
#[derive(Debug, Clone)]
pub struct SceneTextures {
    pub matcap: RgbaImage,
    pub map: Option<RgbaImage>,
}

impl SceneTextures {
    /// Load configured images, generating any that are missing or unreadable
    pub fn load(config: &TextureConfig) -> Self {
        Self {
            matcap: load_rgba_or(config.matcap.as_deref(), || generated_matcap(GENERATED_TEXTURE_SIZE)),
            map: Some(load_rgba_or(config.map.as_deref(), || generated_env(GENERATED_TEXTURE_SIZE))),
        }
    }

    fn material(&self, kind: MaterialKind, color: Color) -> Material {
        match kind {
            MaterialKind::Basic => Material::Basic { color },
            MaterialKind::Matcap => Material::Matcap {
                color,
                matcap: self.matcap.clone(),
                map: self.map.clone(),
            },
            MaterialKind::Lambert => Material::Lambert {
                color,
                map: self.map.clone(),
            },
        }
    }
}

pub struct SpaceScene {
    pub scene: Scene,
    scene_speed: f32,
    object_speed: f32,
    light_bars: Vec<LightBar>,
}

impl SpaceScene {
    pub const CUBE: &'static str = "cube";
    pub const FLOOR: &'static str = "floor";

    /// Build the scene: lights, then the cube (and floor), then the light bars
    pub fn build<R: Rng>(config: &SceneConfig, rng: &mut R, textures: &SceneTextures) -> Result<Self> {
        config.validate()?;

        let mut space = Self {
            scene: Scene::new(config.background),
            scene_speed: config.scene.speed,
            object_speed: config.object.speed,
            light_bars: Vec::new(),
        };

        space.add_lights(config);
        space.add_object(config, textures)?;
        space.add_light_bars(config, rng, textures)?;

        info!(
            objects = space.scene.objects().len(),
            light_bars = space.light_bars.len(),
            "built space scene"
        );
        Ok(space)
    }

    fn add_lights(&mut self, config: &SceneConfig) {
        let hemisphere = &config.lights.hemisphere;
        self.scene.add_light(Light::Hemisphere {
            sky: hemisphere.sky,
            ground: hemisphere.ground,
            intensity: hemisphere.intensity,
        });

        let point = &config.lights.point;
        let [x, y, z] = point.position;
        self.scene.add_light(Light::Point {
            color: point.color,
            intensity: point.intensity,
            position: Vector3::new(x, y, z),
            cast_shadow: point.cast_shadow,
        });
    }

    fn add_object(&mut self, config: &SceneConfig, textures: &SceneTextures) -> Result<()> {
        let cube = &config.cube;
        let [width, height, depth] = cube.size;
        let mesh = self
            .scene
            .add_mesh(Self::CUBE, rounded_box(width, height, depth, cube.segments, cube.radius)?);
        // the floor shares the cube's material
        let material = self
            .scene
            .add_material("cube material", textures.material(cube.material, cube.color));

        self.scene.add_object(SceneObject {
            name: Self::CUBE.to_string(),
            mesh,
            material,
            transform: NodeTransform::default(),
            visible: true,
        })?;

        let floor = &config.floor;
        if floor.visible {
            let mesh = self.scene.add_mesh(Self::FLOOR, circle(floor.radius, floor.segments)?);
            let mut transform = NodeTransform::at(Vector3::new(0.0, floor.height, 0.0));
            transform.rotate_x(FRAC_PI_2);
            self.scene.add_object(SceneObject {
                name: Self::FLOOR.to_string(),
                mesh,
                material,
                transform,
                visible: true,
            })?;
        }
        Ok(())
    }

    fn add_light_bars<R: Rng>(
        &mut self,
        config: &SceneConfig,
        rng: &mut R,
        textures: &SceneTextures,
    ) -> Result<()> {
        let bars = &config.light_bars;
        let material: MaterialId = self
            .scene
            .add_material("light bar material", textures.material(bars.material, bars.color));

        for bar in LightBar::ring(rng, bars) {
            let name = format!("light_bar_{}", bar.uid);
            let mesh = self.scene.add_mesh(name.clone(), bar.mesh(bars)?);
            debug!(uid = bar.uid, length = bar.length, "placed light bar");
            self.scene.add_object(SceneObject {
                name,
                mesh,
                material,
                transform: bar.transform(),
                visible: true,
            })?;
            self.light_bars.push(bar);
        }
        Ok(())
    }

    pub fn light_bars(&self) -> &[LightBar] {
        &self.light_bars
    }

    /// Pose the scene for `elapsed` seconds since start
    pub fn animate(&mut self, elapsed: f64) {
        self.scene.root.rotation.y = phase(elapsed, self.scene_speed);

        let spin = phase(elapsed, self.object_speed);
        if let Some(cube) = self.scene.object_mut(Self::CUBE) {
            cube.transform.rotation.x = spin;
            cube.transform.rotation.y = -spin;
            cube.transform.rotation.z = spin;
            cube.transform.position.y = spin.sin() * BOB_AMPLITUDE;
        }
    }

    /// Animate and aim the camera at the scene
    pub fn frame(&mut self, camera: &mut PerspectiveCamera, elapsed: f64) {
        self.animate(elapsed);
        camera.look_at(self.scene.position());
    }
}

/// Angle turned after `elapsed` seconds at `speed`, wrapped to one turn
fn phase(elapsed: f64, speed: f32) -> f32 {
    (elapsed * speed as f64).rem_euclid(TAU) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_textures() -> SceneTextures {
        SceneTextures {
            matcap: generated_matcap(4),
            map: Some(generated_env(4)),
        }
    }

    fn build(config: &SceneConfig) -> SpaceScene {
        let mut rng = StdRng::seed_from_u64(1);
        SpaceScene::build(config, &mut rng, &small_textures()).unwrap()
    }

    #[test]
    fn test_default_scene_contents() {
        let space = build(&SceneConfig::default());
        // cube plus 21 bars; the floor is hidden by default
        assert_eq!(space.scene.objects().len(), 22);
        assert_eq!(space.light_bars().len(), 21);
        assert_eq!(space.scene.lights().len(), 2);
        assert!(space.scene.object(SpaceScene::FLOOR).is_none());
        assert_eq!(space.scene.objects()[0].name, SpaceScene::CUBE);
    }

    #[test]
    fn test_floor_faces_down() {
        let mut config = SceneConfig::default();
        config.floor.visible = true;
        let space = build(&config);
        let floor = space.scene.object(SpaceScene::FLOOR).unwrap();
        assert_relative_eq!(floor.transform.position.y, -1.0);
        let normal = floor.transform.rotation.to_rotation() * Vector3::z();
        assert_relative_eq!(normal, -Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_animate_rotates_root_and_spins_cube() {
        let mut config = SceneConfig::default();
        config.object.speed = 0.5;
        let mut space = build(&config);
        space.animate(2.0);

        assert_relative_eq!(space.scene.root.rotation.y, 0.2);
        let cube = space.scene.object(SpaceScene::CUBE).unwrap();
        assert_relative_eq!(cube.transform.rotation.x, 1.0);
        assert_relative_eq!(cube.transform.rotation.y, -1.0);
        assert_relative_eq!(cube.transform.rotation.z, 1.0);
        assert_relative_eq!(cube.transform.position.y, 1f32.sin() * 0.2);
    }

    #[test]
    fn test_default_cube_stays_still() {
        let mut space = build(&SceneConfig::default());
        space.animate(100.0);
        let cube = space.scene.object(SpaceScene::CUBE).unwrap();
        assert_eq!(cube.transform, NodeTransform::default());
    }

    #[test]
    fn test_frame_points_camera_at_scene() {
        let mut space = build(&SceneConfig::default());
        let mut camera = PerspectiveCamera::default();
        camera.look_at(nalgebra::Point3::new(1.0, 1.0, 1.0));
        space.frame(&mut camera, 1.0);
        assert_eq!(camera.target, space.scene.position());
    }

    #[test]
    fn test_rotation_stays_smooth_after_long_runs() {
        let mut space = build(&SceneConfig::default());
        // six days in; a frame later the scene must still have turned
        let late = 524_288.0;
        space.animate(late);
        let before = space.scene.root.rotation.y;
        space.animate(late + 1.0 / 60.0);
        let after = space.scene.root.rotation.y;

        let turned = (after - before).rem_euclid(std::f32::consts::TAU);
        assert_relative_eq!(turned, 0.1 / 60.0, epsilon = 1e-5);
        assert!((0.0..std::f32::consts::TAU).contains(&after));
    }

    #[test]
    fn test_drawn_seed_fits_a_config_file() {
        let mut config = SceneConfig::default();
        config.seed = Some(MAX_SEED);
        let text = config.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap().seed, Some(MAX_SEED));

        let mut a = seeded_rng(Some(MAX_SEED));
        let mut b = seeded_rng(Some(MAX_SEED));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SceneConfig::default();
        config.cube.size = [0.0, 1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SpaceScene::build(&config, &mut rng, &small_textures()).is_err());
    }
}
