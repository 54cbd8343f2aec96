//! Scene configuration
//!
//! Every field has a default matching the stock background, so a config file
//! only needs to list what it changes. Files are TOML.

use crate::{Color, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Largest seed a config file can hold; TOML integers are signed 64-bit
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Complete description of the space background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the light-bar jitter; a random seed is drawn when absent
    pub seed: Option<u64>,
    pub background: Color,
    /// Rotation of the whole scene about Y
    pub scene: MotionConfig,
    /// Spin and bob of the central cube
    pub object: MotionConfig,
    pub camera: CameraConfig,
    pub lights: LightsConfig,
    pub cube: CubeConfig,
    pub light_bars: LightBarConfig,
    pub floor: FloorConfig,
    pub controls: ControlsConfig,
    pub textures: TextureConfig,
    pub render: RenderSettings,
    pub window: WindowConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            background: Color::from_hex(0x000a0b),
            scene: MotionConfig { speed: 0.1 },
            object: MotionConfig { speed: 0.0 },
            camera: CameraConfig::default(),
            lights: LightsConfig::default(),
            cube: CubeConfig::default(),
            light_bars: LightBarConfig::default(),
            floor: FloorConfig::default(),
            controls: ControlsConfig::default(),
            textures: TextureConfig::default(),
            render: RenderSettings::default(),
            window: WindowConfig::default(),
        }
    }
}

/// Angular speed in radians per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub position: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 35.0,
            position: [5.0, -1.7, 8.0],
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub hemisphere: HemisphereLightConfig,
    pub point: PointLightConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereLightConfig {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

impl Default for HemisphereLightConfig {
    fn default() -> Self {
        Self {
            sky: Color::from_hex(0xffffff),
            ground: Color::from_hex(0xaaaacc),
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    pub color: Color,
    pub intensity: f32,
    pub position: [f32; 3],
    /// Kept for parity with the scene description; no shadow pass is drawn
    pub cast_shadow: bool,
}

impl Default for PointLightConfig {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffffff),
            intensity: 0.2,
            position: [1.0, 5.0, 1.0],
            cast_shadow: true,
        }
    }
}

/// Surface shading model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Flat colour, ignores lights
    Basic,
    /// Matcap lookup modulated by a colour map, ignores lights
    Matcap,
    /// Diffuse shading from the hemisphere and point lights
    Lambert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub size: [f32; 3],
    pub segments: u32,
    pub radius: f32,
    pub material: MaterialKind,
    pub color: Color,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: [1.0, 1.0, 1.0],
            segments: 5,
            radius: 0.05,
            material: MaterialKind::Matcap,
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightBarConfig {
    pub count: u32,
    pub ring_radius: f32,
    /// Angle between neighbouring bars, in radians
    pub angle_step: f32,
    /// Vertical spread of the bar centres
    pub amplitude: f32,
    pub capsule_radius: f32,
    pub base_length: f32,
    /// Upper bound of the random length added to `base_length`
    pub length_jitter: f32,
    pub cap_segments: u32,
    pub radial_segments: u32,
    pub material: MaterialKind,
    pub color: Color,
}

impl Default for LightBarConfig {
    fn default() -> Self {
        Self {
            count: 21,
            ring_radius: std::f32::consts::PI,
            angle_step: 0.3,
            amplitude: 1.0,
            capsule_radius: 0.02,
            base_length: 0.5,
            length_jitter: 1.0,
            cap_segments: 5,
            radial_segments: 16,
            material: MaterialKind::Basic,
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub visible: bool,
    pub radius: f32,
    pub segments: u32,
    pub height: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            visible: false,
            radius: 5.0,
            segments: 5,
            height: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_zoom: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    /// Closest the camera may orbit to its target
    pub min_distance: f32,
    /// Farthest the camera may orbit from its target
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_zoom: false,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}

/// Image files for the cube material. Missing entries use generated textures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub matcap: Option<PathBuf>,
    pub map: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub antialias: bool,
    pub vsync: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Space Background".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl SceneConfig {
    /// Parse a TOML document; fields that are not present keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Render the config as TOML, e.g. to write out a starting file
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject values the scene cannot be built from
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, message: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(Error::Config(message.to_string()))
            }
        }

        check(
            self.seed.map_or(true, |seed| seed <= MAX_SEED),
            "seed must not exceed 9223372036854775807",
        )?;
        check(self.scene.speed.is_finite(), "scene.speed must be finite")?;
        check(self.object.speed.is_finite(), "object.speed must be finite")?;

        let camera = &self.camera;
        check(
            camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
            "camera.fov_degrees must be between 0 and 180",
        )?;
        check(
            camera.near > 0.0 && camera.near < camera.far && camera.far.is_finite(),
            "camera.near must be positive and smaller than a finite camera.far",
        )?;
        check(
            camera.position.iter().all(|c| c.is_finite()),
            "camera.position must be finite",
        )?;

        check(
            self.cube.size.iter().all(|s| *s > 0.0),
            "cube.size must be positive",
        )?;
        check(self.cube.radius >= 0.0, "cube.radius must not be negative")?;

        let bars = &self.light_bars;
        check(bars.capsule_radius > 0.0, "light_bars.capsule_radius must be positive")?;
        check(
            bars.base_length >= 0.0 && bars.length_jitter >= 0.0,
            "light_bar lengths must not be negative",
        )?;
        check(
            bars.ring_radius.is_finite() && bars.amplitude.is_finite() && bars.angle_step.is_finite(),
            "light_bars placement must be finite",
        )?;

        check(self.floor.radius > 0.0, "floor.radius must be positive")?;

        let controls = &self.controls;
        check(
            (0.0..=1.0).contains(&controls.damping_factor),
            "controls.damping_factor must be within [0, 1]",
        )?;
        check(
            controls.rotate_speed.is_finite() && controls.zoom_speed.is_finite() && controls.pan_speed.is_finite(),
            "controls speeds must be finite",
        )?;
        check(
            controls.min_distance >= 0.0 && controls.min_distance <= controls.max_distance,
            "controls.min_distance must be non-negative and at most controls.max_distance",
        )?;

        check(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero",
        )?;
        Ok(())
    }
}
