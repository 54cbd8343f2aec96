//! Retained scene graph
//!
//! A [`Scene`] is a flat list of named objects under a single root transform.
//! Meshes and materials live in the scene and are referred to by index, so the
//! same capsule material can be shared by every light bar.

use crate::camera::PerspectiveCamera;
use image::RgbaImage;
use nalgebra::{Matrix4, Point3, Vector3};
use spacebg_core::{Color, Error, MaterialKind, NodeTransform, Result, TriangleMesh};
use spacebg_gpu::{FrameParams, MaterialDesc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Surface appearance of an object
#[derive(Debug, Clone)]
pub enum Material {
    /// Unlit flat colour
    Basic { color: Color },
    /// Shading looked up from a lit-sphere image, tinted by a colour map
    Matcap {
        color: Color,
        matcap: RgbaImage,
        map: Option<RgbaImage>,
    },
    /// Diffuse response to the hemisphere and point lights
    Lambert { color: Color, map: Option<RgbaImage> },
}

impl Material {
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Basic { .. } => MaterialKind::Basic,
            Material::Matcap { .. } => MaterialKind::Matcap,
            Material::Lambert { .. } => MaterialKind::Lambert,
        }
    }

    pub fn to_desc(&self) -> MaterialDesc {
        match self {
            Material::Basic { color } => MaterialDesc::basic(*color),
            Material::Matcap { color, matcap, map } => MaterialDesc {
                kind: MaterialKind::Matcap,
                color: *color,
                matcap: Some(matcap.clone()),
                map: map.clone(),
            },
            Material::Lambert { color, map } => MaterialDesc {
                kind: MaterialKind::Lambert,
                color: *color,
                matcap: None,
                map: map.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Sky colour from above blending into ground colour from below
    Hemisphere { sky: Color, ground: Color, intensity: f32 },
    Point {
        color: Color,
        intensity: f32,
        position: Vector3<f32>,
        cast_shadow: bool,
    },
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshId,
    pub material: MaterialId,
    pub transform: NodeTransform,
    pub visible: bool,
}

/// A visible object resolved to its world matrix
#[derive(Debug, Clone, Copy)]
pub struct SceneDraw {
    pub mesh: MeshId,
    pub material: MaterialId,
    pub world: Matrix4<f32>,
}

/// Light state packed for one frame, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniforms {
    pub sky_color: Color,
    pub ground_color: Color,
    pub hemisphere_intensity: f32,
    pub point_color: Color,
    pub point_intensity: f32,
    pub point_position: Vector3<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub background: Color,
    pub root: NodeTransform,
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    meshes: Vec<(String, TriangleMesh)>,
    materials: Vec<(String, Material)>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }

    pub fn add_mesh(&mut self, label: impl Into<String>, mesh: TriangleMesh) -> MeshId {
        self.meshes.push((label.into(), mesh));
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_material(&mut self, label: impl Into<String>, material: Material) -> MaterialId {
        self.materials.push((label.into(), material));
        MaterialId(self.materials.len() - 1)
    }

    /// Add an object; its mesh and material must already be in the scene
    pub fn add_object(&mut self, object: SceneObject) -> Result<()> {
        if object.mesh.0 >= self.meshes.len() {
            return Err(Error::Visualization(format!(
                "object '{}' refers to unknown mesh {}",
                object.name, object.mesh.0
            )));
        }
        if object.material.0 >= self.materials.len() {
            return Err(Error::Visualization(format!(
                "object '{}' refers to unknown material {}",
                object.name, object.material.0
            )));
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// First object with the given name
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&str, &TriangleMesh)> {
        self.meshes.iter().map(|(label, mesh)| (label.as_str(), mesh))
    }

    pub fn materials(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(label, material)| (label.as_str(), material))
    }

    /// The point the camera looks at
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.root.position)
    }

    /// Visible objects in insertion order with world matrix `root * local`
    pub fn draw_list(&self) -> Vec<SceneDraw> {
        let root = self.root.matrix();
        self.objects
            .iter()
            .filter(|o| o.visible)
            .map(|o| SceneDraw {
                mesh: o.mesh,
                material: o.material,
                world: root * o.transform.matrix(),
            })
            .collect()
    }

    /// Lights in world space. The first light of each kind is used and a
    /// missing kind contributes nothing.
    pub fn light_uniforms(&self) -> LightUniforms {
        let mut uniforms = LightUniforms {
            sky_color: Color::BLACK,
            ground_color: Color::BLACK,
            hemisphere_intensity: 0.0,
            point_color: Color::BLACK,
            point_intensity: 0.0,
            point_position: Vector3::zeros(),
        };

        if let Some(Light::Hemisphere { sky, ground, intensity }) =
            self.lights.iter().find(|l| matches!(l, Light::Hemisphere { .. }))
        {
            uniforms.sky_color = *sky;
            uniforms.ground_color = *ground;
            uniforms.hemisphere_intensity = *intensity;
        }

        if let Some(Light::Point { color, intensity, position, .. }) =
            self.lights.iter().find(|l| matches!(l, Light::Point { .. }))
        {
            let world = self.root.matrix().transform_point(&Point3::from(*position));
            uniforms.point_color = *color;
            uniforms.point_intensity = *intensity;
            uniforms.point_position = world.coords;
        }

        uniforms
    }

    /// Camera and lights for one rendered frame
    pub fn frame_params(&self, camera: &PerspectiveCamera) -> FrameParams {
        let lights = self.light_uniforms();
        FrameParams {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_position: camera.position.coords,
            sky_color: lights.sky_color,
            ground_color: lights.ground_color,
            hemisphere_intensity: lights.hemisphere_intensity,
            point_color: lights.point_color,
            point_intensity: lights.point_intensity,
            point_position: lights.point_position,
        }
    }
}
