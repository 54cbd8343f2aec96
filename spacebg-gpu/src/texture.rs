//! Texture loading, generation and upload

use crate::GpuContext;
use image::{Rgba, RgbaImage};
use spacebg_core::{Error, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

/// Format of colour textures; image data is stored in sRGB
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Format of the depth attachment
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Decode an image file into RGBA8
pub fn decode_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .map_err(|e| Error::Texture(format!("{}: {}", path.display(), e)))?;
    Ok(image.to_rgba8())
}

/// Load `path` when given, falling back to `fallback` if it is absent or
/// cannot be decoded
pub fn load_rgba_or(path: Option<&Path>, fallback: impl FnOnce() -> RgbaImage) -> RgbaImage {
    match path.map(decode_rgba) {
        Some(Ok(image)) => {
            info!(width = image.width(), height = image.height(), "loaded texture");
            image
        }
        Some(Err(e)) => {
            warn!("{}, using generated texture", e);
            fallback()
        }
        None => fallback(),
    }
}

fn to_rgba8(rgb: [f32; 3]) -> Rgba<u8> {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([c(rgb[0]), c(rgb[1]), c(rgb[2]), 255])
}

/// Lit-sphere matcap: a cool sphere lit from the upper left.
///
/// Pixels outside the sphere silhouette repeat the rim colour so bilinear
/// sampling near the edge stays clean.
pub fn generated_matcap(size: u32) -> RgbaImage {
    let size = size.max(2);
    let light = normalize([-0.4, 0.6, 0.7]);
    let half = normalize([light[0], light[1], light[2] + 1.0]);

    RgbaImage::from_fn(size, size, |x, y| {
        let nx = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
        let ny = 1.0 - (y as f32 + 0.5) / size as f32 * 2.0;
        let r2 = nx * nx + ny * ny;
        let (nx, ny) = if r2 > 1.0 {
            let r = r2.sqrt();
            (nx / r, ny / r)
        } else {
            (nx, ny)
        };
        let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();
        let n = [nx, ny, nz];

        let diffuse = dot(n, light).max(0.0);
        let specular = dot(n, half).max(0.0).powf(40.0);
        let rim = (1.0 - nz).powf(3.0) * 0.35;
        let base = [0.55, 0.72, 0.78];

        to_rgba8([
            base[0] * (0.12 + 0.88 * diffuse) + specular + rim * 0.3,
            base[1] * (0.12 + 0.88 * diffuse) + specular + rim * 0.8,
            base[2] * (0.12 + 0.88 * diffuse) + specular + rim,
        ])
    })
}

/// Deep-space colour map: a vertical gradient with a sparse star field
pub fn generated_env(size: u32) -> RgbaImage {
    let size = size.max(2);
    let top = [0.16, 0.33, 0.42];
    let bottom = [0.92, 0.95, 0.97];

    RgbaImage::from_fn(size, size, |x, y| {
        let t = y as f32 / (size - 1) as f32;
        let mut rgb = [
            top[0] + (bottom[0] - top[0]) * t,
            top[1] + (bottom[1] - top[1]) * t,
            top[2] + (bottom[2] - top[2]) * t,
        ];
        if hash(x, y) % 997 == 0 {
            rgb = [1.0, 1.0, 1.0];
        }
        to_rgba8(rgb)
    })
}

fn hash(x: u32, y: u32) -> u32 {
    let mut h = (x + 1).wrapping_mul(0x27d4_eb2d) ^ (y + 1).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^ (h >> 13)
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Downscale `image` so neither side exceeds `max_dimension`, keeping its
/// aspect ratio. Images already within the limit are borrowed unchanged.
pub fn fit_within(image: &RgbaImage, max_dimension: u32) -> Cow<'_, RgbaImage> {
    let (width, height) = image.dimensions();
    let largest = width.max(height);
    if largest <= max_dimension {
        return Cow::Borrowed(image);
    }

    let scale = max_dimension as f64 / largest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    let (new_width, new_height) = (fit(width), fit(height));
    warn!(
        width,
        height,
        max_dimension,
        "texture exceeds the device limit, resizing to {}x{}",
        new_width,
        new_height
    );
    Cow::Owned(image::imageops::resize(
        image,
        new_width,
        new_height,
        image::imageops::FilterType::Triangle,
    ))
}

/// A sampled texture resident on the GPU
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    /// Upload an RGBA8 image as an sRGB texture, shrinking it first if it is
    /// larger than the device allows
    pub fn from_rgba(context: &GpuContext, label: &str, image: &RgbaImage) -> Self {
        let image = fit_within(image, context.device.limits().max_texture_dimension_2d);
        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };

        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        context.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width()),
                rows_per_image: Some(image.height()),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// 1x1 white texture, bound where a material has no image
    pub fn white(context: &GpuContext) -> Self {
        Self::from_rgba(context, "white texture", &RgbaImage::from_pixel(1, 1, Rgba([255; 4])))
    }

    /// Render attachment (depth or multisampled colour) sized to the surface
    pub fn attachment(
        context: &GpuContext,
        label: &str,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcap_is_brightest_towards_light() {
        let image = generated_matcap(64);
        let luma = |p: &Rgba<u8>| p.0[0] as u32 + p.0[1] as u32 + p.0[2] as u32;
        let upper_left = luma(image.get_pixel(20, 20));
        let lower_right = luma(image.get_pixel(44, 44));
        assert!(upper_left > lower_right);
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_env_gradient_runs_top_to_bottom() {
        let image = generated_env(32);
        let row_red = |y: u32| (0..32).map(|x| image.get_pixel(x, y).0[0] as u32).sum::<u32>();
        assert!(row_red(31) > row_red(0));
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let image = load_rgba_or(Some(Path::new("/nonexistent/matcap.png")), || generated_matcap(8));
        assert_eq!(image.dimensions(), (8, 8));
        assert!(matches!(
            decode_rgba(Path::new("/nonexistent/matcap.png")),
            Err(Error::Texture(_))
        ));
    }

    #[test]
    fn test_decode_written_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.png");
        generated_env(16).save(&path).unwrap();
        let image = decode_rgba(&path).unwrap();
        assert_eq!(image.dimensions(), (16, 16));
    }

    #[test]
    fn test_oversized_image_is_shrunk_to_limit() {
        let image = RgbaImage::from_pixel(300, 120, Rgba([10, 20, 30, 255]));
        let fitted = fit_within(&image, 100);
        assert_eq!(fitted.dimensions(), (100, 40));
        assert_eq!(fitted.get_pixel(50, 20).0, [10, 20, 30, 255]);

        let tall = RgbaImage::new(3, 1000);
        assert_eq!(fit_within(&tall, 100).dimensions(), (1, 100));

        let small = generated_matcap(8);
        assert!(matches!(fit_within(&small, 100), Cow::Borrowed(_)));
    }
}
