//! Whitted-style shading and the image synthesis driver.
//!
//! Implements:
//! - Direct lighting with hard shadows from every light
//! - Recursive mirror reflection, bounded by a [`RecursionPolicy`]
//! - Regular-grid supersampling with a box filter

use glint_core::Scene;
use glint_math::{Color, Direction, Ray, VectorExt, RAY_EPSILON};

use crate::{camera_ray, direct_light, intersect, sample_uv, ImageBuffer};

/// How far reflection rays are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionPolicy {
    /// Recurse only from depth below 2, handing the child depth 5.
    ///
    /// The jump past the threshold stops recursion right after the first
    /// reflection, so a primary hit gathers exactly one mirrored level.
    #[default]
    Reference,
    /// Plain bounce counter: up to `n` reflection levels per primary ray.
    Bounces(u32),
}

impl RecursionPolicy {
    /// Depth to pass to the reflected ray, or `None` to stop recursing.
    #[inline]
    pub fn next_depth(self, depth: u32) -> Option<u32> {
        match self {
            RecursionPolicy::Reference => (depth < 2).then_some(5),
            RecursionPolicy::Bounces(max) => (depth < max).then(|| depth + 1),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Reflection recursion policy
    pub recursion: RecursionPolicy,
    /// Distance skipped at the start of shadow and reflection rays
    pub ray_epsilon: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            recursion: RecursionPolicy::default(),
            ray_epsilon: RAY_EPSILON,
        }
    }
}

impl RenderConfig {
    pub fn with_recursion(mut self, recursion: RecursionPolicy) -> Self {
        self.recursion = recursion;
        self
    }

    pub fn with_ray_epsilon(mut self, ray_epsilon: f64) -> Self {
        self.ray_epsilon = ray_epsilon;
        self
    }
}

/// Compute the colour seen along a ray.
///
/// Misses return the scene background. Hits accumulate ambient, the direct
/// contribution of every unoccluded light and, while the recursion policy
/// allows it, the mirrored colour weighted by `kr`. The result is not clamped.
pub fn irradiance(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    let Some(hit) = intersect(scene, ray) else {
        return scene.background;
    };

    let material = hit.material;
    let mut color = Color::ZERO + scene.ambient * material.kd;

    for light in &scene.lights {
        color += direct_light(scene, light, &hit, ray, config);
    }

    if let Some(next) = config.recursion.next_depth(depth) {
        let v = -ray.direction().to_vector();
        let rd = v.reflected(hit.normal());
        let reflected =
            Ray::new(hit.position(), Direction::new(rd)).with_epsilon(config.ray_epsilon);
        color += material.kr * irradiance(scene, &reflected, next, config);
    }

    color
}

/// Average colour of pixel `(x, y)` over an N x N grid of sub-samples.
///
/// `scene.pixel_samples` must be at least 1.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let n = scene.pixel_samples;
    let mut pixel_color = Color::ZERO;

    for sub_x in 0..n {
        for sub_y in 0..n {
            let (u, v) = sample_uv(
                x,
                y,
                sub_x,
                sub_y,
                n,
                scene.resolution_width,
                scene.resolution_height,
            );
            let ray = camera_ray(&scene.camera, u, v);
            pixel_color += irradiance(scene, &ray, 0, config);
        }
    }

    pixel_color / (n * n) as f64
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; every pixel is written exactly once. A scene with zero
/// pixel samples leaves the buffer opaque black.
pub fn raytrace(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let width = scene.resolution_width;
    let height = scene.resolution_height;
    let mut image = ImageBuffer::new(width, height);

    if scene.pixel_samples == 0 {
        log::warn!("Scene has zero pixel samples, nothing to render");
        return image;
    }

    log::debug!(
        "Rendering {}x{} with {}x{} samples per pixel ({} primary rays), {:?}",
        width,
        height,
        scene.pixel_samples,
        scene.pixel_samples,
        scene.primary_ray_count(),
        config.recursion
    );

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, x, y, config);
            image.set(x, y, color);
        }
        log::debug!("Row {}/{} done", y + 1, height);
    }

    image
}
