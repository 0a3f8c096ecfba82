//! Glint renderer: a Whitted-style CPU raytracer.
//!
//! Traces one ray per sub-pixel through a flat list of spheres, quads and
//! discs, shades hits with Blinn-Phong direct lighting and hard shadows, and
//! follows mirror reflections up to the configured depth.

mod buffer;
mod camera;
mod hittable;
mod lighting;
mod renderer;

pub use buffer::{channel_to_u8, ImageBuffer, OutputError, OutputResult, Rgba};
pub use camera::{camera_ray, sample_uv};
pub use hittable::{intersect, Hittable, Intersection};
pub use lighting::{blinn_phong, direct_light, shadow_ray};
pub use renderer::{irradiance, raytrace, render_pixel, RecursionPolicy, RenderConfig};

/// Re-export the colour type from glint_math
pub use glint_math::Color;
