//! Direct lighting: hard shadows and the Blinn-Phong response.

use glint_core::{Light, LightKind, Material, Scene};
use glint_math::{Color, Direction, Ray, Vector};

use crate::{intersect, Intersection, RenderConfig};

/// Blinn-Phong response for unit normal `n`, light direction `l` and half
/// vector `h`, already weighted by the cosine term.
#[inline]
pub fn blinn_phong(material: &Material, n: Direction, l: Vector, h: Vector) -> Color {
    let specular = n.dot(h).max(0.0).powf(material.n);
    (material.kd + material.ks * specular) * n.dot(l).max(0.0)
}

/// Ray from the hit point toward `light`, used to test for occluders.
///
/// Point lights bound the ray at the light itself; directional lights leave
/// it unbounded along the light's axis.
pub fn shadow_ray(light: &Light, hit: &Intersection, config: &RenderConfig) -> Ray {
    let p = hit.position();
    let ray = match light.kind {
        LightKind::Point => Ray::from_segment(p, light.frame.origin()),
        LightKind::Directional => Ray::new(p, light.frame.z()),
    };
    ray.with_epsilon(config.ray_epsilon)
}

/// Light reaching the eye along `ray` from `light` via the hit point.
///
/// Returns black when anything blocks the path to the light.
pub fn direct_light(
    scene: &Scene,
    light: &Light,
    hit: &Intersection,
    ray: &Ray,
    config: &RenderConfig,
) -> Color {
    let to_light = shadow_ray(light, hit, config);
    if intersect(scene, &to_light).is_some() {
        return Color::ZERO;
    }

    let p = hit.position();
    let (falloff, l) = match light.kind {
        LightKind::Point => {
            let v = light.frame.origin() - p;
            (light.intensity / v.length_squared(), v / v.length())
        }
        LightKind::Directional => (light.intensity, light.frame.z().to_vector()),
    };

    let h = to_light.direction() + (-ray.direction()).to_vector();
    let h = h / h.length();

    falloff * blinn_phong(hit.material, hit.normal(), l, h)
}
