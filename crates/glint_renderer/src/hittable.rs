//! Ray-surface intersection.
//!
//! The scene is a flat list of surfaces scanned front to back for every ray;
//! there is no acceleration structure.

use glint_core::{Geometry, Material, Scene, Surface};
use glint_math::{Direction, Frame, Point, Ray};

/// Record of a ray-surface intersection.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    /// Ray parameter of the hit; `ray.eval(t)` is the hit point
    pub t: f64,
    /// Shading frame: origin at the hit point, z along the surface normal
    pub frame: Frame,
    /// Material of the surface that was hit
    pub material: &'a Material,
}

impl<'a> Intersection<'a> {
    #[inline]
    pub fn position(&self) -> Point {
        self.frame.origin()
    }

    #[inline]
    pub fn normal(&self) -> Direction {
        self.frame.z()
    }
}

/// Trait for things that can be hit by rays.
pub trait Hittable {
    /// Closest hit along `ray` within its bounds, if any.
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>>;
}

/// Intersect `ray` against every surface of `scene`.
pub fn intersect<'a>(scene: &'a Scene, ray: &Ray) -> Option<Intersection<'a>> {
    scene.hit(ray)
}

/// Ray parameter where `ray` meets the plane through the surface origin.
///
/// A ray parallel to the plane divides by zero; the resulting infinity or NaN
/// is passed on unchanged.
fn plane_t(surface: &Surface, ray: &Ray) -> f64 {
    let n = surface.frame.z();
    (surface.frame.origin() - ray.origin()).dot(*n) / ray.direction().dot(*n)
}

fn quad_t(surface: &Surface, ray: &Ray) -> Option<f64> {
    let t = plane_t(surface, ray);
    let local = surface.frame.world_to_local(ray.eval(t));
    let r = surface.radius;
    if local.x.abs() > r || local.y.abs() > r {
        return None;
    }
    Some(t)
}

fn circle_t(surface: &Surface, ray: &Ray) -> Option<f64> {
    let t = plane_t(surface, ray);
    let local = surface.frame.world_to_local(ray.eval(t));
    let r = surface.radius;
    if local.x.powi(2) + local.y.powi(2) > r.powi(2) {
        return None;
    }
    Some(t)
}

fn sphere_t(surface: &Surface, ray: &Ray) -> Option<f64> {
    // Monic quadratic: the direction is unit length
    let oc = ray.origin() - surface.frame.origin();
    let r = surface.radius;
    let b = 2.0 * ray.direction().dot(oc);
    let c = oc.length_squared() - r * r;

    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return None;
    }

    // Near root only: rays starting inside a sphere do not see it
    Some((-b - discriminant.sqrt()) / 2.0)
}

/// Candidate ray parameter for a surface, before checking the ray's bounds.
fn surface_t(surface: &Surface, ray: &Ray) -> Option<f64> {
    match surface.geometry {
        Geometry::Quad => quad_t(surface, ray),
        Geometry::Circle => circle_t(surface, ray),
        Geometry::Sphere => sphere_t(surface, ray),
    }
}

/// Build the hit record for `surface` at parameter `t`.
fn record<'a>(surface: &'a Surface, ray: &Ray, t: f64) -> Intersection<'a> {
    let p = ray.eval(t);
    let normal = match surface.geometry {
        Geometry::Quad => surface.frame.z(),
        // Radial from the surface origin, for discs as well as spheres
        Geometry::Sphere | Geometry::Circle => Direction::new(p - surface.frame.origin()),
    };
    Intersection {
        t,
        frame: Frame::from_z(p, normal),
        material: &surface.material,
    }
}

impl Hittable for Surface {
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>> {
        surface_t(self, ray)
            .filter(|&t| ray.valid_t(t))
            .map(|t| record(self, ray, t))
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>> {
        let mut closest: Option<(f64, &Surface)> = None;

        for surface in &self.surfaces {
            let Some(t) = surface_t(surface, ray) else {
                continue;
            };
            if !ray.valid_t(t) {
                continue;
            }
            // On a tie the later surface wins
            if closest.map_or(true, |(best, _)| t <= best) {
                closest = Some((t, surface));
            }
        }

        closest.map(|(t, surface)| record(surface, ray, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Camera;
    use glint_math::{Color, Vector};

    fn scene_with(surfaces: Vec<Surface>) -> Scene {
        let mut scene = Scene::empty(Camera::default());
        scene.surfaces = surfaces;
        scene
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let scene = scene_with(vec![Surface::sphere(Point::ORIGIN, 1.0, Material::default())]);
        let ray = Ray::from_segment_unbounded(Point::new(0.0, 0.0, 2.0), Point::ORIGIN);

        let hit = intersect(&scene, &ray).expect("ray should hit the sphere");
        assert!((hit.t - 1.0).abs() < 1e-9);
        assert!((ray.eval(hit.t) - Point::new(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!((hit.position() - Point::new(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!((hit.normal().to_vector() - Vector::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Surface::sphere(Point::new(0.0, 0.0, -1.0), 0.5, Material::default());
        let ray = Ray::new(Point::ORIGIN, Direction::Y);
        assert!(sphere.hit(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind_ray_is_rejected() {
        let sphere = Surface::sphere(Point::new(0.0, 0.0, 5.0), 1.0, Material::default());
        let ray = Ray::new(Point::ORIGIN, -Direction::Z);
        assert!(sphere.hit(&ray).is_none());
    }

    #[test]
    fn test_quad_footprint() {
        let quad = Surface::quad(Frame::default(), 1.0, Material::default());

        let inside = Ray::new(Point::new(0.9, -0.9, 3.0), -Direction::Z);
        let hit = quad.hit(&inside).expect("ray through the footprint should hit");
        assert!((hit.t - 3.0).abs() < 1e-9);
        assert_eq!(hit.normal(), Direction::Z);

        let outside_x = Ray::new(Point::new(1.1, 0.0, 3.0), -Direction::Z);
        let outside_y = Ray::new(Point::new(0.0, -1.1, 3.0), -Direction::Z);
        assert!(quad.hit(&outside_x).is_none());
        assert!(quad.hit(&outside_y).is_none());

        // The corner of the square lies outside the inscribed disc
        let corner = Ray::new(Point::new(0.9, 0.9, 3.0), -Direction::Z);
        assert!(quad.hit(&corner).is_some());
    }

    #[test]
    fn test_quad_in_rotated_frame() {
        let frame = Frame::from_z(Point::new(0.0, 2.0, 0.0), Direction::Y);
        let quad = Surface::quad(frame, 0.5, Material::default());

        let ray = Ray::new(Point::new(0.1, 5.0, 0.2), -Direction::Y);
        let hit = quad.hit(&ray).expect("ray should hit the tilted quad");
        assert!((hit.t - 3.0).abs() < 1e-9);

        let miss = Ray::new(Point::new(0.0, 5.0, 0.9), -Direction::Y);
        assert!(quad.hit(&miss).is_none());
    }

    #[test]
    fn test_circle_footprint_and_radial_normal() {
        let circle = Surface::circle(Frame::default(), 1.0, Material::default());

        let corner = Ray::new(Point::new(0.8, 0.8, 2.0), -Direction::Z);
        assert!(circle.hit(&corner).is_none());

        let ray = Ray::new(Point::new(0.5, 0.0, 2.0), -Direction::Z);
        let hit = circle.hit(&ray).expect("ray inside the disc should hit");
        // Normal points from the disc centre to the hit point
        assert!((hit.normal().to_vector() - Vector::X).length() < 1e-9);
    }

    #[test]
    fn test_closest_surface_wins() {
        let near = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let far = Material::diffuse(Color::new(0.0, 1.0, 0.0));
        let scene = scene_with(vec![
            Surface::sphere(Point::new(0.0, 0.0, -10.0), 1.0, far),
            Surface::sphere(Point::new(0.0, 0.0, -4.0), 1.0, near.clone()),
        ]);

        let ray = Ray::new(Point::ORIGIN, -Direction::Z);
        let hit = intersect(&scene, &ray).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-9);
        assert_eq!(*hit.material, near);
    }

    #[test]
    fn test_tie_goes_to_later_surface() {
        let first = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        let second = Material::diffuse(Color::new(0.0, 0.0, 1.0));
        let scene = scene_with(vec![
            Surface::sphere(Point::new(0.0, 0.0, -4.0), 1.0, first),
            Surface::sphere(Point::new(0.0, 0.0, -4.0), 1.0, second.clone()),
        ]);

        let ray = Ray::new(Point::ORIGIN, -Direction::Z);
        let hit = intersect(&scene, &ray).unwrap();
        assert!(std::ptr::eq(hit.material, &scene.surfaces[1].material));
        assert_eq!(*hit.material, second);
    }

    #[test]
    fn test_bounded_ray_stops_short() {
        let scene = scene_with(vec![Surface::sphere(
            Point::new(0.0, 0.0, -4.0),
            1.0,
            Material::default(),
        )]);
        let short = Ray::from_segment(Point::ORIGIN, Point::new(0.0, 0.0, -2.0));
        assert!(intersect(&scene, &short).is_none());

        let long = Ray::from_segment(Point::ORIGIN, Point::new(0.0, 0.0, -3.5));
        assert!(intersect(&scene, &long).is_some());
    }

    #[test]
    fn test_hit_point_is_not_rehit() {
        let scene = scene_with(vec![Surface::quad(Frame::default(), 1.0, Material::default())]);
        // A ray leaving the quad surface must skip it
        let ray = Ray::new(Point::ORIGIN, Direction::from_xyz(0.3, 0.0, 1.0));
        assert!(intersect(&scene, &ray).is_none());
    }

    #[test]
    fn test_parallel_ray_propagates_non_finite_t() {
        let quad = Surface::quad(Frame::default(), 1.0, Material::default());
        // Below the plane and parallel to it: t is +inf, which an unbounded ray accepts
        let ray = Ray::new(Point::new(0.0, 0.0, -1.0), Direction::X);
        let hit = quad.hit(&ray).expect("non-finite hit is passed through");
        assert!(hit.t.is_infinite());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = scene_with(Vec::new());
        let ray = Ray::new(Point::ORIGIN, Direction::Z);
        assert!(intersect(&scene, &ray).is_none());
    }
}
