//! Scene description types.
//!
//! A scene is built once (by the loader or in code) and is read-only while
//! rendering.

use glint_math::{Color, Direction, Frame, Point};

use crate::{SceneError, SceneResult};

/// Blinn-Phong surface response with a mirror term.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: Color,
    /// Specular coefficient
    pub ks: Color,
    /// Specular exponent
    pub n: f64,
    /// Reflective coefficient
    pub kr: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Color::ONE,
            ks: Color::ZERO,
            n: 10.0,
            kr: Color::ZERO,
        }
    }
}

impl Material {
    /// Purely diffuse material.
    pub fn diffuse(kd: Color) -> Self {
        Self {
            kd,
            ..Default::default()
        }
    }

    /// Set the specular coefficient and exponent.
    pub fn with_specular(mut self, ks: Color, n: f64) -> Self {
        self.ks = ks;
        self.n = n;
        self
    }

    /// Set the reflective coefficient.
    pub fn with_reflection(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }

    /// Whether this material spawns visible reflections.
    pub fn is_reflective(&self) -> bool {
        self.kr != Color::ZERO
    }
}

/// Shape of a surface. Each variant has its own intersection routine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Geometry {
    /// Sphere of `radius` around the frame origin.
    #[default]
    Sphere,
    /// Square in the frame's xy plane with half-extent `radius`.
    Quad,
    /// Disc in the frame's xy plane.
    Circle,
}

/// A renderable surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Placement; for planar shapes z is the plane normal
    pub frame: Frame,
    /// Radius, or half-extent for quads
    pub radius: f64,
    pub geometry: Geometry,
    pub material: Material,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            radius: 1.0,
            geometry: Geometry::Sphere,
            material: Material::default(),
        }
    }
}

impl Surface {
    pub fn sphere(center: Point, radius: f64, material: Material) -> Self {
        Self {
            frame: Frame::at(center),
            radius,
            geometry: Geometry::Sphere,
            material,
        }
    }

    pub fn quad(frame: Frame, half_extent: f64, material: Material) -> Self {
        Self {
            frame,
            radius: half_extent,
            geometry: Geometry::Quad,
            material,
        }
    }

    pub fn circle(frame: Frame, radius: f64, material: Material) -> Self {
        Self {
            frame,
            radius,
            geometry: Geometry::Circle,
            material,
        }
    }
}

/// How a light illuminates the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightKind {
    /// Emits from the frame origin, falling off with squared distance.
    #[default]
    Point,
    /// Arrives from infinitely far along the frame's z axis.
    Directional,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub frame: Frame,
    pub intensity: Color,
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            intensity: Color::ONE,
            kind: LightKind::Point,
        }
    }
}

impl Light {
    /// Point light at `position`.
    pub fn point(position: Point, intensity: Color) -> Self {
        Self {
            frame: Frame::at(position),
            intensity,
            kind: LightKind::Point,
        }
    }

    /// Directional light; `toward_light` points from the scene to the light.
    pub fn directional(toward_light: Direction, intensity: Color) -> Self {
        Self {
            frame: Frame::from_z(Point::ORIGIN, toward_light),
            intensity,
            kind: LightKind::Directional,
        }
    }

    pub fn is_point(&self) -> bool {
        self.kind == LightKind::Point
    }
}

/// Pinhole camera looking from `eye` toward `center`.
///
/// The image plane sits `dist` in front of the eye and spans
/// `width` x `height` world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
    pub dist: f64,
    eye: Point,
    center: Point,
    up: Direction,
    frame: Frame,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0, 1.0), Point::ORIGIN, Direction::Y)
    }
}

impl Camera {
    /// Camera with a unit image plane at distance one.
    pub fn new(eye: Point, center: Point, up: Direction) -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            dist: 1.0,
            eye,
            center,
            up,
            frame: Frame::lookat(eye, center, up),
        }
    }

    /// Set the image plane size and distance.
    pub fn with_image_plane(mut self, width: f64, height: f64, dist: f64) -> Self {
        self.width = width;
        self.height = height;
        self.dist = dist;
        self
    }

    /// Re-aim the camera, recomputing its frame.
    pub fn look_at(&mut self, eye: Point, center: Point, up: Direction) {
        self.eye = eye;
        self.center = center;
        self.up = up;
        self.frame = Frame::lookat(eye, center, up);
    }

    pub fn eye(&self) -> Point {
        self.eye
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn up(&self) -> Direction {
        self.up
    }

    /// Camera frame: origin at the eye, z pointing back toward the viewer.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

/// Everything needed to render an image.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub resolution_width: u32,
    pub resolution_height: u32,
    /// Samples per pixel along each axis
    pub pixel_samples: u32,
    /// Colour returned by rays that hit nothing
    pub background: Color,
    pub ambient: Color,
    pub lights: Vec<Light>,
    pub surfaces: Vec<Surface>,
}

impl Default for Scene {
    /// The stock scene: one default light, one unit sphere, 512x512.
    fn default() -> Self {
        Self {
            lights: vec![Light::default()],
            surfaces: vec![Surface::default()],
            ..Self::empty(Camera::default())
        }
    }
}

impl Scene {
    /// A scene with no lights or surfaces.
    pub fn empty(camera: Camera) -> Self {
        Self {
            camera,
            resolution_width: 512,
            resolution_height: 512,
            pixel_samples: 1,
            background: Color::splat(0.2),
            ambient: Color::splat(0.2),
            lights: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution_width = width;
        self.resolution_height = height;
        self
    }

    pub fn with_pixel_samples(mut self, samples: u32) -> Self {
        self.pixel_samples = samples;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_ambient(mut self, color: Color) -> Self {
        self.ambient = color;
        self
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Add a surface and return its index.
    pub fn add_surface(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    /// Total number of primary rays a render will trace.
    pub fn primary_ray_count(&self) -> u64 {
        let samples = self.pixel_samples as u64;
        self.resolution_width as u64 * self.resolution_height as u64 * samples * samples
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        if self.resolution_width == 0 || self.resolution_height == 0 {
            return Err(SceneError::InvalidResolution {
                width: self.resolution_width,
                height: self.resolution_height,
            });
        }
        Ok(())
    }
}
