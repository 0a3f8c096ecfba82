//! Coordinate frames and world/local conversions.

use crate::{Direction, Normal, Point, Vector};

/// An origin plus an orthonormal, right-handed basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    o: Point,
    x: Direction,
    y: Direction,
    z: Direction,
}

/// Values that can be moved between world space and a frame's local space.
///
/// Implemented for every geometric type, so the right conversion is picked at
/// compile time.
pub trait FrameSpace: Sized {
    /// Express a world-space value in `frame`'s local coordinates.
    fn to_local(&self, frame: &Frame) -> Self;

    /// Express a value given in `frame`'s local coordinates in world space.
    fn to_world(&self, frame: &Frame) -> Self;
}

impl Default for Frame {
    fn default() -> Self {
        Self::at(Point::ORIGIN)
    }
}

/// A direction guaranteed not to be parallel to `a`, used to seed cross products.
fn perturbed(a: Direction) -> Direction {
    Direction::from_xyz(-a.x + 3.14, a.y + 42.0, a.z - 1.61)
}

fn cross(a: Direction, b: Direction) -> Direction {
    Direction::new(a.cross(*b))
}

impl Frame {
    /// World axes placed at `o`.
    pub fn at(o: Point) -> Self {
        Self {
            o,
            x: Direction::X,
            y: Direction::Y,
            z: Direction::Z,
        }
    }

    /// Build a frame from any subset of its axes.
    ///
    /// Missing axes are derived with cross products. With a single axis the
    /// second one is seeded from a fixed perturbation of the first. When two or
    /// more axes are given they are re-orthogonalized in x, y, z priority, so a
    /// z supplied alongside x and y is recomputed from them.
    pub fn new(
        o: Point,
        x: Option<Direction>,
        y: Option<Direction>,
        z: Option<Direction>,
    ) -> Self {
        let (x, y, z) = match (x, y, z) {
            (None, None, None) => (Direction::X, Direction::Y, Direction::Z),
            (Some(x), None, None) => {
                let y = perturbed(x);
                let z = cross(x, y);
                let y = cross(z, x);
                (x, y, z)
            }
            (None, Some(y), None) => {
                let x = perturbed(y);
                let z = cross(x, y);
                let x = cross(y, z);
                (x, y, z)
            }
            (None, None, Some(z)) => {
                let x = perturbed(z);
                let y = cross(-x, z);
                let x = cross(y, z);
                (x, y, z)
            }
            (Some(x), Some(y), _) => {
                let z = cross(x, y);
                let y = cross(z, x);
                let x = cross(y, z);
                (x, y, z)
            }
            (Some(x), None, Some(z)) => {
                let y = cross(z, x);
                let x = cross(y, z);
                let z = cross(x, y);
                (x, y, z)
            }
            (None, Some(y), Some(z)) => {
                let x = cross(y, z);
                let y = cross(z, x);
                (x, y, z)
            }
        };
        Self { o, x, y, z }
    }

    /// Frame with the given z axis, x and y derived.
    pub fn from_z(o: Point, z: Direction) -> Self {
        Self::new(o, None, None, Some(z))
    }

    /// Camera-style frame at `eye` whose z axis points away from `center`.
    pub fn lookat(eye: Point, center: Point, up: Direction) -> Self {
        let back = Direction::new(center - eye) * -1.0;
        Self::new(eye, None, Some(up), Some(Direction::new(back)))
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.o
    }

    #[inline]
    pub fn x(&self) -> Direction {
        self.x
    }

    #[inline]
    pub fn y(&self) -> Direction {
        self.y
    }

    #[inline]
    pub fn z(&self) -> Direction {
        self.z
    }

    /// Convert a world-space value into local coordinates.
    pub fn world_to_local<T: FrameSpace>(&self, value: T) -> T {
        value.to_local(self)
    }

    /// Convert a local-space value into world coordinates.
    pub fn local_to_world<T: FrameSpace>(&self, value: T) -> T {
        value.to_world(self)
    }

    /// Spin the x and y axes about z.
    pub fn rotate_about_z(&mut self, radians: f64) {
        let (s, c) = radians.sin_cos();
        let (x, y) = (*self.x, *self.y);
        self.x = Direction::new(x * c + y * s);
        self.y = Direction::new(-x * s + y * c);
    }

    fn dots(&self, v: Vector) -> Vector {
        Vector::new(self.x.dot(v), self.y.dot(v), self.z.dot(v))
    }

    fn mults(&self, v: Vector) -> Vector {
        *self.x * v.x + *self.y * v.y + *self.z * v.z
    }
}

impl FrameSpace for Point {
    fn to_local(&self, frame: &Frame) -> Self {
        Point::from(frame.dots(*self - frame.o))
    }

    fn to_world(&self, frame: &Frame) -> Self {
        frame.o + frame.mults(self.to_vector())
    }
}

impl FrameSpace for Vector {
    fn to_local(&self, frame: &Frame) -> Self {
        frame.dots(*self)
    }

    fn to_world(&self, frame: &Frame) -> Self {
        frame.mults(*self)
    }
}

impl FrameSpace for Direction {
    fn to_local(&self, frame: &Frame) -> Self {
        Direction::new(frame.dots(self.to_vector()))
    }

    fn to_world(&self, frame: &Frame) -> Self {
        Direction::new(frame.mults(self.to_vector()))
    }
}

impl FrameSpace for Normal {
    fn to_local(&self, frame: &Frame) -> Self {
        Normal::new(frame.dots(self.to_vector()))
    }

    fn to_world(&self, frame: &Frame) -> Self {
        Normal::new(frame.mults(self.to_vector()))
    }
}
