//! Points, directions and normals on top of glam's `DVec3`.
//!
//! `Direction` and `Normal` only hand out their components by value, so the
//! unit-length invariant established at construction cannot be broken later.

use std::ops::{Add, AddAssign, Deref, Mul, Neg, Sub, SubAssign};

use glam::DVec3;

/// Generic 3D vector.
pub type Vector = DVec3;

/// Squared lengths this close to one are treated as already unit.
const UNIT_TOLERANCE: f64 = 1e-7;

/// Normalize `v`, leaving the zero vector untouched.
///
/// When the squared length is within `1e-7` of one the components are divided
/// by the squared length instead of its root. Rendered images depend on this
/// exact rounding, so keep it.
pub fn normalize(v: Vector) -> Vector {
    let length_squared = v.length_squared();
    if length_squared == 0.0 {
        return v;
    }
    let length = if (length_squared - 1.0).abs() < UNIT_TOLERANCE {
        length_squared
    } else {
        length_squared.sqrt()
    };
    v / length
}

/// Extra vector operations not provided by glam.
pub trait VectorExt {
    /// Mirror this vector about `axis`.
    fn reflected(self, axis: Direction) -> Vector;
}

impl VectorExt for Vector {
    fn reflected(self, axis: Direction) -> Vector {
        let dot = axis.dot(self);
        -self + *axis * (dot * 2.0)
    }
}

/// An affine position in space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(Vector);

impl Point {
    /// The world origin.
    pub const ORIGIN: Point = Point(Vector::ZERO);

    /// Create a point from coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector::new(x, y, z))
    }

    /// Position vector of this point relative to the origin.
    #[inline]
    pub fn to_vector(self) -> Vector {
        self.0
    }

    /// Distance between two points.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }
}

impl Deref for Point {
    type Target = Vector;

    fn deref(&self) -> &Vector {
        &self.0
    }
}

impl From<Vector> for Point {
    fn from(v: Vector) -> Self {
        Self(v)
    }
}

impl From<[f64; 3]> for Point {
    fn from(v: [f64; 3]) -> Self {
        Self(Vector::from_array(v))
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        self.0 - rhs.0
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs;
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.0 -= rhs;
    }
}

macro_rules! unit_vector {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(Vector);

        impl $name {
            pub const X: $name = $name(Vector::X);
            pub const Y: $name = $name(Vector::Y);
            pub const Z: $name = $name(Vector::Z);

            /// Normalize `v` into a unit vector.
            ///
            /// The zero vector has no direction and is kept as zero.
            pub fn new(v: Vector) -> Self {
                Self(normalize(v))
            }

            /// Normalize the given components into a unit vector.
            pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
                Self::new(Vector::new(x, y, z))
            }

            /// The underlying (unit) vector.
            #[inline]
            pub fn to_vector(self) -> Vector {
                self.0
            }
        }

        impl Deref for $name {
            type Target = Vector;

            fn deref(&self) -> &Vector {
                &self.0
            }
        }

        impl From<Vector> for $name {
            fn from(v: Vector) -> Self {
                Self::new(v)
            }
        }

        impl From<[f64; 3]> for $name {
            fn from(v: [f64; 3]) -> Self {
                Self::new(Vector::from_array(v))
            }
        }

        impl From<$name> for Vector {
            fn from(v: $name) -> Vector {
                v.0
            }
        }

        impl Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                $name(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Vector;

            fn mul(self, rhs: f64) -> Vector {
                self.0 * rhs
            }
        }

        impl Mul<$name> for f64 {
            type Output = Vector;

            fn mul(self, rhs: $name) -> Vector {
                self * rhs.0
            }
        }

        impl Add<Vector> for $name {
            type Output = Vector;

            fn add(self, rhs: Vector) -> Vector {
                self.0 + rhs
            }
        }
    };
}

unit_vector!(
    /// A unit-length direction in space.
    Direction
);

unit_vector!(
    /// A unit-length surface normal.
    Normal
);

impl From<Direction> for Normal {
    fn from(d: Direction) -> Normal {
        Normal(d.0)
    }
}

impl From<Normal> for Direction {
    fn from(n: Normal) -> Direction {
        Direction(n.0)
    }
}
