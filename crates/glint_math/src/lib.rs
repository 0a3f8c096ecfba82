//! Glint math - geometric primitives for the raytracer.
//!
//! Vectors come from glam (`DVec3`, re-exported). On top of it this crate
//! adds affine points, unit directions and normals, coordinate frames and
//! bounded rays.

// Re-export glam for convenience
pub use glam::*;

mod frame;
mod interval;
mod ray;
mod vector;

pub use frame::{Frame, FrameSpace};
pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};
pub use vector::{normalize, Direction, Normal, Point, Vector, VectorExt};

/// RGB colour, channels nominally in [0, 1] but never clamped until output.
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_operations() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vector::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, Vector::new(4.0, 2.5, 2.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vector::new(-3.0, 6.0, -3.0));
        assert_eq!(a.lerp(b, 0.5), Vector::new(2.5, 3.5, 4.5));
    }
}
