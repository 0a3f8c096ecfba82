use crate::{Direction, Frame, FrameSpace, Interval, Point};

/// Default offset used to derive a ray's lower bound.
///
/// Keeps a ray spawned on a surface from hitting that surface again.
pub const RAY_EPSILON: f64 = 5e-5;

/// A ray with origin `e`, unit direction `d` and a valid parameter range.
///
/// The bounds are never copied in raw: they are measured as distances from
/// `e` to points evaluated along the ray, so they keep their meaning when the
/// ray is moved between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    e: Point,
    d: Direction,
    bounds: Interval,
}

impl Ray {
    /// Create an unbounded ray starting just past `e`.
    pub fn new(e: Point, d: Direction) -> Self {
        Self::with_limits(e, d, RAY_EPSILON, f64::INFINITY)
    }

    /// Create a ray whose bounds are derived from the distances `min_dist` and
    /// `max_dist` along it. An infinite `max_dist` leaves the ray unbounded.
    pub fn with_limits(e: Point, d: Direction, min_dist: f64, max_dist: f64) -> Self {
        let mut ray = Self {
            e,
            d,
            bounds: Interval::unbounded(0.0),
        };
        let min = (e - ray.eval(min_dist)).length();
        let max = if max_dist == f64::INFINITY {
            f64::INFINITY
        } else {
            (e - ray.eval(max_dist)).length()
        };
        ray.bounds = Interval::new(min, max);
        ray
    }

    /// Ray from `a` toward `b` that stops at `b`.
    pub fn from_segment(a: Point, b: Point) -> Self {
        let v = b - a;
        Self::with_limits(a, Direction::new(v), RAY_EPSILON, v.length())
    }

    /// Ray from `a` through `b` and beyond.
    pub fn from_segment_unbounded(a: Point, b: Point) -> Self {
        Self::new(a, Direction::new(b - a))
    }

    /// Same ray with its lower bound re-derived from `epsilon`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.bounds.min = (self.e - self.eval(epsilon)).length();
        self
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.e
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.d
    }

    #[inline]
    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.bounds.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.bounds.max
    }

    /// Point along the ray at parameter t: e + t * d
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        self.e + self.d * t
    }

    /// Like `eval`, with t clamped to `[0, max]`.
    pub fn eval_clamped(&self, t: f64) -> Point {
        self.eval(Interval::new(0.0, self.bounds.max).clamp(t))
    }

    /// Whether t lies inside the ray's bounds.
    #[inline]
    pub fn valid_t(&self, t: f64) -> bool {
        self.bounds.contains(t)
    }

    fn rebuild(&self, e: Point, d: Direction, map: impl Fn(Point) -> Point) -> Ray {
        let max_dist = if self.bounds.is_bounded() {
            (e - map(self.eval(self.bounds.max))).length()
        } else {
            f64::INFINITY
        };
        Ray::with_limits(e, d, RAY_EPSILON, max_dist)
    }
}

impl FrameSpace for Ray {
    fn to_local(&self, frame: &Frame) -> Self {
        let e = frame.world_to_local(self.e);
        let d = frame.world_to_local(self.d);
        self.rebuild(e, d, |p| frame.world_to_local(p))
    }

    fn to_world(&self, frame: &Frame) -> Self {
        let e = frame.local_to_world(self.e);
        let d = frame.local_to_world(self.d);
        self.rebuild(e, d, |p| frame.local_to_world(p))
    }
}
