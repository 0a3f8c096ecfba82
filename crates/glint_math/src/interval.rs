/// A closed range of ray parameters `[min, max]`.
///
/// Rays carry one of these as their valid hit range. `max` may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interval starting at `min` with no upper bound.
    pub fn unbounded(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if the upper bound is finite.
    pub fn is_bounded(&self) -> bool {
        self.max != f64::INFINITY
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    ///
    /// NaN is never contained.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        self.min.max(x.min(self.max))
    }

    /// The unit range used when writing colour channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
