use super::Point2;

/// Parameters controlling robust floating-point comparisons.
///
/// Every predicate in the kernel receives a `Tolerance` explicitly, so the
/// same algorithm can be exercised with tighter or looser thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Relative epsilon for coordinate coincidence and determinant tests.
    pub epsilon: f64,
    /// Absolute floor below which a length or area is treated as zero.
    pub accuracy: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: 1e-10,
            accuracy: 1e-12,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given relative epsilon.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    /// The epsilon scaled by the magnitude of the compared quantity.
    ///
    /// Magnitudes below one keep the plain epsilon.
    #[must_use]
    pub fn scaled(&self, magnitude: f64) -> f64 {
        self.epsilon * magnitude.abs().max(1.0)
    }

    /// Whether two scalars are equal within the relative tolerance.
    #[must_use]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.scaled(a.abs().max(b.abs()))
    }

    /// Whether two coordinates coincide within the relative tolerance.
    #[must_use]
    pub fn points_eq(&self, a: &Point2, b: &Point2) -> bool {
        self.approx_eq(a.x, b.x) && self.approx_eq(a.y, b.y)
    }

    /// Whether `value` is zero relative to `magnitude`.
    #[must_use]
    pub fn is_zero(&self, value: f64, magnitude: f64) -> bool {
        value.abs() <= self.scaled(magnitude)
    }
}
