use crate::error::Result;
use crate::geometry::Steric;
use crate::math::Tolerance;

use super::overlay;
use super::select::OverlayOp;

/// Computes the part of the first geometry not in the second.
pub struct Difference<'a> {
    a: &'a Steric,
    b: &'a Steric,
    tolerance: Tolerance,
}

impl<'a> Difference<'a> {
    /// Creates a new `Difference` operation.
    #[must_use]
    pub fn new(a: &'a Steric, b: &'a Steric) -> Self {
        Self {
            a,
            b,
            tolerance: Tolerance::default(),
        }
    }

    /// Sets a custom tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the overlay, returning a new geometry.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` for a collection operand and a
    /// `TopologyError` if an area walk fails.
    pub fn execute(&self) -> Result<Steric> {
        overlay(self.a, self.b, OverlayOp::Difference, &self.tolerance)
    }
}
