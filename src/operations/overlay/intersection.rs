use crate::error::Result;
use crate::geometry::Steric;
use crate::math::Tolerance;

use super::overlay;
use super::select::OverlayOp;

/// Computes the intersection of two geometries.
pub struct Intersection<'a> {
    a: &'a Steric,
    b: &'a Steric,
    tolerance: Tolerance,
}

impl<'a> Intersection<'a> {
    /// Creates a new `Intersection` operation.
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
        overlay(self.a, self.b, OverlayOp::Intersection, &self.tolerance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};
    use crate::math::Point2;
    use crate::operations::relate::{Relate, SpatialPredicate};

    #[test]
    fn overlapping_squares_meet_in_a_square() {
        let a = Steric::Polygon(Polygon::from_xy(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]));
        let b = Steric::Polygon(Polygon::from_xy(&[
            (5.0, 5.0),
            (15.0, 5.0),
            (15.0, 15.0),
            (5.0, 15.0),
            (5.0, 5.0),
        ]));
        let result = Intersection::new(&a, &b).execute().unwrap();
        // Any orientation or start vertex of this ring is the same polygon.
        let expected = Steric::Polygon(Polygon::from_xy(&[
            (5.0, 10.0),
            (10.0, 10.0),
            (10.0, 5.0),
            (5.0, 5.0),
            (5.0, 10.0),
        ]));
        assert!(Relate::new(&result, &expected)
            .predicate(SpatialPredicate::Equals)
            .unwrap());
        let Steric::Polygon(poly) = result else {
            panic!("expected a polygon");
        };
        let shell = poly.shell().unwrap().coords();
        assert_eq!(shell.len(), 5);
        for corner in [(5.0, 10.0), (10.0, 10.0), (10.0, 5.0), (5.0, 5.0)] {
            let corner = Point2::new(corner.0, corner.1);
            assert!(shell.iter().any(|p| Tolerance::default().points_eq(p, &corner)));
        }
    }

    #[test]
    fn point_on_line() {
        let line = Steric::Line(LineString::from_xy(&[(0.0, 0.0), (4.0, 4.0)]));
        let on = Steric::Point(Point2::new(1.0, 1.0));
        let off = Steric::Point(Point2::new(1.0, 2.0));
        assert_eq!(Intersection::new(&line, &on).execute().unwrap(), on);
        assert!(Intersection::new(&line, &off).execute().unwrap().is_empty());
    }

    #[test]
    fn collections_are_rejected() {
        let a = Steric::Collection(vec![Steric::Point(Point2::new(0.0, 0.0))]);
        let b = Steric::Point(Point2::new(0.0, 0.0));
        assert!(Intersection::new(&a, &b).execute().is_err());
    }
}
