mod engine;
mod matrix;

pub use matrix::{IntersectionMatrix, SpatialPredicate};

use crate::error::Result;
use crate::geometry::Steric;
use crate::math::Tolerance;

use engine::relate_matrix;

/// Computes the DE-9IM relationship between two geometries.
///
/// Points, lines, polygons and multi-polygons are supported on either side;
/// collections are rejected.
pub struct Relate<'a> {
    a: &'a Steric,
    b: &'a Steric,
    tolerance: Tolerance,
}

impl<'a> Relate<'a> {
    /// Creates a new `Relate` operation with the default tolerance.
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

    /// Computes the intersection matrix.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` if either input is a
    /// collection.
    pub fn execute(&self) -> Result<IntersectionMatrix> {
        relate_matrix(self.a, self.b, &self.tolerance)
    }

    /// Evaluates a named predicate.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` if either input is a
    /// collection.
    pub fn predicate(&self, predicate: SpatialPredicate) -> Result<bool> {
        let matrix = self.execute()?;
        Ok(matrix.evaluate(predicate, self.a.dimension(), self.b.dimension()))
    }

    /// Matches the computed matrix against a DE-9IM pattern.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` for collection inputs and a
    /// `MatrixError` for a malformed pattern.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        Ok(self.execute()?.matches(pattern)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{MatrixError, OperationError, StericError};
    use crate::geometry::{LineString, MultiPolygon, Polygon};
    use crate::math::Point2;

    fn square(x: f64, y: f64, size: f64) -> Steric {
        Steric::Polygon(Polygon::from_xy(&[
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ]))
    }

    fn line(xy: &[(f64, f64)]) -> Steric {
        Steric::Line(LineString::from_xy(xy))
    }

    fn point(x: f64, y: f64) -> Steric {
        Steric::Point(Point2::new(x, y))
    }

    fn relate(a: &Steric, b: &Steric) -> String {
        Relate::new(a, b).execute().unwrap().to_string()
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        assert_eq!(relate(&a, &b), "212101212");
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Overlaps).unwrap());
        assert!(!Relate::new(&a, &b).predicate(SpatialPredicate::Touches).unwrap());
    }

    #[test]
    fn equal_squares() {
        let a = square(0.0, 0.0, 10.0);
        // Same square, opposite orientation and another start vertex.
        let b = Steric::Polygon(Polygon::from_xy(&[
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ]));
        assert_eq!(relate(&a, &b), "2FFF1FFF2");
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Equals).unwrap());
    }

    #[test]
    fn squares_sharing_an_edge_touch() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 0.0, 10.0);
        assert_eq!(relate(&a, &b), "FF2F11212");
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Touches).unwrap());
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Intersects).unwrap());
    }

    #[test]
    fn squares_touching_at_a_corner() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 10.0, 10.0);
        assert_eq!(relate(&a, &b), "FF2F01212");
    }

    #[test]
    fn nested_squares() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 2.0);
        assert_eq!(relate(&inner, &outer), "2FF1FF212");
        assert!(Relate::new(&outer, &inner).predicate(SpatialPredicate::Contains).unwrap());
        assert!(Relate::new(&inner, &outer).predicate(SpatialPredicate::Within).unwrap());
        assert!(Relate::new(&inner, &outer).predicate(SpatialPredicate::CoveredBy).unwrap());
    }

    #[test]
    fn hole_excludes_inner_square() {
        let holed = Steric::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from_xy(&[
                (2.0, 2.0),
                (8.0, 2.0),
                (8.0, 8.0),
                (2.0, 8.0),
                (2.0, 2.0),
            ])],
        ));
        let inside_hole = square(4.0, 4.0, 1.0);
        assert!(Relate::new(&holed, &inside_hole).predicate(SpatialPredicate::Disjoint).unwrap());
    }

    #[test]
    fn disjoint_bounds_shortcut() {
        let a = square(0.0, 0.0, 1.0);
        let b = line(&[(5.0, 5.0), (6.0, 6.0)]);
        assert_eq!(relate(&a, &b), "FF2FF1102");
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Disjoint).unwrap());
    }

    #[test]
    fn point_relations() {
        let a = point(1.0, 1.0);
        assert_eq!(relate(&a, &point(1.0, 1.0)), "0FFFFFFF2");
        assert_eq!(relate(&a, &point(1.0, 1.5)), "FF0FFF0F2");
        let poly = square(0.0, 0.0, 2.0);
        assert_eq!(relate(&a, &poly), "0FFFFF212");
        let on_edge = point(0.0, 1.0);
        assert_eq!(relate(&on_edge, &poly), "F0FFFF212");
        assert!(Relate::new(&on_edge, &poly).predicate(SpatialPredicate::Touches).unwrap());
        let seg = line(&[(0.0, 0.0), (2.0, 2.0)]);
        assert_eq!(relate(&a, &seg), "0FFFFF102");
        assert_eq!(relate(&point(0.0, 0.0), &seg), "F0FFFF102");
    }

    #[test]
    fn line_relations() {
        let a = line(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = line(&[(0.0, 10.0), (10.0, 0.0)]);
        assert_eq!(relate(&a, &b), "0F1FF0102");
        assert!(Relate::new(&a, &b).predicate(SpatialPredicate::Crosses).unwrap());

        let inside = line(&[(2.0, 2.0), (8.0, 8.0)]);
        let poly = square(0.0, 0.0, 10.0);
        assert_eq!(relate(&inside, &poly), "1FF0FF212");
        assert!(Relate::new(&inside, &poly).predicate(SpatialPredicate::Within).unwrap());

        let through = line(&[(5.0, 5.0), (15.0, 5.0)]);
        assert_eq!(relate(&through, &poly), "1010F0212");
        assert!(Relate::new(&through, &poly).predicate(SpatialPredicate::Crosses).unwrap());

        let overlap_a = line(&[(0.0, 0.0), (6.0, 0.0)]);
        let overlap_b = line(&[(4.0, 0.0), (10.0, 0.0)]);
        assert!(Relate::new(&overlap_a, &overlap_b)
            .predicate(SpatialPredicate::Overlaps)
            .unwrap());
    }

    #[test]
    fn transpose_law() {
        let shapes = [
            square(0.0, 0.0, 10.0),
            square(5.0, 5.0, 10.0),
            square(10.0, 0.0, 10.0),
            line(&[(5.0, 5.0), (15.0, 5.0)]),
            line(&[(-2.0, 3.0), (20.0, 3.0)]),
            point(0.0, 5.0),
            point(3.0, 3.0),
            Steric::MultiPolygon(MultiPolygon(vec![
                Polygon::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]),
                Polygon::from_xy(&[(20.0, 0.0), (22.0, 0.0), (22.0, 2.0), (20.0, 2.0), (20.0, 0.0)]),
            ])),
        ];
        for a in &shapes {
            for b in &shapes {
                let ab = Relate::new(a, b).execute().unwrap();
                let ba = Relate::new(b, a).execute().unwrap();
                assert_eq!(ab.transpose(), ba, "{a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn sliver_relates_to_itself() {
        let sliver = Steric::Polygon(Polygon::from_xy(&[
            (0.0, 0.0),
            (2000.0, 0.0),
            (1000.0, 0.05),
            (0.0, 0.0),
        ]));
        assert_eq!(relate(&sliver, &sliver), "2FFF1FFF2");
        assert!(Relate::new(&sliver, &sliver).predicate(SpatialPredicate::Equals).unwrap());
        assert_eq!(relate(&point(1000.0, 0.02), &sliver), "0FFFFF212");
    }

    #[test]
    fn empty_operands_have_no_interior() {
        let p = point(1.0, 1.0);
        let empty_line = Steric::Line(LineString::new(Vec::new()));
        assert_eq!(relate(&empty_line, &p), "FFFFFF0F2");
        assert_eq!(relate(&p, &empty_line), "FF0FFFFF2");
        let empty_polygon = Steric::Polygon(Polygon::empty());
        assert_eq!(relate(&empty_polygon, &p), "FFFFFF0F2");
        assert!(Relate::new(&empty_polygon, &p).predicate(SpatialPredicate::Disjoint).unwrap());
    }

    #[test]
    fn parts_clear_of_the_boundary() {
        let holed = Steric::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)]),
            vec![LineString::from_xy(&[
                (60.0, 60.0),
                (80.0, 60.0),
                (80.0, 80.0),
                (60.0, 80.0),
                (60.0, 60.0),
            ])],
        ));
        let near_corner = square(10.0, 10.0, 2.0);
        assert_eq!(relate(&holed, &near_corner), "212FF1FF2");
        assert_eq!(relate(&near_corner, &holed), "2FF1FF212");
        let in_hole = line(&[(65.0, 65.0), (70.0, 70.0)]);
        assert_eq!(relate(&in_hole, &holed), "FF1FF0212");
    }

    #[test]
    fn collections_are_rejected() {
        let a = Steric::Collection(vec![point(0.0, 0.0)]);
        let b = square(0.0, 0.0, 1.0);
        let err = Relate::new(&a, &b).execute().unwrap_err();
        assert!(matches!(
            err,
            StericError::Operation(OperationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn malformed_pattern_is_reported() {
        let a = square(0.0, 0.0, 1.0);
        let err = Relate::new(&a, &a).matches("T*").unwrap_err();
        assert!(matches!(
            err,
            StericError::Matrix(MatrixError::ShouldBeLength9(2))
        ));
        assert!(Relate::new(&a, &a).matches("2FFF1FFF2").unwrap());
    }
}
