use super::{Bound, LineString};
use crate::math::polygon_2d::{is_clockwise, signed_area_2d};
use crate::math::{Point2, Tolerance};

/// A polygon: the first ring is the shell, the remaining rings are holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    rings: Vec<LineString>,
}

impl Polygon {
    /// Creates a polygon from a shell and holes.
    #[must_use]
    pub fn new(shell: LineString, holes: Vec<LineString>) -> Self {
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(shell);
        rings.extend(holes);
        Self { rings }
    }

    /// Creates a polygon from rings, shell first.
    #[must_use]
    pub fn from_rings(rings: Vec<LineString>) -> Self {
        Self { rings }
    }

    /// Creates a hole-free polygon from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(shell: &[(f64, f64)]) -> Self {
        Self::new(LineString::from_xy(shell), Vec::new())
    }

    /// The empty polygon.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All rings, shell first.
    #[must_use]
    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    /// The outer ring.
    #[must_use]
    pub fn shell(&self) -> Option<&LineString> {
        self.rings.first()
    }

    /// The inner rings.
    #[must_use]
    pub fn holes(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Whether the polygon has no shell coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shell().is_none_or(LineString::is_empty)
    }

    /// Enclosed area: shell minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let Some(shell) = self.shell() else {
            return 0.0;
        };
        let holes: f64 = self
            .holes()
            .iter()
            .map(|h| signed_area_2d(h.coords()).abs())
            .sum();
        signed_area_2d(shell.coords()).abs() - holes
    }

    /// Bounding box of the shell.
    #[must_use]
    pub fn bound(&self) -> Option<Bound> {
        self.shell().and_then(LineString::bound)
    }

    /// Returns a copy with closed rings, a counter-clockwise shell and
    /// clockwise holes. Rings are reversed on the copy only.
    #[must_use]
    pub fn normalized(&self, tol: &Tolerance) -> Self {
        let rings = self
            .rings
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let ring = ring.closed(tol);
                let want_clockwise = i > 0;
                if is_clockwise(ring.coords()) == want_clockwise {
                    ring
                } else {
                    ring.reversed()
                }
            })
            .collect();
        Self { rings }
    }

    /// Iterates over every coordinate of every ring.
    pub fn coords(&self) -> impl Iterator<Item = &Point2> {
        self.rings.iter().flat_map(|r| r.coords().iter())
    }

    /// Whether both polygons hold the same rings within tolerance.
    #[must_use]
    pub fn equals_exact(&self, other: &Self, tol: &Tolerance) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals_exact(b, tol))
    }
}

/// An ordered collection of polygons with disjoint interiors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    /// The member polygons.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    /// Whether every member is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Polygon::is_empty)
    }

    /// Sum of member areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.0.iter().map(Polygon::area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_with_hole() -> Polygon {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![
                (2.0, 2.0),
                (4.0, 2.0),
                (4.0, 4.0),
                (2.0, 4.0),
                (2.0, 2.0),
            ])],
        )
    }

    #[test]
    fn area_subtracts_holes() {
        assert_relative_eq!(square_with_hole().area(), 96.0);
    }

    #[test]
    fn normalized_orients_rings() {
        let tol = Tolerance::default();
        let poly = square_with_hole().normalized(&tol);
        assert!(!is_clockwise(poly.shell().map(LineString::coords).unwrap_or(&[])));
        assert!(is_clockwise(poly.holes()[0].coords()));
        // The source polygon is untouched.
        let original = square_with_hole();
        assert!(!is_clockwise(original.holes()[0].coords()));
    }

    #[test]
    fn normalized_closes_open_shell() {
        let tol = Tolerance::default();
        let poly = Polygon::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).normalized(&tol);
        let shell = poly.shell().map(LineString::coords).unwrap_or(&[]);
        assert_eq!(shell.len(), 5);
        assert!(!is_clockwise(shell));
    }

    #[test]
    fn empty_polygon() {
        assert!(Polygon::empty().is_empty());
        assert!(Polygon::empty().bound().is_none());
        assert_relative_eq!(Polygon::empty().area(), 0.0);
    }
}
