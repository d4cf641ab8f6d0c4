use super::Bound;
use crate::math::{Point2, Tolerance};

/// An ordered sequence of coordinates.
///
/// A line whose first and last coordinates coincide is closed and may serve
/// as a polygon ring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineString(pub Vec<Point2>);

impl LineString {
    /// Creates a line from coordinates.
    #[must_use]
    pub fn new(coords: Vec<Point2>) -> Self {
        Self(coords)
    }

    /// Creates a line from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// The coordinates of the line.
    #[must_use]
    pub fn coords(&self) -> &[Point2] {
        &self.0
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line has no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First coordinate.
    #[must_use]
    pub fn first(&self) -> Option<&Point2> {
        self.0.first()
    }

    /// Last coordinate.
    #[must_use]
    pub fn last(&self) -> Option<&Point2> {
        self.0.last()
    }

    /// Whether the first and last coordinates coincide.
    #[must_use]
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() > 2 => tol.points_eq(first, last),
            _ => false,
        }
    }

    /// Returns a reversed copy; the receiver is never reordered in place.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Returns a copy whose last coordinate repeats the first.
    #[must_use]
    pub fn closed(&self, tol: &Tolerance) -> Self {
        let mut coords = self.0.clone();
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last()) {
            if !tol.points_eq(&first, last) {
                coords.push(first);
            }
        }
        Self(coords)
    }

    /// Iterates over consecutive coordinate pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point2, &Point2)> {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Total Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Bounding box, or `None` for an empty line.
    #[must_use]
    pub fn bound(&self) -> Option<Bound> {
        Bound::from_points(&self.0)
    }

    /// If every coordinate coincides, returns that single coordinate.
    #[must_use]
    pub fn as_degenerate_point(&self, tol: &Tolerance) -> Option<Point2> {
        let first = self.0.first()?;
        self.0
            .iter()
            .all(|p| tol.points_eq(first, p))
            .then_some(*first)
    }

    /// Removes consecutive duplicate coordinates.
    #[must_use]
    pub fn deduped(&self, tol: &Tolerance) -> Self {
        let mut coords: Vec<Point2> = Vec::with_capacity(self.0.len());
        for p in &self.0 {
            if coords.last().is_some_and(|last| tol.points_eq(last, p)) {
                continue;
            }
            coords.push(*p);
        }
        Self(coords)
    }

    /// Whether both lines hold the same coordinates within tolerance.
    #[must_use]
    pub fn equals_exact(&self, other: &Self, tol: &Tolerance) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| tol.points_eq(a, b))
    }
}

impl From<Vec<(f64, f64)>> for LineString {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        Self::from_xy(&coords)
    }
}

impl From<Vec<Point2>> for LineString {
    fn from(coords: Vec<Point2>) -> Self {
        Self(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closed_ring_detection() {
        let tol = Tolerance::default();
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let open = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(ring.is_closed(&tol));
        assert!(!open.is_closed(&tol));
        assert!(open.closed(&tol).is_closed(&tol));
    }

    #[test]
    fn reversed_leaves_original_untouched() {
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 3.0)]);
        let rev = line.reversed();
        assert_eq!(rev.coords()[0], Point2::new(2.0, 3.0));
        assert_eq!(line.coords()[0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn length_sums_segments() {
        let line = LineString::from(vec![(0.0, 0.0), (3.0, 4.0), (3.0, 6.0)]);
        assert_relative_eq!(line.length(), 7.0);
    }

    #[test]
    fn degenerate_point_detection() {
        let tol = Tolerance::default();
        let dot = LineString::from(vec![(2.0, 2.0), (2.0, 2.0)]);
        assert_eq!(dot.as_degenerate_point(&tol), Some(Point2::new(2.0, 2.0)));
        let line = LineString::from(vec![(2.0, 2.0), (3.0, 2.0)]);
        assert!(line.as_degenerate_point(&tol).is_none());
    }

    #[test]
    fn dedup_drops_repeated_coordinates() {
        let tol = Tolerance::default();
        let line = LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0)]);
        assert_eq!(line.deduped(&tol).len(), 2);
    }
}
