use super::intersect_2d::{compare_points, intersection_line};
use super::polygon_2d::{on_ring, ray_crossing_parity};
use super::{Point2, Tolerance};
use crate::geometry::Polygon;

/// Location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Matrix row/column index: Interior 0, Boundary 1, Exterior 2.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Interior => 0,
            Self::Boundary => 1,
            Self::Exterior => 2,
        }
    }
}

/// How a point, line or polygon sits relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InPolygon {
    /// Entirely in the interior.
    OnlyInPolygon,
    /// Entirely in the exterior.
    OnlyOutPolygon,
    /// Entirely on the boundary.
    OnlyInLine,
    /// Partly in the interior and partly in the exterior.
    BothPolygon,
    /// In the interior, touching the boundary.
    PartInPolygon,
    /// In the exterior, touching the boundary.
    PartOutPolygon,
    /// Encloses the polygon it is compared against.
    IncludePolygon,
}

impl InPolygon {
    /// Classification of a single located point.
    #[must_use]
    pub fn from_location(location: Location) -> Self {
        match location {
            Location::Interior => Self::OnlyInPolygon,
            Location::Boundary => Self::OnlyInLine,
            Location::Exterior => Self::OnlyOutPolygon,
        }
    }

    /// Folds two partial classifications into one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        use InPolygon::{
            BothPolygon, IncludePolygon, OnlyInLine, OnlyInPolygon, OnlyOutPolygon,
            PartInPolygon, PartOutPolygon,
        };
        if self == other {
            return self;
        }
        match (self, other) {
            (BothPolygon, _) | (_, BothPolygon) => BothPolygon,
            (IncludePolygon, OnlyInLine) | (OnlyInLine, IncludePolygon) => IncludePolygon,
            (IncludePolygon, _) | (_, IncludePolygon) => BothPolygon,
            (OnlyInPolygon | PartInPolygon, OnlyInLine)
            | (OnlyInLine, OnlyInPolygon | PartInPolygon)
            | (OnlyInPolygon, PartInPolygon)
            | (PartInPolygon, OnlyInPolygon) => PartInPolygon,
            (OnlyOutPolygon | PartOutPolygon, OnlyInLine)
            | (OnlyInLine, OnlyOutPolygon | PartOutPolygon)
            | (OnlyOutPolygon, PartOutPolygon)
            | (PartOutPolygon, OnlyOutPolygon) => PartOutPolygon,
            _ => BothPolygon,
        }
    }

    /// Whether any part lies in the polygon interior.
    #[must_use]
    pub fn touches_interior(self) -> bool {
        matches!(
            self,
            Self::OnlyInPolygon | Self::PartInPolygon | Self::BothPolygon | Self::IncludePolygon
        )
    }

    /// Whether nothing lies in the polygon exterior.
    #[must_use]
    pub fn is_covered(self) -> bool {
        matches!(
            self,
            Self::OnlyInPolygon | Self::PartInPolygon | Self::OnlyInLine
        )
    }
}

/// Locates `point` against a single ring.
#[must_use]
pub fn locate_point_in_ring(point: &Point2, ring: &[Point2], tol: &Tolerance) -> Location {
    if on_ring(point, ring, tol) {
        Location::Boundary
    } else if ray_crossing_parity(point, ring, tol) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates `point` against a polygon with holes.
///
/// Any ring contact is boundary; otherwise the crossing parity over all
/// rings decides, so a point inside a hole is exterior.
#[must_use]
pub fn locate_point_in_polygon(point: &Point2, polygon: &Polygon, tol: &Tolerance) -> Location {
    let rings = polygon.rings();
    if rings.iter().any(|r| on_ring(point, r.coords(), tol)) {
        return Location::Boundary;
    }
    let inside = rings
        .iter()
        .fold(false, |acc, r| acc ^ ray_crossing_parity(point, r.coords(), tol));
    if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates `point` against the union of several interior-disjoint polygons.
#[must_use]
pub fn locate_point_in_polygons(point: &Point2, polygons: &[&Polygon], tol: &Tolerance) -> Location {
    let mut location = Location::Exterior;
    for polygon in polygons {
        match locate_point_in_polygon(point, polygon, tol) {
            Location::Interior => return Location::Interior,
            Location::Boundary => location = Location::Boundary,
            Location::Exterior => {}
        }
    }
    location
}

/// Classifies a point against a polygon.
#[must_use]
pub fn in_polygon(point: &Point2, polygon: &Polygon, tol: &Tolerance) -> InPolygon {
    InPolygon::from_location(locate_point_in_polygon(point, polygon, tol))
}

/// Classifies a polyline against a polygon.
///
/// The line is cut at every crossing with a polygon ring; each vertex and
/// each sub-segment midpoint is located and the results are merged.
/// Returns `None` for an empty line.
#[must_use]
pub fn line_in_polygon(line: &[Point2], polygon: &Polygon, tol: &Tolerance) -> Option<InPolygon> {
    let mut state: Option<InPolygon> = None;
    let mut fold = |location: Location| {
        let next = InPolygon::from_location(location);
        state = Some(state.map_or(next, |s| s.merge(next)));
    };

    if let [only] = line {
        fold(locate_point_in_polygon(only, polygon, tol));
        return state;
    }

    for segment in line.windows(2) {
        let (a, b) = (&segment[0], &segment[1]);
        let mut cuts: Vec<Point2> = vec![*a, *b];
        for ring in polygon.rings() {
            cuts.extend(
                intersection_line(segment, ring.coords(), tol)
                    .into_iter()
                    .map(|ip| ip.point),
            );
        }
        let direction = b - a;
        cuts.sort_by(|l, r| {
            (l - a)
                .dot(&direction)
                .total_cmp(&(r - a).dot(&direction))
                .then_with(|| compare_points(l, r))
        });
        cuts.dedup_by(|l, r| tol.points_eq(l, r));

        for cut in &cuts {
            fold(locate_point_in_polygon(cut, polygon, tol));
        }
        for pair in cuts.windows(2) {
            let mid = Point2::from((pair[0].coords + pair[1].coords) * 0.5);
            fold(locate_point_in_polygon(&mid, polygon, tol));
        }
    }
    state
}

/// Classifies polygon `a` against polygon `b`.
///
/// Returns `IncludePolygon` when `a` lies outside `b` but `b` lies wholly
/// inside `a`; otherwise the classification of `a`'s rings against `b`.
#[must_use]
pub fn polygon_in_polygon(a: &Polygon, b: &Polygon, tol: &Tolerance) -> Option<InPolygon> {
    let mut state: Option<InPolygon> = None;
    for ring in a.rings() {
        if let Some(next) = line_in_polygon(ring.coords(), b, tol) {
            state = Some(state.map_or(next, |s| s.merge(next)));
        }
    }
    match state {
        Some(InPolygon::OnlyOutPolygon | InPolygon::PartOutPolygon) => {
            let b_in_a = b
                .shell()
                .and_then(|shell| line_in_polygon(shell.coords(), a, tol));
            if b_in_a.is_some_and(InPolygon::is_covered) {
                Some(InPolygon::IncludePolygon)
            } else {
                state
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::InPolygon::*;
    use super::*;
    use crate::geometry::LineString;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_xy(&[
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ])
    }

    #[test]
    fn merge_table() {
        assert_eq!(OnlyInPolygon.merge(OnlyInLine), PartInPolygon);
        assert_eq!(OnlyInLine.merge(OnlyOutPolygon), PartOutPolygon);
        assert_eq!(OnlyInPolygon.merge(OnlyOutPolygon), BothPolygon);
        assert_eq!(PartInPolygon.merge(PartOutPolygon), BothPolygon);
        assert_eq!(PartInPolygon.merge(OnlyInPolygon), PartInPolygon);
        assert_eq!(OnlyOutPolygon.merge(PartOutPolygon), PartOutPolygon);
        assert_eq!(IncludePolygon.merge(OnlyInLine), IncludePolygon);
        assert_eq!(IncludePolygon.merge(OnlyInPolygon), BothPolygon);
        assert_eq!(BothPolygon.merge(OnlyInLine), BothPolygon);
        assert_eq!(OnlyInLine.merge(OnlyInLine), OnlyInLine);
    }

    #[test]
    fn point_locations() {
        let tol = Tolerance::default();
        let poly = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 6.0),
                (4.0, 4.0),
            ])],
        );
        assert_eq!(locate_point_in_polygon(&p(1.0, 1.0), &poly, &tol), Location::Interior);
        assert_eq!(locate_point_in_polygon(&p(5.0, 5.0), &poly, &tol), Location::Exterior);
        assert_eq!(locate_point_in_polygon(&p(4.0, 5.0), &poly, &tol), Location::Boundary);
        assert_eq!(locate_point_in_polygon(&p(10.0, 3.0), &poly, &tol), Location::Boundary);
        assert_eq!(in_polygon(&p(11.0, 3.0), &poly, &tol), OnlyOutPolygon);
    }

    #[test]
    fn line_classifications() {
        let tol = Tolerance::default();
        let poly = square(0.0, 0.0, 10.0);
        let inside = [p(2.0, 2.0), p(8.0, 8.0)];
        let touching = [p(0.0, 5.0), p(5.0, 5.0)];
        let crossing = [p(5.0, 5.0), p(15.0, 5.0)];
        let outside = [p(12.0, 0.0), p(12.0, 10.0)];
        let along = [p(0.0, 0.0), p(10.0, 0.0)];
        assert_eq!(line_in_polygon(&inside, &poly, &tol), Some(OnlyInPolygon));
        assert_eq!(line_in_polygon(&touching, &poly, &tol), Some(PartInPolygon));
        assert_eq!(line_in_polygon(&crossing, &poly, &tol), Some(BothPolygon));
        assert_eq!(line_in_polygon(&outside, &poly, &tol), Some(OnlyOutPolygon));
        assert_eq!(line_in_polygon(&along, &poly, &tol), Some(OnlyInLine));
        assert_eq!(line_in_polygon(&[], &poly, &tol), None);
    }

    #[test]
    fn polygon_classifications() {
        let tol = Tolerance::default();
        let big = square(0.0, 0.0, 10.0);
        let small = square(2.0, 2.0, 2.0);
        let apart = square(20.0, 20.0, 2.0);
        let overlapping = square(5.0, 5.0, 10.0);
        assert_eq!(polygon_in_polygon(&small, &big, &tol), Some(OnlyInPolygon));
        assert_eq!(polygon_in_polygon(&big, &small, &tol), Some(IncludePolygon));
        assert_eq!(polygon_in_polygon(&apart, &big, &tol), Some(OnlyOutPolygon));
        assert_eq!(polygon_in_polygon(&overlapping, &big, &tol), Some(BothPolygon));
    }
}
