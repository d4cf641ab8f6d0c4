use std::cmp::Ordering;

use super::{cross, Point2, Tolerance, Vector2};
use crate::index::segment_pairs;

/// A point produced by intersecting two segments.
///
/// Transient: created by one intersection call and consumed by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    /// The intersection coordinate.
    pub point: Point2,
    /// Always `true` for points reported by [`segment_intersection`].
    pub is_intersection: bool,
    /// `true` when the first segment crosses the second from its right side
    /// to its left side, i.e. enters the region left of the second segment.
    pub is_entering: bool,
    /// `true` when the point is one of the input endpoints.
    pub is_original: bool,
    /// `true` when the segments are parallel and overlap or touch end-on.
    pub is_collinear: bool,
}

impl IntersectionPoint {
    fn original(point: Point2, is_collinear: bool) -> Self {
        Self {
            point,
            is_intersection: true,
            is_entering: false,
            is_original: true,
            is_collinear,
        }
    }
}

/// Tests whether `spot` lies on the closed segment `a → b`.
///
/// Returns `(in_segment, is_vertex)`, where `is_vertex` reports coincidence
/// with `a` or `b`.
#[must_use]
pub fn in_line_segment(spot: &Point2, a: &Point2, b: &Point2, tol: &Tolerance) -> (bool, bool) {
    if tol.points_eq(spot, a) || tol.points_eq(spot, b) {
        return (true, true);
    }
    let ab = b - a;
    let len = ab.norm();
    if len <= tol.accuracy {
        return (false, false);
    }
    let magnitude = coordinate_magnitude(&[*spot, *a, *b]);
    let slack = tol.scaled(magnitude);
    let distance = cross(&ab, &(spot - a)).abs() / len;
    if distance > slack {
        return (false, false);
    }
    let within_x = spot.x >= a.x.min(b.x) - slack && spot.x <= a.x.max(b.x) + slack;
    let within_y = spot.y >= a.y.min(b.y) - slack && spot.y <= a.y.max(b.y) + slack;
    (within_x && within_y, false)
}

/// Intersects the directed segments `p0 → p1` and `q0 → q1`.
///
/// Returns no point when the segments miss, one point for a proper crossing
/// or a touch, and the shared endpoints of the overlap when the segments are
/// collinear. A computed crossing within tolerance of an input endpoint is
/// snapped to that endpoint.
#[must_use]
pub fn segment_intersection(
    p0: &Point2,
    p1: &Point2,
    q0: &Point2,
    q1: &Point2,
    tol: &Tolerance,
) -> Vec<IntersectionPoint> {
    let r = p1 - p0;
    let s = q1 - q0;
    let det = cross(&r, &s);

    if det.abs() <= tol.epsilon * r.norm() * s.norm() {
        return collinear_intersection(p0, p1, q0, q1, tol);
    }

    let d = q0 - p0;
    let t = cross(&d, &s) / det;
    let u = cross(&d, &r) / det;
    // Coarse parametric reject; the exact decision is made by `in_line_segment`.
    if !(-0.5..=1.5).contains(&t) || !(-0.5..=1.5).contains(&u) {
        return Vec::new();
    }

    let mut point = p0 + r * t;
    let mut is_original = false;
    for end in [p0, p1, q0, q1] {
        if tol.points_eq(&point, end) {
            point = *end;
            is_original = true;
            break;
        }
    }

    if !in_line_segment(&point, p0, p1, tol).0 || !in_line_segment(&point, q0, q1, tol).0 {
        return Vec::new();
    }

    vec![IntersectionPoint {
        point,
        is_intersection: true,
        is_entering: det < 0.0,
        is_original,
        is_collinear: false,
    }]
}

/// Parallel branch of [`segment_intersection`]: every endpoint lying on the
/// other segment is reported once.
fn collinear_intersection(
    p0: &Point2,
    p1: &Point2,
    q0: &Point2,
    q1: &Point2,
    tol: &Tolerance,
) -> Vec<IntersectionPoint> {
    let candidates = [(q0, p0, p1), (q1, p0, p1), (p0, q0, q1), (p1, q0, q1)];
    let mut result: Vec<IntersectionPoint> = Vec::with_capacity(2);
    for (spot, a, b) in candidates {
        if !in_line_segment(spot, a, b, tol).0 {
            continue;
        }
        if result.iter().any(|ip| tol.points_eq(&ip.point, spot)) {
            continue;
        }
        result.push(IntersectionPoint::original(*spot, true));
    }
    result
}

/// Intersects two polylines segment by segment.
///
/// Candidate segment pairs come from the monotone-chain index; each is then
/// verified with [`segment_intersection`]. The result is deduplicated by
/// coordinate and ordered by `x`, then `y`.
#[must_use]
pub fn intersection_line(a: &[Point2], b: &[Point2], tol: &Tolerance) -> Vec<IntersectionPoint> {
    let mut result: Vec<IntersectionPoint> = Vec::new();
    for pair in segment_pairs(&[a], &[b], tol) {
        let (p0, p1) = (&a[pair.a_segment], &a[pair.a_segment + 1]);
        let (q0, q1) = (&b[pair.b_segment], &b[pair.b_segment + 1]);
        for ip in segment_intersection(p0, p1, q0, q1, tol) {
            match result
                .iter_mut()
                .find(|existing| tol.points_eq(&existing.point, &ip.point))
            {
                Some(existing) => {
                    existing.is_collinear |= ip.is_collinear;
                    existing.is_original |= ip.is_original;
                }
                None => result.push(ip),
            }
        }
    }
    result.sort_by(|l, r| compare_points(&l.point, &r.point));
    result
}

/// Lexicographic `(x, y)` ordering of coordinates.
#[must_use]
pub fn compare_points(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Parametric intersection of two infinite lines.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    tol: &Tolerance,
) -> Option<(f64, f64)> {
    let det = cross(d1, d2);
    if det.abs() <= tol.epsilon * d1.norm() * d2.norm() {
        return None;
    }
    let d = p2 - p1;
    let t = cross(&d, d2) / det;
    let u = cross(&d, d1) / det;
    Some((t, u))
}

/// Largest absolute coordinate among `points`.
pub(crate) fn coordinate_magnitude(points: &[Point2]) -> f64 {
    points
        .iter()
        .fold(0.0_f64, |acc, p| acc.max(p.x.abs()).max(p.y.abs()))
}
