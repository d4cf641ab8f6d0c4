use super::intersect_2d::segment_intersection;
use super::{Point2, Tolerance};

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Returns the minimum distance between segments `a0 → a1` and `b0 → b1`;
/// zero when they intersect.
#[must_use]
pub fn segment_to_segment_dist(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: &Tolerance,
) -> f64 {
    if !segment_intersection(a0, a1, b0, b1, tol).is_empty() {
        return 0.0;
    }
    point_to_segment_dist(a0, b0, b1)
        .min(point_to_segment_dist(a1, b0, b1))
        .min(point_to_segment_dist(b0, a0, a1))
        .min(point_to_segment_dist(b1, a0, a1))
}

/// Returns the minimum distance from `p` to a polyline.
///
/// A single-coordinate path is treated as a point; an empty path is
/// infinitely far away.
#[must_use]
pub fn point_to_path_dist(p: &Point2, path: &[Point2]) -> f64 {
    match path {
        [] => f64::INFINITY,
        [only] => (p - only).norm(),
        _ => path
            .windows(2)
            .map(|w| point_to_segment_dist(p, &w[0], &w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Returns the minimum distance between two polylines.
#[must_use]
pub fn path_to_path_dist(a: &[Point2], b: &[Point2], tol: &Tolerance) -> f64 {
    match (a, b) {
        ([], _) | (_, []) => f64::INFINITY,
        ([p], _) => point_to_path_dist(p, b),
        (_, [q]) => point_to_path_dist(q, a),
        _ => {
            let mut best = f64::INFINITY;
            for sa in a.windows(2) {
                for sb in b.windows(2) {
                    best = best.min(segment_to_segment_dist(&sa[0], &sa[1], &sb[0], &sb[1], tol));
                    if best == 0.0 {
                        return best;
                    }
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_on_segment() {
        let d = point_to_segment_dist(&p(1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn crossing_segments_have_zero_distance() {
        let tol = Tolerance::default();
        let d = segment_to_segment_dist(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0), &tol);
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn parallel_segments_distance() {
        let tol = Tolerance::default();
        let d = segment_to_segment_dist(&p(0.0, 0.0), &p(4.0, 0.0), &p(1.0, 3.0), &p(3.0, 3.0), &tol);
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn path_distance_picks_closest_segment() {
        let tol = Tolerance::default();
        let a = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)];
        let b = [p(12.0, 5.0), p(20.0, 5.0)];
        let d = path_to_path_dist(&a, &b, &tol);
        assert!((d - 2.0).abs() < TOL, "d={d}");
        assert!(point_to_path_dist(&p(1.0, 1.0), &[]).is_infinite());
    }
}
