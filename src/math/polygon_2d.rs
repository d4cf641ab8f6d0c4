use super::intersect_2d::in_line_segment;
use super::{Point2, Tolerance, Vector2};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated
/// closing coordinate contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Whether the ring winds clockwise.
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> bool {
    signed_area_2d(points) < 0.0
}

/// Iterates over the edges of a ring, adding the closing edge when the last
/// coordinate does not already repeat the first.
pub fn ring_edges(ring: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    let closing = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first != last => Some((last, first)),
        _ => None,
    };
    ring.windows(2).map(|w| (&w[0], &w[1])).chain(closing)
}

/// Whether `point` lies on any edge of the ring.
#[must_use]
pub fn on_ring(point: &Point2, ring: &[Point2], tol: &Tolerance) -> bool {
    ring_edges(ring).any(|(a, b)| in_line_segment(point, a, b, tol).0)
}

/// Ray-casting parity test; does not special-case boundary points.
///
/// A crossing counts only when it lies to the right of `point` by more than
/// the scaled epsilon.
#[must_use]
pub fn ray_crossing_parity(point: &Point2, ring: &[Point2], tol: &Tolerance) -> bool {
    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x - point.x > tol.scaled(x) {
                inside = !inside;
            }
        }
    }
    inside
}

/// Point-in-ring test by ray crossing. Points on the ring are outside.
#[must_use]
pub fn pn_polygon_by_cross(point: &Point2, ring: &[Point2], tol: &Tolerance) -> bool {
    !on_ring(point, ring, tol) && ray_crossing_parity(point, ring, tol)
}

/// Removes ring vertices that lie on the segment joining their neighbours.
///
/// Spikes, where the ring doubles back, are kept. An open ring is returned
/// unchanged, as is any ring reduced to a triangle.
#[must_use]
pub fn remove_collinear_vertices(ring: &[Point2], tol: &Tolerance) -> Vec<Point2> {
    let closed = matches!((ring.first(), ring.last()), (Some(f), Some(l)) if ring.len() > 3 && tol.points_eq(f, l));
    if !closed {
        return ring.to_vec();
    }
    let mut open = ring[..ring.len() - 1].to_vec();
    loop {
        let before = open.len();
        let mut i = 0;
        while open.len() > 3 && i < open.len() {
            let n = open.len();
            let (prev, next) = (open[(i + n - 1) % n], open[(i + 1) % n]);
            if in_line_segment(&open[i], &prev, &next, tol).0 {
                open.remove(i);
            } else {
                i += 1;
            }
        }
        if open.len() == before {
            break;
        }
    }
    open.push(open[0]);
    open
}

/// Rotates a closed ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(ring: &[Point2], tol: &Tolerance) -> Vec<Point2> {
    let closed = ring.len() > 1 && ring.first() == ring.last();
    let open = if closed { &ring[..ring.len() - 1] } else { ring };
    if open.len() < 2 {
        return ring.to_vec();
    }
    let mut best = 0;
    for (i, pt) in open.iter().enumerate().skip(1) {
        let b = &open[best];
        if pt.x < b.x - tol.scaled(b.x) || tol.approx_eq(pt.x, b.x) && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(ring.len());
    rotated.extend_from_slice(&open[best..]);
    rotated.extend_from_slice(&open[..best]);
    if closed {
        rotated.push(rotated[0]);
    }
    rotated
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::ComputeOffsetZero` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2, tol: &Tolerance) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len <= tol.accuracy {
        return Err(GeometryError::ComputeOffsetZero.into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Shifts the segment `a → b` by `distance` along its left normal.
///
/// # Errors
///
/// Returns `GeometryError::ComputeOffsetZero` if the segment has zero length.
pub fn offset_segment(
    a: &Point2,
    b: &Point2,
    distance: f64,
    tol: &Tolerance,
) -> Result<(Point2, Point2)> {
    let shift = left_normal(segment_direction(a, b, tol)?) * distance;
    Ok((a + shift, b + shift))
}
