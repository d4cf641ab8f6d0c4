use crate::geometry::{LineString, Polygon};
use crate::math::in_polygon::{locate_point_in_ring, Location};
use crate::math::intersect_2d::{compare_points, coordinate_magnitude};
use crate::math::polygon_2d::{remove_collinear_vertices, rotate_to_canonical_start, signed_area_2d};
use crate::math::{Point2, Tolerance};

struct Shell {
    ring: Vec<Point2>,
    area: f64,
    holes: Vec<Vec<Point2>>,
}

/// A point of `hole` strictly inside `shell`, if the hole lies in it.
fn hole_inside(hole: &[Point2], shell: &[Point2], tol: &Tolerance) -> bool {
    for point in hole {
        match locate_point_in_ring(point, shell, tol) {
            Location::Interior => return true,
            Location::Exterior => return false,
            Location::Boundary => {}
        }
    }
    // Every vertex touches the shell; fall back to an edge midpoint.
    hole.windows(2).any(|w| {
        locate_point_in_ring(&nalgebra::center(&w[0], &w[1]), shell, tol) == Location::Interior
    })
}

/// Assembles walked rings into polygons.
///
/// Counter-clockwise rings become shells and clockwise rings holes; each
/// hole joins the smallest shell that contains it. Rings with no area are
/// dropped and vertices in the middle of straight runs are removed. Every ring is rotated to a canonical start and the polygons are
/// ordered by their first coordinate, so equal inputs give equal outputs.
#[must_use]
pub fn assemble_polygons(rings: Vec<Vec<Point2>>, tol: &Tolerance) -> Vec<Polygon> {
    let mut shells: Vec<Shell> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();
    for ring in rings {
        let magnitude = coordinate_magnitude(&ring);
        let area = signed_area_2d(&ring);
        if tol.is_zero(area, magnitude * magnitude) {
            continue;
        }
        let ring = rotate_to_canonical_start(&remove_collinear_vertices(&ring, tol), tol);
        if area > 0.0 {
            shells.push(Shell {
                ring,
                area,
                holes: Vec::new(),
            });
        } else {
            holes.push(ring);
        }
    }

    for hole in holes {
        let owner = shells
            .iter_mut()
            .filter(|shell| hole_inside(&hole, &shell.ring, tol))
            .min_by(|l, r| l.area.total_cmp(&r.area));
        match owner {
            Some(shell) => shell.holes.push(hole),
            None => tracing::warn!(vertices = hole.len(), "overlay hole has no shell; dropping it"),
        }
    }

    let mut polygons: Vec<Polygon> = shells
        .into_iter()
        .map(|mut shell| {
            shell
                .holes
                .sort_by(|l, r| compare_points(&l[0], &r[0]));
            Polygon::new(
                LineString::new(shell.ring),
                shell.holes.into_iter().map(LineString::new).collect(),
            )
        })
        .collect();
    polygons.sort_by(|l, r| {
        match (l.shell().and_then(LineString::first), r.shell().and_then(LineString::first)) {
            (Some(a), Some(b)) => compare_points(a, b),
            _ => std::cmp::Ordering::Equal,
        }
    });
    polygons
}
