use crate::geometry::{LineString, Steric};
use crate::math::in_polygon::{locate_point_in_polygons, Location};
use crate::math::intersect_2d::in_line_segment;
use crate::math::{Point2, Tolerance};

/// Locates `point` against the interior, boundary and exterior of a
/// geometry.
///
/// A point's interior is the point itself. A line's boundary is its two
/// endpoints unless it is closed. An area's boundary is its rings. A
/// collection reports the highest-priority location among its parts,
/// interior first.
#[must_use]
pub fn locate_point(point: &Point2, geometry: &Steric, tol: &Tolerance) -> Location {
    match geometry {
        Steric::Point(p) => {
            if tol.points_eq(point, p) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Steric::Line(line) => locate_point_on_line(point, line, tol),
        Steric::Polygon(_) | Steric::MultiPolygon(_) => {
            let polygons = geometry.polygons().unwrap_or_default();
            locate_point_in_polygons(point, &polygons, tol)
        }
        Steric::Collection(parts) => {
            let mut location = Location::Exterior;
            for part in parts {
                match locate_point(point, part, tol) {
                    Location::Interior => return Location::Interior,
                    Location::Boundary => location = Location::Boundary,
                    Location::Exterior => {}
                }
            }
            location
        }
    }
}

fn locate_point_on_line(point: &Point2, line: &LineString, tol: &Tolerance) -> Location {
    let coords = line.coords();
    match coords {
        [] => return Location::Exterior,
        [only] => {
            return if tol.points_eq(point, only) {
                Location::Interior
            } else {
                Location::Exterior
            };
        }
        _ => {}
    }
    if !line.is_closed(tol) {
        let ends = [coords[0], coords[coords.len() - 1]];
        if ends.iter().any(|end| tol.points_eq(point, end)) {
            return Location::Boundary;
        }
    }
    if line
        .segments()
        .any(|(a, b)| in_line_segment(point, a, b, tol).0)
    {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Whether `point` lies in the interior or on the boundary of `geometry`.
#[must_use]
pub fn covers_point(geometry: &Steric, point: &Point2, tol: &Tolerance) -> bool {
    locate_point(point, geometry, tol) != Location::Exterior
}
