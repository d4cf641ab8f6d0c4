use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Steric};
use crate::math::distance_2d::path_to_path_dist;
use crate::math::in_polygon::{locate_point_in_polygons, Location};
use crate::math::{Point2, Tolerance};

/// Computes the minimum Euclidean distance between two geometries.
///
/// The distance is zero when the geometries intersect, including when one
/// lies inside an area of the other.
pub struct Distance<'a> {
    a: &'a Steric,
    b: &'a Steric,
    tolerance: Tolerance,
}

impl<'a> Distance<'a> {
    /// Creates a new `Distance` query.
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

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if either geometry is empty.
    pub fn execute(&self) -> Result<f64> {
        for g in [self.a, self.b] {
            if g.is_empty() {
                return Err(OperationError::InvalidInput(format!(
                    "distance to an empty {}",
                    g.geometry_type()
                ))
                .into());
            }
        }
        let tol = &self.tolerance;
        let (paths_a, areas_a) = decompose(self.a);
        let (paths_b, areas_b) = decompose(self.b);

        if inside_area(&paths_a, &areas_b, tol) || inside_area(&paths_b, &areas_a, tol) {
            return Ok(0.0);
        }

        let mut best = f64::INFINITY;
        for pa in &paths_a {
            for pb in &paths_b {
                best = best.min(path_to_path_dist(pa, pb, tol));
                if best == 0.0 {
                    return Ok(best);
                }
            }
        }
        Ok(best)
    }
}

/// Splits a geometry into coordinate paths (points, lines, rings) and its
/// areal parts.
fn decompose(geometry: &Steric) -> (Vec<Vec<Point2>>, Vec<&Polygon>) {
    let mut paths = Vec::new();
    let mut areas = Vec::new();
    collect(geometry, &mut paths, &mut areas);
    (paths, areas)
}

fn collect<'g>(geometry: &'g Steric, paths: &mut Vec<Vec<Point2>>, areas: &mut Vec<&'g Polygon>) {
    match geometry {
        Steric::Point(p) => paths.push(vec![*p]),
        Steric::Line(line) => paths.push(line.coords().to_vec()),
        Steric::Polygon(_) | Steric::MultiPolygon(_) => {
            for poly in geometry.polygons().unwrap_or_default() {
                paths.extend(poly.rings().iter().map(|r| r.coords().to_vec()));
                areas.push(poly);
            }
        }
        Steric::Collection(parts) => {
            for part in parts {
                collect(part, paths, areas);
            }
        }
    }
}

/// Whether any path has a coordinate inside the areas.
fn inside_area(paths: &[Vec<Point2>], areas: &[&Polygon], tol: &Tolerance) -> bool {
    !areas.is_empty()
        && paths
            .iter()
            .filter_map(|path| path.first())
            .any(|p| locate_point_in_polygons(p, areas, tol) != Location::Exterior)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::LineString;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Steric {
        Steric::Polygon(Polygon::from_xy(&[
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ]))
    }

    #[test]
    fn point_to_point() {
        let a = Steric::Point(Point2::new(0.0, 0.0));
        let b = Steric::Point(Point2::new(3.0, 4.0));
        assert_relative_eq!(Distance::new(&a, &b).execute().unwrap(), 5.0);
    }

    #[test]
    fn separated_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(4.0, 0.0, 1.0);
        assert_relative_eq!(Distance::new(&a, &b).execute().unwrap(), 3.0);
    }

    #[test]
    fn contained_geometry_is_at_zero() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = Steric::Line(LineString::from_xy(&[(2.0, 2.0), (3.0, 3.0)]));
        assert_relative_eq!(Distance::new(&outer, &inner).execute().unwrap(), 0.0);
        assert_relative_eq!(Distance::new(&inner, &outer).execute().unwrap(), 0.0);
    }

    #[test]
    fn point_in_hole_measures_to_hole_ring() {
        let holed = Steric::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from_xy(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)])],
        ));
        let p = Steric::Point(Point2::new(5.0, 5.0));
        assert_relative_eq!(Distance::new(&p, &holed).execute().unwrap(), 3.0);
    }

    #[test]
    fn crossing_lines_are_at_zero() {
        let a = Steric::Line(LineString::from_xy(&[(0.0, 0.0), (2.0, 2.0)]));
        let b = Steric::Line(LineString::from_xy(&[(0.0, 2.0), (2.0, 0.0)]));
        assert_relative_eq!(Distance::new(&a, &b).execute().unwrap(), 0.0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let a = Steric::empty();
        let b = square(0.0, 0.0, 1.0);
        assert!(Distance::new(&a, &b).execute().is_err());
    }
}
