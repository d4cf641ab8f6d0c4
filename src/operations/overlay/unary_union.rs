use crate::error::Result;
use crate::geometry::{LineString, Polygon, Steric};
use crate::math::in_polygon::{locate_point_in_polygons, Location};
use crate::math::intersect_2d::in_line_segment;
use crate::math::{Point2, Tolerance};
use crate::operations::line_merge::merge_lines;

use super::engine::area_overlay;
use super::line::{line_overlay, line_polygon_overlay};
use super::select::OverlayOp;

/// Unions every part of a geometry, or of a list of geometries.
///
/// Parts are grouped by dimension. Polygons and lines are each unioned by
/// balanced halving; linework and points covered by the areal result are
/// dropped.
pub struct UnaryUnion<'a> {
    parts: &'a [Steric],
    tolerance: Tolerance,
}

impl<'a> UnaryUnion<'a> {
    /// Creates a new `UnaryUnion` over a list of geometries.
    #[must_use]
    pub fn new(parts: &'a [Steric]) -> Self {
        Self {
            parts,
            tolerance: Tolerance::default(),
        }
    }

    /// Creates a new `UnaryUnion` over the parts of a single geometry, such
    /// as a `MultiPolygon` or a `Collection`.
    #[must_use]
    pub fn of(geometry: &'a Steric) -> Self {
        Self::new(std::slice::from_ref(geometry))
    }

    /// Sets a custom tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the union.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if an area walk fails.
    pub fn execute(&self) -> Result<Steric> {
        unary_union(self.parts, &self.tolerance)
    }
}

#[derive(Default)]
struct Parts {
    polygons: Vec<Polygon>,
    lines: Vec<LineString>,
    points: Vec<Point2>,
}

impl Parts {
    fn collect(&mut self, geometry: &Steric, tol: &Tolerance) {
        match geometry {
            Steric::Point(p) => self.points.push(*p),
            Steric::Line(line) => match line.as_degenerate_point(tol) {
                Some(p) => self.points.push(p),
                None => self.lines.push(line.clone()),
            },
            Steric::Polygon(poly) => {
                if !poly.is_empty() {
                    self.polygons.push(poly.clone());
                }
            }
            Steric::MultiPolygon(multi) => {
                self.polygons
                    .extend(multi.polygons().iter().filter(|p| !p.is_empty()).cloned());
            }
            Steric::Collection(parts) => {
                for part in parts {
                    self.collect(part, tol);
                }
            }
        }
    }
}

fn union_polygons_by_half(polygons: &[Polygon], tol: &Tolerance) -> Result<Vec<Polygon>> {
    match polygons {
        [] => Ok(Vec::new()),
        [only] => area_overlay(&[only], &[], OverlayOp::Union, tol),
        _ => {
            let (left, right) = polygons.split_at(polygons.len() / 2);
            let left = union_polygons_by_half(left, tol)?;
            let right = union_polygons_by_half(right, tol)?;
            let left: Vec<&Polygon> = left.iter().collect();
            let right: Vec<&Polygon> = right.iter().collect();
            area_overlay(&left, &right, OverlayOp::Union, tol)
        }
    }
}

fn union_lines_by_half(lines: &[LineString], tol: &Tolerance) -> Vec<LineString> {
    match lines {
        [] => Vec::new(),
        [only] => merge_lines(vec![only.clone()], tol),
        _ => {
            let (left, right) = lines.split_at(lines.len() / 2);
            let left = union_lines_by_half(left, tol);
            let right = union_lines_by_half(right, tol);
            let left: Vec<&LineString> = left.iter().collect();
            let right: Vec<&LineString> = right.iter().collect();
            line_overlay(&left, &right, OverlayOp::Union, tol).lines
        }
    }
}

/// Unions all parts of `geometries`.
pub(crate) fn unary_union(geometries: &[Steric], tol: &Tolerance) -> Result<Steric> {
    let mut parts = Parts::default();
    for geometry in geometries {
        parts.collect(geometry, tol);
    }
    tracing::debug!(
        polygons = parts.polygons.len(),
        lines = parts.lines.len(),
        points = parts.points.len(),
        "unary union input"
    );

    let polygons = union_polygons_by_half(&parts.polygons, tol)?;
    let polygon_refs: Vec<&Polygon> = polygons.iter().collect();

    let mut lines = union_lines_by_half(&parts.lines, tol);
    if !polygons.is_empty() && !lines.is_empty() {
        let line_refs: Vec<&LineString> = lines.iter().collect();
        lines = line_polygon_overlay(&line_refs, &polygon_refs, OverlayOp::Difference, tol).lines;
    }

    let mut points: Vec<Point2> = Vec::new();
    for point in parts.points {
        let seen = points.iter().any(|p| tol.points_eq(p, &point));
        let in_area = !polygon_refs.is_empty()
            && locate_point_in_polygons(&point, &polygon_refs, tol) != Location::Exterior;
        let on_line = lines
            .iter()
            .any(|l| l.segments().any(|(a, b)| in_line_segment(&point, a, b, tol).0));
        if !(seen || in_area || on_line) {
            points.push(point);
        }
    }

    let mut result = Vec::new();
    if !polygons.is_empty() {
        result.push(Steric::from_polygons(polygons));
    }
    result.extend(lines.into_iter().map(Steric::Line));
    result.extend(points.into_iter().map(Steric::Point));
    Ok(Steric::from_parts(result))
}
