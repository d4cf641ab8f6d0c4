use crate::error::{OperationError, Result};
use crate::geometry::{LineString, Steric};
use crate::math::intersect_2d::in_line_segment;
use crate::math::{Point2, Tolerance};

/// Stitches line fragments that share endpoints into maximal chains.
///
/// Accepts a `Line` or a `Collection` of lines and points. Points are
/// treated as degenerate lines and absorbed when they lie on another line.
pub struct LineMerge<'a> {
    geometry: &'a Steric,
    tolerance: Tolerance,
}

impl<'a> LineMerge<'a> {
    /// Creates a new `LineMerge` operation with the default tolerance.
    #[must_use]
    pub fn new(geometry: &'a Steric) -> Self {
        Self {
            geometry,
            tolerance: Tolerance::default(),
        }
    }

    /// Sets a custom tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the merged chains.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` if the input holds an areal
    /// part.
    pub fn execute(&self) -> Result<Vec<LineString>> {
        let mut fragments = Vec::new();
        collect_fragments(self.geometry, &mut fragments)?;
        Ok(merge_lines(fragments, &self.tolerance))
    }

    /// Returns the merged chains as a geometry: one chain is a `Line`,
    /// several are a `Collection`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::TypeMismatch` if the input holds an areal
    /// part.
    pub fn execute_steric(&self) -> Result<Steric> {
        let chains = self.execute()?;
        Ok(Steric::from_parts(chains.into_iter().map(Steric::Line).collect()))
    }
}

fn collect_fragments(geometry: &Steric, out: &mut Vec<LineString>) -> Result<()> {
    match geometry {
        Steric::Point(p) => out.push(LineString::new(vec![*p])),
        Steric::Line(line) => out.push(line.clone()),
        Steric::Collection(parts) => {
            for part in parts {
                collect_fragments(part, out)?;
            }
        }
        Steric::Polygon(_) | Steric::MultiPolygon(_) => {
            return Err(OperationError::TypeMismatch {
                operation: "LineMerge",
                geometry: geometry.geometry_type(),
            }
            .into());
        }
    }
    Ok(())
}

/// Merges fragments until no two share an endpoint.
///
/// Each pass scans every pair; a successful merge replaces the pair with
/// its concatenation and restarts the scan. The loop ends on the first pass
/// that merges nothing. Closed rings never merge.
#[must_use]
pub fn merge_lines(lines: Vec<LineString>, tol: &Tolerance) -> Vec<LineString> {
    let mut lines: Vec<LineString> = lines
        .iter()
        .map(|line| line.deduped(tol))
        .filter(|line| !line.is_empty())
        .collect();

    let mut merges = 0usize;
    'scan: loop {
        for i in 0..lines.len() {
            for j in (i + 1)..lines.len() {
                if let Some(merged) = try_merge(&lines[i], &lines[j], tol) {
                    lines[i] = merged;
                    lines.remove(j);
                    merges += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }
    tracing::trace!(merges, chains = lines.len(), "line merge reached a fixed point");
    lines
}

fn lies_on(point: &Point2, line: &LineString, tol: &Tolerance) -> bool {
    match line.coords() {
        [only] => tol.points_eq(point, only),
        _ => line
            .segments()
            .any(|(a, b)| in_line_segment(point, a, b, tol).0),
    }
}

fn join(head: &[Point2], tail: &[Point2]) -> LineString {
    let mut coords = Vec::with_capacity(head.len() + tail.len());
    coords.extend_from_slice(head);
    coords.extend_from_slice(tail.get(1..).unwrap_or(&[]));
    LineString::new(coords)
}

fn try_merge(a: &LineString, b: &LineString, tol: &Tolerance) -> Option<LineString> {
    if let Some(point) = a.as_degenerate_point(tol) {
        return lies_on(&point, b, tol).then(|| b.clone());
    }
    if let Some(point) = b.as_degenerate_point(tol) {
        return lies_on(&point, a, tol).then(|| a.clone());
    }
    if a.is_closed(tol) || b.is_closed(tol) {
        return None;
    }
    let (a_first, a_last) = (a.first()?, a.last()?);
    let (b_first, b_last) = (b.first()?, b.last()?);

    if tol.points_eq(a_last, b_first) {
        Some(join(a.coords(), b.coords()))
    } else if tol.points_eq(a_last, b_last) {
        Some(join(a.coords(), b.reversed().coords()))
    } else if tol.points_eq(a_first, b_last) {
        Some(join(b.coords(), a.coords()))
    } else if tol.points_eq(a_first, b_first) {
        Some(join(a.reversed().coords(), b.coords()))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn line(xy: &[(f64, f64)]) -> LineString {
        LineString::from_xy(xy)
    }

    #[test]
    fn chain_joins_at_shared_end() {
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![
                line(&[(-29.0, -27.0), (-30.0, -29.7), (-36.0, -31.0), (-45.0, -33.0)]),
                line(&[(-45.0, -33.0), (-46.0, -32.0)]),
            ],
            &tol,
        );
        assert_eq!(merged.len(), 1);
        assert!(merged[0].equals_exact(
            &line(&[
                (-29.0, -27.0),
                (-30.0, -29.7),
                (-36.0, -31.0),
                (-45.0, -33.0),
                (-46.0, -32.0)
            ]),
            &tol
        ));
    }

    #[test]
    fn offset_fragment_stays_separate() {
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![
                line(&[(-29.0, -27.0), (-30.0, -29.7), (-36.0, -31.0), (-45.0, -33.0)]),
                line(&[(-45.2, -33.2), (-46.0, -32.0)]),
            ],
            &tol,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn reversed_fragments_are_flipped() {
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![
                line(&[(0.0, 0.0), (1.0, 0.0)]),
                line(&[(2.0, 0.0), (1.0, 0.0)]),
                line(&[(0.0, 0.0), (0.0, 1.0)]),
            ],
            &tol,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 4);
        assert!((merged[0].length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn later_merge_enables_earlier_pair() {
        // The first and last fragments only meet through the middle one.
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![
                line(&[(0.0, 0.0), (1.0, 0.0)]),
                line(&[(5.0, 5.0), (6.0, 6.0)]),
                line(&[(2.0, 0.0), (3.0, 0.0)]),
                line(&[(1.0, 0.0), (2.0, 0.0)]),
            ],
            &tol,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn points_on_lines_are_absorbed() {
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![LineString::new(vec![Point2::new(0.5, 0.0)]), line(&[(0.0, 0.0), (1.0, 0.0)])],
            &tol,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 2);
    }

    #[test]
    fn closed_rings_do_not_merge() {
        let tol = Tolerance::default();
        let merged = merge_lines(
            vec![
                line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
                line(&[(0.0, 0.0), (-1.0, 0.0)]),
            ],
            &tol,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn op_rejects_areas() {
        let poly = Steric::Polygon(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]));
        assert!(LineMerge::new(&poly).execute().is_err());
        let parts = Steric::Collection(vec![
            Steric::Line(line(&[(0.0, 0.0), (1.0, 0.0)])),
            Steric::Line(line(&[(1.0, 0.0), (1.0, 1.0)])),
        ]);
        let merged = LineMerge::new(&parts).execute_steric().unwrap();
        assert!(matches!(merged, Steric::Line(ref l) if l.len() == 3));
    }
}
