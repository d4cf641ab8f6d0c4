mod assemble;
mod difference;
mod engine;
mod intersection;
mod line;
mod point;
mod select;
mod split;
mod sym_difference;
mod unary_union;
mod union;
mod walk;

pub use assemble::assemble_polygons;
pub use difference::Difference;
pub use engine::area_overlay;
pub use intersection::Intersection;
pub use line::{line_overlay, line_polygon_overlay, LineOverlay};
pub use select::{FragmentLocation, FragmentSource, KeepDecision, OverlayOp, WalkStrategy};
pub use sym_difference::SymDifference;
pub use unary_union::UnaryUnion;
pub use union::Union;

use crate::error::{OperationError, Result};
use crate::geometry::{LineString, Polygon, Steric};
use crate::math::Tolerance;

use point::{difference_point, point_overlay};
use unary_union::unary_union;

/// Result when either operand is empty.
fn empty_operand(a: &Steric, b: &Steric, op: OverlayOp) -> Steric {
    match op {
        OverlayOp::Union | OverlayOp::SymDifference => {
            if a.is_empty() {
                b.clone()
            } else {
                a.clone()
            }
        }
        OverlayOp::Intersection => Steric::empty(),
        OverlayOp::Difference => {
            if a.is_empty() {
                Steric::empty()
            } else {
                a.clone()
            }
        }
    }
}

impl From<LineOverlay> for Steric {
    fn from(overlay: LineOverlay) -> Self {
        let mut parts: Vec<Steric> = overlay.lines.into_iter().map(Steric::Line).collect();
        parts.extend(overlay.points.into_iter().map(Steric::Point));
        Steric::from_parts(parts)
    }
}

fn line_with_area(line: &LineString, area: &Steric, op: OverlayOp, tol: &Tolerance) -> Steric {
    let polygons: Vec<&Polygon> = area.polygons().unwrap_or_default();
    let clipped = line_polygon_overlay(&[line], &polygons, op, tol);
    match op {
        OverlayOp::Intersection | OverlayOp::Difference => clipped.into(),
        OverlayOp::Union | OverlayOp::SymDifference => {
            let mut parts = vec![area.clone()];
            parts.extend(clipped.lines.into_iter().map(Steric::Line));
            Steric::from_parts(parts)
        }
    }
}

/// Dispatches a binary overlay on the operands' variants.
///
/// # Errors
///
/// Returns `OperationError::TypeMismatch` for a collection operand of any
/// overlay but union, and a `TopologyError` if an area walk fails.
pub(crate) fn overlay(a: &Steric, b: &Steric, op: OverlayOp, tol: &Tolerance) -> Result<Steric> {
    if a.is_empty() || b.is_empty() {
        return Ok(empty_operand(a, b, op));
    }
    if let Some(collection) = [a, b].into_iter().find(|g| matches!(g, Steric::Collection(_))) {
        return match op {
            OverlayOp::Union => unary_union(&[a.clone(), b.clone()], tol),
            _ => Err(OperationError::TypeMismatch {
                operation: op.name(),
                geometry: collection.geometry_type(),
            }
            .into()),
        };
    }

    let result = match (a, b) {
        (Steric::Point(p), _) => point_overlay(p, b, op, tol),
        (_, Steric::Point(p)) => match op {
            OverlayOp::Difference => difference_point(a, p, tol),
            _ => point_overlay(p, a, op, tol),
        },
        (Steric::Line(la), Steric::Line(lb)) => line_overlay(&[la], &[lb], op, tol).into(),
        (Steric::Line(line), _) => line_with_area(line, b, op, tol),
        (_, Steric::Line(line)) => match op {
            OverlayOp::Difference => a.clone(),
            _ => line_with_area(line, a, op, tol),
        },
        _ => {
            let pa = a.polygons().unwrap_or_default();
            let pb = b.polygons().unwrap_or_default();
            Steric::from_polygons(area_overlay(&pa, &pb, op, tol)?)
        }
    };
    tracing::debug!(
        ?op,
        a = a.geometry_type(),
        b = b.geometry_type(),
        result = result.geometry_type(),
        "overlay finished"
    );
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StericError;
    use crate::math::Point2;

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
    fn empty_operands_follow_identities() {
        let tol = Tolerance::default();
        let a = square(0.0, 0.0, 1.0);
        let empty = Steric::empty();
        assert_eq!(overlay(&a, &empty, OverlayOp::Union, &tol).unwrap(), a);
        assert_eq!(overlay(&empty, &a, OverlayOp::Union, &tol).unwrap(), a);
        assert!(overlay(&empty, &a, OverlayOp::Intersection, &tol).unwrap().is_empty());
        assert_eq!(overlay(&a, &empty, OverlayOp::Difference, &tol).unwrap(), a);
        assert!(overlay(&empty, &a, OverlayOp::Difference, &tol).unwrap().is_empty());
    }

    #[test]
    fn collections_only_union() {
        let tol = Tolerance::default();
        let a = Steric::Collection(vec![square(0.0, 0.0, 1.0), Steric::Point(Point2::new(5.0, 5.0))]);
        let b = square(0.5, 0.0, 1.0);
        let union = overlay(&a, &b, OverlayOp::Union, &tol).unwrap();
        assert!(matches!(union, Steric::Collection(ref parts) if parts.len() == 2));
        let err = overlay(&a, &b, OverlayOp::Intersection, &tol).unwrap_err();
        assert!(matches!(
            err,
            StericError::Operation(OperationError::TypeMismatch { operation: "Intersection", .. })
        ));
    }

    #[test]
    fn line_and_polygon() {
        let tol = Tolerance::default();
        let poly = square(0.0, 0.0, 10.0);
        let line = Steric::Line(LineString::from_xy(&[(5.0, 5.0), (15.0, 5.0)]));

        let inter = overlay(&line, &poly, OverlayOp::Intersection, &tol).unwrap();
        assert!(matches!(inter, Steric::Line(ref l) if (l.length() - 5.0).abs() < 1e-9));
        let swapped = overlay(&poly, &line, OverlayOp::Intersection, &tol).unwrap();
        assert_eq!(inter, swapped);

        assert_eq!(overlay(&poly, &line, OverlayOp::Difference, &tol).unwrap(), poly);
        let union = overlay(&line, &poly, OverlayOp::Union, &tol).unwrap();
        assert!(matches!(union, Steric::Collection(ref parts) if parts.len() == 2 && parts[0] == poly));
    }

    #[test]
    fn areas_become_multi_polygons() {
        let tol = Tolerance::default();
        let a = square(0.0, 0.0, 1.0);
        let b = square(3.0, 0.0, 1.0);
        let union = overlay(&a, &b, OverlayOp::Union, &tol).unwrap();
        assert!(matches!(union, Steric::MultiPolygon(ref m) if m.0.len() == 2));
        let inter = overlay(&a, &b, OverlayOp::Intersection, &tol).unwrap();
        assert!(inter.is_empty());
    }
}
