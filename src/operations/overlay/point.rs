use crate::geometry::Steric;
use crate::math::{Point2, Tolerance};
use crate::operations::locate::covers_point;

use super::select::OverlayOp;

/// Overlays the point `a` with geometry `b`.
///
/// No ring graph is built; the point either is or is not covered by `b`.
#[must_use]
pub fn point_overlay(a: &Point2, b: &Steric, op: OverlayOp, tol: &Tolerance) -> Steric {
    let covered = covers_point(b, a, tol);
    let point = Steric::Point(*a);
    match op {
        OverlayOp::Intersection => {
            if covered {
                point
            } else {
                Steric::empty()
            }
        }
        OverlayOp::Difference => {
            if covered {
                Steric::empty()
            } else {
                point
            }
        }
        OverlayOp::Union => {
            if covered {
                b.clone()
            } else {
                Steric::from_parts(vec![b.clone(), point])
            }
        }
        OverlayOp::SymDifference => match b {
            Steric::Point(_) if covered => Steric::empty(),
            _ if covered => b.clone(),
            _ => Steric::from_parts(vec![b.clone(), point]),
        },
    }
}

/// Removes the point `b` from geometry `a`.
///
/// Only a point can lose a point; any other geometry is returned as is,
/// since its closure is unchanged.
#[must_use]
pub fn difference_point(a: &Steric, b: &Point2, tol: &Tolerance) -> Steric {
    match a {
        Steric::Point(p) if tol.points_eq(p, b) => Steric::empty(),
        _ => a.clone(),
    }
}
