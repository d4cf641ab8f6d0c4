use crate::geometry::{LineString, Polygon};
use crate::math::in_polygon::{line_in_polygon, locate_point_in_polygons, InPolygon, Location};
use crate::math::intersect_2d::in_line_segment;
use crate::math::{Point2, Tolerance};
use crate::operations::line_merge::merge_lines;
use crate::topology::{node_paths, NodedPath};

use super::select::OverlayOp;

/// Linework and isolated points produced by a line overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOverlay {
    pub lines: Vec<LineString>,
    pub points: Vec<Point2>,
}

/// Cuts a noded path at every interior node.
fn pieces(path: &NodedPath) -> Vec<Vec<Point2>> {
    let mut out = Vec::new();
    let mut current: Vec<Point2> = Vec::new();
    let last = path.vertices.len().saturating_sub(1);
    for (i, vertex) in path.vertices.iter().enumerate() {
        current.push(vertex.point);
        if vertex.node.is_some() && i < last && current.len() > 1 {
            out.push(std::mem::replace(&mut current, vec![vertex.point]));
        }
    }
    if current.len() > 1 {
        out.push(current);
    }
    out
}

fn probe(piece: &[Point2]) -> Option<Point2> {
    match piece {
        [a, b, ..] => Some(nalgebra::center(a, b)),
        _ => None,
    }
}

fn on_lines(point: &Point2, lines: &[&[Point2]], tol: &Tolerance) -> bool {
    lines.iter().any(|line| {
        line.windows(2)
            .any(|w| in_line_segment(point, &w[0], &w[1], tol).0)
    })
}

/// Nodes not already an endpoint of a kept piece.
fn isolated_nodes(nodes: &[Point2], kept: &[Vec<Point2>], tol: &Tolerance) -> Vec<Point2> {
    nodes
        .iter()
        .filter(|node| {
            !kept.iter().any(|piece| {
                piece.first().is_some_and(|p| tol.points_eq(p, node))
                    || piece.last().is_some_and(|p| tol.points_eq(p, node))
            })
        })
        .copied()
        .collect()
}

fn finish(kept: Vec<Vec<Point2>>, points: Vec<Point2>, tol: &Tolerance) -> LineOverlay {
    let lines = merge_lines(kept.into_iter().map(LineString::new).collect(), tol);
    LineOverlay { lines, points }
}

/// Overlays two sets of lines.
///
/// Both sides are noded against each other; each piece between nodes lies
/// either wholly on the other side or wholly off it. The kept pieces are
/// merged back into maximal chains. An intersection also reports crossing
/// points not covered by shared linework.
#[must_use]
pub fn line_overlay(a: &[&LineString], b: &[&LineString], op: OverlayOp, tol: &Tolerance) -> LineOverlay {
    let paths_a: Vec<&[Point2]> = a.iter().map(|l| l.coords()).filter(|c| c.len() > 1).collect();
    let paths_b: Vec<&[Point2]> = b.iter().map(|l| l.coords()).filter(|c| c.len() > 1).collect();
    let noding = node_paths(&paths_a, &paths_b, &[], tol);

    let split = |paths: &[NodedPath], other: &[&[Point2]]| -> (Vec<Vec<Point2>>, Vec<Vec<Point2>>) {
        paths
            .iter()
            .flat_map(pieces)
            .partition(|piece| probe(piece).is_some_and(|m| on_lines(&m, other, tol)))
    };
    let (a_shared, a_alone) = split(&noding.a, &paths_b);
    let (_, b_alone) = split(&noding.b, &paths_a);
    tracing::debug!(
        ?op,
        nodes = noding.node_count(),
        shared = a_shared.len(),
        a_alone = a_alone.len(),
        b_alone = b_alone.len(),
        "line overlay pieces classified"
    );

    match op {
        OverlayOp::Intersection => {
            let points = isolated_nodes(&noding.nodes, &a_shared, tol);
            finish(a_shared, points, tol)
        }
        OverlayOp::Difference => finish(a_alone, Vec::new(), tol),
        OverlayOp::Union => {
            let mut kept = a_shared;
            kept.extend(a_alone);
            kept.extend(b_alone);
            finish(kept, Vec::new(), tol)
        }
        OverlayOp::SymDifference => {
            let mut kept = a_alone;
            kept.extend(b_alone);
            finish(kept, Vec::new(), tol)
        }
    }
}

/// Whether a path lies wholly inside the polygons, `None` if it meets a
/// boundary.
fn whole_side(path: &[Point2], polygons: &[&Polygon], tol: &Tolerance) -> Option<bool> {
    let mut inside = false;
    for polygon in polygons {
        match line_in_polygon(path, polygon, tol)? {
            InPolygon::OnlyOutPolygon => {}
            InPolygon::OnlyInPolygon => inside = true,
            _ => return None,
        }
    }
    Some(inside)
}

/// Pieces of `lines` that are inside, or outside, the polygons.
///
/// Returns `(covered, outside, touch points)`; touch points are nodes with
/// the polygon boundary that no covered piece ends at.
fn split_by_polygons(
    lines: &[&LineString],
    polygons: &[&Polygon],
    tol: &Tolerance,
) -> (Vec<Vec<Point2>>, Vec<Vec<Point2>>, Vec<Point2>) {
    let paths: Vec<&[Point2]> = lines.iter().map(|l| l.coords()).filter(|c| c.len() > 1).collect();

    // Whole-line shortcut when no line crosses or touches a polygon boundary.
    let sides: Option<Vec<bool>> = paths.iter().map(|path| whole_side(path, polygons, tol)).collect();
    if let Some(sides) = sides {
        let mut covered = Vec::new();
        let mut outside = Vec::new();
        for (path, inside) in paths.iter().zip(sides) {
            if inside {
                covered.push(path.to_vec());
            } else {
                outside.push(path.to_vec());
            }
        }
        tracing::trace!(
            covered = covered.len(),
            outside = outside.len(),
            "lines do not meet any polygon boundary"
        );
        return (covered, outside, Vec::new());
    }

    let rings: Vec<&[Point2]> = polygons
        .iter()
        .flat_map(|poly| poly.rings())
        .map(LineString::coords)
        .collect();
    let noding = node_paths(&paths, &rings, &[], tol);
    let (covered, outside): (Vec<_>, Vec<_>) = noding
        .a
        .iter()
        .flat_map(pieces)
        .partition(|piece| {
            probe(piece).is_some_and(|m| locate_point_in_polygons(&m, polygons, tol) != Location::Exterior)
        });
    let touches = isolated_nodes(&noding.nodes, &covered, tol);
    tracing::debug!(
        nodes = noding.node_count(),
        covered = covered.len(),
        outside = outside.len(),
        "line/area pieces classified"
    );
    (covered, outside, touches)
}

/// Overlays lines with polygons.
///
/// The polygons themselves are returned untouched by union and symmetric
/// difference; only the linework is clipped. A difference of polygons minus
/// lines is the polygons and is handled by the caller.
#[must_use]
pub fn line_polygon_overlay(
    lines: &[&LineString],
    polygons: &[&Polygon],
    op: OverlayOp,
    tol: &Tolerance,
) -> LineOverlay {
    let (covered, outside, touches) = split_by_polygons(lines, polygons, tol);
    match op {
        OverlayOp::Intersection => finish(covered, touches, tol),
        OverlayOp::Difference | OverlayOp::Union | OverlayOp::SymDifference => {
            finish(outside, Vec::new(), tol)
        }
    }
}
