use std::f64::consts::TAU;

use super::split::Fragment;
use crate::error::Result;
use crate::math::{cross, Point2, Vector2};
use crate::topology::{Plane, Vertex, VertexId};

/// Clockwise angle swept from `from` to `to`, in `(0, 2π]`.
///
/// A direction equal to `from` counts as a full turn.
fn clockwise_angle(from: &Vector2, to: &Vector2) -> f64 {
    let ccw = cross(from, to).atan2(from.dot(to));
    let cw = (-ccw).rem_euclid(TAU);
    if cw <= 0.0 {
        TAU
    } else {
        cw
    }
}

fn last_direction(points: &[Point2]) -> Option<Vector2> {
    match points {
        [.., a, b] => Some(b - a),
        _ => None,
    }
}

fn first_direction(points: &[Point2]) -> Option<Vector2> {
    match points {
        [a, b, ..] => Some(b - a),
        _ => None,
    }
}

/// Stitches kept fragments into closed rings.
///
/// Untouched rings pass straight through. Noded fragments are chained from
/// node to node: a walk starts at an unvisited intersection vertex and, where
/// several fragments leave the same node, takes the one with the smallest
/// clockwise turn from the reversed incoming direction, which traces the
/// tightest ring. The walk closes on returning to its start node. A walk
/// that cannot continue is dropped.
///
/// # Errors
///
/// Returns `TopologyError::NotInSlice` if the plane loses a vertex, which
/// indicates a construction bug.
pub fn walk_fragments(kept: &[Fragment], nodes: &[Point2]) -> Result<Vec<Vec<Point2>>> {
    let mut plane = Plane::new();
    let node_vertices: Vec<VertexId> = nodes
        .iter()
        .enumerate()
        .map(|(id, point)| plane.add_vertex(Vertex::intersection(*point, id)))
        .collect();

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, fragment) in kept.iter().enumerate() {
        if let Some(start) = fragment.start {
            outgoing[start].push(i);
        }
    }

    for fragment in kept.iter().filter(|f| f.is_ring()) {
        let points = &fragment.points;
        for point in &points[..points.len().saturating_sub(1)] {
            plane.add_point(*point);
        }
        plane.close_ring()?;
    }

    let mut used = vec![false; kept.len()];
    for first in 0..kept.len() {
        let Some(start_node) = kept[first].start else {
            continue;
        };
        if used[first] {
            continue;
        }
        used[first] = true;

        let mut current = first;
        let mut closed = false;
        for _ in 0..kept.len() {
            let fragment = &kept[current];
            let (Some(from), Some(to)) = (fragment.start, fragment.end) else {
                break;
            };
            plane.add_point_which(node_vertices[from])?;
            let interior = fragment.points.len().saturating_sub(1);
            for point in fragment.points.iter().take(interior).skip(1) {
                plane.add_point(*point);
            }
            if to == start_node {
                closed = true;
                break;
            }

            let Some(incoming) = last_direction(&fragment.points) else {
                break;
            };
            let back = -incoming;
            let next = outgoing[to]
                .iter()
                .copied()
                .filter(|&i| !used[i])
                .filter_map(|i| {
                    first_direction(&kept[i].points)
                        .map(|d| (i, clockwise_angle(&back, &d)))
                })
                .min_by(|l, r| l.1.total_cmp(&r.1))
                .map(|(i, _)| i);
            match next {
                Some(i) => {
                    used[i] = true;
                    current = i;
                }
                None => break,
            }
        }

        if closed {
            plane.close_ring()?;
        } else {
            tracing::warn!(
                vertices = plane.pending_len(),
                "overlay ring walk did not close; dropping it"
            );
            plane.discard_ring();
        }
    }

    tracing::trace!(nodes = nodes.len(), rings = plane.edges().count(), "ring walk finished");

    let rings = plane
        .lines()?
        .into_iter()
        .map(|line| line.0)
        .collect();
    Ok(rings)
}
