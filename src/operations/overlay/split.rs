use super::select::FragmentLocation;
use crate::geometry::Polygon;
use crate::math::in_polygon::{locate_point_in_polygons, Location};
use crate::math::intersect_2d::in_line_segment;
use crate::math::polygon_2d::ring_edges;
use crate::math::{Point2, Tolerance};
use crate::topology::NodedPath;

/// A piece of ring boundary between two consecutive nodes.
///
/// A ring without nodes yields a single closed fragment with no end nodes.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Coordinates, in ring orientation.
    pub points: Vec<Point2>,
    /// Node id of the first coordinate.
    pub start: Option<usize>,
    /// Node id of the last coordinate.
    pub end: Option<usize>,
}

impl Fragment {
    /// Whether the fragment is a whole ring untouched by the other input.
    #[must_use]
    pub fn is_ring(&self) -> bool {
        self.start.is_none()
    }

    /// Reverses the fragment in place, swapping its end nodes.
    pub fn flip(&mut self) {
        self.points.reverse();
        std::mem::swap(&mut self.start, &mut self.end);
    }
}

/// Splits a noded ring at its nodes.
#[must_use]
pub fn split_ring(path: &NodedPath, tol: &Tolerance) -> Vec<Fragment> {
    let vertices = &path.vertices;
    if !path.is_closed(tol) {
        return Vec::new();
    }
    // Drop the closing duplicate; the ring wraps implicitly.
    let ring = &vertices[..vertices.len() - 1];
    let Some(first_node) = ring.iter().position(|v| v.node.is_some()) else {
        return vec![Fragment {
            points: vertices.iter().map(|v| v.point).collect(),
            start: None,
            end: None,
        }];
    };

    let m = ring.len();
    let mut fragments = Vec::new();
    let mut points = vec![ring[first_node].point];
    let mut start = ring[first_node].node;
    for step in 1..=m {
        let vertex = &ring[(first_node + step) % m];
        points.push(vertex.point);
        if vertex.node.is_some() {
            fragments.push(Fragment {
                points: std::mem::replace(&mut points, vec![vertex.point]),
                start,
                end: vertex.node,
            });
            start = vertex.node;
        }
    }
    fragments
}

/// Classifies a fragment against the other input's normalized polygons.
///
/// The midpoint of the first segment decides: between two nodes a fragment
/// never crosses the other boundary, so one probe locates all of it.
#[must_use]
pub fn classify_fragment(fragment: &Fragment, other: &[&Polygon], tol: &Tolerance) -> FragmentLocation {
    let [a, b, ..] = fragment.points.as_slice() else {
        return FragmentLocation::Outside;
    };
    let probe = nalgebra::center(a, b);
    match locate_point_in_polygons(&probe, other, tol) {
        Location::Interior => FragmentLocation::Inside,
        Location::Exterior => FragmentLocation::Outside,
        Location::Boundary => {
            let direction = b - a;
            let shared = other
                .iter()
                .flat_map(|poly| poly.rings())
                .flat_map(|ring| ring_edges(ring.coords()))
                .find(|(p, q)| in_line_segment(&probe, p, q, tol).0);
            match shared {
                Some((p, q)) if (q - p).dot(&direction) < 0.0 => FragmentLocation::SharedOpposite,
                Some(_) => FragmentLocation::SharedSame,
                None => {
                    tracing::trace!(?probe, "boundary probe matched no edge");
                    FragmentLocation::Outside
                }
            }
        }
    }
}
