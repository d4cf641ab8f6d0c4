use crate::index::segment_pairs;
use crate::math::intersect_2d::{in_line_segment, segment_intersection};
use crate::math::{Point2, Tolerance};

/// A coordinate of a noded path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodedVertex {
    pub point: Point2,
    /// Shared node id when the coordinate is an intersection or a site.
    pub node: Option<usize>,
}

/// A path with every intersection inserted as a vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodedPath {
    pub vertices: Vec<NodedVertex>,
}

impl NodedPath {
    /// Whether the path is a ring.
    #[must_use]
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => {
                self.vertices.len() > 2 && tol.points_eq(&first.point, &last.point)
            }
            _ => false,
        }
    }

    /// The coordinates, without node marks.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.vertices.iter().map(|v| v.point).collect()
    }

    /// Iterates over consecutive vertex pairs.
    pub fn sub_edges(&self) -> impl Iterator<Item = (&NodedVertex, &NodedVertex)> {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }
}

/// Result of noding two path sets against each other.
#[derive(Debug, Clone, Default)]
pub struct Noding {
    pub a: Vec<NodedPath>,
    pub b: Vec<NodedPath>,
    /// Node coordinates, indexed by node id.
    pub nodes: Vec<Point2>,
}

impl Noding {
    /// Number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Default)]
struct NodeTable {
    nodes: Vec<Point2>,
}

impl NodeTable {
    /// Returns the id of the node coinciding with `point`, creating it if new.
    fn intern(&mut self, point: Point2, tol: &Tolerance) -> (usize, Point2) {
        if let Some(id) = self.nodes.iter().position(|n| tol.points_eq(n, &point)) {
            return (id, self.nodes[id]);
        }
        self.nodes.push(point);
        (self.nodes.len() - 1, point)
    }
}

/// Per-path cut lists: `cuts[segment]` holds the nodes falling on that segment.
type Cuts = Vec<Vec<(Point2, usize)>>;

fn empty_cuts(paths: &[&[Point2]]) -> Vec<Cuts> {
    paths
        .iter()
        .map(|p| vec![Vec::new(); p.len().saturating_sub(1)])
        .collect()
}

/// Nodes the paths of `a` against the paths of `b`.
///
/// Every crossing, touch and collinear overlap end becomes a node shared by
/// both sides. Each coordinate of `sites` lying on a path is also a node, so
/// isolated points can participate. Self-intersections within one side are
/// not computed.
#[must_use]
pub fn node_paths(a: &[&[Point2]], b: &[&[Point2]], sites: &[Point2], tol: &Tolerance) -> Noding {
    let mut table = NodeTable::default();
    let mut cuts_a = empty_cuts(a);
    let mut cuts_b = empty_cuts(b);

    for pair in segment_pairs(a, b, tol) {
        let pa = a[pair.a_path];
        let pb = b[pair.b_path];
        let hits = segment_intersection(
            &pa[pair.a_segment],
            &pa[pair.a_segment + 1],
            &pb[pair.b_segment],
            &pb[pair.b_segment + 1],
            tol,
        );
        for hit in hits {
            let (id, point) = table.intern(hit.point, tol);
            cuts_a[pair.a_path][pair.a_segment].push((point, id));
            cuts_b[pair.b_path][pair.b_segment].push((point, id));
        }
    }

    for site in sites {
        let (id, point) = table.intern(*site, tol);
        for (paths, cuts) in [(a, &mut cuts_a), (b, &mut cuts_b)] {
            for (pi, path) in paths.iter().enumerate() {
                for (si, seg) in path.windows(2).enumerate() {
                    if in_line_segment(&point, &seg[0], &seg[1], tol).0 {
                        cuts[pi][si].push((point, id));
                    }
                }
            }
        }
    }

    let noding = Noding {
        a: build_paths(a, cuts_a, tol),
        b: build_paths(b, cuts_b, tol),
        nodes: table.nodes,
    };
    tracing::debug!(nodes = noding.node_count(), "paths noded");
    noding
}

fn build_paths(paths: &[&[Point2]], cuts: Vec<Cuts>, tol: &Tolerance) -> Vec<NodedPath> {
    paths
        .iter()
        .zip(cuts)
        .map(|(path, cuts)| build_path(path, cuts, tol))
        .collect()
}

fn build_path(coords: &[Point2], cuts: Cuts, tol: &Tolerance) -> NodedPath {
    let n = coords.len();
    let mut vertex_nodes: Vec<Option<usize>> = vec![None; n];
    let mut interior: Vec<Vec<(Point2, usize)>> = Vec::with_capacity(cuts.len());

    for (i, mut seg_cuts) in cuts.into_iter().enumerate() {
        let (start, end) = (coords[i], coords[i + 1]);
        let mut inner = Vec::new();
        for (point, id) in seg_cuts.drain(..) {
            if tol.points_eq(&point, &start) {
                vertex_nodes[i] = Some(id);
            } else if tol.points_eq(&point, &end) {
                vertex_nodes[i + 1] = Some(id);
            } else {
                inner.push((point, id));
            }
        }
        let dir = end - start;
        inner.sort_by(|l, r| (l.0 - start).dot(&dir).total_cmp(&(r.0 - start).dot(&dir)));
        inner.dedup_by_key(|c| c.1);
        interior.push(inner);
    }

    // A ring's closing coordinate is the same node as its opening one.
    if n > 2 && tol.points_eq(&coords[0], &coords[n - 1]) {
        let shared = vertex_nodes[0].or(vertex_nodes[n - 1]);
        vertex_nodes[0] = shared;
        vertex_nodes[n - 1] = shared;
    }

    let mut vertices: Vec<NodedVertex> = Vec::with_capacity(n);
    for i in 0..n {
        push_vertex(&mut vertices, coords[i], vertex_nodes[i], tol);
        if let Some(inner) = interior.get(i) {
            for &(point, id) in inner {
                push_vertex(&mut vertices, point, Some(id), tol);
            }
        }
    }
    NodedPath { vertices }
}

/// Appends a vertex, folding it into the previous one when they coincide.
fn push_vertex(vertices: &mut Vec<NodedVertex>, point: Point2, node: Option<usize>, tol: &Tolerance) {
    if let Some(last) = vertices.last_mut() {
        if tol.points_eq(&last.point, &point) {
            if last.node.is_none() {
                last.node = node;
            }
            return;
        }
    }
    vertices.push(NodedVertex { point, node });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(xy: &[(f64, f64)]) -> Vec<Point2> {
        xy.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn crossing_squares_share_nodes() {
        let tol = Tolerance::default();
        let a = path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let b = path(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)]);
        let noding = node_paths(&[&a], &[&b], &[], &tol);
        assert_eq!(noding.node_count(), 2);
        assert_eq!(noding.a[0].vertices.len(), 7);
        assert_eq!(noding.b[0].vertices.len(), 7);

        let nodes_a: Vec<usize> = noding.a[0].vertices.iter().filter_map(|v| v.node).collect();
        let mut nodes_b: Vec<usize> = noding.b[0].vertices.iter().filter_map(|v| v.node).collect();
        nodes_b.sort_unstable();
        let mut sorted_a = nodes_a.clone();
        sorted_a.sort_unstable();
        assert_eq!(sorted_a, nodes_b);
        assert!(noding.a[0].is_closed(&tol));
    }

    #[test]
    fn inserted_nodes_follow_segment_direction() {
        let tol = Tolerance::default();
        let line = path(&[(0.0, 0.0), (10.0, 0.0)]);
        let comb = path(&[(7.0, -1.0), (7.0, 1.0), (3.0, 1.0), (3.0, -1.0)]);
        let noding = node_paths(&[&line], &[&comb], &[], &tol);
        let xs: Vec<f64> = noding.a[0].vertices.iter().map(|v| v.point.x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 7.0, 10.0]);
    }

    #[test]
    fn shared_ring_start_is_marked_on_both_ends() {
        let tol = Tolerance::default();
        let ring = path(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let line = path(&[(-1.0, -1.0), (0.0, 0.0)]);
        let noding = node_paths(&[&ring], &[&line], &[], &tol);
        let vs = &noding.a[0].vertices;
        assert!(vs[0].node.is_some());
        assert_eq!(vs[0].node, vs[vs.len() - 1].node);
    }

    #[test]
    fn sites_split_paths() {
        let tol = Tolerance::default();
        let line = path(&[(0.0, 0.0), (10.0, 0.0)]);
        let noding = node_paths(&[&line], &[], &[Point2::new(4.0, 0.0), Point2::new(4.0, 3.0)], &tol);
        assert_eq!(noding.a[0].vertices.len(), 3);
        assert_eq!(noding.a[0].vertices[1].node, Some(0));
        assert_eq!(noding.node_count(), 2);
    }

    #[test]
    fn collinear_overlap_nodes_both_ends() {
        let tol = Tolerance::default();
        let a = path(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = path(&[(4.0, 0.0), (12.0, 0.0)]);
        let noding = node_paths(&[&a], &[&b], &[], &tol);
        let nodes: Vec<Option<usize>> = noding.a[0].vertices.iter().map(|v| v.node).collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[1].is_some() && nodes[2].is_some());
        assert!(nodes[0].is_none());
    }
}
