use slotmap::SlotMap;

use super::edge::{Edge, EdgeId};
use super::vertex::{Vertex, VertexId};
use crate::error::TopologyError;
use crate::geometry::LineString;
use crate::math::polygon_2d::is_clockwise;
use crate::math::Point2;

/// Arena holding the vertices and finished rings of one overlay.
///
/// Rings are built incrementally: vertices are appended with
/// [`add_point`](Self::add_point) or [`add_point_which`](Self::add_point_which)
/// and the ring is finished with [`close_ring`](Self::close_ring). A plane is
/// discarded once its rings have been read back.
#[derive(Debug, Default)]
pub struct Plane {
    vertices: SlotMap<VertexId, Vertex>,
    edges: SlotMap<EdgeId, Edge>,
    pending: Vec<VertexId>,
}

impl Plane {
    /// Creates an empty plane.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex without adding it to the ring under construction.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.insert(vertex)
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if the vertex is not in the plane.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::NotInSlice("vertex".into()))
    }

    /// Returns a mutable reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if the vertex is not in the plane.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::NotInSlice("vertex".into()))
    }

    /// Appends a new plain vertex to the ring under construction.
    pub fn add_point(&mut self, point: Point2) -> VertexId {
        let id = self.vertices.insert(Vertex::new(point));
        self.pending.push(id);
        id
    }

    /// Appends an existing vertex to the ring under construction and marks
    /// it as visited.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if the vertex is not in the plane.
    pub fn add_point_which(&mut self, id: VertexId) -> Result<(), TopologyError> {
        self.vertex_mut(id)?.is_checked = true;
        self.pending.push(id);
        Ok(())
    }

    /// Number of vertices in the ring under construction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drops the ring under construction.
    pub fn discard_ring(&mut self) {
        self.pending.clear();
    }

    /// Finishes the ring under construction.
    ///
    /// A trailing vertex repeating the first is dropped. Rings with fewer
    /// than three distinct vertices are discarded and yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if a pending vertex is missing.
    pub fn close_ring(&mut self) -> Result<Option<EdgeId>, TopologyError> {
        let mut ids = std::mem::take(&mut self.pending);
        ids.dedup();
        if ids.len() > 1 && ids.first() == ids.last() {
            ids.pop();
        }
        if ids.len() < 3 {
            return Ok(None);
        }
        let points = ids
            .iter()
            .map(|&id| self.vertex(id).map(|v| v.point))
            .collect::<Result<Vec<_>, _>>()?;
        let edge = Edge {
            is_clockwise: is_clockwise(&points),
            vertices: ids,
        };
        Ok(Some(self.edges.insert(edge)))
    }

    /// Returns a reference to the ring, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if the ring is not in the plane.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::NotInSlice("edge".into()))
    }

    /// Iterates over finished rings in the order they were closed.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    /// Coordinates of a ring, closed by repeating the first.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if the ring or one of its vertices
    /// is missing.
    pub fn ring_points(&self, id: EdgeId) -> Result<Vec<Point2>, TopologyError> {
        let edge = self.edge(id)?;
        let mut points = edge
            .vertices
            .iter()
            .map(|&v| self.vertex(v).map(|v| v.point))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Ok(points)
    }

    /// Every finished ring as a closed line.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotInSlice` if a ring references a missing
    /// vertex.
    pub fn lines(&self) -> Result<Vec<LineString>, TopologyError> {
        self.edges
            .keys()
            .map(|id| self.ring_points(id).map(LineString::new))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn close_ring_computes_orientation() {
        let mut plane = Plane::new();
        plane.add_point(p(0.0, 0.0));
        plane.add_point(p(0.0, 1.0));
        plane.add_point(p(1.0, 1.0));
        let id = plane.close_ring().unwrap().unwrap();
        assert!(plane.edge(id).unwrap().is_clockwise);
        assert_eq!(plane.ring_points(id).unwrap().len(), 4);
    }

    #[test]
    fn shared_vertices_are_checked() {
        let mut plane = Plane::new();
        let node = plane.add_vertex(Vertex::intersection(p(0.0, 0.0), 0));
        assert!(!plane.vertex(node).unwrap().is_checked);
        plane.add_point_which(node).unwrap();
        plane.add_point(p(1.0, 0.0));
        plane.add_point(p(1.0, 1.0));
        plane.add_point_which(node).unwrap();
        let id = plane.close_ring().unwrap().unwrap();
        assert!(plane.vertex(node).unwrap().is_checked);
        assert_eq!(plane.edge(id).unwrap().len(), 3);
        assert!(!plane.edge(id).unwrap().is_clockwise);
    }

    #[test]
    fn short_rings_are_discarded() {
        let mut plane = Plane::new();
        plane.add_point(p(0.0, 0.0));
        plane.add_point(p(1.0, 0.0));
        assert!(plane.close_ring().unwrap().is_none());
        assert_eq!(plane.pending_len(), 0);
        assert!(plane.lines().unwrap().is_empty());
    }

    #[test]
    fn missing_vertex_is_reported() {
        let mut other = Plane::new();
        let foreign = other.add_vertex(Vertex::new(p(0.0, 0.0)));
        other.vertices.remove(foreign);
        let mut plane = Plane::new();
        let err = plane.add_point_which(foreign).unwrap_err();
        assert!(matches!(err, TopologyError::NotInSlice(_)));
    }
}
