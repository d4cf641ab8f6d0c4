use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge ring in an overlay plane.
    pub struct EdgeId;
}

/// A closed ring of vertices.
///
/// The closing vertex is implied: the ring runs from the last vertex back to
/// the first.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Ring vertices, without a repeated closing vertex.
    pub vertices: Vec<VertexId>,
    /// Orientation derived from the signed area of the ring.
    pub is_clockwise: bool,
}

impl Edge {
    /// Number of distinct vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the ring has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
