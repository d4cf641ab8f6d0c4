use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in an overlay plane.
    pub struct VertexId;
}

/// A vertex of an overlay ring.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The position of the vertex.
    pub point: Point2,
    /// Whether the vertex is a node shared with the other input.
    pub is_intersection: bool,
    /// Whether a ring walk has already passed through this vertex.
    pub is_checked: bool,
    /// Node id assigned during noding.
    pub node: Option<usize>,
}

impl Vertex {
    /// Creates a plain, unflagged vertex.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            is_intersection: false,
            is_checked: false,
            node: None,
        }
    }

    /// Creates an intersection vertex for the given node.
    #[must_use]
    pub fn intersection(point: Point2, node: usize) -> Self {
        Self {
            is_intersection: true,
            node: Some(node),
            ..Self::new(point)
        }
    }
}
