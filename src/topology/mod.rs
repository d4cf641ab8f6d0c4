pub mod edge;
pub mod noding;
pub mod plane;
pub mod vertex;

pub use edge::{Edge, EdgeId};
pub use noding::{node_paths, NodedPath, NodedVertex, Noding};
pub use plane::Plane;
pub use vertex::{Vertex, VertexId};
