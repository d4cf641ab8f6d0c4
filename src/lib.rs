pub mod error;
pub mod geometry;
pub mod index;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, StericError};
pub use geometry::{Dimension, LineString, MultiPolygon, Polygon, Steric};
pub use math::Tolerance;
