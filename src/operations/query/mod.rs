mod area;
mod distance;
mod length;
mod offset;

pub use area::Area;
pub use distance::Distance;
pub use length::Length;
pub use offset::Offset;
