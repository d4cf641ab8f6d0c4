pub mod distance_2d;
pub mod in_polygon;
pub mod intersect_2d;
pub mod polygon_2d;
mod tolerance;

pub use tolerance::Tolerance;

/// 2D coordinate type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Returns `a * b - c * d` with one rounding error instead of two.
///
/// Kahan's difference-of-products: the product `c * d` is split into its
/// rounded value and the rounding residue recovered by a fused multiply-add.
#[must_use]
pub fn diff_of_products(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let cd = c * d;
    let err = (-c).mul_add(d, cd);
    let dop = a.mul_add(b, -cd);
    dop + err
}

/// 2D cross product `u.x * v.y - u.y * v.x`, compensated.
#[must_use]
pub fn cross(u: &Vector2, v: &Vector2) -> f64 {
    diff_of_products(u.x, v.y, u.y, v.x)
}
