use crate::geometry::Steric;

/// Computes the enclosed area of a geometry.
///
/// Polygons contribute their shell area minus their holes; points and
/// lines contribute nothing. A collection sums its parts.
pub struct Area<'a> {
    geometry: &'a Steric,
}

impl<'a> Area<'a> {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(geometry: &'a Steric) -> Self {
        Self { geometry }
    }

    /// Executes the query, returning the total area.
    #[must_use]
    pub fn execute(&self) -> f64 {
        area_of(self.geometry)
    }
}

fn area_of(geometry: &Steric) -> f64 {
    match geometry {
        Steric::Point(_) | Steric::Line(_) => 0.0,
        Steric::Polygon(poly) => poly.area(),
        Steric::MultiPolygon(multi) => multi.area(),
        Steric::Collection(parts) => parts.iter().map(area_of).sum(),
    }
}
