use crate::geometry::{LineString, Steric};

/// Computes the length of a geometry's linework.
///
/// For a `Line` this is the sum of its segment lengths; for an area it is
/// the perimeter of every ring. Points have no length.
pub struct Length<'a> {
    geometry: &'a Steric,
}

impl<'a> Length<'a> {
    /// Creates a new `Length` query.
    #[must_use]
    pub fn new(geometry: &'a Steric) -> Self {
        Self { geometry }
    }

    /// Executes the query, returning the total length.
    #[must_use]
    pub fn execute(&self) -> f64 {
        length_of(self.geometry)
    }
}

fn length_of(geometry: &Steric) -> f64 {
    match geometry {
        Steric::Point(_) => 0.0,
        Steric::Line(line) => line.length(),
        Steric::Polygon(poly) => poly.rings().iter().map(LineString::length).sum(),
        Steric::MultiPolygon(multi) => multi
            .polygons()
            .iter()
            .flat_map(|p| p.rings())
            .map(LineString::length)
            .sum(),
        Steric::Collection(parts) => parts.iter().map(length_of).sum(),
    }
}
