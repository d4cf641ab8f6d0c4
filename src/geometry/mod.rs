mod bound;
mod line;
mod polygon;

pub use bound::Bound;
pub use line::LineString;
pub use polygon::{MultiPolygon, Polygon};

use crate::error::MatrixError;
use crate::math::{Point2, Tolerance};

/// Topological dimension of a point set.
///
/// Ordered so that `Empty < Point < Line < Area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Dimension {
    Empty = -1,
    Point = 0,
    Line = 1,
    Area = 2,
}

impl Dimension {
    /// Numeric value: `-1`, `0`, `1` or `2`.
    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// DE-9IM symbol: `F`, `0`, `1` or `2`.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => 'F',
            Self::Point => '0',
            Self::Line => '1',
            Self::Area => '2',
        }
    }

    /// Parses a DE-9IM dimension symbol.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::UnknownDimension` for any other character.
    pub fn from_symbol(symbol: char) -> Result<Self, MatrixError> {
        match symbol {
            'F' | 'f' => Ok(Self::Empty),
            '0' => Ok(Self::Point),
            '1' => Ok(Self::Line),
            '2' => Ok(Self::Area),
            other => Err(MatrixError::UnknownDimension(other)),
        }
    }

    /// Whether the dimension is non-empty (the symbolic `T`).
    #[must_use]
    pub fn is_true(self) -> bool {
        self >= Self::Point
    }
}

/// A geometry value.
///
/// Operations never mutate a `Steric`; they return new values.
#[derive(Debug, Clone, PartialEq)]
pub enum Steric {
    Point(Point2),
    Line(LineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    Collection(Vec<Steric>),
}

impl Steric {
    /// The empty geometry.
    #[must_use]
    pub fn empty() -> Self {
        Self::Collection(Vec::new())
    }

    /// Name of the variant.
    #[must_use]
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::Line(_) => "Line",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::Collection(_) => "Collection",
        }
    }

    /// Whether the geometry holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(_) => false,
            Self::Line(line) => line.is_empty(),
            Self::Polygon(poly) => poly.is_empty(),
            Self::MultiPolygon(multi) => multi.is_empty(),
            Self::Collection(parts) => parts.iter().all(Self::is_empty),
        }
    }

    /// Topological dimension.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Point(_) => Dimension::Point,
            Self::Line(_) => Dimension::Line,
            Self::Polygon(_) | Self::MultiPolygon(_) => Dimension::Area,
            Self::Collection(parts) => parts
                .iter()
                .map(Self::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Dimension of the geometry's boundary.
    #[must_use]
    pub fn boundary_dimension(&self, tol: &Tolerance) -> Dimension {
        match self {
            Self::Point(_) => Dimension::Empty,
            Self::Line(line) => {
                if line.len() < 2 || line.is_closed(tol) {
                    Dimension::Empty
                } else {
                    Dimension::Point
                }
            }
            Self::Polygon(_) | Self::MultiPolygon(_) => {
                if self.is_empty() {
                    Dimension::Empty
                } else {
                    Dimension::Line
                }
            }
            Self::Collection(parts) => parts
                .iter()
                .map(|p| p.boundary_dimension(tol))
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Every coordinate of the geometry, in storage order.
    #[must_use]
    pub fn coords(&self) -> Vec<Point2> {
        let mut out = Vec::new();
        self.collect_coords(&mut out);
        out
    }

    fn collect_coords(&self, out: &mut Vec<Point2>) {
        match self {
            Self::Point(p) => out.push(*p),
            Self::Line(line) => out.extend_from_slice(line.coords()),
            Self::Polygon(poly) => out.extend(poly.coords()),
            Self::MultiPolygon(multi) => {
                out.extend(multi.polygons().iter().flat_map(Polygon::coords));
            }
            Self::Collection(parts) => {
                for part in parts {
                    part.collect_coords(out);
                }
            }
        }
    }

    /// Bounding box, or `None` for an empty geometry.
    #[must_use]
    pub fn bound(&self) -> Option<Bound> {
        Bound::from_points(&self.coords())
    }

    /// Structural equality within tolerance: same variant, same coordinates
    /// in the same order.
    #[must_use]
    pub fn equals_exact(&self, other: &Self, tol: &Tolerance) -> bool {
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => tol.points_eq(a, b),
            (Self::Line(a), Self::Line(b)) => a.equals_exact(b, tol),
            (Self::Polygon(a), Self::Polygon(b)) => a.equals_exact(b, tol),
            (Self::MultiPolygon(a), Self::MultiPolygon(b)) => {
                a.0.len() == b.0.len() && a.0.iter().zip(&b.0).all(|(x, y)| x.equals_exact(y, tol))
            }
            (Self::Collection(a), Self::Collection(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals_exact(y, tol))
            }
            _ => false,
        }
    }

    /// Builds a geometry from parts: no parts is empty, one part is returned
    /// as is, several become a collection. Empty parts are dropped.
    #[must_use]
    pub fn from_parts(parts: Vec<Self>) -> Self {
        let mut parts: Vec<Self> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        match parts.len() {
            0 => Self::empty(),
            1 => parts.swap_remove(0),
            _ => Self::Collection(parts),
        }
    }

    /// Builds an areal geometry: no polygons is the empty polygon, one is a
    /// polygon, several are a multi-polygon.
    #[must_use]
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut polygons: Vec<Polygon> = polygons.into_iter().filter(|p| !p.is_empty()).collect();
        match polygons.len() {
            0 => Self::Polygon(Polygon::empty()),
            1 => Self::Polygon(polygons.swap_remove(0)),
            _ => Self::MultiPolygon(MultiPolygon(polygons)),
        }
    }

    /// The polygons of an areal geometry, `None` for other variants.
    #[must_use]
    pub fn polygons(&self) -> Option<Vec<&Polygon>> {
        match self {
            Self::Polygon(poly) => Some(vec![poly]),
            Self::MultiPolygon(multi) => Some(multi.polygons().iter().collect()),
            _ => None,
        }
    }
}

impl From<Point2> for Steric {
    fn from(p: Point2) -> Self {
        Self::Point(p)
    }
}

impl From<LineString> for Steric {
    fn from(line: LineString) -> Self {
        Self::Line(line)
    }
}

impl From<Polygon> for Steric {
    fn from(poly: Polygon) -> Self {
        Self::Polygon(poly)
    }
}

impl From<MultiPolygon> for Steric {
    fn from(multi: MultiPolygon) -> Self {
        Self::MultiPolygon(multi)
    }
}
