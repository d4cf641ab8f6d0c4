use std::fmt;
use std::str::FromStr;

use crate::error::MatrixError;
use crate::geometry::Dimension;
use crate::math::in_polygon::Location;

/// A named topological predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialPredicate {
    Equals,
    Disjoint,
    Intersects,
    Touches,
    Crosses,
    Within,
    Contains,
    Overlaps,
    Covers,
    CoveredBy,
}

/// The Dimensionally Extended Nine-Intersection Matrix.
///
/// Rows are the interior, boundary and exterior of geometry A; columns are
/// the same parts of geometry B. Each cell holds the dimension of the
/// intersection of the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }
}

impl IntersectionMatrix {
    /// Creates a matrix with every cell empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dimension stored at `(a, b)`.
    #[must_use]
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    /// Overwrites the cell at `(a, b)`.
    pub fn set(&mut self, a: Location, b: Location, dimension: Dimension) {
        self.cells[a.index()][b.index()] = dimension;
    }

    /// Raises the cell at `(a, b)` to `dimension` if it is currently lower.
    pub fn set_at_least(&mut self, a: Location, b: Location, dimension: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if *cell < dimension {
            *cell = dimension;
        }
    }

    /// The matrix for the arguments swapped.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut cells = self.cells;
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[j][i];
            }
        }
        Self { cells }
    }

    /// Matches the matrix against a nine-symbol pattern over `*TF012`.
    ///
    /// `*` matches anything, `T` any non-empty dimension, `F` only the
    /// empty dimension and a digit exactly that dimension.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ShouldBeLength9` when the pattern does not hold
    /// nine symbols, and `MatrixError::UnknownDimension` for any symbol
    /// outside the alphabet.
    pub fn matches(&self, pattern: &str) -> Result<bool, MatrixError> {
        let symbols: Vec<char> = pattern.chars().collect();
        if symbols.len() != 9 {
            return Err(MatrixError::ShouldBeLength9(symbols.len()));
        }
        let mut matched = true;
        for (k, &symbol) in symbols.iter().enumerate() {
            let actual = self.cells[k / 3][k % 3];
            let ok = match symbol {
                '*' => true,
                'T' | 't' => actual.is_true(),
                other => Dimension::from_symbol(other)? == actual,
            };
            matched &= ok;
        }
        Ok(matched)
    }

    /// Pattern test for the built-in predicate patterns, which are always
    /// well formed.
    fn fits(&self, pattern: &str) -> bool {
        self.matches(pattern).unwrap_or(false)
    }

    /// `FF*FF****`: the geometries share no point.
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.fits("FF*FF****")
    }

    /// The geometries share at least one point.
    #[must_use]
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// The geometries meet only on their boundaries.
    #[must_use]
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary, Interior};
        if self.get(Interior, Interior).is_true() {
            return false;
        }
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Line | Dimension::Area) => {
                self.get(Interior, Boundary).is_true()
            }
            (Dimension::Line | Dimension::Area, Dimension::Point) => {
                self.get(Boundary, Interior).is_true()
            }
            (Dimension::Line | Dimension::Area, Dimension::Line | Dimension::Area) => {
                self.get(Interior, Boundary).is_true()
                    || self.get(Boundary, Interior).is_true()
                    || self.get(Boundary, Boundary).is_true()
            }
            _ => false,
        }
    }

    /// The interiors meet in a lower dimension than the inputs and each
    /// geometry leaves the other.
    #[must_use]
    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Line | Dimension::Area)
            | (Dimension::Line, Dimension::Area) => self.fits("T*T******"),
            (Dimension::Line | Dimension::Area, Dimension::Point)
            | (Dimension::Area, Dimension::Line) => self.fits("T*****T**"),
            (Dimension::Line, Dimension::Line) => self.fits("0********"),
            _ => false,
        }
    }

    /// `T*F**F***`: A lies inside B.
    #[must_use]
    pub fn is_within(&self) -> bool {
        self.fits("T*F**F***")
    }

    /// `T*****FF*`: B lies inside A.
    #[must_use]
    pub fn is_contains(&self) -> bool {
        self.fits("T*****FF*")
    }

    /// No point of B lies in the exterior of A.
    #[must_use]
    pub fn is_covers(&self) -> bool {
        ["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"]
            .iter()
            .any(|p| self.fits(p))
    }

    /// No point of A lies in the exterior of B.
    #[must_use]
    pub fn is_covered_by(&self) -> bool {
        ["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"]
            .iter()
            .any(|p| self.fits(p))
    }

    /// Interiors meet in the common dimension and each geometry leaves the
    /// other.
    #[must_use]
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Area, Dimension::Area) => {
                self.fits("T*T***T**")
            }
            (Dimension::Line, Dimension::Line) => self.fits("1*T***T**"),
            _ => false,
        }
    }

    /// `T*F**FFF*` between geometries of the same dimension.
    #[must_use]
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        dim_a == dim_b && self.fits("T*F**FFF*")
    }

    /// Evaluates a named predicate.
    #[must_use]
    pub fn evaluate(&self, predicate: SpatialPredicate, dim_a: Dimension, dim_b: Dimension) -> bool {
        match predicate {
            SpatialPredicate::Equals => self.is_equals(dim_a, dim_b),
            SpatialPredicate::Disjoint => self.is_disjoint(),
            SpatialPredicate::Intersects => self.is_intersects(),
            SpatialPredicate::Touches => self.is_touches(dim_a, dim_b),
            SpatialPredicate::Crosses => self.is_crosses(dim_a, dim_b),
            SpatialPredicate::Within => self.is_within(),
            SpatialPredicate::Contains => self.is_contains(),
            SpatialPredicate::Overlaps => self.is_overlaps(dim_a, dim_b),
            SpatialPredicate::Covers => self.is_covers(),
            SpatialPredicate::CoveredBy => self.is_covered_by(),
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = MatrixError;

    /// Parses nine dimension symbols such as `"212101212"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(MatrixError::ShouldBeLength9(symbols.len()));
        }
        let mut matrix = Self::new();
        for (k, &symbol) in symbols.iter().enumerate() {
            matrix.cells[k / 3][k % 3] = Dimension::from_symbol(symbol)?;
        }
        Ok(matrix)
    }
}
