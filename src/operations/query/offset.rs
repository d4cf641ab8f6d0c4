use crate::error::{OperationError, Result};
use crate::geometry::{LineString, Steric};
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::{offset_segment, segment_direction};
use crate::math::{Point2, Tolerance, Vector2};

/// When `cos(turn)` drops below this the segments nearly reverse, and a
/// flat cap (two points) replaces the join.
const FLAT_CAP_COS: f64 = -0.98;

/// Maximum miter length as a multiple of `|distance|` before the join is
/// beveled.
const MITER_LIMIT: f64 = 4.0;

/// Offsets a line to one side by a fixed distance.
///
/// Positive distances offset to the left of the walking direction,
/// negative ones to the right. Consecutive offset segments are joined at
/// the intersection of their supporting lines. A closed line yields a
/// closed offset ring.
#[derive(Debug)]
pub struct Offset<'a> {
    geometry: &'a Steric,
    distance: f64,
    tolerance: Tolerance,
}

impl<'a> Offset<'a> {
    /// Creates a new `Offset` operation.
    #[must_use]
    pub fn new(geometry: &'a Steric, distance: f64) -> Self {
        Self {
            geometry,
            distance,
            tolerance: Tolerance::default(),
        }
    }

    /// Sets a custom tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `OperationError::TypeMismatch` if the geometry is not a `Line`
    /// - `OperationError::InvalidInput` if the line has fewer than 2 points
    /// - `GeometryError::ComputeOffsetZero` if a segment has zero length
    pub fn execute(&self) -> Result<LineString> {
        let Steric::Line(line) = self.geometry else {
            return Err(OperationError::TypeMismatch {
                operation: "Offset",
                geometry: self.geometry.geometry_type(),
            }
            .into());
        };
        if line.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points are required for an offset".to_owned(),
            )
            .into());
        }
        let tol = &self.tolerance;
        if tol.is_zero(self.distance, 1.0) {
            return Ok(line.clone());
        }
        if line.is_closed(tol) && line.len() > 3 {
            self.offset_closed(line.coords())
        } else {
            self.offset_open(line.coords())
        }
    }

    /// Offsets every segment and records its direction.
    fn offset_segments(&self, points: &[Point2]) -> Result<Vec<Shifted>> {
        points
            .windows(2)
            .map(|w| {
                let direction = segment_direction(&w[0], &w[1], &self.tolerance)?;
                let (start, end) = offset_segment(&w[0], &w[1], self.distance, &self.tolerance)?;
                Ok(Shifted {
                    start,
                    end,
                    direction,
                })
            })
            .collect()
    }

    fn offset_open(&self, points: &[Point2]) -> Result<LineString> {
        let segments = self.offset_segments(points)?;
        let mut out = Vec::with_capacity(points.len() + 2);
        out.push(segments[0].start);
        for (i, pair) in segments.windows(2).enumerate() {
            self.push_join(&mut out, &pair[0], &pair[1], &points[i + 1]);
        }
        out.push(segments[segments.len() - 1].end);
        Ok(LineString::new(out))
    }

    fn offset_closed(&self, points: &[Point2]) -> Result<LineString> {
        let segments = self.offset_segments(points)?;
        let n = segments.len();
        let mut out = Vec::with_capacity(points.len() + 2);
        for i in 0..n {
            let prev = &segments[(i + n - 1) % n];
            self.push_join(&mut out, prev, &segments[i], &points[i]);
        }
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
        Ok(LineString::new(out))
    }

    /// Pushes the join between two consecutive offset segments.
    fn push_join(&self, out: &mut Vec<Point2>, prev: &Shifted, next: &Shifted, corner: &Point2) {
        if prev.direction.dot(&next.direction) < FLAT_CAP_COS {
            out.push(prev.end);
            out.push(next.start);
            return;
        }
        let meet = line_line_intersect_2d(
            &prev.start,
            &prev.direction,
            &next.start,
            &next.direction,
            &self.tolerance,
        );
        match meet {
            Some((t, _)) => {
                let miter = prev.start + prev.direction * t;
                if (miter - corner).norm() > MITER_LIMIT * self.distance.abs() {
                    out.push(prev.end);
                    out.push(next.start);
                } else {
                    out.push(miter);
                }
            }
            // Collinear segments share their offset point.
            None => out.push(next.start),
        }
    }
}

struct Shifted {
    start: Point2,
    end: Point2,
    direction: Vector2,
}
