use super::matrix::IntersectionMatrix;
use crate::error::{OperationError, Result};
use crate::geometry::{Bound, Dimension, Polygon, Steric};
use crate::math::in_polygon::Location;
use crate::math::polygon_2d::{left_normal, ring_edges};
use crate::math::{Point2, Tolerance};
use crate::operations::locate::locate_point;
use crate::topology::{node_paths, NodedPath};

/// Relative distance of the side probes from an area boundary edge.
const PROBE_FACTOR: f64 = 1e-4;

/// A relate input reduced to its linework and isolated points.
struct Prepared {
    geometry: Steric,
    paths: Vec<Vec<Point2>>,
    sites: Vec<Point2>,
    is_area: bool,
}

impl Prepared {
    fn new(geometry: &Steric, tol: &Tolerance) -> Self {
        let mut prepared = Self {
            geometry: geometry.clone(),
            paths: Vec::new(),
            sites: Vec::new(),
            is_area: false,
        };
        match geometry {
            Steric::Point(p) => prepared.sites.push(*p),
            Steric::Line(line) => {
                let line = line.deduped(tol);
                match line.coords() {
                    [] => {}
                    [only] => prepared.sites.push(*only),
                    coords => prepared.paths.push(coords.to_vec()),
                }
            }
            Steric::Polygon(_) | Steric::MultiPolygon(_) => {
                let polygons: Vec<Polygon> = geometry
                    .polygons()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|p| p.normalized(tol))
                    .collect();
                prepared.paths = polygons
                    .iter()
                    .flat_map(|p| p.rings().iter().map(|r| r.coords().to_vec()))
                    .collect();
                prepared.geometry = Steric::from_polygons(polygons);
                prepared.is_area = true;
            }
            // Rejected before preparation.
            Steric::Collection(_) => {}
        }
        prepared
    }

    fn path_slices(&self) -> Vec<&[Point2]> {
        self.paths.iter().map(Vec::as_slice).collect()
    }
}

/// Computes the DE-9IM matrix of `a` against `b`.
pub(crate) fn relate_matrix(a: &Steric, b: &Steric, tol: &Tolerance) -> Result<IntersectionMatrix> {
    for geometry in [a, b] {
        if let Steric::Collection(_) = geometry {
            return Err(OperationError::TypeMismatch {
                operation: "Relate",
                geometry: geometry.geometry_type(),
            }
            .into());
        }
    }

    let (Some(bound_a), Some(bound_b)) = (a.bound(), b.bound()) else {
        return Ok(disjoint_matrix(a, b, tol));
    };
    let slack = tol.scaled(bound_a.magnitude().max(bound_b.magnitude()));
    if !bound_a.expanded(slack).intersects(&bound_b) {
        tracing::trace!("relate: bounds disjoint");
        return Ok(disjoint_matrix(a, b, tol));
    }

    if let (Steric::Point(pa), Steric::Point(pb)) = (a, b) {
        return Ok(point_point_matrix(pa, pb, tol));
    }

    if let Some(matrix) = containment_matrix(a, b, tol) {
        tracing::trace!("relate: b clear of a's boundary");
        return Ok(matrix);
    }
    if let Some(matrix) = containment_matrix(b, a, tol) {
        tracing::trace!("relate: a clear of b's boundary");
        return Ok(matrix.transpose());
    }

    Ok(general_matrix(a, b, tol))
}

fn disjoint_matrix(a: &Steric, b: &Steric, tol: &Tolerance) -> IntersectionMatrix {
    use Location::{Boundary, Exterior, Interior};
    let mut matrix = IntersectionMatrix::new();
    matrix.set(Interior, Exterior, interior_dimension(a, tol));
    matrix.set(Boundary, Exterior, a.boundary_dimension(tol));
    matrix.set(Exterior, Interior, interior_dimension(b, tol));
    matrix.set(Exterior, Boundary, b.boundary_dimension(tol));
    matrix.set(Exterior, Exterior, Dimension::Area);
    matrix
}

/// Dimension of the geometry's interior; an empty geometry has none.
fn interior_dimension(geometry: &Steric, tol: &Tolerance) -> Dimension {
    match geometry {
        _ if geometry.is_empty() => Dimension::Empty,
        Steric::Line(line) if line.deduped(tol).len() == 1 => Dimension::Point,
        _ => geometry.dimension(),
    }
}

/// Shortcut for an area whose bound holds all of `inner` while none of its
/// boundary edges come near `inner`'s bound. `inner` then lies wholly in
/// the area's interior or wholly outside it, decided by one coordinate.
fn containment_matrix(outer: &Steric, inner: &Steric, tol: &Tolerance) -> Option<IntersectionMatrix> {
    use Location::{Boundary, Exterior, Interior};
    let polygons = outer.polygons()?;
    let (bound_outer, bound_inner) = (outer.bound()?, inner.bound()?);
    if !bound_outer.contains(&bound_inner) {
        return None;
    }
    let slack = tol.scaled(bound_outer.magnitude());
    let window = bound_inner.expanded(slack);
    let boundary_near = polygons
        .iter()
        .flat_map(|poly| poly.rings())
        .flat_map(|ring| ring_edges(ring.coords()))
        .any(|(p, q)| Bound::new(*p, *q).intersects(&window));
    if boundary_near {
        return None;
    }

    let probe = match inner {
        Steric::Point(p) => *p,
        Steric::Line(line) => *line.coords().first()?,
        _ => *inner.polygons()?.first()?.shell()?.coords().first()?,
    };
    match locate_point(&probe, outer, tol) {
        Interior => {
            let mut matrix = IntersectionMatrix::new();
            matrix.set(Interior, Interior, interior_dimension(inner, tol));
            matrix.set(Interior, Boundary, inner.boundary_dimension(tol));
            matrix.set(Interior, Exterior, Dimension::Area);
            matrix.set(Boundary, Exterior, Dimension::Line);
            matrix.set(Exterior, Exterior, Dimension::Area);
            Some(matrix)
        }
        Exterior => Some(disjoint_matrix(outer, inner, tol)),
        Boundary => None,
    }
}

fn point_point_matrix(a: &Point2, b: &Point2, tol: &Tolerance) -> IntersectionMatrix {
    use Location::{Exterior, Interior};
    let mut matrix = IntersectionMatrix::new();
    if tol.points_eq(a, b) {
        matrix.set(Interior, Interior, Dimension::Point);
    } else {
        matrix.set(Interior, Exterior, Dimension::Point);
        matrix.set(Exterior, Interior, Dimension::Point);
    }
    matrix.set(Exterior, Exterior, Dimension::Area);
    matrix
}

/// Full computation: node both inputs, then locate every node and vertex,
/// every sub-edge midpoint and both sides of every area boundary sub-edge
/// in both geometries.
fn general_matrix(a: &Steric, b: &Steric, tol: &Tolerance) -> IntersectionMatrix {
    let pa = Prepared::new(a, tol);
    let pb = Prepared::new(b, tol);
    let mut sites = pa.sites.clone();
    sites.extend_from_slice(&pb.sites);
    let noding = node_paths(&pa.path_slices(), &pb.path_slices(), &sites, tol);

    let locate = |p: &Point2| {
        (
            locate_point(p, &pa.geometry, tol),
            locate_point(p, &pb.geometry, tol),
        )
    };

    let mut matrix = IntersectionMatrix::new();
    matrix.set(Location::Exterior, Location::Exterior, Dimension::Area);

    for site in &sites {
        let (la, lb) = locate(site);
        matrix.set_at_least(la, lb, Dimension::Point);
    }

    for path in noding.a.iter().chain(&noding.b) {
        for vertex in &path.vertices {
            let (la, lb) = locate(&vertex.point);
            matrix.set_at_least(la, lb, Dimension::Point);
        }
        for (start, end) in path.sub_edges() {
            let mid = nalgebra::center(&start.point, &end.point);
            let (la, lb) = locate(&mid);
            matrix.set_at_least(la, lb, Dimension::Line);
        }
    }

    let magnitude = a
        .bound()
        .into_iter()
        .chain(b.bound())
        .map(|bound| bound.magnitude())
        .fold(0.0_f64, f64::max);
    let min_offset = tol.scaled(magnitude) * 100.0;
    for (paths, own) in [(&noding.a, &pa), (&noding.b, &pb)] {
        if !own.is_area {
            continue;
        }
        probe_area_sides(paths, &own.geometry, min_offset, tol, &locate, &mut matrix);
    }

    tracing::debug!(
        a = a.geometry_type(),
        b = b.geometry_type(),
        nodes = noding.node_count(),
        matrix = %matrix,
        "relate computed"
    );
    matrix
}

/// Locates points just left and right of each area boundary sub-edge; a
/// pair of locations that avoids both boundaries marks an area
/// intersection.
///
/// Rings are normalized, so the left probe must fall in the interior of
/// `own` and the right probe outside it. The offset is halved until both
/// hold, which keeps the probes inside slivers thinner than the first step.
fn probe_area_sides<F>(
    paths: &[NodedPath],
    own: &Steric,
    min_offset: f64,
    tol: &Tolerance,
    locate: &F,
    matrix: &mut IntersectionMatrix,
) where
    F: Fn(&Point2) -> (Location, Location),
{
    for path in paths {
        for (start, end) in path.sub_edges() {
            let d = end.point - start.point;
            let len = d.norm();
            if len <= tol.accuracy {
                continue;
            }
            let normal = left_normal(d / len);
            let mid = nalgebra::center(&start.point, &end.point);
            let fits = |offset: f64| {
                locate_point(&(mid + normal * offset), own, tol) == Location::Interior
                    && locate_point(&(mid - normal * offset), own, tol) == Location::Exterior
            };
            let mut offset = (len * PROBE_FACTOR).max(min_offset);
            while offset > min_offset && !fits(offset) {
                offset = (offset * 0.5).max(min_offset);
            }
            for side in [offset, -offset] {
                let (la, lb) = locate(&(mid + normal * side));
                if la != Location::Boundary && lb != Location::Boundary {
                    matrix.set_at_least(la, lb, Dimension::Area);
                }
            }
        }
    }
}
