use crate::error::Result;
use crate::geometry::{Bound, LineString, Polygon};
use crate::math::{Point2, Tolerance};
use crate::topology::node_paths;

use super::assemble::assemble_polygons;
use super::select::{should_keep_fragment, FragmentSource, KeepDecision, OverlayOp};
use super::split::{classify_fragment, split_ring, Fragment};
use super::walk::walk_fragments;

/// Executes a boolean overlay on two sets of polygons.
///
/// Orchestrates the full pipeline: normalization, noding, splitting,
/// classification, selection, walking and assembly. A symmetric difference
/// is the two differences side by side.
///
/// # Errors
///
/// Returns a `TopologyError` if the ring walk loses track of a vertex.
pub fn area_overlay(
    a: &[&Polygon],
    b: &[&Polygon],
    op: OverlayOp,
    tol: &Tolerance,
) -> Result<Vec<Polygon>> {
    let a = normalize(a, tol);
    let b = normalize(b, tol);

    if op == OverlayOp::SymDifference {
        let mut polygons = overlay_normalized(&a, &b, OverlayOp::Difference, tol)?;
        polygons.extend(overlay_normalized(&b, &a, OverlayOp::Difference, tol)?);
        return Ok(canonical(&polygons, tol));
    }
    overlay_normalized(&a, &b, op, tol)
}

fn normalize(polygons: &[&Polygon], tol: &Tolerance) -> Vec<Polygon> {
    polygons
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.normalized(tol))
        .collect()
}

fn bound_of(polygons: &[Polygon]) -> Option<Bound> {
    Bound::from_points(polygons.iter().flat_map(Polygon::coords))
}

/// Reassembles polygons so their rings and order are canonical.
fn canonical(polygons: &[Polygon], tol: &Tolerance) -> Vec<Polygon> {
    let rings = polygons
        .iter()
        .flat_map(Polygon::rings)
        .map(|ring| ring.coords().to_vec())
        .collect();
    assemble_polygons(rings, tol)
}

fn ring_coords(polygons: &[Polygon]) -> Vec<&[Point2]> {
    polygons
        .iter()
        .flat_map(Polygon::rings)
        .map(LineString::coords)
        .collect()
}

fn overlay_normalized(
    a: &[Polygon],
    b: &[Polygon],
    op: OverlayOp,
    tol: &Tolerance,
) -> Result<Vec<Polygon>> {
    // Step 1: bounding box early-out
    let overlapping = match (bound_of(a), bound_of(b)) {
        (Some(ba), Some(bb)) => ba.intersects(&bb),
        _ => false,
    };
    if !overlapping {
        return Ok(handle_disjoint(a, b, op, tol));
    }

    // Step 2: node all rings of A against all rings of B
    let rings_a = ring_coords(a);
    let rings_b = ring_coords(b);
    let noding = node_paths(&rings_a, &rings_b, &[], tol);

    // Step 3: split, classify and select
    let refs_a: Vec<&Polygon> = a.iter().collect();
    let refs_b: Vec<&Polygon> = b.iter().collect();
    let strategy = op.strategy();
    let mut kept: Vec<Fragment> = Vec::new();
    let mut discarded = 0usize;
    for (paths, source, other) in [
        (&noding.a, FragmentSource::A, &refs_b),
        (&noding.b, FragmentSource::B, &refs_a),
    ] {
        for path in paths {
            for mut fragment in split_ring(path, tol) {
                let location = classify_fragment(&fragment, other, tol);
                match should_keep_fragment(source, location, strategy) {
                    KeepDecision::Keep => kept.push(fragment),
                    KeepDecision::KeepFlipped => {
                        fragment.flip();
                        kept.push(fragment);
                    }
                    KeepDecision::Discard => discarded += 1,
                }
            }
        }
    }
    tracing::debug!(
        ?op,
        nodes = noding.node_count(),
        kept = kept.len(),
        discarded,
        "area overlay fragments selected"
    );

    // Step 4: walk the kept boundary into rings and assemble
    let rings = walk_fragments(&kept, &noding.nodes)?;
    Ok(assemble_polygons(rings, tol))
}

/// Result when the inputs' bounding boxes do not overlap.
fn handle_disjoint(a: &[Polygon], b: &[Polygon], op: OverlayOp, tol: &Tolerance) -> Vec<Polygon> {
    match op {
        OverlayOp::Union | OverlayOp::SymDifference => {
            let both: Vec<Polygon> = a.iter().chain(b).cloned().collect();
            canonical(&both, tol)
        }
        OverlayOp::Intersection => Vec::new(),
        OverlayOp::Difference => canonical(a, tol),
    }
}
