mod chain;
mod sweepline;

pub use chain::{monotone_chains, MonotoneChain};
pub use sweepline::{SweepLineIndex, SweepLineInterval};

use crate::math::intersect_2d::coordinate_magnitude;
use crate::math::{Point2, Tolerance};

/// A candidate pair of segments, one from each side.
///
/// Segment `i` of a path runs from coordinate `i` to coordinate `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentPair {
    pub a_path: usize,
    pub a_segment: usize,
    pub b_path: usize,
    pub b_segment: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

struct SideChain<'a> {
    side: Side,
    path: usize,
    chain: MonotoneChain<'a>,
}

/// Finds every pair of segments, one from a path of `a` and one from a path
/// of `b`, whose bounding boxes touch within tolerance.
///
/// Paths are split into monotone chains whose `x`-extents feed a sweep-line
/// index; overlapping chains from opposite sides are bisected down to
/// segment pairs. The result is sorted and free of duplicates. Pairs are
/// candidates only; callers confirm them with an exact segment test.
#[must_use]
pub fn segment_pairs(a: &[&[Point2]], b: &[&[Point2]], tol: &Tolerance) -> Vec<SegmentPair> {
    let magnitude = a
        .iter()
        .chain(b)
        .map(|path| coordinate_magnitude(path))
        .fold(0.0_f64, f64::max);
    let expand = tol.scaled(magnitude);

    let mut chains: Vec<SideChain<'_>> = Vec::new();
    for (side, paths) in [(Side::A, a), (Side::B, b)] {
        for (path, coords) in paths.iter().enumerate() {
            chains.extend(
                monotone_chains(coords)
                    .into_iter()
                    .map(|chain| SideChain { side, path, chain }),
            );
        }
    }

    let mut index = SweepLineIndex::new();
    for (i, entry) in chains.iter().enumerate() {
        let bound = entry.chain.bound();
        index.add(SweepLineInterval::new(
            bound.min.x - expand,
            bound.max.x + expand,
            i,
        ));
    }

    let mut pairs = Vec::new();
    index.compute_overlaps(|x, y| {
        let (first, second) = (&chains[x.item], &chains[y.item]);
        if first.side == second.side {
            return;
        }
        let (ca, cb) = if first.side == Side::A {
            (first, second)
        } else {
            (second, first)
        };
        ca.chain
            .compute_overlaps(&cb.chain, expand, &mut |a_segment, b_segment| {
                pairs.push(SegmentPair {
                    a_path: ca.path,
                    a_segment,
                    b_path: cb.path,
                    b_segment,
                });
            });
    });
    pairs.sort_unstable();
    pairs.dedup();
    tracing::trace!(chains = chains.len(), pairs = pairs.len(), "segment pairs indexed");
    pairs
}
