use crate::geometry::Bound;
use crate::math::Point2;

/// A run of consecutive segments whose directions all fall in one quadrant.
///
/// Because the run is monotone in both `x` and `y`, the bounding box of any
/// sub-run is the box spanned by its two end coordinates.
#[derive(Debug, Clone)]
pub struct MonotoneChain<'a> {
    coords: &'a [Point2],
    start: usize,
    end: usize,
    bound: Bound,
}

impl<'a> MonotoneChain<'a> {
    fn new(coords: &'a [Point2], start: usize, end: usize) -> Self {
        Self {
            coords,
            start,
            end,
            bound: Bound::new(coords[start], coords[end]),
        }
    }

    /// Index of the first coordinate of the chain.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last coordinate of the chain.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Bounding box of the whole chain.
    #[must_use]
    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    fn section_bound(&self, start: usize, end: usize) -> Bound {
        Bound::new(self.coords[start], self.coords[end])
    }

    /// Reports every pair of segments, one from each chain, whose boxes come
    /// within `expand` of each other.
    ///
    /// `action` receives the index of the first coordinate of each segment,
    /// relative to the coordinate slice the chain was built from.
    pub fn compute_overlaps<F>(&self, other: &MonotoneChain<'_>, expand: f64, action: &mut F)
    where
        F: FnMut(usize, usize),
    {
        self.overlaps_in(self.start, self.end, other, other.start, other.end, expand, action);
    }

    #[allow(clippy::too_many_arguments)]
    fn overlaps_in<F>(
        &self,
        start0: usize,
        end0: usize,
        other: &MonotoneChain<'_>,
        start1: usize,
        end1: usize,
        expand: f64,
        action: &mut F,
    ) where
        F: FnMut(usize, usize),
    {
        if !self
            .section_bound(start0, end0)
            .expanded(expand)
            .intersects(&other.section_bound(start1, end1))
        {
            return;
        }
        if end0 - start0 == 1 && end1 - start1 == 1 {
            action(start0, start1);
            return;
        }

        let mid0 = (start0 + end0) / 2;
        let mid1 = (start1 + end1) / 2;
        // A single segment has `mid == start`; only its upper half recurses.
        if start0 < mid0 {
            if start1 < mid1 {
                self.overlaps_in(start0, mid0, other, start1, mid1, expand, action);
            }
            if mid1 < end1 {
                self.overlaps_in(start0, mid0, other, mid1, end1, expand, action);
            }
        }
        if mid0 < end0 {
            if start1 < mid1 {
                self.overlaps_in(mid0, end0, other, start1, mid1, expand, action);
            }
            if mid1 < end1 {
                self.overlaps_in(mid0, end0, other, mid1, end1, expand, action);
            }
        }
    }
}

/// Direction quadrant of a non-zero vector, counter-clockwise from `+x`.
fn quadrant(dx: f64, dy: f64) -> u8 {
    match (dx >= 0.0, dy >= 0.0) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

/// Index of the last coordinate of the monotone run starting at `start`.
///
/// Zero-length segments carry no direction and extend any run.
fn find_chain_end(coords: &[Point2], start: usize) -> usize {
    let mut chain_quadrant = None;
    let mut last = start;
    while last + 1 < coords.len() {
        let d = coords[last + 1] - coords[last];
        if d.x != 0.0 || d.y != 0.0 {
            let q = quadrant(d.x, d.y);
            match chain_quadrant {
                None => chain_quadrant = Some(q),
                Some(current) if current != q => break,
                Some(_) => {}
            }
        }
        last += 1;
    }
    last
}

/// Partitions a coordinate sequence into maximal monotone chains.
///
/// Consecutive chains share their boundary coordinate. Fewer than two
/// coordinates produce no chain.
#[must_use]
pub fn monotone_chains(coords: &[Point2]) -> Vec<MonotoneChain<'_>> {
    let mut chains = Vec::new();
    if coords.len() < 2 {
        return chains;
    }
    let mut start = 0;
    while start + 1 < coords.len() {
        let end = find_chain_end(coords, start);
        chains.push(MonotoneChain::new(coords, start, end));
        start = end;
    }
    chains
}
