/// The boolean overlay to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayOp {
    Union,
    Intersection,
    Difference,
    SymDifference,
}

impl OverlayOp {
    /// Operation name used in error reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Union => "Union",
            Self::Intersection => "Intersection",
            Self::Difference => "Difference",
            Self::SymDifference => "SymDifference",
        }
    }

    /// The ring-walk strategy used for this overlay.
    ///
    /// A symmetric difference runs the difference walk in both directions.
    #[must_use]
    pub fn strategy(self) -> WalkStrategy {
        match self {
            Self::Union => WalkStrategy::Merge,
            Self::Intersection => WalkStrategy::Clip,
            Self::Difference | Self::SymDifference => WalkStrategy::Main,
        }
    }
}

/// Ring-walk strategy.
///
/// Rings are normalized so that every area lies left of its boundary
/// (counter-clockwise shells, clockwise holes). Each strategy keeps the
/// boundary pieces that bound the result and always walks them in that
/// orientation; the clip boundary is negated for `Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkStrategy {
    /// Union: walk the outside of both inputs.
    Merge,
    /// Intersection: walk the inside of both inputs.
    Clip,
    /// Difference: walk the subject outside the clip and the reversed clip
    /// inside the subject.
    Main,
}

/// Which input a boundary fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentSource {
    /// The subject.
    A,
    /// The clip.
    B,
}

/// Where a boundary fragment lies relative to the other input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentLocation {
    Inside,
    Outside,
    /// On the other boundary, both areas on the same side.
    SharedSame,
    /// On the other boundary, the areas on opposite sides.
    SharedOpposite,
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Determines whether a boundary fragment bounds the overlay result.
///
/// | Fragment | vs other         | Merge   | Clip    | Main        |
/// |----------|------------------|---------|---------|-------------|
/// | from A   | outside          | keep    | discard | keep        |
/// | from A   | inside           | discard | keep    | discard     |
/// | from A   | shared, same     | keep    | keep    | discard     |
/// | from A   | shared, opposite | discard | discard | keep        |
/// | from B   | outside          | keep    | discard | discard     |
/// | from B   | inside           | discard | keep    | keep (flip) |
/// | from B   | shared           | discard | discard | discard     |
///
/// Shared boundary is only ever kept from A so it is not emitted twice.
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_fragment(
    source: FragmentSource,
    location: FragmentLocation,
    strategy: WalkStrategy,
) -> KeepDecision {
    use FragmentLocation::{Inside, Outside, SharedOpposite, SharedSame};
    use FragmentSource::{A, B};
    use WalkStrategy::{Clip, Main, Merge};

    match (source, location, strategy) {
        (A, Outside, Merge) => KeepDecision::Keep,
        (A, Outside, Clip) => KeepDecision::Discard,
        (A, Outside, Main) => KeepDecision::Keep,

        (A, Inside, Merge) => KeepDecision::Discard,
        (A, Inside, Clip) => KeepDecision::Keep,
        (A, Inside, Main) => KeepDecision::Discard,

        (A, SharedSame, Merge | Clip) => KeepDecision::Keep,
        (A, SharedSame, Main) => KeepDecision::Discard,

        (A, SharedOpposite, Merge | Clip) => KeepDecision::Discard,
        (A, SharedOpposite, Main) => KeepDecision::Keep,

        (B, Outside, Merge) => KeepDecision::Keep,
        (B, Outside, Clip | Main) => KeepDecision::Discard,

        (B, Inside, Merge) => KeepDecision::Discard,
        (B, Inside, Clip) => KeepDecision::Keep,
        (B, Inside, Main) => KeepDecision::KeepFlipped,

        (B, SharedSame | SharedOpposite, _) => KeepDecision::Discard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_per_op() {
        assert_eq!(OverlayOp::Union.strategy(), WalkStrategy::Merge);
        assert_eq!(OverlayOp::Intersection.strategy(), WalkStrategy::Clip);
        assert_eq!(OverlayOp::Difference.strategy(), WalkStrategy::Main);
        assert_eq!(OverlayOp::SymDifference.strategy(), WalkStrategy::Main);
    }

    #[test]
    fn merge_keeps_outside_fragments() {
        for source in [FragmentSource::A, FragmentSource::B] {
            assert_eq!(
                should_keep_fragment(source, FragmentLocation::Outside, WalkStrategy::Merge),
                KeepDecision::Keep
            );
            assert_eq!(
                should_keep_fragment(source, FragmentLocation::Inside, WalkStrategy::Merge),
                KeepDecision::Discard
            );
        }
    }

    #[test]
    fn clip_keeps_inside_fragments() {
        for source in [FragmentSource::A, FragmentSource::B] {
            assert_eq!(
                should_keep_fragment(source, FragmentLocation::Inside, WalkStrategy::Clip),
                KeepDecision::Keep
            );
            assert_eq!(
                should_keep_fragment(source, FragmentLocation::Outside, WalkStrategy::Clip),
                KeepDecision::Discard
            );
        }
    }

    #[test]
    fn main_flips_clip_inside_subject() {
        assert_eq!(
            should_keep_fragment(FragmentSource::B, FragmentLocation::Inside, WalkStrategy::Main),
            KeepDecision::KeepFlipped
        );
        assert_eq!(
            should_keep_fragment(FragmentSource::A, FragmentLocation::Outside, WalkStrategy::Main),
            KeepDecision::Keep
        );
        assert_eq!(
            should_keep_fragment(FragmentSource::B, FragmentLocation::Outside, WalkStrategy::Main),
            KeepDecision::Discard
        );
    }

    #[test]
    fn shared_boundary_kept_once() {
        for strategy in [WalkStrategy::Merge, WalkStrategy::Clip, WalkStrategy::Main] {
            for location in [FragmentLocation::SharedSame, FragmentLocation::SharedOpposite] {
                assert_eq!(
                    should_keep_fragment(FragmentSource::B, location, strategy),
                    KeepDecision::Discard
                );
            }
        }
        assert_eq!(
            should_keep_fragment(FragmentSource::A, FragmentLocation::SharedSame, WalkStrategy::Merge),
            KeepDecision::Keep
        );
        assert_eq!(
            should_keep_fragment(
                FragmentSource::A,
                FragmentLocation::SharedOpposite,
                WalkStrategy::Main
            ),
            KeepDecision::Keep
        );
    }
}
