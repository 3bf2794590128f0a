//! The region-against-linear variant.
//!
//! The first operand is a region boundary, the second a set of segments.
//! The linear operand's fragments classify as inside, outside, or on the
//! boundary of the region; the region's own boundary never shows up in the
//! (linear-typed) result.

use crate::geom::{Point, Segment};
use crate::kernel::Kernel;
use crate::num::Scalar;
use crate::ops::linear::merge_collinear_fragments;
use crate::ops::BooleanOp;
use crate::sweep::{
    Detection, EventId, Operand, OverlapKind, OverlapPolicy, SweepCore,
};

/// A boolean operation between a region operand and a linear operand.
///
/// Intersection keeps the parts of the linear operand inside the region or
/// on its boundary. Difference keeps the parts strictly outside. Union and
/// symmetric difference return the linear component of the result, which is
/// the same strictly-outside set (the region swallows everything else).
pub struct MixedOperation<F: Scalar, K: Kernel<F>> {
    core: SweepCore<F, K>,
    op: BooleanOp,
    // Indexed by event pair: is the region's interior adjacent?
    region_interior: Vec<bool>,
}

impl<F: Scalar, K: Kernel<F>> MixedOperation<F, K> {
    /// Build an operation from the region's oriented boundary segments and
    /// an iterable of linear segments.
    pub fn from_segments(
        region: impl IntoIterator<Item = (Segment<F>, bool)>,
        linear: impl IntoIterator<Item = Segment<F>>,
        op: BooleanOp,
    ) -> Self {
        // When a linear segment lands exactly on the region boundary, the
        // region's member of the pair is the shadowed one: the boundary
        // itself never reaches a linear result.
        let mut core = SweepCore::new(OverlapPolicy::ShadowOperand(Operand::First));
        for (seg, interior_to_left) in region {
            core.add_segment(&seg, Operand::First, interior_to_left);
        }
        for seg in linear {
            core.add_segment(&seg, Operand::Second, false);
        }
        Self {
            core,
            op,
            region_interior: Vec::new(),
        }
    }

    /// The point at which `e` happens.
    pub fn event_point(&self, e: EventId) -> &Point<F> {
        self.core.events().point(e)
    }

    fn sync_len(&mut self) {
        let pairs = self.core.events().pair_count();
        self.region_interior.resize(pairs, false);
    }

    fn compute_fields(&mut self, e: EventId, below: Option<EventId>) {
        self.region_interior[e.pair()] = match below {
            None => false,
            Some(b) => {
                if self.core.operand_of(b) == Operand::Second {
                    // Crossing a linear segment never changes region state.
                    self.region_interior[b.pair()]
                } else if self.core.events().is_vertical(b) {
                    !self.core.interior_to_left_of(b)
                } else {
                    self.core.interior_to_left_of(b)
                }
            }
        };
    }

    fn is_in_result(&self, e: EventId) -> bool {
        if self.core.operand_of(e) != Operand::Second {
            return false;
        }
        let kind = self.core.overlap_of(e);
        if kind == OverlapKind::Shadowed {
            return false;
        }
        let on_boundary = kind != OverlapKind::None;
        let inside = self.region_interior[e.pair()];
        match self.op {
            BooleanOp::Intersection => inside || on_boundary,
            BooleanOp::Difference | BooleanOp::Union | BooleanOp::Xor => !inside && !on_boundary,
        }
    }

    /// Collect the linear result segments from the yielded events.
    pub fn reduce_events(&self, events: &[EventId]) -> Vec<Segment<F>> {
        let fragments: Vec<Segment<F>> = events
            .iter()
            .filter(|e| e.is_left() && self.is_in_result(**e))
            .map(|&e| self.core.events().segment(e))
            .collect();
        merge_collinear_fragments::<F, K>(fragments)
    }
}

impl<F: Scalar, K: Kernel<F>> Iterator for MixedOperation<F, K> {
    type Item = EventId;

    fn next(&mut self) -> Option<EventId> {
        let Some(key) = self.core.pop() else {
            #[cfg(feature = "slow-asserts")]
            self.core.assert_drained();
            return None;
        };
        self.sync_len();
        let e = key.event;
        if e.is_left() {
            let neighbors = self.core.insert_left(e);
            self.compute_fields(e, neighbors.below);
            if let Some(a) = neighbors.above {
                if self.core.detect(e, a) == Detection::Overlap {
                    self.compute_fields(e, neighbors.below);
                    self.compute_fields(a, Some(e));
                }
            }
            if let Some(b) = neighbors.below {
                if self.core.detect(b, e) == Detection::Overlap {
                    let below_below = self.core.below_of(b);
                    self.compute_fields(b, below_below);
                    self.compute_fields(e, Some(b));
                }
            }
        } else {
            self.core.process_right(e);
        }
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use malachite::Rational;

    use super::*;
    use crate::geom::tests::{p, square};
    use crate::geom::{polygon_to_oriented_segments, Polygon};
    use crate::kernel::FieldKernel;

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment<Rational> {
        Segment::new(p(a.0, a.1), p(b.0, b.1))
    }

    fn run(
        region: &Polygon<Rational>,
        linear: Vec<Segment<Rational>>,
        op: BooleanOp,
    ) -> Vec<Segment<Rational>> {
        let mut operation: MixedOperation<Rational, FieldKernel> = MixedOperation::from_segments(
            polygon_to_oriented_segments(region),
            linear,
            op,
        );
        let events: Vec<_> = operation.by_ref().collect();
        operation.reduce_events(&events)
    }

    #[test]
    fn segment_through_a_square_clips_to_the_inside() {
        let region = Polygon::from_border(square(0, 0, 4));
        let result = run(
            &region,
            vec![seg((-2, 2), (6, 2))],
            BooleanOp::Intersection,
        );
        assert_eq!(result, vec![seg((0, 2), (4, 2))]);
    }

    #[test]
    fn segment_through_a_square_subtracts_to_the_outside() {
        let region = Polygon::from_border(square(0, 0, 4));
        let result = run(&region, vec![seg((-2, 2), (6, 2))], BooleanOp::Difference);
        assert_eq!(result, vec![seg((-2, 2), (0, 2)), seg((4, 2), (6, 2))]);
    }

    #[test]
    fn segment_on_the_boundary_counts_as_intersection() {
        let region = Polygon::from_border(square(0, 0, 4));
        let result = run(&region, vec![seg((1, 0), (3, 0))], BooleanOp::Intersection);
        assert_eq!(result, vec![seg((1, 0), (3, 0))]);
        let result = run(&region, vec![seg((1, 0), (3, 0))], BooleanOp::Difference);
        assert!(result.is_empty());
    }

    #[test]
    fn segment_inside_a_hole_is_outside_the_region() {
        let region = Polygon::new(square(0, 0, 6), vec![square(1, 1, 4)]);
        let result = run(&region, vec![seg((2, 2), (4, 4))], BooleanOp::Intersection);
        assert!(result.is_empty());
        let result = run(&region, vec![seg((2, 2), (4, 4))], BooleanOp::Difference);
        assert_eq!(result, vec![seg((2, 2), (4, 4))]);
    }

    #[test]
    fn fully_interior_segment_vanishes_from_the_union_component() {
        let region = Polygon::from_border(square(0, 0, 4));
        let result = run(&region, vec![seg((1, 1), (3, 3))], BooleanOp::Union);
        assert!(result.is_empty());
        let outside = run(&region, vec![seg((5, 1), (6, 1))], BooleanOp::Union);
        assert_eq!(outside, vec![seg((5, 1), (6, 1))]);
    }
}
