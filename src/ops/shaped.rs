//! The region-against-region variant.

use crate::geom::{Point, Polygon, Segment};
use crate::kernel::Kernel;
use crate::num::Scalar;
use crate::ops::{reconstruct, BooleanOp};
use crate::sweep::{
    Detection, EventId, Operand, OverlapKind, OverlapPolicy, SweepCore,
};

/// A boolean operation between two region operands.
///
/// Construct it with [`ShapedOperation::from_segments`], drive the sweep by
/// consuming the iterator (each step processes one event and may divide
/// segments, growing the stream), then hand the yielded events to
/// [`ShapedOperation::reduce_events`] to rebuild polygons. Consumers may
/// stop iterating early; events never yielded simply can't contribute to
/// the reduction.
pub struct ShapedOperation<F: Scalar, K: Kernel<F>> {
    core: SweepCore<F, K>,
    op: BooleanOp,
    // All indexed by event pair.
    other_interior: Vec<bool>,
    below_in_result: Vec<Option<EventId>>,
    in_result: Vec<bool>,
}

impl<F: Scalar, K: Kernel<F>> ShapedOperation<F, K> {
    /// Build an operation from the two operands' oriented boundary
    /// segments, each tagged with its interior-to-the-left flag (see
    /// [`crate::geom::polygon_to_oriented_segments`]).
    pub fn from_segments(
        first: impl IntoIterator<Item = (Segment<F>, bool)>,
        second: impl IntoIterator<Item = (Segment<F>, bool)>,
        op: BooleanOp,
    ) -> Self {
        let mut core = SweepCore::new(OverlapPolicy::ByOrder);
        for (seg, interior_to_left) in first {
            core.add_segment(&seg, Operand::First, interior_to_left);
        }
        for (seg, interior_to_left) in second {
            core.add_segment(&seg, Operand::Second, interior_to_left);
        }
        Self {
            core,
            op,
            other_interior: Vec::new(),
            below_in_result: Vec::new(),
            in_result: Vec::new(),
        }
    }

    /// The point at which `e` happens; useful for stopping the sweep once
    /// it has passed some x bound.
    pub fn event_point(&self, e: EventId) -> &Point<F> {
        self.core.events().point(e)
    }

    /// Rebuild the result polygons from the yielded events.
    pub fn reduce_events(&self, events: &[EventId]) -> Vec<Polygon<F>> {
        reconstruct::reduce_events(self, events)
    }

    pub(crate) fn core(&self) -> &SweepCore<F, K> {
        &self.core
    }

    pub(crate) fn is_in_result(&self, e: EventId) -> bool {
        self.in_result[e.pair()]
    }

    pub(crate) fn below_in_result_of(&self, e: EventId) -> Option<EventId> {
        self.below_in_result[e.pair()]
    }

    pub(crate) fn other_interior_of(&self, e: EventId) -> bool {
        self.other_interior[e.pair()]
    }

    /// Is the region just above the (non-vertical, result-contributing)
    /// event `b` inside the combined result?
    ///
    /// This is what contour nesting wants to know about the "last region
    /// boundary below" an event: if the result covers the strip above `b`,
    /// a contour starting there is a hole boundary of `b`'s contour.
    pub(crate) fn result_interior_above(&self, b: EventId) -> bool {
        let own = self.core.interior_to_left_of(b);
        let (first_above, second_above) = match self.core.overlap_of(b) {
            OverlapKind::None | OverlapKind::Shadowed => {
                let other = self.other_interior[b.pair()];
                match self.core.operand_of(b) {
                    Operand::First => (own, other),
                    Operand::Second => (other, own),
                }
            }
            OverlapKind::SameOrientation => (own, own),
            OverlapKind::OppositeOrientation => match self.core.operand_of(b) {
                Operand::First => (own, !own),
                Operand::Second => (!own, own),
            },
        };
        self.op.combines(first_above, second_above)
    }

    fn sync_len(&mut self) {
        let pairs = self.core.events().pair_count();
        self.other_interior.resize(pairs, false);
        self.below_in_result.resize(pairs, None);
        self.in_result.resize(pairs, false);
    }

    /// Decide membership of a confirmed left event in the result.
    fn belongs_to_result(&self, e: EventId) -> bool {
        match self.core.overlap_of(e) {
            OverlapKind::Shadowed => false,
            OverlapKind::SameOrientation => {
                matches!(self.op, BooleanOp::Union | BooleanOp::Intersection)
            }
            OverlapKind::OppositeOrientation => matches!(self.op, BooleanOp::Difference),
            OverlapKind::None => {
                let other = self.other_interior[e.pair()];
                match self.op {
                    BooleanOp::Intersection => other,
                    BooleanOp::Union => !other,
                    BooleanOp::Difference => match self.core.operand_of(e) {
                        Operand::First => !other,
                        Operand::Second => other,
                    },
                    BooleanOp::Xor => true,
                }
            }
        }
    }

    fn compute_fields(&mut self, e: EventId, below: Option<EventId>) {
        match below {
            None => {
                self.other_interior[e.pair()] = false;
                self.below_in_result[e.pair()] = None;
            }
            Some(b) => {
                // The other operand's state just above `b` is the state
                // adjacent to `e`: crossing a same-operand boundary doesn't
                // change it, crossing the other operand's does. A vertical
                // neighbor contributes its right side instead of its top.
                self.other_interior[e.pair()] =
                    if self.core.operand_of(e) == self.core.operand_of(b) {
                        self.other_interior[b.pair()]
                    } else if self.core.events().is_vertical(b) {
                        !self.core.interior_to_left_of(b)
                    } else {
                        self.core.interior_to_left_of(b)
                    };
                self.below_in_result[e.pair()] =
                    if !self.in_result[b.pair()] || self.core.events().is_vertical(b) {
                        self.below_in_result[b.pair()]
                    } else {
                        Some(b)
                    };
            }
        }
        self.in_result[e.pair()] = self.belongs_to_result(e);
    }

    fn refresh_in_result(&mut self, e: EventId) {
        self.in_result[e.pair()] = self.belongs_to_result(e);
    }
}

impl<F: Scalar, K: Kernel<F>> Iterator for ShapedOperation<F, K> {
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
        } else if let Some((b, a)) = self.core.process_right(e) {
            self.refresh_in_result(b);
            self.refresh_in_result(a);
        }
        Some(e)
    }
}
