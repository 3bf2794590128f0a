//! The linear-against-linear variant.
//!
//! With no interiors in play, membership is decided purely by which operands
//! ended up owning each divided fragment: union keeps one copy of
//! everything, intersection keeps fragments both operands own, difference
//! and symmetric difference keep fragments owned by exactly the right side.

use std::collections::HashMap;

use crate::geom::{Point, Segment};
use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;
use crate::ops::BooleanOp;
use crate::sweep::{EventId, Operand, OverlapKind, OverlapPolicy, SweepCore};

/// A boolean operation between two linear (segment-set) operands.
///
/// Drive the sweep by consuming the iterator, then call
/// [`LinearOperation::reduce_events`] on the yielded events.
pub struct LinearOperation<F: Scalar, K: Kernel<F>> {
    core: SweepCore<F, K>,
    op: BooleanOp,
}

impl<F: Scalar, K: Kernel<F>> LinearOperation<F, K> {
    /// Build an operation from two iterables of segments.
    pub fn from_segments(
        first: impl IntoIterator<Item = Segment<F>>,
        second: impl IntoIterator<Item = Segment<F>>,
        op: BooleanOp,
    ) -> Self {
        let mut core = SweepCore::new(OverlapPolicy::ByOrder);
        for seg in first {
            core.add_segment(&seg, Operand::First, false);
        }
        for seg in second {
            core.add_segment(&seg, Operand::Second, false);
        }
        Self { core, op }
    }

    /// The point at which `e` happens.
    pub fn event_point(&self, e: EventId) -> &Point<F> {
        self.core.events().point(e)
    }

    pub(crate) fn core(&self) -> &SweepCore<F, K> {
        &self.core
    }

    fn is_in_result(&self, e: EventId) -> bool {
        if self.core.overlap_of(e) == OverlapKind::Shadowed {
            return false;
        }
        let covered = self.core.coincides_cross_of(e);
        match self.op {
            BooleanOp::Union => true,
            BooleanOp::Intersection => covered,
            BooleanOp::Difference => self.core.operand_of(e) == Operand::First && !covered,
            BooleanOp::Xor => !covered,
        }
    }

    /// Collect the result segments from the yielded events, merging
    /// fragments that a division left collinear and contiguous.
    pub fn reduce_events(&self, events: &[EventId]) -> Vec<Segment<F>> {
        let fragments: Vec<Segment<F>> = events
            .iter()
            .filter(|e| e.is_left() && self.is_in_result(**e))
            .map(|&e| self.core.events().segment(e))
            .collect();
        merge_collinear_fragments::<F, K>(fragments)
    }
}

impl<F: Scalar, K: Kernel<F>> Iterator for LinearOperation<F, K> {
    type Item = EventId;

    fn next(&mut self) -> Option<EventId> {
        let Some(key) = self.core.pop() else {
            #[cfg(feature = "slow-asserts")]
            self.core.assert_drained();
            return None;
        };
        let e = key.event;
        if e.is_left() {
            let neighbors = self.core.insert_left(e);
            if let Some(a) = neighbors.above {
                self.core.detect(e, a);
            }
            if let Some(b) = neighbors.below {
                self.core.detect(b, e);
            }
        } else {
            self.core.process_right(e);
        }
        Some(e)
    }
}

/// Merge maximal runs of collinear fragments that meet two-at-a-point, so
/// that e.g. a union re-emits one long segment instead of its divided
/// pieces. Junctions where more than two result fragments meet are left
/// alone.
pub(crate) fn merge_collinear_fragments<F: Scalar, K: Kernel<F>>(
    fragments: Vec<Segment<F>>,
) -> Vec<Segment<F>> {
    let mut incident: HashMap<Point<F>, Vec<usize>> = HashMap::new();
    for (i, seg) in fragments.iter().enumerate() {
        incident.entry(seg.start.clone()).or_default().push(i);
        incident.entry(seg.end.clone()).or_default().push(i);
    }

    let far_end = |i: usize, at: &Point<F>| -> Point<F> {
        let seg = &fragments[i];
        if seg.start == *at {
            seg.end.clone()
        } else {
            seg.start.clone()
        }
    };

    let mut visited = vec![false; fragments.len()];
    let mut result = Vec::new();
    for i in 0..fragments.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        let line = fragments[i].clone();
        let mut lo = line.start.clone();
        let mut hi = line.end.clone();

        // Grow the chain past any degree-two junction that continues
        // straight on.
        for end in [false, true] {
            loop {
                let at = if end { hi.clone() } else { lo.clone() };
                let slots = &incident[&at];
                if slots.len() != 2 {
                    break;
                }
                // One of the two is the chain's own tip fragment; continue
                // into the other unless it's already part of some chain.
                let next = match (visited[slots[0]], visited[slots[1]]) {
                    (true, false) => slots[1],
                    (false, true) => slots[0],
                    _ => break,
                };
                let far = far_end(next, &at);
                if K::orient(&line.start, &line.end, &far) != Orientation::Collinear {
                    break;
                }
                visited[next] = true;
                if end {
                    hi = far;
                } else {
                    lo = far;
                }
            }
        }
        let seg = if lo <= hi {
            Segment::new(lo, hi)
        } else {
            Segment::new(hi, lo)
        };
        result.push(seg);
    }
    result.sort_by(|a, b| (&a.start, &a.end).cmp(&(&b.start, &b.end)));
    result
}
