//! The sweep-line engine shared by every operation variant.
//!
//! [`SweepCore`] owns all mutable state of one sweep: the event arena, the
//! processing queue, the active set, and the per-segment and per-event
//! bookkeeping that intersection detection maintains. The classification
//! variants in [`crate::ops`] drive it one popped event at a time and layer
//! their own result fields on top.

pub mod active;
mod detect;
pub mod events;
pub mod queue;

pub use detect::Detection;
pub use events::{EventId, Events, Operand, SegmentId};

use crate::geom::{Point, Segment};
use crate::kernel::Kernel;
use crate::num::Scalar;
use active::{ActiveEntry, ActiveSet};
use queue::{EventQueue, QueueKey};

/// How two exactly coincident collinear segments relate.
///
/// Shared between the two left events of a coincident pair: one member is
/// shadowed (it contributes nothing), the other carries the kind and stands
/// for both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapKind {
    /// Not coincident with anything.
    #[default]
    None,
    /// The superseded member of a coincident pair.
    Shadowed,
    /// Coincident, with both operands' interiors on the same side.
    SameOrientation,
    /// Coincident, with the operands' interiors on opposite sides.
    OppositeOrientation,
}

/// Which member of a coincident pair gets shadowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Shadow the first (lower, earlier-processed) member.
    ByOrder,
    /// Shadow the member from this operand if exactly one member is from it;
    /// otherwise fall back to [`OverlapPolicy::ByOrder`].
    ShadowOperand(Operand),
}

/// The engine state shared by all three classification variants.
pub struct SweepCore<F: Scalar, K: Kernel<F>> {
    pub(crate) events: Events<F>,
    queue: EventQueue<F, K>,
    active: ActiveSet<F, K>,

    // Per segment id.
    operands: Vec<Operand>,
    interior_to_left: Vec<bool>,

    // Per event pair.
    overlap: Vec<OverlapKind>,
    coincides_cross: Vec<bool>,
    entries: Vec<Option<ActiveEntry<F, K>>>,

    overlap_policy: OverlapPolicy,

    /// Did two segments from different operands properly cross?
    pub(crate) saw_cross_operand_crossing: bool,
}

/// The neighbors of a freshly inserted left event.
pub(crate) struct Neighbors {
    pub below: Option<EventId>,
    pub above: Option<EventId>,
}

impl<F: Scalar, K: Kernel<F>> SweepCore<F, K> {
    pub(crate) fn new(overlap_policy: OverlapPolicy) -> Self {
        Self {
            events: Events::default(),
            queue: EventQueue::default(),
            active: ActiveSet::default(),
            operands: Vec::new(),
            interior_to_left: Vec::new(),
            overlap: Vec::new(),
            coincides_cross: Vec::new(),
            entries: Vec::new(),
            overlap_policy,
            saw_cross_operand_crossing: false,
        }
    }

    /// Register an input segment and enqueue both of its events.
    ///
    /// The segment may point either way; `interior_to_left` refers to its
    /// *normalized* direction and is meaningful for region operands only.
    pub(crate) fn add_segment(&mut self, segment: &Segment<F>, operand: Operand, interior_to_left: bool) {
        debug_assert!(!segment.is_degenerate());
        let seg_id = SegmentId(self.operands.len());
        self.operands.push(operand);
        self.interior_to_left.push(interior_to_left);

        let normalized = segment.normalized();
        let left = self
            .events
            .push_pair(normalized.start, normalized.end, seg_id);
        self.push_pair_state();
        self.queue.push(self.sort_key(left));
        self.queue.push(self.sort_key(self.events.opposite(left)));
    }

    fn push_pair_state(&mut self) {
        self.overlap.push(OverlapKind::None);
        self.coincides_cross.push(false);
        self.entries.push(None);
    }

    /// The processing-order key for `e`, built from the arena's current
    /// state. Also used to re-sort surviving events during reconstruction.
    pub(crate) fn sort_key(&self, e: EventId) -> QueueKey<F, K> {
        let opp = self.events.opposite(e);
        QueueKey::new(
            self.events.point(e).clone(),
            self.events.point(opp).clone(),
            e.is_left(),
            self.operand_of(e),
            e,
        )
    }

    /// Pop the next event in processing order.
    pub(crate) fn pop(&mut self) -> Option<QueueKey<F, K>> {
        self.queue.pop()
    }

    pub(crate) fn events(&self) -> &Events<F> {
        &self.events
    }

    pub(crate) fn operand_of(&self, e: EventId) -> Operand {
        self.operands[self.events.segment_id(e).0]
    }

    pub(crate) fn interior_to_left_of(&self, e: EventId) -> bool {
        self.interior_to_left[self.events.segment_id(e).0]
    }

    pub(crate) fn overlap_of(&self, e: EventId) -> OverlapKind {
        self.overlap[e.pair()]
    }

    pub(crate) fn coincides_cross_of(&self, e: EventId) -> bool {
        self.coincides_cross[e.pair()]
    }

    /// Insert a popped left event into the active set and report its
    /// neighbors.
    pub(crate) fn insert_left(&mut self, left: EventId) -> Neighbors {
        debug_assert!(left.is_left());
        let seg = self.events.segment(left);
        let entry = ActiveEntry::new(seg.start, seg.end, self.operand_of(left), left);
        let below = self.active.below(&entry).map(|e| e.event);
        let above = self.active.above(&entry).map(|e| e.event);
        self.active.insert(entry.clone());
        self.entries[left.pair()] = Some(entry);
        Neighbors { below, above }
    }

    /// The current below-neighbor of an active left event.
    pub(crate) fn below_of(&self, left: EventId) -> Option<EventId> {
        let entry = self.entries[left.pair()].as_ref()?;
        self.active.below(entry).map(|e| e.event)
    }

    /// Handle a popped right event: retire its segment from the active set
    /// and let its former neighbors meet.
    ///
    /// Returns the pair of events to re-classify if retiring the segment
    /// exposed an exact overlap between its neighbors.
    pub(crate) fn process_right(&mut self, right: EventId) -> Option<(EventId, EventId)> {
        debug_assert!(!right.is_left());
        let left = self.events.opposite(right);
        let Some(entry) = self.entries[left.pair()].take() else {
            return None;
        };
        let below = self.active.below(&entry).map(|e| e.event);
        let above = self.active.above(&entry).map(|e| e.event);
        self.active.remove(&entry);
        if let (Some(b), Some(a)) = (below, above) {
            if self.detect(b, a) == Detection::Overlap {
                return Some((b, a));
            }
        }
        None
    }

    /// Split the segment owning the active or queued left event `left` at
    /// `p`, re-enqueueing both fresh events.
    ///
    /// The fragments are never inserted into the active set directly: the far
    /// piece's left event goes back through the queue so that its neighbors
    /// and classification are recomputed against the sweep state of its own
    /// processing moment.
    pub(crate) fn divide(&mut self, left: EventId, p: Point<F>) -> EventId {
        let parent = self.events.segment_id(left);
        let child = SegmentId(self.operands.len());
        self.operands.push(self.operands[parent.0]);
        self.interior_to_left.push(self.interior_to_left[parent.0]);

        let (new_left, new_right) = self.events.divide(left, p, child);
        self.push_pair_state();
        self.queue.push(self.sort_key(new_left));
        self.queue.push(self.sort_key(new_right));
        new_left
    }

    /// Record a coincident pair, choosing the shadowed member per policy.
    pub(crate) fn mark_overlap(&mut self, first: EventId, second: EventId) {
        let (shadow, kept) = match self.overlap_policy {
            OverlapPolicy::ByOrder => (first, second),
            OverlapPolicy::ShadowOperand(op) => {
                match (self.operand_of(first) == op, self.operand_of(second) == op) {
                    (true, false) => (first, second),
                    (false, true) => (second, first),
                    _ => (first, second),
                }
            }
        };

        let kind = if self.interior_to_left_of(first) == self.interior_to_left_of(second) {
            OverlapKind::SameOrientation
        } else {
            OverlapKind::OppositeOrientation
        };
        self.overlap[shadow.pair()] = OverlapKind::Shadowed;
        if self.overlap[kept.pair()] != OverlapKind::Shadowed {
            self.overlap[kept.pair()] = kind;
        }

        let cross = self.operand_of(first) != self.operand_of(second);
        let covered =
            cross || self.coincides_cross[first.pair()] || self.coincides_cross[second.pair()];
        self.coincides_cross[first.pair()] = covered;
        self.coincides_cross[second.pair()] = covered;
    }

    #[cfg(feature = "slow-asserts")]
    pub(crate) fn assert_drained(&self) {
        assert!(self.queue.is_empty());
        assert_eq!(self.active.len(), 0);
    }
}
