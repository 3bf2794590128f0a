//! The event arena.
//!
//! Every segment that takes part in a sweep is represented by a *pair* of
//! events: one for its smaller ("left") endpoint and one for its larger
//! ("right") endpoint. Events are opaque indices into parallel arrays that
//! only ever grow; splitting a segment mints a fresh pair and rewires two
//! `opposite` links, leaving all previously handed-out indices valid.

use crate::geom::{Point, Segment};
use crate::num::Scalar;

/// Which input operand a segment came from.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operand {
    /// The first operand (the subject, for asymmetric operations).
    First,
    /// The second operand (the clip).
    Second,
}

/// An index into the per-segment tables.
///
/// Segment ids accumulate monotonically: every division mints a new id whose
/// operand and interior orientation are inherited from the parent.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SegmentId(pub(crate) usize);

impl std::fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g_{}", self.0)
    }
}

/// An opaque handle to one end of a segment taking part in a sweep.
///
/// Handles are minted in left/right pairs, so handedness is the handle's
/// parity and the pair index is the handle shifted down a bit.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EventId(pub(crate) usize);

impl std::fmt::Debug for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e_{}", self.0)
    }
}

impl EventId {
    /// Is this the event of a segment's smaller endpoint?
    pub fn is_left(self) -> bool {
        self.0 % 2 == 0
    }

    /// The index of the left/right pair this event belongs to.
    pub fn pair(self) -> usize {
        self.0 / 2
    }
}

/// The arena of sweep events.
///
/// Parallel arrays indexed by [`EventId`]: `endpoints[e]` is the point where
/// the event happens, `opposites[e]` is the event at the geometric far end
/// of the segment owning `e`. `opposite` is an involution at all times.
#[derive(Clone, Debug)]
pub struct Events<F: Scalar> {
    endpoints: Vec<Point<F>>,
    opposites: Vec<EventId>,
    /// Indexed by pair.
    segment_ids: Vec<SegmentId>,
}

impl<F: Scalar> Default for Events<F> {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            opposites: Vec::new(),
            segment_ids: Vec::new(),
        }
    }
}

impl<F: Scalar> Events<F> {
    /// The total number of events minted so far.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// The number of left/right pairs minted so far.
    pub fn pair_count(&self) -> usize {
        self.segment_ids.len()
    }

    /// The point at which `e` happens.
    pub fn point(&self, e: EventId) -> &Point<F> {
        &self.endpoints[e.0]
    }

    /// The event at the far end of the segment owning `e`.
    pub fn opposite(&self, e: EventId) -> EventId {
        self.opposites[e.0]
    }

    /// The segment id of the pair owning `e`.
    pub fn segment_id(&self, e: EventId) -> SegmentId {
        self.segment_ids[e.pair()]
    }

    /// The current segment of a left event, in sweep order.
    pub fn segment(&self, left: EventId) -> Segment<F> {
        debug_assert!(left.is_left());
        Segment::new(
            self.point(left).clone(),
            self.point(self.opposite(left)).clone(),
        )
    }

    /// Is the segment owning this left event vertical?
    pub fn is_vertical(&self, left: EventId) -> bool {
        self.point(left).x == self.point(self.opposite(left)).x
    }

    /// Mint a pair of events for a segment. `start` must be smaller than
    /// `end`; returns the left event.
    pub fn push_pair(&mut self, start: Point<F>, end: Point<F>, seg: SegmentId) -> EventId {
        assert!(start < end, "degenerate or disordered segment");
        let left = EventId(self.endpoints.len());
        let right = EventId(self.endpoints.len() + 1);
        self.endpoints.push(start);
        self.endpoints.push(end);
        self.opposites.push(right);
        self.opposites.push(left);
        self.segment_ids.push(seg);
        left
    }

    /// Split the segment owning the left event `event` at `p`, which must lie
    /// strictly between its endpoints.
    ///
    /// The segment becomes `start -- p`; a freshly minted pair represents
    /// `p -- end`. Returns `(new_left, new_right)`: the left event of the far
    /// piece and the new right event (at `p`) of the near piece. Both need to
    /// go through the queue; the old right event (at `end`) is already there
    /// and now belongs to the far piece.
    pub fn divide(
        &mut self,
        event: EventId,
        p: Point<F>,
        child_seg: SegmentId,
    ) -> (EventId, EventId) {
        assert!(event.is_left());
        let old_right = self.opposites[event.0];
        assert!(
            *self.point(event) < p && p < *self.point(old_right),
            "division point must be strictly interior"
        );

        let new_left = EventId(self.endpoints.len());
        self.endpoints.push(p.clone());
        self.opposites.push(old_right);

        let new_right = EventId(self.endpoints.len());
        self.endpoints.push(p);
        self.opposites.push(event);

        self.opposites[old_right.0] = new_left;
        self.opposites[event.0] = new_right;
        self.segment_ids.push(child_seg);

        debug_assert!(new_left.is_left() && !new_right.is_left());
        (new_left, new_right)
    }
}
