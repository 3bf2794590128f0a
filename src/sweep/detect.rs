//! Intersection detection and segment division.
//!
//! When a left event settles next to a neighbor on the sweep line, the two
//! segments are checked for geometric interaction. Crossing or touching
//! segments are divided at the interaction point and the fresh pieces go
//! back through the queue; exactly coincident segments are recorded as an
//! overlap pair instead. Because every fragment is re-validated against its
//! own neighbors when *it* is processed, chains of divisions converge
//! without any global fixup.

use arrayvec::ArrayVec;

use crate::geom::{Point, Segment};
use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;
use crate::sweep::events::EventId;
use crate::sweep::SweepCore;

/// What [`SweepCore::detect`] found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detection {
    /// No interaction (or a bare shared endpoint, which needs no work).
    None,
    /// One or both segments were divided.
    Divided,
    /// The segments exactly coincide (possibly after a division recorded
    /// here); their classification fields need recomputing.
    Overlap,
}

impl<F: Scalar, K: Kernel<F>> SweepCore<F, K> {
    /// Check the segments owning the left events `first` and `second` (with
    /// `first` the lower neighbor) and divide them as needed.
    pub(crate) fn detect(&mut self, first: EventId, second: EventId) -> Detection {
        let s1 = self.events.segment(first);
        let s2 = self.events.segment(second);

        let o21s = K::orient(&s1.start, &s1.end, &s2.start);
        let o21e = K::orient(&s1.start, &s1.end, &s2.end);

        if o21s == Orientation::Collinear && o21e == Orientation::Collinear {
            return self.detect_collinear(first, second, &s1, &s2);
        }

        let o12s = K::orient(&s2.start, &s2.end, &s1.start);
        let o12e = K::orient(&s2.start, &s2.end, &s1.end);

        // An endpoint resting on the other segment's interior: a "T" touch.
        // The touched segment splits; the toucher stays whole.
        if o21s == Orientation::Collinear && s1.collinear_point_is_interior(&s2.start) {
            self.divide(first, s2.start);
            return Detection::Divided;
        }
        if o21e == Orientation::Collinear && s1.collinear_point_is_interior(&s2.end) {
            self.divide(first, s2.end);
            return Detection::Divided;
        }
        if o12s == Orientation::Collinear && s2.collinear_point_is_interior(&s1.start) {
            self.divide(second, s1.start);
            return Detection::Divided;
        }
        if o12e == Orientation::Collinear && s2.collinear_point_is_interior(&s1.end) {
            self.divide(second, s1.end);
            return Detection::Divided;
        }

        // A proper crossing: all four endpoints strictly off the other
        // segment's line, straddling both ways.
        let strict = |o: Orientation| o != Orientation::Collinear;
        if strict(o21s)
            && strict(o21e)
            && o21s != o21e
            && strict(o12s)
            && strict(o12e)
            && o12s != o12e
        {
            let p = K::cross_point(&s1, &s2);
            assert!(
                s1.start < p && p < s1.end && s2.start < p && p < s2.end,
                "crossing point must lie strictly inside both segments"
            );
            if self.operand_of(first) != self.operand_of(second) {
                self.saw_cross_operand_crossing = true;
            }
            self.divide(first, p.clone());
            self.divide(second, p);
            return Detection::Divided;
        }

        Detection::None
    }

    /// The fully collinear case: the four sub-cases of shared or
    /// overlapping endpoints along one supporting line.
    fn detect_collinear(
        &mut self,
        first: EventId,
        second: EventId,
        s1: &Segment<F>,
        s2: &Segment<F>,
    ) -> Detection {
        // Apart on the line, or touching end-to-start: nothing to divide.
        if s1.end <= s2.start || s2.end <= s1.start {
            return Detection::None;
        }

        if s1.start == s2.start {
            if s1.end != s2.end {
                // Identical starts: cut the longer at the shorter's end,
                // leaving an exactly coincident pair plus a remainder.
                let (shorter_end, longer) = if s1.end < s2.end {
                    (s1.end.clone(), second)
                } else {
                    (s2.end.clone(), first)
                };
                self.divide(longer, shorter_end);
            }
            self.mark_overlap(first, second);
            return Detection::Overlap;
        }

        // Distinct starts. Cut the earlier-starting segment at the later
        // start; if it also runs past the later end, cut the new piece
        // there too. If instead the *later* segment runs past, cut it at
        // the earlier one's end. Either way the coincident middle pieces
        // meet again as a shared-start pair when the fresh left event is
        // processed.
        let (early, early_seg, late, late_seg) = if s1.start < s2.start {
            (first, s1, second, s2)
        } else {
            (second, s2, first, s1)
        };
        let mut cuts: ArrayVec<Point<F>, 2> = ArrayVec::new();
        cuts.push(late_seg.start.clone());
        if late_seg.end < early_seg.end {
            cuts.push(late_seg.end.clone());
        } else if early_seg.end < late_seg.end {
            self.divide(late, early_seg.end.clone());
        }
        let mut target = early;
        for p in cuts {
            target = self.divide(target, p);
        }
        Detection::Divided
    }
}
