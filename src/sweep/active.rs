//! The active order: the sweep line's vertical cross-section.
//!
//! Left events whose right ends haven't been processed yet sit in an ordered
//! set, bottom to top. The order between two entries is decided by testing
//! each segment's endpoints against the other's supporting line, so it stays
//! meaningful as the sweep advances. When two segments cross, a
//! locally-consistent answer is good enough, because the crossing is divided
//! away before it can matter globally.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::ops::Bound;

use crate::geom::Point;
use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;
use crate::sweep::events::{EventId, Operand};

/// A snapshot of a left event, as inserted into the active set.
///
/// The snapshot keeps the segment's endpoints *at insertion time*. If the
/// segment is later divided, its stored far endpoint goes stale, but it
/// stays on the same supporting line, so every side-of-line comparison still
/// answers the same, and removal uses the cached entry rather than
/// recomputing one.
#[derive(Debug)]
pub struct ActiveEntry<F: Scalar, K: Kernel<F>> {
    pub start: Point<F>,
    pub end: Point<F>,
    pub operand: Operand,
    pub event: EventId,
    kernel: PhantomData<K>,
}

impl<F: Scalar, K: Kernel<F>> Clone for ActiveEntry<F, K> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            end: self.end.clone(),
            operand: self.operand,
            event: self.event,
            kernel: PhantomData,
        }
    }
}

impl<F: Scalar, K: Kernel<F>> ActiveEntry<F, K> {
    pub fn new(start: Point<F>, end: Point<F>, operand: Operand, event: EventId) -> Self {
        Self {
            start,
            end,
            operand,
            event,
            kernel: PhantomData,
        }
    }
}

impl<F: Scalar, K: Kernel<F>> PartialEq for ActiveEntry<F, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Scalar, K: Kernel<F>> Eq for ActiveEntry<F, K> {}

impl<F: Scalar, K: Kernel<F>> PartialOrd for ActiveEntry<F, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Scalar, K: Kernel<F>> Ord for ActiveEntry<F, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.event == other.event {
            return Ordering::Equal;
        }

        let o_start = K::orient(&self.start, &self.end, &other.start);
        let o_end = K::orient(&self.start, &self.end, &other.end);

        use Orientation::*;
        match (o_start, o_end) {
            // Same supporting line. Order by vertical position, then
            // operand (matching the queue's collinear tie, so coincident
            // entries land adjacent in insertion order), then horizontal
            // position, then the far end, then identity.
            (Collinear, Collinear) => self
                .start
                .y
                .cmp(&other.start.y)
                .then_with(|| match (self.operand, other.operand) {
                    (Operand::Second, Operand::First) => Ordering::Less,
                    (Operand::First, Operand::Second) => Ordering::Greater,
                    _ => Ordering::Equal,
                })
                .then_with(|| self.start.x.cmp(&other.start.x))
                .then_with(|| self.end.cmp(&other.end))
                .then_with(|| self.event.cmp(&other.event)),

            // The other segment lies entirely on one side of our line (one
            // endpoint may rest on it).
            (CounterClockwise, CounterClockwise)
            | (Collinear, CounterClockwise)
            | (CounterClockwise, Collinear) => Ordering::Less,
            (Clockwise, Clockwise) | (Collinear, Clockwise) | (Clockwise, Collinear) => {
                Ordering::Greater
            }

            // The segments cross our line in both directions: they are about
            // to be split, so a local answer from the other segment's
            // supporting line suffices.
            (CounterClockwise, Clockwise) | (Clockwise, CounterClockwise) => {
                match K::orient(&other.start, &other.end, &self.start) {
                    CounterClockwise => Ordering::Greater,
                    Clockwise => Ordering::Less,
                    Collinear => match K::orient(&other.start, &other.end, &self.end) {
                        CounterClockwise => Ordering::Greater,
                        Clockwise => Ordering::Less,
                        Collinear => self.event.cmp(&other.event),
                    },
                }
            }
        }
    }
}

/// The ordered set of segments currently crossing the sweep line.
#[derive(Debug)]
pub struct ActiveSet<F: Scalar, K: Kernel<F>> {
    set: BTreeSet<ActiveEntry<F, K>>,
}

impl<F: Scalar, K: Kernel<F>> Default for ActiveSet<F, K> {
    fn default() -> Self {
        Self {
            set: BTreeSet::new(),
        }
    }
}

impl<F: Scalar, K: Kernel<F>> ActiveSet<F, K> {
    pub fn insert(&mut self, entry: ActiveEntry<F, K>) {
        let fresh = self.set.insert(entry);
        debug_assert!(fresh, "an event entered the active set twice");
    }

    pub fn remove(&mut self, entry: &ActiveEntry<F, K>) {
        let found = self.set.remove(entry);
        debug_assert!(found, "removed an entry that wasn't active");
    }

    /// The nearest active segment below `entry`.
    pub fn below(&self, entry: &ActiveEntry<F, K>) -> Option<&ActiveEntry<F, K>> {
        self.set
            .range((Bound::Unbounded, Bound::Excluded(entry)))
            .next_back()
    }

    /// The nearest active segment above `entry`.
    pub fn above(&self, entry: &ActiveEntry<F, K>) -> Option<&ActiveEntry<F, K>> {
        self.set
            .range((Bound::Excluded(entry), Bound::Unbounded))
            .next()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }
}

#[cfg(test)]
mod tests {
    use malachite::Rational;

    use super::*;
    use crate::geom::tests::p;
    use crate::kernel::FieldKernel;

    type Entry = ActiveEntry<Rational, FieldKernel>;

    fn entry(start: (i32, i32), end: (i32, i32), operand: Operand, event: usize) -> Entry {
        ActiveEntry::new(
            p(start.0, start.1),
            p(end.0, end.1),
            operand,
            EventId(event),
        )
    }

    #[test]
    fn separated_segments_order_by_side() {
        let low = entry((0, 0), (4, 0), Operand::First, 0);
        let high = entry((0, 2), (4, 3), Operand::Second, 2);
        assert!(low < high);
        assert!(high > low);
    }

    #[test]
    fn shared_start_orders_by_turn() {
        let shallow = entry((0, 0), (4, 1), Operand::First, 0);
        let steep = entry((0, 0), (4, 3), Operand::First, 2);
        assert!(shallow < steep);
    }

    #[test]
    fn touching_endpoint_counts_as_that_side() {
        // `upper` rests one endpoint on `lower` but otherwise lies above it.
        let lower = entry((0, 0), (4, 0), Operand::First, 0);
        let upper = entry((2, 0), (4, 2), Operand::First, 2);
        assert!(lower < upper);
    }

    #[test]
    fn coincident_entries_order_like_the_queue() {
        let first = entry((0, 0), (4, 0), Operand::First, 0);
        let second = entry((0, 0), (4, 0), Operand::Second, 2);
        assert!(second < first);
    }

    #[test]
    fn collinear_entries_order_along_the_line() {
        let west = entry((0, 0), (2, 0), Operand::First, 0);
        let east = entry((1, 0), (4, 0), Operand::First, 2);
        assert!(west < east);
    }

    #[test]
    fn neighbors_in_the_set() {
        let mut set: ActiveSet<Rational, FieldKernel> = ActiveSet::default();
        let a = entry((0, 0), (4, 0), Operand::First, 0);
        let b = entry((0, 1), (4, 1), Operand::First, 2);
        let c = entry((0, 2), (4, 2), Operand::First, 4);
        set.insert(a.clone());
        set.insert(c.clone());
        set.insert(b.clone());
        assert_eq!(set.below(&b).unwrap().event, a.event);
        assert_eq!(set.above(&b).unwrap().event, c.event);
        assert!(set.below(&a).is_none());
        assert!(set.above(&c).is_none());
        set.remove(&b);
        assert_eq!(set.len(), 2);
        assert_eq!(set.above(&a).unwrap().event, c.event);
    }
}
