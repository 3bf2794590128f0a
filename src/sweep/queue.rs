//! The processing order, and the priority queue that drives the sweep.
//!
//! The sweep moves left to right (bottom to top at ties). The queue is not a
//! snapshot of the input: divisions push fresh events into it for as long as
//! the sweep runs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use crate::geom::Point;
use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;
use crate::sweep::events::{EventId, Operand};

/// A queue entry: the event handle plus a snapshot of everything its
/// ordering depends on.
///
/// Snapshotting is sound here even though segments get divided while their
/// events wait in the queue: a queued *left* event cannot be divided before
/// it is processed (only active segments are divided), and a queued *right*
/// event's far endpoint only ever moves along its own supporting line, which
/// none of the orientation-based comparisons below can observe.
#[derive(Debug)]
pub struct QueueKey<F: Scalar, K: Kernel<F>> {
    pub point: Point<F>,
    pub other: Point<F>,
    pub is_left: bool,
    pub operand: Operand,
    pub event: EventId,
    kernel: PhantomData<K>,
}

// Not derived: deriving would put a `K: Clone` bound on the impl, and kernels
// are only markers here.
impl<F: Scalar, K: Kernel<F>> Clone for QueueKey<F, K> {
    fn clone(&self) -> Self {
        Self {
            point: self.point.clone(),
            other: self.other.clone(),
            is_left: self.is_left,
            operand: self.operand,
            event: self.event,
            kernel: PhantomData,
        }
    }
}

impl<F: Scalar, K: Kernel<F>> QueueKey<F, K> {
    pub fn new(
        point: Point<F>,
        other: Point<F>,
        is_left: bool,
        operand: Operand,
        event: EventId,
    ) -> Self {
        Self {
            point,
            other,
            is_left,
            operand,
            event,
            kernel: PhantomData,
        }
    }
}

impl<F: Scalar, K: Kernel<F>> PartialEq for QueueKey<F, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Scalar, K: Kernel<F>> Eq for QueueKey<F, K> {}

impl<F: Scalar, K: Kernel<F>> PartialOrd for QueueKey<F, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Scalar, K: Kernel<F>> Ord for QueueKey<F, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            // At the same point, shrink the active set before growing it:
            // right events first.
            .then(self.is_left.cmp(&other.is_left))
            .then_with(|| {
                match K::orient(&self.point, &self.other, &other.other) {
                    // Our far endpoint is the lower (more clockwise) one, so
                    // we go first; touching configurations then get detected
                    // in a single pass.
                    Orientation::CounterClockwise => Ordering::Less,
                    Orientation::Clockwise => Ordering::Greater,
                    Orientation::Collinear => {
                        // Exactly collinear with a shared start. Order the
                        // first operand last so that coincident cross-operand
                        // pairs always merge in the same order.
                        match (self.operand, other.operand) {
                            (Operand::Second, Operand::First) => Ordering::Less,
                            (Operand::First, Operand::Second) => Ordering::Greater,
                            _ => self.event.cmp(&other.event),
                        }
                    }
                }
            })
    }
}

/// A min-queue of live events in processing order.
#[derive(Debug)]
pub struct EventQueue<F: Scalar, K: Kernel<F>> {
    heap: BinaryHeap<std::cmp::Reverse<QueueKey<F, K>>>,
}

impl<F: Scalar, K: Kernel<F>> Default for EventQueue<F, K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }
}

impl<F: Scalar, K: Kernel<F>> EventQueue<F, K> {
    pub fn push(&mut self, key: QueueKey<F, K>) {
        self.heap.push(std::cmp::Reverse(key));
    }

    pub fn pop(&mut self) -> Option<QueueKey<F, K>> {
        self.heap.pop().map(|r| r.0)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
