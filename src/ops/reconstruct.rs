//! Rebuilding closed contours from classified result events.
//!
//! The surviving events are re-sorted into processing order and stitched
//! back together point by point: within each same-point group of event
//! slots, an incoming (right) slot hands over to the rotationally adjacent
//! outgoing slot, so the walk traces one topologically consistent boundary
//! instead of an arbitrary matching. The "last region boundary below" back
//! pointer recorded during the sweep then tells every fresh contour whether
//! it is a hole, a sibling hole, or a new top-level region.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::geom::{Contour, Point, Polygon};
use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;
use crate::ops::shaped::ShapedOperation;
use crate::sweep::EventId;

/// Append `p` to the vertex walk, collapsing runs of collinear vertices.
fn push_vertex<F: Scalar, K: Kernel<F>>(vertices: &mut Vec<Point<F>>, p: Point<F>) {
    while vertices.len() >= 2
        && K::orient(&vertices[vertices.len() - 2], &vertices[vertices.len() - 1], &p)
            == Orientation::Collinear
    {
        vertices.pop();
    }
    vertices.push(p);
}

/// Collapse collinear runs across the closing seam of a finished walk.
fn trim_seam<F: Scalar, K: Kernel<F>>(vertices: &mut Vec<Point<F>>) {
    while vertices.len() >= 3
        && K::orient(
            &vertices[vertices.len() - 2],
            &vertices[vertices.len() - 1],
            &vertices[0],
        ) == Orientation::Collinear
    {
        vertices.pop();
    }
    while vertices.len() >= 3
        && K::orient(&vertices[vertices.len() - 1], &vertices[0], &vertices[1])
            == Orientation::Collinear
    {
        vertices.remove(0);
    }
}

pub(crate) fn reduce_events<F: Scalar, K: Kernel<F>>(
    op: &ShapedOperation<F, K>,
    yielded: &[EventId],
) -> Vec<Polygon<F>> {
    let arena = op.core().events();

    // Both halves of every surviving pair, in processing order.
    let mut result: Vec<EventId> = Vec::new();
    for &e in yielded {
        if e.is_left() && op.is_in_result(e) {
            result.push(e);
            result.push(arena.opposite(e));
        }
    }
    result.sort_by(|&a, &b| op.core().sort_key(a).cmp(&op.core().sort_key(b)));

    let mut position = vec![usize::MAX; arena.len()];
    for (i, &e) in result.iter().enumerate() {
        position[e.0] = i;
    }

    // The per-point connectivity rotation: each slot points at the previous
    // slot of its same-point group, wrapping at the front. Arriving via a
    // right event and rotating this way hands the walk the angularly
    // adjacent departing slot.
    let n = result.len();
    let mut conn = vec![0usize; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && arena.point(result[j]) == arena.point(result[i]) {
            j += 1;
        }
        conn[i] = j - 1;
        for k in i + 1..j {
            conn[k] = k - 1;
        }
        i = j;
    }

    let mut processed = vec![false; n];
    let mut contour_of = vec![usize::MAX; n];
    let mut contours: Vec<Contour<F>> = Vec::new();
    let mut depths: Vec<usize> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();

    for start_pos in 0..n {
        if processed[start_pos] {
            continue;
        }
        let start_event = result[start_pos];
        debug_assert!(start_event.is_left());

        // Hole, sibling, or new top-level region? Ask the nearest result
        // boundary below our starting point. We nest one level deeper than
        // the below contour exactly when the *cycle* of that contour opens
        // upward at the below edge. For an even-depth (region) contour that
        // is when the result interior is above the edge; for an odd-depth
        // (hole) contour the cycle's inside is the hole itself, so the test
        // flips. An island inside a hole thereby lands at even depth and
        // becomes an independent top-level region.
        let (depth, parent) = match op.below_in_result_of(start_event) {
            // A recorded below-event can drop out of the result after the
            // pointer was written (late shadowing of a coincident triple);
            // such an orphan pointer means top-level.
            Some(below) if position[below.0] != usize::MAX => {
                let below_contour = contour_of[position[below.0]];
                let cycle_opens_upward =
                    op.result_interior_above(below) == (depths[below_contour] % 2 == 0);
                if cycle_opens_upward {
                    (depths[below_contour] + 1, Some(below_contour))
                } else if let Some(grandparent) = parents[below_contour] {
                    (depths[below_contour], Some(grandparent))
                } else {
                    (0, None)
                }
            }
            _ => (0, None),
        };

        let contour_id = contours.len();
        let start_point = arena.point(start_event).clone();
        let mut vertices: Vec<Point<F>> = Vec::new();
        let mut visited: HashMap<Point<F>, usize> = HashMap::new();
        visited.insert(start_point.clone(), 0);

        let mut cursor = start_pos;
        loop {
            let event = result[cursor];
            let opposite = arena.opposite(event);
            let opposite_pos = position[opposite.0];
            processed[cursor] = true;
            processed[opposite_pos] = true;
            contour_of[cursor] = contour_id;
            contour_of[opposite_pos] = contour_id;

            push_vertex::<F, K>(&mut vertices, arena.point(event).clone());

            let far = arena.point(opposite).clone();
            if far == start_point {
                break;
            }
            match visited.entry(far.clone()) {
                // Already been here: the walk pinched off a loop. Drop the
                // pinched vertices and carry on from the earlier visit.
                Entry::Occupied(slot) => {
                    vertices.truncate(*slot.get());
                }
                Entry::Vacant(slot) => {
                    slot.insert(vertices.len());
                }
            }

            let mut candidate = conn[opposite_pos];
            while candidate != opposite_pos && processed[candidate] {
                candidate = conn[candidate];
            }
            if candidate == opposite_pos {
                // No unprocessed continuation: an open chain. Keep what we
                // have; only degenerate inputs get here.
                break;
            }
            cursor = candidate;
        }

        trim_seam::<F, K>(&mut vertices);
        let mut contour = Contour::new(vertices);
        if contour.vertices.len() >= 3 && (depth % 2 == 0) != contour.is_counterclockwise() {
            contour.reverse();
        }
        contours.push(contour);
        depths.push(depth);
        parents.push(parent);
    }

    // Even depths become polygon borders; odd depths attach to their
    // parent border as holes.
    let mut polygons: Vec<Polygon<F>> = Vec::new();
    let mut polygon_of = vec![usize::MAX; contours.len()];
    for idx in 0..contours.len() {
        if contours[idx].vertices.len() < 3 {
            continue;
        }
        if depths[idx] % 2 == 0 {
            polygon_of[idx] = polygons.len();
            polygons.push(Polygon::from_border(contours[idx].clone()));
        } else if let Some(parent) = parents[idx] {
            let slot = polygon_of[parent];
            if slot != usize::MAX {
                polygons[slot].holes.push(contours[idx].clone());
            }
        }
    }
    polygons
}
