//! Topological relations between operands.
//!
//! The relation queries drive the same sweep machinery as the boolean
//! operations, but never reduce events to output geometry: they accumulate
//! subset, overlap and crossing evidence while the sweep divides the inputs,
//! then read the verdict off the surviving fragments. After division runs to
//! completion every touch, cross and overlap between the operands manifests
//! either as a shared fragment or as a shared fragment endpoint, which makes
//! the final accounting a plain table scan.

use std::collections::{HashMap, HashSet};

use crate::geom::{Point, Polygon, Segment};
use crate::kernel::Kernel;
use crate::num::Scalar;
use crate::ops::{BooleanOp, LinearOperation, ShapedOperation};
use crate::sweep::{EventId, Operand, OverlapKind, SweepCore};

/// How two operands relate topologically.
///
/// The vocabulary is closed under operand swap: see [`Relation::complement`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Relation {
    /// The operands share no points at all.
    Disjoint,
    /// Boundaries meet, interiors don't.
    Touch,
    /// The operands cross at isolated points.
    Cross,
    /// The interiors share some points, but neither contains the other.
    Overlap,
    /// The first operand lies strictly inside the second.
    Within,
    /// The first operand lies inside the second with boundary contact.
    Enclosed,
    /// The operands are the same point set.
    Equal,
    /// The second operand lies strictly inside the first.
    Cover,
    /// The second operand lies inside the first with boundary contact.
    Encloses,
    /// The first operand is a component of the second compound operand.
    Component,
    /// The second operand is a component of the first compound operand.
    Composite,
}

impl Relation {
    /// The relation as seen from the swapped operands:
    /// `relate(a, b) == relate(b, a).complement()`.
    pub fn complement(self) -> Relation {
        match self {
            Relation::Disjoint => Relation::Disjoint,
            Relation::Touch => Relation::Touch,
            Relation::Cross => Relation::Cross,
            Relation::Overlap => Relation::Overlap,
            Relation::Within => Relation::Cover,
            Relation::Enclosed => Relation::Encloses,
            Relation::Equal => Relation::Equal,
            Relation::Cover => Relation::Within,
            Relation::Encloses => Relation::Enclosed,
            Relation::Component => Relation::Composite,
            Relation::Composite => Relation::Component,
        }
    }
}

/// Which operands own the fragments of one exact geometry, and whether any
/// cross-operand endpoint contact exists.
struct FragmentCensus<F: Scalar> {
    /// Per distinct fragment geometry: does each operand own a copy?
    owners: HashMap<(Point<F>, Point<F>), (bool, bool)>,
    /// Fragment endpoints per operand, for contact detection.
    endpoints: [HashSet<Point<F>>; 2],
    crossed: bool,
}

impl<F: Scalar> FragmentCensus<F> {
    fn take<K: Kernel<F>>(core: &SweepCore<F, K>) -> Self {
        let mut census = FragmentCensus {
            owners: HashMap::new(),
            endpoints: [HashSet::new(), HashSet::new()],
            crossed: core.saw_cross_operand_crossing,
        };
        let arena = core.events();
        for pair in 0..arena.pair_count() {
            let left = EventId(pair * 2);
            // A pair that was divided keeps its own shortened piece, so
            // every pair's current segment is a final fragment.
            let seg = arena.segment(left);
            let key = (seg.start.clone(), seg.end.clone());
            let slot = census.owners.entry(key).or_insert((false, false));
            match core.operand_of(left) {
                Operand::First => slot.0 = true,
                Operand::Second => slot.1 = true,
            }
            let which = match core.operand_of(left) {
                Operand::First => 0,
                Operand::Second => 1,
            };
            census.endpoints[which].insert(seg.start);
            census.endpoints[which].insert(seg.end);
        }
        census
    }

    fn any_shared(&self) -> bool {
        self.owners.values().any(|&(a, b)| a && b)
    }

    fn all_covered(&self, operand: Operand) -> bool {
        self.owners.values().all(|&(a, b)| match operand {
            Operand::First => !a || b,
            Operand::Second => !b || a,
        })
    }

    fn endpoint_contact(&self) -> bool {
        self.endpoints[0]
            .iter()
            .any(|p| self.endpoints[1].contains(p))
    }
}

/// Relate two sets of segments.
pub fn relate_segments<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
) -> Relation {
    if first.is_empty() || second.is_empty() {
        return Relation::Disjoint;
    }
    let mut sweep: LinearOperation<F, K> = LinearOperation::from_segments(
        first.iter().cloned(),
        second.iter().cloned(),
        BooleanOp::Union,
    );
    for _ in sweep.by_ref() {}
    let census = FragmentCensus::take(sweep.core());

    let first_covered = census.all_covered(Operand::First);
    let second_covered = census.all_covered(Operand::Second);
    match (first_covered, second_covered) {
        (true, true) => Relation::Equal,
        (true, false) => Relation::Component,
        (false, true) => Relation::Composite,
        (false, false) => {
            if census.any_shared() {
                Relation::Overlap
            } else if census.crossed {
                Relation::Cross
            } else if census.endpoint_contact() {
                Relation::Touch
            } else {
                Relation::Disjoint
            }
        }
    }
}

/// Relate two regions, each given as a collection of polygons.
pub fn relate_regions<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
) -> Relation {
    if first.is_empty() || second.is_empty() {
        return Relation::Disjoint;
    }
    let mut sweep: ShapedOperation<F, K> = ShapedOperation::from_segments(
        first.iter().flat_map(crate::geom::polygon_to_oriented_segments),
        second.iter().flat_map(crate::geom::polygon_to_oriented_segments),
        BooleanOp::Union,
    );
    let mut inside = [false, false];
    let mut outside = [false, false];
    let mut boundary = false;
    let mut boundary_same = false;
    let mut boundary_opposite = false;
    let events: Vec<EventId> = sweep.by_ref().collect();
    for e in events {
        if !e.is_left() {
            continue;
        }
        let core = sweep.core();
        let which = match core.operand_of(e) {
            Operand::First => 0,
            Operand::Second => 1,
        };
        match core.overlap_of(e) {
            OverlapKind::Shadowed => boundary = true,
            OverlapKind::SameOrientation => {
                boundary = true;
                boundary_same = true;
            }
            OverlapKind::OppositeOrientation => {
                boundary = true;
                boundary_opposite = true;
            }
            OverlapKind::None => {
                // A fragment that was divided later still reports the
                // field of its surviving piece; interiority is stable
                // along an undivided fragment.
                if sweep.other_interior_of(e) {
                    inside[which] = true;
                } else {
                    outside[which] = true;
                }
            }
        }
    }

    let census = FragmentCensus::take(sweep.core());
    let contact = boundary || census.endpoint_contact();

    if !inside[0] && !inside[1] {
        // No fragment of either boundary ventures inside the other region.
        // Coincident boundaries only count towards equality or containment
        // when the interiors face the same way; back-to-back coincidence
        // (a polygon exactly filling a hole) is mere touching.
        if boundary_same && !boundary_opposite {
            match (outside[0], outside[1]) {
                (false, false) => return Relation::Equal,
                (false, true) => return Relation::Component,
                (true, false) => return Relation::Composite,
                (true, true) => {}
            }
        }
        if contact {
            return Relation::Touch;
        }
        return Relation::Disjoint;
    }

    if inside[0] && !inside[1] && !outside[0] {
        // The whole first boundary sits inside (or on) the second region.
        return if contact {
            Relation::Enclosed
        } else {
            Relation::Within
        };
    }
    if inside[1] && !inside[0] && !outside[1] {
        return if contact {
            Relation::Encloses
        } else {
            Relation::Cover
        };
    }
    Relation::Overlap
}
