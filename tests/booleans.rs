//! End-to-end algebraic properties of the boolean operations.
//!
//! The generated inputs deliberately live on a coarse integer grid so that
//! shared endpoints, collinear overlaps and exact coincidences come up all
//! the time; those are the configurations the sweep's tie-breaking exists
//! for.

use malachite::Rational;
use proptest::prelude::*;

use exactclip::kernel::FieldKernel;
use exactclip::{
    boolean_op, clip_segments, relate_regions, relate_segments, segment_boolean_op, BooleanOp,
    Contour, Location, Point, Polygon, Relation, Segment,
};

fn p(x: i32, y: i32) -> Point<Rational> {
    Point::new(Rational::from(x), Rational::from(y))
}

fn rect(x0: i32, y0: i32, w: i32, h: i32) -> Polygon<Rational> {
    Polygon::from_border(
        [(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)]
            .into_iter()
            .map(|(x, y)| p(x, y))
            .collect::<Contour<Rational>>(),
    )
}

fn reflect_point(q: &Point<Rational>) -> Point<Rational> {
    Point::new(q.y.clone(), q.x.clone())
}

fn reflect_polygon(polygon: &Polygon<Rational>) -> Polygon<Rational> {
    let flip = |c: &Contour<Rational>| Contour::new(c.vertices.iter().map(reflect_point).collect());
    Polygon::new(
        flip(&polygon.border),
        polygon.holes.iter().map(flip).collect(),
    )
}

fn reflect_segment(s: &Segment<Rational>) -> Segment<Rational> {
    Segment::new(reflect_point(&s.start), reflect_point(&s.end)).normalized()
}

/// A contour as a rotation- and reversal-independent vertex cycle.
fn canonical_cycle(contour: &Contour<Rational>) -> Vec<Point<Rational>> {
    let n = contour.vertices.len();
    if n == 0 {
        return Vec::new();
    }
    let rotate_to_min = |vs: &[Point<Rational>]| {
        let min_idx = vs
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
            .unwrap();
        let mut out = Vec::with_capacity(vs.len());
        out.extend_from_slice(&vs[min_idx..]);
        out.extend_from_slice(&vs[..min_idx]);
        out
    };
    let forward = rotate_to_min(&contour.vertices);
    let reversed: Vec<_> = contour.vertices.iter().rev().cloned().collect();
    let backward = rotate_to_min(&reversed);
    forward.min(backward)
}

fn canonical_polygons(polygons: &[Polygon<Rational>]) -> Vec<Vec<Vec<Point<Rational>>>> {
    let mut out: Vec<Vec<Vec<Point<Rational>>>> = polygons
        .iter()
        .map(|polygon| {
            let mut contours = vec![canonical_cycle(&polygon.border)];
            let mut holes: Vec<_> = polygon.holes.iter().map(canonical_cycle).collect();
            holes.sort();
            contours.extend(holes);
            contours
        })
        .collect();
    out.sort();
    out
}

/// Re-sweep a segment set against nothing, dividing at every junction and
/// re-merging straight runs: a fragmentation-independent representation.
fn canonical_segments(segments: &[Segment<Rational>]) -> Vec<Segment<Rational>> {
    segment_boolean_op::<_, FieldKernel>(segments, &[], BooleanOp::Union).unwrap()
}

fn region_op(
    a: &[Polygon<Rational>],
    b: &[Polygon<Rational>],
    op: BooleanOp,
) -> Vec<Polygon<Rational>> {
    boolean_op::<_, FieldKernel>(a, b, op).unwrap()
}

fn seg_op(
    a: &[Segment<Rational>],
    b: &[Segment<Rational>],
    op: BooleanOp,
) -> Vec<Segment<Rational>> {
    segment_boolean_op::<_, FieldKernel>(a, b, op).unwrap()
}

prop_compose! {
    fn small_rect()(x0 in -6i32..6, y0 in -6i32..6, w in 1i32..5, h in 1i32..5) -> Polygon<Rational> {
        rect(x0, y0, w, h)
    }
}

prop_compose! {
    fn grid_segment()(
        x0 in -4i32..4, y0 in -4i32..4, dx in -3i32..4, dy in -3i32..4
    ) -> Segment<Rational> {
        let (dx, dy) = if dx == 0 && dy == 0 { (1, 0) } else { (dx, dy) };
        Segment::new(p(x0, y0), p(x0 + dx, y0 + dy)).normalized()
    }
}

proptest! {
    #[test]
    fn union_intersection_idempotent(a in small_rect()) {
        let a = vec![a];
        let expected = canonical_polygons(&a);
        prop_assert_eq!(&canonical_polygons(&region_op(&a, &a, BooleanOp::Union)), &expected);
        prop_assert_eq!(&canonical_polygons(&region_op(&a, &a, BooleanOp::Intersection)), &expected);
    }

    #[test]
    fn xor_and_difference_with_self_are_empty(a in small_rect()) {
        let a = vec![a];
        prop_assert!(region_op(&a, &a, BooleanOp::Xor).is_empty());
        prop_assert!(region_op(&a, &a, BooleanOp::Difference).is_empty());
    }

    #[test]
    fn union_and_intersection_commute(a in small_rect(), b in small_rect()) {
        let (a, b) = (vec![a], vec![b]);
        for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Xor] {
            prop_assert_eq!(
                canonical_polygons(&region_op(&a, &b, op)),
                canonical_polygons(&region_op(&b, &a, op))
            );
        }
    }

    #[test]
    fn union_intersection_and_xor_associate(
        a in small_rect(), b in small_rect(), c in small_rect()
    ) {
        let (a, b, c) = (vec![a], vec![b], vec![c]);
        for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Xor] {
            let left = region_op(&region_op(&a, &b, op), &c, op);
            let right = region_op(&a, &region_op(&b, &c, op), op);
            prop_assert_eq!(canonical_polygons(&left), canonical_polygons(&right));
        }
    }

    #[test]
    fn intersection_distributes_over_union(
        a in small_rect(), b in small_rect(), c in small_rect()
    ) {
        let (a, b, c) = (vec![a], vec![b], vec![c]);
        let left = region_op(&a, &region_op(&b, &c, BooleanOp::Union), BooleanOp::Intersection);
        let right = region_op(
            &region_op(&a, &b, BooleanOp::Intersection),
            &region_op(&a, &c, BooleanOp::Intersection),
            BooleanOp::Union,
        );
        prop_assert_eq!(canonical_polygons(&left), canonical_polygons(&right));
    }

    #[test]
    fn difference_of_difference_identity(
        a in small_rect(), b in small_rect(), c in small_rect()
    ) {
        // A - (B - C) == (A - B) | (A & C)
        let (a, b, c) = (vec![a], vec![b], vec![c]);
        let left = region_op(&a, &region_op(&b, &c, BooleanOp::Difference), BooleanOp::Difference);
        let right = region_op(
            &region_op(&a, &b, BooleanOp::Difference),
            &region_op(&a, &c, BooleanOp::Intersection),
            BooleanOp::Union,
        );
        prop_assert_eq!(canonical_polygons(&left), canonical_polygons(&right));
    }

    #[test]
    fn union_is_xor_of_xor_and_intersection(a in small_rect(), b in small_rect()) {
        // A | B == (A xor B) xor (A & B)
        let (a, b) = (vec![a], vec![b]);
        let left = region_op(&a, &b, BooleanOp::Union);
        let right = region_op(
            &region_op(&a, &b, BooleanOp::Xor),
            &region_op(&a, &b, BooleanOp::Intersection),
            BooleanOp::Xor,
        );
        prop_assert_eq!(canonical_polygons(&left), canonical_polygons(&right));
    }

    #[test]
    fn reflection_commutes_with_region_ops(a in small_rect(), b in small_rect()) {
        let (a, b) = (vec![a], vec![b]);
        for op in [
            BooleanOp::Union,
            BooleanOp::Intersection,
            BooleanOp::Difference,
            BooleanOp::Xor,
        ] {
            let reflected_inputs = region_op(
                &a.iter().map(reflect_polygon).collect::<Vec<_>>(),
                &b.iter().map(reflect_polygon).collect::<Vec<_>>(),
                op,
            );
            let reflected_outputs: Vec<_> =
                region_op(&a, &b, op).iter().map(reflect_polygon).collect();
            prop_assert_eq!(
                canonical_polygons(&reflected_inputs),
                canonical_polygons(&reflected_outputs)
            );
        }
    }

    #[test]
    fn region_relation_complement_symmetry(a in small_rect(), b in small_rect()) {
        let (a, b) = (vec![a], vec![b]);
        let forward = relate_regions::<_, FieldKernel>(&a, &b);
        let backward = relate_regions::<_, FieldKernel>(&b, &a);
        prop_assert_eq!(forward, backward.complement());
    }

    #[test]
    fn boundary_vertices_locate_as_boundary(a in small_rect()) {
        for v in &a.border.vertices {
            prop_assert_eq!(
                exactclip::locate_point_in_polygon::<_, FieldKernel>(v, &a),
                Location::Boundary
            );
        }
    }

    #[test]
    fn segment_ops_algebra(
        a in prop::collection::vec(grid_segment(), 1..5),
        b in prop::collection::vec(grid_segment(), 1..5),
    ) {
        // Idempotence and self-inverse.
        prop_assert_eq!(
            canonical_segments(&seg_op(&a, &a, BooleanOp::Union)),
            canonical_segments(&a)
        );
        prop_assert_eq!(
            canonical_segments(&seg_op(&a, &a, BooleanOp::Intersection)),
            canonical_segments(&a)
        );
        prop_assert!(seg_op(&a, &a, BooleanOp::Xor).is_empty());
        prop_assert!(seg_op(&a, &a, BooleanOp::Difference).is_empty());

        // Commutativity.
        for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Xor] {
            prop_assert_eq!(
                canonical_segments(&seg_op(&a, &b, op)),
                canonical_segments(&seg_op(&b, &a, op))
            );
        }
    }

    #[test]
    fn segment_relation_complement_symmetry(
        a in prop::collection::vec(grid_segment(), 1..4),
        b in prop::collection::vec(grid_segment(), 1..4),
    ) {
        let forward = relate_segments::<_, FieldKernel>(&a, &b);
        let backward = relate_segments::<_, FieldKernel>(&b, &a);
        prop_assert_eq!(forward, backward.complement());
    }

    #[test]
    fn reflection_commutes_with_segment_ops(
        a in prop::collection::vec(grid_segment(), 1..4),
        b in prop::collection::vec(grid_segment(), 1..4),
    ) {
        for op in [
            BooleanOp::Union,
            BooleanOp::Intersection,
            BooleanOp::Difference,
            BooleanOp::Xor,
        ] {
            let reflected_inputs = seg_op(
                &a.iter().map(reflect_segment).collect::<Vec<_>>(),
                &b.iter().map(reflect_segment).collect::<Vec<_>>(),
                op,
            );
            let reflected_outputs: Vec<_> =
                seg_op(&a, &b, op).iter().map(reflect_segment).collect();
            prop_assert_eq!(
                canonical_segments(&reflected_inputs),
                canonical_segments(&reflected_outputs)
            );
        }
    }
}

#[test]
fn spec_scenario_two_squares() {
    let a = vec![rect(0, 0, 2, 2)];
    let b = vec![rect(1, 1, 2, 2)];

    let shared = region_op(&a, &b, BooleanOp::Intersection);
    assert_eq!(canonical_polygons(&shared), canonical_polygons(&[rect(1, 1, 1, 1)]));

    let union = region_op(&a, &b, BooleanOp::Union);
    assert_eq!(union.len(), 1);
    assert_eq!(union[0].border.vertices.len(), 8);
    assert!(union[0].holes.is_empty());

    let difference = region_op(&a, &b, BooleanOp::Difference);
    assert_eq!(difference.len(), 1);
    assert_eq!(difference[0].border.vertices.len(), 6);
    let expected_l = Contour::new(vec![p(0, 0), p(2, 0), p(2, 1), p(1, 1), p(1, 2), p(0, 2)]);
    assert_eq!(
        canonical_cycle(&difference[0].border),
        canonical_cycle(&expected_l)
    );

    let xor = region_op(&a, &b, BooleanOp::Xor);
    assert_eq!(xor.len(), 2);
    for polygon in &xor {
        assert_eq!(polygon.border.vertices.len(), 6);
    }
    // The two L-shapes tile the union minus the shared square.
    let rebuilt = region_op(&xor, &shared, BooleanOp::Union);
    assert_eq!(canonical_polygons(&rebuilt), canonical_polygons(&union));
}

#[test]
fn spec_scenario_collinear_segments() {
    let a = vec![Segment::new(p(0, 0), p(2, 0))];
    let b = vec![Segment::new(p(1, 0), p(3, 0))];
    assert_eq!(
        seg_op(&a, &b, BooleanOp::Union),
        vec![Segment::new(p(0, 0), p(3, 0))]
    );
    assert_eq!(
        seg_op(&a, &b, BooleanOp::Intersection),
        vec![Segment::new(p(1, 0), p(2, 0))]
    );
    assert_eq!(
        seg_op(&a, &b, BooleanOp::Difference),
        vec![Segment::new(p(0, 0), p(1, 0))]
    );
    assert_eq!(
        seg_op(&a, &b, BooleanOp::Xor),
        vec![Segment::new(p(0, 0), p(1, 0)), Segment::new(p(2, 0), p(3, 0))]
    );
}

#[test]
fn spec_scenario_polygon_with_hole() {
    let ring = vec![Polygon::new(
        rect(0, 0, 6, 6).border,
        vec![rect(1, 1, 4, 4).border],
    )];
    let inner = vec![rect(2, 2, 2, 2)];
    assert!(region_op(&ring, &inner, BooleanOp::Intersection).is_empty());

    // The hole survives a union with something outside it.
    let far = vec![rect(10, 0, 2, 2)];
    let union = region_op(&ring, &far, BooleanOp::Union);
    assert_eq!(union.len(), 2);
    assert!(union.iter().any(|polygon| polygon.holes.len() == 1));
}

#[test]
fn island_inside_a_hole_is_its_own_region() {
    // (A xor B) xor C with C inside the hole that B carved out of A: the
    // result is the ring plus an independent island, not a second hole.
    let a = vec![rect(0, 0, 6, 6)];
    let b = vec![rect(1, 1, 4, 4)];
    let c = vec![rect(2, 2, 2, 2)];
    let ring = region_op(&a, &b, BooleanOp::Xor);
    let result = region_op(&ring, &c, BooleanOp::Xor);
    assert_eq!(result.len(), 2);
    let ring_out = result.iter().find(|poly| !poly.holes.is_empty()).unwrap();
    let island = result.iter().find(|poly| poly.holes.is_empty()).unwrap();
    assert_eq!(ring_out.holes.len(), 1);
    assert_eq!(canonical_cycle(&island.border), canonical_cycle(&rect(2, 2, 2, 2).border));
    assert!(island.border.is_counterclockwise());
}

#[test]
fn difference_carves_a_hole_and_relations_agree() {
    let outer = vec![rect(0, 0, 6, 6)];
    let inner = vec![rect(2, 2, 2, 2)];
    let ring = region_op(&outer, &inner, BooleanOp::Difference);
    assert_eq!(ring.len(), 1);
    assert_eq!(ring[0].holes.len(), 1);

    assert_eq!(
        relate_regions::<_, FieldKernel>(&ring, &inner),
        Relation::Touch
    );
}

#[test]
fn clipping_segments_against_a_ring() {
    let ring = vec![Polygon::new(
        rect(0, 0, 6, 6).border,
        vec![rect(1, 1, 4, 4).border],
    )];
    // A horizontal line through the whole ring: only the two ring-wall
    // pieces survive an intersection.
    let line = vec![Segment::new(p(-1, 3), p(7, 3))];
    let clipped = clip_segments::<_, FieldKernel>(&ring, &line, BooleanOp::Intersection).unwrap();
    assert_eq!(
        clipped,
        vec![
            Segment::new(p(0, 3), p(1, 3)),
            Segment::new(p(5, 3), p(6, 3)),
        ]
    );
    let outside = clip_segments::<_, FieldKernel>(&ring, &line, BooleanOp::Difference).unwrap();
    assert_eq!(
        outside,
        vec![
            Segment::new(p(-1, 3), p(0, 3)),
            Segment::new(p(1, 3), p(5, 3)),
            Segment::new(p(6, 3), p(7, 3)),
        ]
    );
}
