#![deny(missing_docs)]
//! Exact-precision boolean operations and topological relations for planar
//! geometry.
//!
//! This crate computes unions, intersections, differences and symmetric
//! differences of polygons, polygon collections and segment sets, as well
//! as topological relations between them, with no floating-point error when
//! instantiated over an exact scalar such as [`malachite::Rational`]. The
//! engine is a left-to-right sweep: every input segment becomes a pair of
//! events, crossing and touching segments are divided at their interaction
//! points as the sweep encounters them, and each surviving fragment is
//! classified against the opposite operand to decide whether it belongs to
//! the result.
//!
//! The arithmetic lives behind two small abstractions: the [`num::Scalar`]
//! trait (any ordered field) and the [`kernel::Kernel`] trait (an exact
//! orientation predicate plus a segment intersector). Use
//! [`kernel::FieldKernel`] with `Rational` coordinates for exactness, or
//! [`kernel::RobustKernel`] with `NotNan<f64>` for speed with exact
//! orientation tests.
//!
//! ```
//! use exactclip::{boolean_op, BooleanOp, Contour, Point, Polygon};
//! use exactclip::kernel::FieldKernel;
//! use malachite::Rational;
//!
//! let square = |x0: i64, y0: i64, size: i64| {
//!     Polygon::from_border(
//!         [(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size)]
//!             .into_iter()
//!             .map(|(x, y)| Point::new(Rational::from(x), Rational::from(y)))
//!             .collect::<Contour<_>>(),
//!     )
//! };
//! let a = square(0, 0, 2);
//! let b = square(1, 1, 2);
//! let shared = boolean_op::<_, FieldKernel>(&[a], &[b], BooleanOp::Intersection).unwrap();
//! assert_eq!(shared.len(), 1);
//! assert_eq!(shared[0].border.vertices.len(), 4);
//! ```

pub mod geom;
pub mod kernel;
pub mod num;
pub mod ops;
pub mod relate;
mod sweep;

pub use geom::{
    locate_point_in_contour, locate_point_in_polygon, polygon_to_oriented_segments, BoundingBox,
    Contour, Location, Point, Polygon, Segment,
};
pub use ops::{BooleanOp, LinearOperation, MixedOperation, ShapedOperation};
pub use relate::{relate_regions, relate_segments, Relation};
pub use sweep::EventId;

use kernel::Kernel;
use num::Scalar;

/// The input geometry was faulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A segment (or contour edge) had zero length.
    DegenerateSegment,
    /// A contour had fewer than three vertices.
    TooFewVertices,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DegenerateSegment => write!(f, "a segment had zero length"),
            Error::TooFewVertices => write!(f, "a contour had fewer than three vertices"),
        }
    }
}

impl std::error::Error for Error {}

fn validate_polygons<F: Scalar>(polygons: &[Polygon<F>]) -> Result<(), Error> {
    for polygon in polygons {
        for contour in std::iter::once(&polygon.border).chain(&polygon.holes) {
            if contour.vertices.len() < 3 {
                return Err(Error::TooFewVertices);
            }
            for edge in contour.edges() {
                if edge.is_degenerate() {
                    return Err(Error::DegenerateSegment);
                }
            }
        }
    }
    Ok(())
}

fn validate_segments<F: Scalar>(segments: &[Segment<F>]) -> Result<(), Error> {
    if segments.iter().any(Segment::is_degenerate) {
        return Err(Error::DegenerateSegment);
    }
    Ok(())
}

fn region_bounds<F: Scalar>(polygons: &[Polygon<F>]) -> Option<BoundingBox<F>> {
    let mut bounds: Option<BoundingBox<F>> = None;
    for polygon in polygons {
        if let Some(b) = BoundingBox::of_points(&polygon.border.vertices) {
            bounds = Some(match bounds {
                None => b,
                Some(acc) => acc.union(&b),
            });
        }
    }
    bounds
}

/// Compute a boolean operation between two regions, each a collection of
/// polygons.
///
/// Disjoint bounding boxes short-circuit without sweeping, and the
/// asymmetric operations stop the sweep once it has passed the last
/// x-coordinate that can still contribute.
pub fn boolean_op<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
    op: BooleanOp,
) -> Result<Vec<Polygon<F>>, Error> {
    validate_polygons(first)?;
    validate_polygons(second)?;

    let bounds = (region_bounds(first), region_bounds(second));
    let (Some(first_bounds), Some(second_bounds)) = bounds else {
        // One operand is empty.
        return Ok(match op {
            BooleanOp::Intersection => Vec::new(),
            BooleanOp::Difference => first.to_vec(),
            BooleanOp::Union | BooleanOp::Xor => {
                first.iter().chain(second).cloned().collect()
            }
        });
    };
    if first_bounds.disjoint(&second_bounds) {
        return Ok(match op {
            BooleanOp::Intersection => Vec::new(),
            BooleanOp::Difference => first.to_vec(),
            BooleanOp::Union | BooleanOp::Xor => {
                first.iter().chain(second).cloned().collect()
            }
        });
    }

    let stop_after = match op {
        BooleanOp::Intersection => {
            Some(first_bounds.max.x.clone().min(second_bounds.max.x.clone()))
        }
        BooleanOp::Difference => Some(first_bounds.max.x.clone()),
        BooleanOp::Union | BooleanOp::Xor => None,
    };

    let mut operation: ShapedOperation<F, K> = ShapedOperation::from_segments(
        first.iter().flat_map(polygon_to_oriented_segments),
        second.iter().flat_map(polygon_to_oriented_segments),
        op,
    );
    let mut events = Vec::new();
    while let Some(e) = operation.next() {
        if let Some(bound) = &stop_after {
            if operation.event_point(e).x > *bound {
                break;
            }
        }
        events.push(e);
    }
    Ok(operation.reduce_events(&events))
}

/// Compute a boolean operation between two sets of segments.
pub fn segment_boolean_op<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
    op: BooleanOp,
) -> Result<Vec<Segment<F>>, Error> {
    validate_segments(first)?;
    validate_segments(second)?;

    let mut operation: LinearOperation<F, K> = LinearOperation::from_segments(
        first.iter().cloned(),
        second.iter().cloned(),
        op,
    );
    let events: Vec<EventId> = operation.by_ref().collect();
    Ok(operation.reduce_events(&events))
}

/// Clip a set of segments against a region: the mixed variant.
///
/// `Intersection` keeps the parts of `segments` inside `region` or on its
/// boundary; the other operations keep the strictly-outside parts (the
/// region operand is not representable in a linear result).
pub fn clip_segments<F: Scalar, K: Kernel<F>>(
    region: &[Polygon<F>],
    segments: &[Segment<F>],
    op: BooleanOp,
) -> Result<Vec<Segment<F>>, Error> {
    validate_polygons(region)?;
    validate_segments(segments)?;

    let mut operation: MixedOperation<F, K> = MixedOperation::from_segments(
        region.iter().flat_map(polygon_to_oriented_segments),
        segments.iter().cloned(),
        op,
    );
    let events: Vec<EventId> = operation.by_ref().collect();
    Ok(operation.reduce_events(&events))
}

/// The union of two regions.
pub fn unite<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
) -> Result<Vec<Polygon<F>>, Error> {
    boolean_op::<F, K>(first, second, BooleanOp::Union)
}

/// The intersection of two regions.
pub fn intersect<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
) -> Result<Vec<Polygon<F>>, Error> {
    boolean_op::<F, K>(first, second, BooleanOp::Intersection)
}

/// The first region minus the second.
pub fn subtract<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
) -> Result<Vec<Polygon<F>>, Error> {
    boolean_op::<F, K>(first, second, BooleanOp::Difference)
}

/// The symmetric difference of two regions.
pub fn symmetric_subtract<F: Scalar, K: Kernel<F>>(
    first: &[Polygon<F>],
    second: &[Polygon<F>],
) -> Result<Vec<Polygon<F>>, Error> {
    boolean_op::<F, K>(first, second, BooleanOp::Xor)
}

/// The union of two segment sets.
pub fn segment_unite<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
) -> Result<Vec<Segment<F>>, Error> {
    segment_boolean_op::<F, K>(first, second, BooleanOp::Union)
}

/// The intersection of two segment sets.
pub fn segment_intersect<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
) -> Result<Vec<Segment<F>>, Error> {
    segment_boolean_op::<F, K>(first, second, BooleanOp::Intersection)
}

/// The first segment set minus the second.
pub fn segment_subtract<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
) -> Result<Vec<Segment<F>>, Error> {
    segment_boolean_op::<F, K>(first, second, BooleanOp::Difference)
}

/// The symmetric difference of two segment sets.
pub fn segment_symmetric_subtract<F: Scalar, K: Kernel<F>>(
    first: &[Segment<F>],
    second: &[Segment<F>],
) -> Result<Vec<Segment<F>>, Error> {
    segment_boolean_op::<F, K>(first, second, BooleanOp::Xor)
}
