//! The geometric predicates that the sweep is parametrized over.
//!
//! The engine itself only ever asks two questions about coordinates: "which
//! way do these three points turn?" and "where do these two crossing segments
//! meet?". Everything else is comparisons. Callers plug the answers in
//! through the [`Kernel`] trait; [`FieldKernel`] answers them with plain
//! field arithmetic (exact whenever the scalar is exact, e.g.
//! `malachite::Rational`), and [`RobustKernel`] answers the orientation
//! question exactly for `f64` coordinates using adaptive-precision
//! arithmetic.

use std::cmp::Ordering;

use ordered_float::NotNan;

use crate::geom::{Point, Segment};
use crate::num::Scalar;

/// The turn direction of three points, i.e. the sign of the cross product of
/// `b - a` and `c - a`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Negative cross product: `c` lies to the right of the ray `a -> b`.
    Clockwise,
    /// Zero cross product: the three points lie on one line.
    Collinear,
    /// Positive cross product: `c` lies to the left of the ray `a -> b`.
    CounterClockwise,
}

impl Orientation {
    /// The orientation of the mirrored configuration.
    pub fn reverse(self) -> Orientation {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// The two caller-supplied geometric primitives.
///
/// Implementations must be *exact* for the scalar type they are used with:
/// an orientation that reports `Collinear` for three points that are not
/// quite collinear (or vice versa) violates the preconditions of the sweep
/// and will panic an invariant check at best, corrupt output at worst.
pub trait Kernel<F: Scalar>: 'static {
    /// The turn direction of the three points `a`, `b`, `c`.
    fn orient(a: &Point<F>, b: &Point<F>, c: &Point<F>) -> Orientation;

    /// The intersection point of two properly-crossing segments.
    ///
    /// Only called when each segment's endpoints lie strictly on opposite
    /// sides of the other's supporting line, so the denominator below is
    /// nonzero and the result lies strictly inside both segments.
    fn cross_point(first: &Segment<F>, second: &Segment<F>) -> Point<F>;
}

/// A kernel that evaluates both primitives in the scalar's own field
/// arithmetic.
///
/// With `Rational` coordinates this is exact; with float coordinates the
/// orientation sign can be wrong near degeneracy, so prefer [`RobustKernel`]
/// for `NotNan<f64>`.
#[derive(Clone, Copy, Debug)]
pub struct FieldKernel;

fn cross<F: Scalar>(a: &Point<F>, b: &Point<F>, c: &Point<F>) -> F {
    (b.x.clone() - &a.x) * (c.y.clone() - &a.y) - (b.y.clone() - &a.y) * (c.x.clone() - &a.x)
}

fn field_cross_point<F: Scalar>(first: &Segment<F>, second: &Segment<F>) -> Point<F> {
    let (a, b) = (&first.start, &first.end);
    let (c, d) = (&second.start, &second.end);

    // Solve a + t (b - a) for the t where the supporting lines meet.
    let denom = (b.x.clone() - &a.x) * (d.y.clone() - &c.y)
        - (b.y.clone() - &a.y) * (d.x.clone() - &c.x);
    let numer = (c.x.clone() - &a.x) * (d.y.clone() - &c.y)
        - (c.y.clone() - &a.y) * (d.x.clone() - &c.x);
    let t = numer / denom;
    Point::new(
        a.x.clone() + t.clone() * (b.x.clone() - &a.x),
        a.y.clone() + t * (b.y.clone() - &a.y),
    )
}

impl<F: Scalar> Kernel<F> for FieldKernel {
    fn orient(a: &Point<F>, b: &Point<F>, c: &Point<F>) -> Orientation {
        let zero = F::from_f32(0.0);
        match cross(a, b, c).cmp(&zero) {
            Ordering::Less => Orientation::Clockwise,
            Ordering::Equal => Orientation::Collinear,
            Ordering::Greater => Orientation::CounterClockwise,
        }
    }

    fn cross_point(first: &Segment<F>, second: &Segment<F>) -> Point<F> {
        field_cross_point(first, second)
    }
}

/// A kernel for `NotNan<f64>` whose orientation predicate is exact.
///
/// Orientation goes through the `robust` crate's adaptive-precision
/// `orient2d`; crossing points are still computed in `f64`, so they are
/// correctly rounded at best. Good enough for inputs whose intersection
/// points are representable; use `Rational` coordinates when they are not.
#[derive(Clone, Copy, Debug)]
pub struct RobustKernel;

impl Kernel<NotNan<f64>> for RobustKernel {
    fn orient(
        a: &Point<NotNan<f64>>,
        b: &Point<NotNan<f64>>,
        c: &Point<NotNan<f64>>,
    ) -> Orientation {
        let coord = |p: &Point<NotNan<f64>>| robust::Coord {
            x: p.x.into_inner(),
            y: p.y.into_inner(),
        };
        let det = robust::orient2d(coord(a), coord(b), coord(c));
        if det < 0.0 {
            Orientation::Clockwise
        } else if det > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Collinear
        }
    }

    fn cross_point(
        first: &Segment<NotNan<f64>>,
        second: &Segment<NotNan<f64>>,
    ) -> Point<NotNan<f64>> {
        field_cross_point(first, second)
    }
}
