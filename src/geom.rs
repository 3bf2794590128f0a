//! Geometric primitives, like points, segments and polygons.

use crate::kernel::{Kernel, Orientation};
use crate::num::Scalar;

/// A two-dimensional point.
///
/// Points are sorted by `x` and then by `y`, for the convenience of our
/// sweep-line algorithm (which moves in increasing `x`, bottom to top at
/// ties).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point<F: Scalar> {
    /// Horizontal coordinate.
    pub x: F,
    /// Vertical coordinate.
    pub y: F,
}

impl<F: Scalar> std::fmt::Debug for Point<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<F: Scalar> Point<F> {
    /// Create a new point.
    pub fn new(x: F, y: F) -> Self {
        Point { x, y }
    }
}

impl<F: Scalar> From<(F, F)> for Point<F> {
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points.
///
/// Input segments may point in either direction; the sweep normalizes them
/// internally, and all *output* segments satisfy `start < end`.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Segment<F: Scalar> {
    /// One endpoint.
    pub start: Point<F>,
    /// The other endpoint.
    pub end: Point<F>,
}

impl<F: Scalar> std::fmt::Debug for Segment<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.start, self.end)
    }
}

impl<F: Scalar> Segment<F> {
    /// Create a new segment.
    pub fn new(start: Point<F>, end: Point<F>) -> Self {
        Self { start, end }
    }

    /// Is this a zero-length segment?
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// This segment with its endpoints in sweep order (`start < end`).
    pub fn normalized(&self) -> Segment<F> {
        if self.start <= self.end {
            self.clone()
        } else {
            Segment::new(self.end.clone(), self.start.clone())
        }
    }

    /// Is `p` strictly between this segment's endpoints, assuming it already
    /// lies on the supporting line?
    pub(crate) fn collinear_point_is_interior(&self, p: &Point<F>) -> bool {
        let (lo, hi) = if self.start <= self.end {
            (&self.start, &self.end)
        } else {
            (&self.end, &self.start)
        };
        lo < p && p < hi
    }
}

/// A closed polyline, stored as its vertex sequence.
///
/// The edge from the last vertex back to the first is implicit. A contour on
/// its own doesn't know whether it bounds a region from the inside or the
/// outside; that's the [`Polygon`]'s business.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Contour<F: Scalar> {
    /// The vertices, in order. Not repeated at the end.
    pub vertices: Vec<Point<F>>,
}

fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(xs.last().zip(xs.first()))
}

impl<F: Scalar> Contour<F> {
    /// Create a contour from a vertex sequence.
    pub fn new(vertices: Vec<Point<F>>) -> Self {
        Self { vertices }
    }

    /// Twice the signed area, positive when the vertices wind
    /// counterclockwise.
    pub fn doubled_signed_area(&self) -> F {
        let mut acc = F::from_f32(0.0);
        for (a, b) in cyclic_pairs(&self.vertices) {
            acc = acc + (a.x.clone() * &b.y - b.x.clone() * &a.y);
        }
        acc
    }

    /// Do the vertices wind counterclockwise?
    pub fn is_counterclockwise(&self) -> bool {
        self.doubled_signed_area() > F::from_f32(0.0)
    }

    /// Reverse the winding direction in place.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// The directed edges of this contour, in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = Segment<F>> + '_ {
        cyclic_pairs(&self.vertices).map(|(a, b)| Segment::new(a.clone(), b.clone()))
    }
}

impl<F: Scalar, P: Into<Point<F>>> FromIterator<P> for Contour<F> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Contour::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A polygon: one outer border and any number of holes.
///
/// Reconstruction emits borders counterclockwise and holes clockwise; input
/// polygons may use any winding (we re-orient them when converting to
/// boundary segments).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Polygon<F: Scalar> {
    /// The outer boundary.
    pub border: Contour<F>,
    /// The holes, each a closed contour inside the border.
    pub holes: Vec<Contour<F>>,
}

impl<F: Scalar> Polygon<F> {
    /// Create a polygon from a border and holes.
    pub fn new(border: Contour<F>, holes: Vec<Contour<F>>) -> Self {
        Self { border, holes }
    }

    /// A polygon with no holes.
    pub fn from_border(border: Contour<F>) -> Self {
        Self::new(border, Vec::new())
    }
}

/// The boundary of `polygon` as direction-normalized segments, each tagged
/// with whether the polygon's interior lies to the left of the segment in
/// its stored (normalized) direction.
///
/// We walk the border counterclockwise and the holes clockwise, so the
/// interior is always to the left of the walk; the tag is then just "did
/// normalization keep the walk direction".
pub fn polygon_to_oriented_segments<F: Scalar>(polygon: &Polygon<F>) -> Vec<(Segment<F>, bool)> {
    let mut result = Vec::new();
    let mut push_contour = |contour: &Contour<F>, want_ccw: bool| {
        let ccw = contour.is_counterclockwise();
        let vertices = &contour.vertices;
        let n = vertices.len();
        for i in 0..n {
            let (a, b) = if ccw == want_ccw {
                (&vertices[i], &vertices[(i + 1) % n])
            } else {
                (&vertices[(i + 1) % n], &vertices[i])
            };
            if a == b {
                continue;
            }
            let kept = a < b;
            let seg = if kept {
                Segment::new(a.clone(), b.clone())
            } else {
                Segment::new(b.clone(), a.clone())
            };
            result.push((seg, kept));
        }
    };
    push_contour(&polygon.border, true);
    for hole in &polygon.holes {
        push_contour(hole, false);
    }
    result
}

/// An axis-aligned bounding box.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox<F: Scalar> {
    /// The smallest coordinates.
    pub min: Point<F>,
    /// The largest coordinates.
    pub max: Point<F>,
}

impl<F: Scalar> BoundingBox<F> {
    /// The bounding box of a set of points, or `None` if it's empty.
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point<F>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut ret = BoundingBox {
            min: first.clone(),
            max: first.clone(),
        };
        for p in iter {
            if p.x < ret.min.x {
                ret.min.x = p.x.clone();
            }
            if p.y < ret.min.y {
                ret.min.y = p.y.clone();
            }
            if p.x > ret.max.x {
                ret.max.x = p.x.clone();
            }
            if p.y > ret.max.y {
                ret.max.y = p.y.clone();
            }
        }
        Some(ret)
    }

    /// The bounding box of a collection of segments.
    pub fn of_segments<'a>(segments: impl IntoIterator<Item = &'a Segment<F>>) -> Option<Self> {
        BoundingBox::of_points(
            segments
                .into_iter()
                .flat_map(|seg| [&seg.start, &seg.end]),
        )
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        BoundingBox {
            min: Point::new(
                self.min.x.clone().min(other.min.x.clone()),
                self.min.y.clone().min(other.min.y.clone()),
            ),
            max: Point::new(
                self.max.x.clone().max(other.max.x.clone()),
                self.max.y.clone().max(other.max.y.clone()),
            ),
        }
    }

    /// Do the two boxes share no point?
    pub fn disjoint(&self, other: &Self) -> bool {
        self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y
    }
}

/// Where a point sits relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Location {
    /// Strictly inside.
    Interior,
    /// On the boundary.
    Boundary,
    /// Strictly outside.
    Exterior,
}

/// Locate `p` relative to the region bounded by `contour`.
///
/// Exact for exact scalars: boundary incidence is decided by the orienteer,
/// and interiority by ray-crossing parity with the usual half-open rule so
/// that vertices aren't double-counted.
pub fn locate_point_in_contour<F: Scalar, K: Kernel<F>>(
    p: &Point<F>,
    contour: &Contour<F>,
) -> Location {
    let mut crossings = 0usize;
    for edge in contour.edges() {
        let (a, b) = (&edge.start, &edge.end);
        if K::orient(a, b, p) == Orientation::Collinear {
            let on_edge = if a.x != b.x {
                (a.x.clone().min(b.x.clone()) <= p.x) && (p.x <= a.x.clone().max(b.x.clone()))
            } else {
                (a.y.clone().min(b.y.clone()) <= p.y) && (p.y <= a.y.clone().max(b.y.clone()))
            };
            if on_edge {
                return Location::Boundary;
            }
        }
        // Count edges crossing a ray shot in +x. Half-open in y: an edge
        // "crosses" if its y-span contains p.y with the lower end included
        // and the upper excluded, so shared vertices aren't double-counted.
        let (lo, hi, upward) = if a.y <= b.y { (a, b, true) } else { (b, a, false) };
        if lo.y <= p.y && p.y < hi.y {
            let turn = K::orient(a, b, p);
            let crossing = if upward {
                turn == Orientation::CounterClockwise
            } else {
                turn == Orientation::Clockwise
            };
            if crossing {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locate `p` relative to `polygon` (border minus holes).
pub fn locate_point_in_polygon<F: Scalar, K: Kernel<F>>(
    p: &Point<F>,
    polygon: &Polygon<F>,
) -> Location {
    match locate_point_in_contour::<F, K>(p, &polygon.border) {
        Location::Exterior => Location::Exterior,
        Location::Boundary => Location::Boundary,
        Location::Interior => {
            for hole in &polygon.holes {
                match locate_point_in_contour::<F, K>(p, hole) {
                    Location::Interior => return Location::Exterior,
                    Location::Boundary => return Location::Boundary,
                    Location::Exterior => {}
                }
            }
            Location::Interior
        }
    }
}
