//! The boolean-operation variants.
//!
//! All three variants share the sweep engine in [`crate::sweep`]; they
//! differ in what "this event belongs to the result" means and in what the
//! surviving events reduce to. [`ShapedOperation`] handles region against
//! region and rebuilds polygons; [`MixedOperation`] clips a linear operand
//! against a region; [`LinearOperation`] combines two linear operands.

pub mod linear;
pub mod mixed;
mod reconstruct;
pub mod shaped;

pub use linear::LinearOperation;
pub use mixed::MixedOperation;
pub use shaped::ShapedOperation;

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BooleanOp {
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the difference of two sets if it is in the first but
    /// not the second.
    Difference,
    /// A point is in the exclusive-or of two sets if it is in exactly one.
    Xor,
}

impl BooleanOp {
    /// Membership in the combined set, given membership in each operand.
    pub(crate) fn combines(self, first: bool, second: bool) -> bool {
        match self {
            BooleanOp::Union => first || second,
            BooleanOp::Intersection => first && second,
            BooleanOp::Difference => first && !second,
            BooleanOp::Xor => first != second,
        }
    }
}
