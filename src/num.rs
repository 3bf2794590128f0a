//! A thin abstraction over the scalar types we support.

use std::hash::Hash;

use malachite::Rational;
use ordered_float::NotNan;

/// A trait for abstracting over the properties we need from coordinate types.
///
/// The sweep only ever adds, subtracts, multiplies, divides and compares
/// coordinates, so any ordered field works. Exactness of the whole kernel is
/// inherited from the scalar: with [`malachite::Rational`] every predicate and
/// every computed intersection point is exact; with the float instantiations
/// you get speed and the usual rounding caveats.
///
/// This is implemented for `malachite::Rational`, `NotNan<f64>`, and `NotNan<f32>`.
pub trait Scalar:
    Sized
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::Mul<Self, Output = Self>
    + std::ops::Div<Self, Output = Self>
    + std::ops::Neg<Output = Self>
    + for<'a> std::ops::Add<&'a Self, Output = Self>
    + for<'a> std::ops::Sub<&'a Self, Output = Self>
    + for<'a> std::ops::Mul<&'a Self, Output = Self>
    + for<'a> std::ops::Div<&'a Self, Output = Self>
    + Clone
    + std::fmt::Debug
    + Ord
    + Eq
    + Hash
    + 'static
{
    /// Convert from an `f32`. This is allowed to panic if `x` is infinite or NaN.
    ///
    /// Every small integer is exactly representable in all our scalar types,
    /// so this is the conversion used by tests and internal constants.
    fn from_f32(x: f32) -> Self;

    /// Convert this number to a rational, for exact computation.
    fn to_exact(&self) -> Rational;

    /// The absolute value.
    fn abs(self) -> Self;
}

impl Scalar for Rational {
    fn from_f32(x: f32) -> Self {
        Rational::try_from(x).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.clone()
    }

    fn abs(self) -> Self {
        <Rational as malachite::num::arithmetic::traits::Abs>::abs(self)
    }
}

impl Scalar for NotNan<f64> {
    fn from_f32(x: f32) -> Self {
        NotNan::try_from(f64::from(x)).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.into_inner().try_into().unwrap()
    }

    fn abs(self) -> Self {
        self.into_inner().abs().try_into().unwrap()
    }
}

impl Scalar for NotNan<f32> {
    fn from_f32(x: f32) -> Self {
        NotNan::try_from(x).unwrap()
    }

    fn to_exact(&self) -> Rational {
        self.into_inner().try_into().unwrap()
    }

    fn abs(self) -> Self {
        self.into_inner().abs().try_into().unwrap()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    // Kind of like Arbitrary, but
    // - it's a local trait, so we can impl it for whatever we want, and
    // - it only returns "reasonable" values.
    //
    // For the sweep tests "reasonable" means small integer coordinates:
    // exact in every scalar type, and tie-heavy enough to exercise the
    // degenerate branches.
    pub trait Reasonable {
        type Strategy: Strategy<Value = Self>;
        fn reasonable() -> Self::Strategy;
    }

    impl<S: Reasonable, T: Reasonable> Reasonable for (S, T) {
        type Strategy = (S::Strategy, T::Strategy);

        fn reasonable() -> Self::Strategy {
            (S::reasonable(), T::reasonable())
        }
    }

    impl Reasonable for Rational {
        type Strategy = BoxedStrategy<Rational>;

        fn reasonable() -> Self::Strategy {
            (-16i32..16).prop_map(Rational::from).boxed()
        }
    }

    impl Reasonable for NotNan<f64> {
        type Strategy = BoxedStrategy<NotNan<f64>>;

        fn reasonable() -> Self::Strategy {
            (-16i32..16)
                .prop_map(|x| NotNan::new(f64::from(x)).unwrap())
                .boxed()
        }
    }

    #[test]
    fn from_f32_round_trips_small_integers() {
        for x in -100i32..100 {
            assert_eq!(Rational::from_f32(x as f32), Rational::from(x));
        }
    }
}
