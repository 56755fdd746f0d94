use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the population model.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An autonomous one-dimensional rate law `dp/dt = f(p)`.
pub trait RateLaw<T: Scalar> {
    /// Evaluates `f(p)`.
    fn rate(&self, p: T) -> T;

    /// Evaluates `f'(p)`, the 1x1 Jacobian of the flow at `p`.
    fn slope(&self, p: T) -> T;
}
