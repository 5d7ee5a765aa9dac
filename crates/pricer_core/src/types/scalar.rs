//! Scalar conversion helpers for generic `T: Float` code.

use num_traits::Float;

/// Convert an `f64` literal into the working float type.
///
/// Every `Float` implementation in use (`f32`, `f64`) can represent the
/// literals this crate needs; any type that cannot yields NaN, which then
/// propagates visibly through the computation.
///
/// # Example
///
/// ```
/// use pricer_core::types::constant;
///
/// let half: f32 = constant(0.5);
/// assert_eq!(half, 0.5_f32);
/// ```
#[inline]
pub fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Convert a generic float to `f64` for diagnostics and error payloads.
#[inline]
pub fn lossy_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
