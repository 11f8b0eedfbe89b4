//! Q15 fixed-point arithmetic model.
//!
//! A Q15 sample is an `i16` whose stored value `v` stands for `v / 32768.0`,
//! so the representable range is `[-1.0, 1.0)`. Every intermediate here is
//! computed in `i32`, which holds any product of two Q15 values.
//!
//! Two multiply rules are provided:
//!
//! - [`mul_q15`] truncates (`(alpha * b) >> 15`, an arithmetic shift). It is
//!   the golden reference the kernel is verified against.
//! - [`mul_q15_rounded`] rounds half up (`(alpha * b + 2^14) >> 15`). This is
//!   what `vsmul` (rnu), `pmulhrsw` and `sqrdmulh` compute, so every vector
//!   backend in this crate matches it bit for bit.
//!
//! The rounded product is either the truncated product or one above it, so
//! the two step functions never differ by more than one ULP.

/// Largest Q15 value, `1 - 2^-15`.
pub const Q15_MAX: i16 = i16::MAX;

/// Smallest Q15 value, `-1.0`.
pub const Q15_MIN: i16 = i16::MIN;

/// Number of fractional bits.
pub const FRAC_BITS: u32 = 15;

/// `0.5` in Q15.
pub const Q15_HALF: i16 = 1 << (FRAC_BITS - 1);

const SCALE: f32 = (1u32 << FRAC_BITS) as f32;

const ROUND_BIAS: i32 = 1 << (FRAC_BITS - 1);

/// Clamps a 32-bit intermediate into the Q15 range.
#[inline(always)]
pub fn saturate(value: i32) -> i16 {
    value.clamp(Q15_MIN as i32, Q15_MAX as i32) as i16
}

/// Truncating Q15 multiply with saturation.
///
/// `-1 * -1` would be `+1.0`, which Q15 cannot hold; it saturates to
/// [`Q15_MAX`] instead of wrapping to `-32768`.
#[inline(always)]
pub fn mul_q15(alpha: i16, b: i16) -> i16 {
    saturate((alpha as i32 * b as i32) >> FRAC_BITS)
}

/// Round-half-up Q15 multiply with saturation.
#[inline(always)]
pub fn mul_q15_rounded(alpha: i16, b: i16) -> i16 {
    saturate((alpha as i32 * b as i32 + ROUND_BIAS) >> FRAC_BITS)
}

/// Saturating Q15 addition.
#[inline(always)]
pub fn saturating_add(a: i16, b: i16) -> i16 {
    saturate(a as i32 + b as i32)
}

/// One element of the reference AXPY: `sat(a + sat((alpha * b) >> 15))`.
///
/// # Examples
///
/// ```
/// use q15_axpy::q15::saturating_q15_axpy_step;
///
/// // 0.25 + 0.5 * 0.5 = 0.5
/// assert_eq!(saturating_q15_axpy_step(8192, 16384, 16384), 16384);
/// // Both stages saturate instead of wrapping.
/// assert_eq!(saturating_q15_axpy_step(32767, 32767, 32767), 32767);
/// assert_eq!(saturating_q15_axpy_step(0, -32768, -32768), 32767);
/// ```
#[inline(always)]
pub fn saturating_q15_axpy_step(a: i16, b: i16, alpha: i16) -> i16 {
    saturating_add(a, mul_q15(alpha, b))
}

/// One element of the AXPY as the vector backends compute it.
#[inline(always)]
pub fn saturating_q15_axpy_step_rounded(a: i16, b: i16, alpha: i16) -> i16 {
    saturating_add(a, mul_q15_rounded(alpha, b))
}

/// Converts a Q15 sample to its real value.
#[inline]
pub fn to_f32(value: i16) -> f32 {
    value as f32 / SCALE
}

/// Converts a real value to Q15, rounding to nearest and saturating.
///
/// `NaN` maps to zero.
#[inline]
pub fn from_f32(value: f32) -> i16 {
    (value * SCALE).round().clamp(Q15_MIN as f32, Q15_MAX as f32) as i16
}
