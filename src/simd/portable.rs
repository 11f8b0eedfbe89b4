//! Portable backend: plain scalar lanes with the rounded Q15 rule.
//!
//! Always available. It gives the same result as the hardware backends, bit
//! for bit, so it is also the stand-in on targets without a compiled SIMD path.

use crate::q15::saturating_q15_axpy_step_rounded;

/// Lanes per register. Nothing in this backend needs a register, but the
/// width keeps `max_vl` comparable with the 128-bit backends.
pub(crate) const LANE_COUNT: usize = 8;

/// # Safety
///
/// See [`VectorUnit::axpy_chunk`](crate::simd::VectorUnit::axpy_chunk).
#[inline]
pub(crate) unsafe fn axpy_chunk(a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
    for i in 0..vl {
        // both operands are read before the store, so `y == a` is fine
        let (a_i, b_i) = (*a.add(i), *b.add(i));
        *y.add(i) = saturating_q15_axpy_step_rounded(a_i, b_i, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_matches_rounded_model() {
        let a = [0i16, 100, -100, 32_767, -32_768, 5];
        let b = [16_384i16, -32_768, 32_767, 32_767, -32_768, 3];
        let alpha = 16_384;
        let mut y = [0i16; 6];

        unsafe { axpy_chunk(a.as_ptr(), b.as_ptr(), y.as_mut_ptr(), a.len(), alpha) };

        for i in 0..a.len() {
            assert_eq!(y[i], saturating_q15_axpy_step_rounded(a[i], b[i], alpha));
        }
    }

    #[test]
    fn test_chunk_writes_only_vl_elements() {
        let a = [1i16; 4];
        let b = [1i16; 4];
        let mut y = [-7i16; 4];

        unsafe { axpy_chunk(a.as_ptr(), b.as_ptr(), y.as_mut_ptr(), 2, 0) };

        assert_eq!(y, [1, 1, -7, -7]);
    }
}
