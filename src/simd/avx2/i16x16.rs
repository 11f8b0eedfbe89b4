//! AVX2 16-lane Q15 vector.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ptr;

/// Number of i16 elements in a 256-bit AVX2 register.
pub const LANE_COUNT: usize = 16;

/// AVX2 vector holding 16 packed Q15 samples.
///
/// `size` counts the valid lanes (1-16). Partial vectors are zero padded and
/// only `size` lanes are ever written back.
///
/// Every method is compiled with `avx2` enabled and is therefore `unsafe`:
/// the caller must have checked that the CPU supports AVX2.
#[derive(Copy, Clone, Debug)]
pub struct I16x16 {
    pub size: usize,
    pub elements: __m256i,
}

impl I16x16 {
    /// Broadcasts `value` to all lanes.
    ///
    /// # Safety
    ///
    /// Requires AVX2.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn splat(value: i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_set1_epi16(value),
        }
    }

    /// Loads 16 samples.
    ///
    /// # Safety
    ///
    /// Requires AVX2; `ptr` must be valid for 16 reads.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn load(ptr: *const i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_loadu_si256(ptr as *const __m256i),
        }
    }

    /// Loads `size < 16` samples, zero filling the upper lanes.
    ///
    /// # Safety
    ///
    /// Requires AVX2; `ptr` must be valid for `size` reads.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn load_partial(ptr: *const i16, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut staging = [0i16; LANE_COUNT];
        ptr::copy_nonoverlapping(ptr, staging.as_mut_ptr(), size);

        Self {
            size,
            elements: _mm256_loadu_si256(staging.as_ptr() as *const __m256i),
        }
    }

    /// Stores all 16 lanes.
    ///
    /// # Safety
    ///
    /// Requires AVX2; `ptr` must be valid for 16 writes.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn store_at(&self, ptr: *mut i16) {
        _mm256_storeu_si256(ptr as *mut __m256i, self.elements);
    }

    /// Stores the first `self.size` lanes.
    ///
    /// # Safety
    ///
    /// Requires AVX2; `ptr` must be valid for `self.size` writes.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn store_at_partial(&self, ptr: *mut i16) {
        let mut staging = [0i16; LANE_COUNT];
        _mm256_storeu_si256(staging.as_mut_ptr() as *mut __m256i, self.elements);
        ptr::copy_nonoverlapping(staging.as_ptr(), ptr, self.size);
    }

    /// Round-half-up Q15 multiply with saturation.
    ///
    /// # Safety
    ///
    /// Requires AVX2.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn mul_q15(&self, rhs: Self) -> Self {
        let product = _mm256_mulhrs_epi16(self.elements, rhs.elements);
        // only -1 * -1 lands on 0x8000; xor with the all-ones mask turns it into 0x7FFF
        let overflow = _mm256_cmpeq_epi16(product, _mm256_set1_epi16(i16::MIN));

        Self {
            size: self.size,
            elements: _mm256_xor_si256(product, overflow),
        }
    }

    /// Lane-wise saturating add.
    ///
    /// # Safety
    ///
    /// Requires AVX2.
    #[inline]
    #[target_feature(enable = "avx2")]
    pub unsafe fn saturating_add(&self, rhs: Self) -> Self {
        Self {
            size: self.size,
            elements: _mm256_adds_epi16(self.elements, rhs.elements),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q15::{mul_q15_rounded, saturating_add};

    fn avx2() -> bool {
        is_x86_feature_detected!("avx2")
    }

    fn lanes(v: &I16x16) -> [i16; LANE_COUNT] {
        let mut out = [0i16; LANE_COUNT];
        unsafe { v.store_at(out.as_mut_ptr()) };
        out
    }

    #[test]
    fn test_mul_q15_matches_scalar_model() {
        if !avx2() {
            return;
        }
        let a: [i16; LANE_COUNT] = [
            -32_768, -32_768, 32_767, 32_767, 16_384, 16_384, -3, 3, 1, -1, 0, 12_345, -12_345,
            20_000, -20_000, 7,
        ];
        let b: [i16; LANE_COUNT] = [
            -32_768, 32_767, 32_767, -32_768, 3, -3, 16_384, 16_384, -1, -1, 31_000, 2, 2,
            20_000, 20_000, -7,
        ];

        let product = unsafe { I16x16::load(a.as_ptr()).mul_q15(I16x16::load(b.as_ptr())) };
        let got = lanes(&product);

        for i in 0..LANE_COUNT {
            assert_eq!(got[i], mul_q15_rounded(a[i], b[i]), "lane {i}: {} * {}", a[i], b[i]);
        }
    }

    #[test]
    fn test_saturating_add_clamps() {
        if !avx2() {
            return;
        }
        let a = [32_000i16; LANE_COUNT];
        let b = [1_000i16; LANE_COUNT];
        let sum = unsafe { I16x16::load(a.as_ptr()).saturating_add(I16x16::load(b.as_ptr())) };
        assert!(lanes(&sum).iter().all(|&v| v == saturating_add(32_000, 1_000)));
    }

    #[test]
    fn test_partial_round_trip_leaves_tail_untouched() {
        if !avx2() {
            return;
        }
        let src = [1i16, 2, 3, 4, 5];
        let mut dst = [-1i16; 8];

        unsafe {
            let v = I16x16::load_partial(src.as_ptr(), src.len());
            assert_eq!(v.size, 5);
            v.store_at_partial(dst.as_mut_ptr());
        }

        assert_eq!(dst, [1, 2, 3, 4, 5, -1, -1, -1]);
    }
}
