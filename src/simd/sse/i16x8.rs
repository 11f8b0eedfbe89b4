#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ptr;

pub const LANE_COUNT: usize = 8;

/// SSE vector holding 8 packed Q15 samples, `size` of them valid.
#[derive(Copy, Clone, Debug)]
pub struct I16x8 {
    pub size: usize,
    pub elements: __m128i,
}

impl I16x8 {
    /// # Safety
    ///
    /// Requires SSE4.1.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn splat(value: i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm_set1_epi16(value),
        }
    }

    /// # Safety
    ///
    /// Requires SSE4.1; `ptr` must be valid for 8 reads.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn load(ptr: *const i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm_loadu_si128(ptr as *const __m128i),
        }
    }

    /// # Safety
    ///
    /// Requires SSE4.1; `ptr` must be valid for `size` reads.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn load_partial(ptr: *const i16, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut staging = [0i16; LANE_COUNT];
        ptr::copy_nonoverlapping(ptr, staging.as_mut_ptr(), size);

        Self {
            size,
            elements: _mm_loadu_si128(staging.as_ptr() as *const __m128i),
        }
    }

    /// # Safety
    ///
    /// Requires SSE4.1; `ptr` must be valid for 8 writes.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn store_at(&self, ptr: *mut i16) {
        _mm_storeu_si128(ptr as *mut __m128i, self.elements);
    }

    /// # Safety
    ///
    /// Requires SSE4.1; `ptr` must be valid for `self.size` writes.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn store_at_partial(&self, ptr: *mut i16) {
        let mut staging = [0i16; LANE_COUNT];
        _mm_storeu_si128(staging.as_mut_ptr() as *mut __m128i, self.elements);
        ptr::copy_nonoverlapping(staging.as_ptr(), ptr, self.size);
    }

    /// # Safety
    ///
    /// Requires SSE4.1.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn mul_q15(&self, rhs: Self) -> Self {
        let product = _mm_mulhrs_epi16(self.elements, rhs.elements);
        let overflow = _mm_cmpeq_epi16(product, _mm_set1_epi16(i16::MIN));

        Self {
            size: self.size,
            elements: _mm_xor_si128(product, overflow),
        }
    }

    /// # Safety
    ///
    /// Requires SSE4.1.
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub unsafe fn saturating_add(&self, rhs: Self) -> Self {
        Self {
            size: self.size,
            elements: _mm_adds_epi16(self.elements, rhs.elements),
        }
    }
}
