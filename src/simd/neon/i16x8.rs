#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ptr;

pub const LANE_COUNT: usize = 8;

/// A NEON vector of 8 Q15 samples
#[derive(Copy, Clone, Debug)]
pub struct I16x8 {
    pub size: usize,
    pub elements: int16x8_t,
}

impl I16x8 {
    /// # Safety
    ///
    /// Requires NEON.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn splat(value: i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: vdupq_n_s16(value),
        }
    }

    /// # Safety
    ///
    /// Requires NEON; `ptr` must be valid for 8 reads.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn load(ptr: *const i16) -> Self {
        Self {
            size: LANE_COUNT,
            elements: vld1q_s16(ptr),
        }
    }

    /// # Safety
    ///
    /// Requires NEON; `ptr` must be valid for `size` reads.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn load_partial(ptr: *const i16, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        // zero padded so the unused lanes hold defined values
        let mut staging = [0i16; LANE_COUNT];
        ptr::copy_nonoverlapping(ptr, staging.as_mut_ptr(), size);

        Self {
            size,
            elements: vld1q_s16(staging.as_ptr()),
        }
    }

    /// # Safety
    ///
    /// Requires NEON; `ptr` must be valid for 8 writes.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn store_at(&self, ptr: *mut i16) {
        vst1q_s16(ptr, self.elements);
    }

    /// # Safety
    ///
    /// Requires NEON; `ptr` must be valid for `self.size` writes.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn store_at_partial(&self, ptr: *mut i16) {
        let mut staging = [0i16; LANE_COUNT];
        vst1q_s16(staging.as_mut_ptr(), self.elements);
        ptr::copy_nonoverlapping(staging.as_ptr(), ptr, self.size);
    }

    /// # Safety
    ///
    /// Requires NEON.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn mul_q15(&self, rhs: Self) -> Self {
        Self {
            size: self.size,
            elements: vqrdmulhq_s16(self.elements, rhs.elements),
        }
    }

    /// # Safety
    ///
    /// Requires NEON.
    #[inline]
    #[target_feature(enable = "neon")]
    pub unsafe fn saturating_add(&self, rhs: Self) -> Self {
        Self {
            size: self.size,
            elements: vqaddq_s16(self.elements, rhs.elements),
        }
    }
}
