/// A vector unit that the strip-mining loop drives one chunk at a time.
///
/// This is the `vsetvl` / vector-op split of a vector-length agnostic ISA:
/// the loop asks the unit how many elements it may process next, then asks
/// it to process exactly that many. Output must not depend on how the
/// widths are chosen.
pub trait VectorUnit {
    /// Widest chunk this unit processes in one step, in `i16` elements.
    fn max_vl(&self) -> usize;

    /// Chunk width granted for the next step when `remaining` elements are
    /// left. Must lie in `1..=remaining` whenever `remaining > 0`.
    #[inline(always)]
    fn set_vl(&self, remaining: usize) -> usize {
        remaining.min(self.max_vl())
    }

    /// Computes `y[i] = sat(a[i] + sat(alpha * b[i] >> 15))` for `i < vl`.
    ///
    /// # Safety
    ///
    /// `a` and `b` must be valid for `vl` reads and `y` for `vl` writes.
    /// `y` may equal `a` (or `b`); any other overlap is undefined.
    unsafe fn axpy_chunk(&self, a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16);
}

impl<U: VectorUnit + ?Sized> VectorUnit for &U {
    #[inline(always)]
    fn max_vl(&self) -> usize {
        (**self).max_vl()
    }

    #[inline(always)]
    fn set_vl(&self, remaining: usize) -> usize {
        (**self).set_vl(remaining)
    }

    #[inline(always)]
    unsafe fn axpy_chunk(&self, a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
        (**self).axpy_chunk(a, b, y, vl, alpha)
    }
}

/// In-place saturating AXPY on an accumulator slice: `self = sat(self + alpha * x)`.
pub trait SimdAxpy<Rhs = Self> {
    fn simd_axpy(self, x: Rhs, alpha: i16);
    fn par_simd_axpy(self, x: Rhs, alpha: i16);
    fn scalar_axpy(self, x: Rhs, alpha: i16);
}
