//! Vector-length agnostic saturating Q15 AXPY.
//!
//! `y[i] = sat(a[i] + sat(alpha * b[i] >> 15))` for every `i < n`.
//!
//! The loop never assumes a vector width. Each iteration asks the
//! [`VectorUnit`] how many elements it may take (`set_vl`), processes exactly
//! that many and advances. A final short chunk, or a unit that hands out
//! irregular widths, is handled by the same loop.
//!
//! The kernel allocates nothing, holds no state between calls and has no
//! error path. The safe wrappers below only check slice lengths.

use rayon::prelude::*;

use crate::error::{length_mismatch, Result};
use crate::q15::saturating_q15_axpy_step;
use crate::simd::{Engine, SimdAxpy, VectorUnit};

/// Elements per rayon task in the `par_*` entry points.
///
/// A multiple of every engine's `max_vl` (at most 16 lanes x 8), so a task
/// boundary never splits a full chunk.
pub const PAR_CHUNK_LEN: usize = 8192;

/// Strip-mines `n` elements through `unit`.
///
/// # Safety
///
/// - `a` and `b` must be valid for `n` reads and `y` for `n` writes.
/// - `y` may be the same pointer as `a`. Any other overlap between `y` and
///   the inputs is undefined.
pub unsafe fn q15_axpy_raw_with<U: VectorUnit + ?Sized>(
    unit: &U,
    mut a: *const i16,
    mut b: *const i16,
    mut y: *mut i16,
    mut n: usize,
    alpha: i16,
) {
    while n > 0 {
        // a unit granting 0 or more than asked would hang or overrun
        let vl = unit.set_vl(n).clamp(1, n);

        unit.axpy_chunk(a, b, y, vl, alpha);

        a = a.add(vl);
        b = b.add(vl);
        y = y.add(vl);
        n -= vl;
    }
}

/// Pointer form of the kernel on the detected engine.
///
/// # Safety
///
/// Same contract as [`q15_axpy_raw_with`].
pub unsafe fn q15_axpy_raw(a: *const i16, b: *const i16, y: *mut i16, n: usize, alpha: i16) {
    q15_axpy_raw_with(&Engine::detect(), a, b, y, n, alpha)
}

/// Runs the kernel through `unit`.
///
/// # Panics
///
/// If `a`, `b` and `y` do not all have the same length.
pub fn q15_axpy_with<U: VectorUnit + ?Sized>(
    unit: &U,
    a: &[i16],
    b: &[i16],
    y: &mut [i16],
    alpha: i16,
) {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    assert_eq!(a.len(), y.len(), "Vectors must be the same length");

    unsafe { q15_axpy_raw_with(unit, a.as_ptr(), b.as_ptr(), y.as_mut_ptr(), y.len(), alpha) }
}

/// In-place form: `y` holds `A` on entry and the result on return.
///
/// # Panics
///
/// If `y` and `b` differ in length.
pub fn q15_axpy_inplace_with<U: VectorUnit + ?Sized>(
    unit: &U,
    y: &mut [i16],
    b: &[i16],
    alpha: i16,
) {
    assert_eq!(y.len(), b.len(), "Vectors must be the same length");

    let n = y.len();
    let y = y.as_mut_ptr();
    unsafe { q15_axpy_raw_with(unit, y as *const i16, b.as_ptr(), y, n, alpha) }
}

/// Computes `y = sat(a + alpha * b)` on the detected engine.
///
/// # Panics
///
/// If `a`, `b` and `y` do not all have the same length.
///
/// # Examples
///
/// ```
/// use q15_axpy::kernel::q15_axpy;
///
/// let a = [0i16, 16_384, 32_767];
/// let b = [16_384i16, 16_384, 32_767];
/// let mut y = [0i16; 3];
///
/// q15_axpy(&a, &b, &mut y, 16_384); // alpha = 0.5
/// assert_eq!(y, [8_192, 24_576, 32_767]);
/// ```
pub fn q15_axpy(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
    q15_axpy_with(&Engine::detect(), a, b, y, alpha)
}

/// Like [`q15_axpy`] but reports mismatched lengths instead of panicking.
/// `y` is left untouched on error.
pub fn try_q15_axpy(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) -> Result<()> {
    if a.len() != b.len() || a.len() != y.len() {
        return Err(length_mismatch(a.len(), b.len(), y.len()));
    }
    q15_axpy(a, b, y, alpha);
    Ok(())
}

/// In-place [`q15_axpy`] on the detected engine.
pub fn q15_axpy_inplace(y: &mut [i16], b: &[i16], alpha: i16) {
    q15_axpy_inplace_with(&Engine::detect(), y, b, alpha)
}

/// Splits the buffers into disjoint [`PAR_CHUNK_LEN`] pieces and runs each on
/// the rayon pool. Same output as [`q15_axpy_with`].
pub fn par_q15_axpy_with<U: VectorUnit + Sync + ?Sized>(
    unit: &U,
    a: &[i16],
    b: &[i16],
    y: &mut [i16],
    alpha: i16,
) {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    assert_eq!(a.len(), y.len(), "Vectors must be the same length");

    y.par_chunks_mut(PAR_CHUNK_LEN)
        .zip(a.par_chunks(PAR_CHUNK_LEN))
        .zip(b.par_chunks(PAR_CHUNK_LEN))
        .for_each(|((y_chunk, a_chunk), b_chunk)| {
            q15_axpy_with(unit, a_chunk, b_chunk, y_chunk, alpha);
        });
}

/// [`par_q15_axpy_with`] on the detected engine.
///
/// # Panics
///
/// If `a`, `b` and `y` do not all have the same length.
pub fn par_q15_axpy(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
    par_q15_axpy_with(&Engine::detect(), a, b, y, alpha)
}

/// Parallel [`q15_axpy_inplace`]: `y` holds `A` on entry.
///
/// # Panics
///
/// If `y` and `b` differ in length.
pub fn par_q15_axpy_inplace(y: &mut [i16], b: &[i16], alpha: i16) {
    assert_eq!(y.len(), b.len(), "Vectors must be the same length");

    let engine = Engine::detect();

    y.par_chunks_mut(PAR_CHUNK_LEN)
        .zip(b.par_chunks(PAR_CHUNK_LEN))
        .for_each(|(y_chunk, b_chunk)| {
            q15_axpy_inplace_with(&engine, y_chunk, b_chunk, alpha);
        });
}

/// Reference loop over the truncating model; no vector unit involved.
fn scalar_axpy(y: &mut [i16], x: &[i16], alpha: i16) {
    assert_eq!(y.len(), x.len(), "Vectors must be the same length");

    y.iter_mut()
        .zip(x.iter())
        .for_each(|(y_i, &x_i)| *y_i = saturating_q15_axpy_step(*y_i, x_i, alpha));
}

impl<'x> SimdAxpy<&'x [i16]> for &mut [i16] {
    #[inline(always)]
    fn simd_axpy(self, x: &'x [i16], alpha: i16) {
        q15_axpy_inplace(self, x, alpha)
    }

    #[inline(always)]
    fn par_simd_axpy(self, x: &'x [i16], alpha: i16) {
        par_q15_axpy_inplace(self, x, alpha)
    }

    #[inline(always)]
    fn scalar_axpy(self, x: &'x [i16], alpha: i16) {
        scalar_axpy(self, x, alpha)
    }
}

impl<'x> SimdAxpy<&'x [i16]> for &mut Vec<i16> {
    #[inline(always)]
    fn simd_axpy(self, x: &'x [i16], alpha: i16) {
        self.as_mut_slice().simd_axpy(x, alpha)
    }

    #[inline(always)]
    fn par_simd_axpy(self, x: &'x [i16], alpha: i16) {
        self.as_mut_slice().par_simd_axpy(x, alpha)
    }

    #[inline(always)]
    fn scalar_axpy(self, x: &'x [i16], alpha: i16) {
        self.as_mut_slice().scalar_axpy(x, alpha)
    }
}
