use crate::simd::avx2::i16x16::{self, I16x16};

/// Runs one strip-mined chunk of `vl` elements through AVX2 registers.
///
/// # Safety
///
/// Requires AVX2, plus the pointer contract of
/// [`VectorUnit::axpy_chunk`](crate::simd::VectorUnit::axpy_chunk).
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn axpy_chunk(a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
    let step = i16x16::LANE_COUNT;

    let nb_lanes = vl - (vl % step);
    let rem_lanes = vl - nb_lanes;

    let alpha = I16x16::splat(alpha);

    for i in (0..nb_lanes).step_by(step) {
        axpy_block(a.add(i), b.add(i), y.add(i), alpha);
    }

    if rem_lanes > 0 {
        axpy_partial_block(
            a.add(nb_lanes),
            b.add(nb_lanes),
            y.add(nb_lanes),
            rem_lanes,
            alpha,
        );
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn axpy_block(a: *const i16, b: *const i16, y: *mut i16, alpha: I16x16) {
    let a_chunk_simd = I16x16::load(a);
    let b_chunk_simd = I16x16::load(b);
    a_chunk_simd
        .saturating_add(b_chunk_simd.mul_q15(alpha))
        .store_at(y);
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn axpy_partial_block(
    a: *const i16,
    b: *const i16,
    y: *mut i16,
    size: usize,
    alpha: I16x16,
) {
    let a_chunk_simd = I16x16::load_partial(a, size);
    let b_chunk_simd = I16x16::load_partial(b, size);
    a_chunk_simd
        .saturating_add(b_chunk_simd.mul_q15(alpha))
        .store_at_partial(y);
}
