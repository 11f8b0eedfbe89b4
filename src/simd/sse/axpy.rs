use crate::simd::sse::i16x8::{self, I16x8};

/// SSE4.1 chunk body; same shape as the AVX2 one at eight lanes.
///
/// # Safety
///
/// Requires SSE4.1, plus the pointer contract of
/// [`VectorUnit::axpy_chunk`](crate::simd::VectorUnit::axpy_chunk).
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn axpy_chunk(a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
    let step = i16x8::LANE_COUNT;

    let nb_lanes = vl - (vl % step);
    let rem_lanes = vl - nb_lanes;

    let alpha = I16x8::splat(alpha);

    for i in (0..nb_lanes).step_by(step) {
        let va = I16x8::load(a.add(i));
        let vb = I16x8::load(b.add(i));
        va.saturating_add(vb.mul_q15(alpha)).store_at(y.add(i));
    }

    if rem_lanes > 0 {
        let va = I16x8::load_partial(a.add(nb_lanes), rem_lanes);
        let vb = I16x8::load_partial(b.add(nb_lanes), rem_lanes);
        va.saturating_add(vb.mul_q15(alpha))
            .store_at_partial(y.add(nb_lanes));
    }
}
