//! SSE4.1 SIMD implementation for 128-bit Q15 vector operations.
//!
//! The baseline x86 path for CPUs without AVX2: eight `i16` lanes per
//! register. `pmulhrsw` is an SSSE3 instruction, which SSE4.1 implies.
//! The arithmetic is the same as [`crate::simd::avx2`], at half the width.

pub mod i16x8;

pub(crate) mod axpy;
