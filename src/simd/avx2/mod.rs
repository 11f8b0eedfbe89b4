//! AVX2 SIMD implementation for 256-bit Q15 vector operations.
//!
//! This module runs the Q15 AXPY on Intel's Advanced Vector Extensions 2 (AVX2),
//! sixteen `i16` lanes per register.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: compiled when the build script detects `avx2` on the host;
//!   entered only after `is_x86_feature_detected!("avx2")` succeeds
//!
//! # Available Types
//!
//! - [`i16x16::I16x16`]: 256-bit vector containing 16 packed Q15 samples
//!
//! # Arithmetic
//!
//! - **Multiply**: `vpmulhrsw` computes `(a * b + 2^14) >> 15`, the same
//!   round-half-up rule as RVV `vsmul`. Its one overflow (`-1 * -1` giving
//!   `0x8000`) is patched to `0x7FFF` with a compare and xor.
//! - **Add**: `vpaddsw` saturates natively.

pub mod i16x16;

pub(crate) mod axpy;
