//! ARM NEON SIMD implementation for 128-bit Q15 vector operations.
//!
//! This module runs the Q15 AXPY on ARM's Advanced SIMD (NEON) instruction set,
//! eight `i16` lanes per register. NEON is part of every AArch64 core,
//! including Apple Silicon, AWS Graviton and mobile devices.
//!
//! # Architecture Requirements
//!
//! - **Target Architecture**: AArch64
//! - **Compilation**: compiled when the build script detects `neon`/`asimd`
//!   on the host; entered after `is_aarch64_feature_detected!("neon")`
//!
//! # Arithmetic
//!
//! NEON has the two DSP instructions the kernel needs:
//!
//! - `sqrdmulh` (`vqrdmulhq_s16`): saturating rounding doubling multiply high,
//!   `sat((2 * a * b + 2^15) >> 16)`. For Q15 operands this is the round-half-up
//!   Q15 product, and `-1 * -1` already saturates to `0x7FFF`.
//! - `sqadd` (`vqaddq_s16`): saturating add.

pub mod i16x8;

pub(crate) mod axpy;
