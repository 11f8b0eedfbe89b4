//! Saturating Q15 fixed-point AXPY.
//!
//! `y[i] = sat(a[i] + sat(alpha * b[i] >> 15))`, strip-mined through whatever
//! vector unit the running CPU offers (AVX2, SSE4.1, NEON or portable scalar
//! lanes). The chunk width is a runtime property. Output never depends on it.
//!
//! ```
//! use q15_axpy::q15::from_f32;
//! use q15_axpy::simd::SimdAxpy;
//!
//! let mut mix = vec![from_f32(0.25); 100];
//! let voice = vec![from_f32(0.5); 100];
//!
//! mix.simd_axpy(voice.as_slice(), from_f32(0.5));
//! assert!(mix.iter().all(|&s| s == from_f32(0.5)));
//! ```

pub mod error;
pub mod kernel;
pub mod q15;
pub mod simd;
pub mod verify;

pub use error::{Q15Error, Result};
pub use kernel::{par_q15_axpy, q15_axpy, q15_axpy_inplace, q15_axpy_raw, try_q15_axpy};
