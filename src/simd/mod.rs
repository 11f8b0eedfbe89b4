#[cfg(avx2)]
pub mod avx2;

#[cfg(sse)]
pub mod sse;

#[cfg(neon)]
pub mod neon;

pub(crate) mod portable;

mod engine;
pub mod traits;

pub use engine::{Backend, Engine, RegisterGroup};
pub use traits::{SimdAxpy, VectorUnit};
