//! Runtime backend detection and the [`Engine`] vector unit.
//!
//! A backend is compiled in when the build script detected its CPU feature on
//! the build host (`cfg(avx2)`, `cfg(sse)`, `cfg(neon)`), and used only when
//! the running CPU also reports it. The selection is made once per process.
//!
//! Environment variable overrides for testing/debugging, read on first use:
//! - `Q15_AXPY_FORCE_PORTABLE=1`: use the portable backend
//! - `Q15_AXPY_FORCE_SSE=1`: skip AVX2 (x86 only)

use std::sync::OnceLock;

use crate::error::{unsupported_backend, Result};
use crate::simd::traits::VectorUnit;

#[cfg(avx2)]
use crate::simd::avx2;
#[cfg(neon)]
use crate::simd::neon;
use crate::simd::portable;
#[cfg(sse)]
use crate::simd::sse;

/// Instruction set a chunk is executed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar lanes, always available.
    Portable,
    /// 128-bit SSE4.1 (x86/x86_64).
    Sse41,
    /// 256-bit AVX2 (x86/x86_64).
    Avx2,
    /// 128-bit NEON (aarch64).
    Neon,
}

impl Backend {
    /// Every backend, best first.
    pub const ALL: [Backend; 4] = [
        Backend::Avx2,
        Backend::Sse41,
        Backend::Neon,
        Backend::Portable,
    ];

    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Portable => "Portable (scalar)",
            Backend::Sse41 => "SSE4.1 (128-bit)",
            Backend::Avx2 => "AVX2 (256-bit)",
            Backend::Neon => "NEON (128-bit)",
        }
    }

    /// `i16` lanes in one register of this backend.
    pub const fn lanes(self) -> usize {
        match self {
            Backend::Portable => portable::LANE_COUNT,
            Backend::Sse41 | Backend::Neon => 8,
            Backend::Avx2 => 16,
        }
    }

    /// Whether this backend is compiled in and supported by the running CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Portable => true,
            #[cfg(avx2)]
            Backend::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(sse)]
            Backend::Sse41 => is_x86_feature_detected!("sse4.1"),
            #[cfg(neon)]
            Backend::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Backends usable on this machine, best first.
    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|backend| backend.is_available())
    }

    /// Best usable backend, honouring the env overrides. Cached.
    pub fn detect() -> Backend {
        static DETECTED: OnceLock<Backend> = OnceLock::new();

        *DETECTED.get_or_init(|| {
            let backend = Self::detect_uncached();
            log::info!("q15-axpy: using {} backend", backend.name());
            backend
        })
    }

    fn detect_uncached() -> Backend {
        Self::select(env_flag)
    }

    /// Best usable backend given a lookup for the override flags.
    fn select(flag: impl Fn(&str) -> bool) -> Backend {
        #[cfg(fallback)]
        log::info!("no SIMD backend compiled in, only the portable path can be selected");

        if flag("Q15_AXPY_FORCE_PORTABLE") {
            log::info!("Q15_AXPY_FORCE_PORTABLE=1: using portable backend");
            return Backend::Portable;
        }

        let force_sse = flag("Q15_AXPY_FORCE_SSE");
        if force_sse {
            log::info!("Q15_AXPY_FORCE_SSE=1: skipping AVX2");
        }

        Self::available()
            .find(|&backend| !(force_sse && backend == Backend::Avx2))
            .unwrap_or(Backend::Portable)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Vector register grouping, the analogue of RVV's LMUL.
///
/// One strip-mining step covers `lanes * factor` elements. Wider groups mean
/// fewer iterations of the outer loop for large `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegisterGroup {
    M1,
    M2,
    M4,
    #[default]
    M8,
}

impl RegisterGroup {
    pub const ALL: [RegisterGroup; 4] = [
        RegisterGroup::M1,
        RegisterGroup::M2,
        RegisterGroup::M4,
        RegisterGroup::M8,
    ];

    /// Registers per group.
    pub const fn factor(self) -> usize {
        match self {
            RegisterGroup::M1 => 1,
            RegisterGroup::M2 => 2,
            RegisterGroup::M4 => 4,
            RegisterGroup::M8 => 8,
        }
    }
}

/// A backend paired with a register grouping; the crate's [`VectorUnit`].
///
/// Construction guarantees the backend is usable, which is what makes
/// calling its `target_feature` code sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    backend: Backend,
    group: RegisterGroup,
}

impl Engine {
    /// Creates an engine, refusing backends this machine cannot run.
    pub fn new(backend: Backend, group: RegisterGroup) -> Result<Self> {
        if !backend.is_available() {
            return Err(unsupported_backend(backend));
        }
        Ok(Self { backend, group })
    }

    /// Best backend for this machine with the widest grouping.
    pub fn detect() -> Self {
        Self {
            backend: Backend::detect(),
            group: RegisterGroup::default(),
        }
    }

    /// Portable engine; needs no availability check.
    pub fn portable(group: RegisterGroup) -> Self {
        Self {
            backend: Backend::Portable,
            group,
        }
    }

    /// Same backend, different grouping.
    pub fn with_group(self, group: RegisterGroup) -> Self {
        Self { group, ..self }
    }

    /// The instruction set chunks run on.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The register grouping; `max_vl` is `lanes * factor`.
    pub fn group(&self) -> RegisterGroup {
        self.group
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::detect()
    }
}

impl VectorUnit for Engine {
    #[inline(always)]
    fn max_vl(&self) -> usize {
        self.backend.lanes() * self.group.factor()
    }

    #[inline(always)]
    unsafe fn axpy_chunk(&self, a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
        match self.backend {
            #[cfg(avx2)]
            Backend::Avx2 => avx2::axpy::axpy_chunk(a, b, y, vl, alpha),
            #[cfg(sse)]
            Backend::Sse41 => sse::axpy::axpy_chunk(a, b, y, vl, alpha),
            #[cfg(neon)]
            Backend::Neon => neon::axpy::axpy_chunk(a, b, y, vl, alpha),
            // backends not compiled in can never pass `Engine::new`
            #[allow(unreachable_patterns)]
            _ => portable::axpy_chunk(a, b, y, vl, alpha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portable_always_available() {
        assert!(Backend::Portable.is_available());
        assert!(Backend::available().any(|b| b == Backend::Portable));
        assert!(Engine::new(Backend::Portable, RegisterGroup::M1).is_ok());
    }

    #[test]
    fn test_unavailable_backend_is_refused() {
        for backend in Backend::ALL {
            let engine = Engine::new(backend, RegisterGroup::M8);
            assert_eq!(engine.is_ok(), backend.is_available(), "{}", backend.name());
        }
    }

    #[test]
    fn test_detected_backend_is_available() {
        let engine = Engine::detect();
        println!("Detected backend: {}", engine.backend().name());
        assert!(engine.backend().is_available());
        assert_eq!(engine.group(), RegisterGroup::M8);
    }

    #[test]
    fn test_force_portable_overrides_detection() {
        let backend = Backend::select(|name| name == "Q15_AXPY_FORCE_PORTABLE");
        assert_eq!(backend, Backend::Portable);

        // wins over the SSE flag too
        assert_eq!(Backend::select(|_| true), Backend::Portable);
    }

    #[test]
    fn test_force_sse_never_selects_avx2() {
        let backend = Backend::select(|name| name == "Q15_AXPY_FORCE_SSE");
        println!("Forced SSE selection: {}", backend.name());

        assert_ne!(backend, Backend::Avx2);
        assert!(backend.is_available());
        if Backend::Sse41.is_available() {
            assert_eq!(backend, Backend::Sse41);
        }
    }

    #[test]
    fn test_no_flags_selects_best_available() {
        let best = Backend::available().next();
        assert_eq!(Some(Backend::select(|_| false)), best);
    }

    #[cfg(fallback)]
    #[test]
    fn test_fallback_build_offers_only_portable() {
        assert!(Backend::available().all(|b| b == Backend::Portable));
        assert_eq!(Backend::select(|_| false), Backend::Portable);
    }

    #[test]
    fn test_max_vl_scales_with_group() {
        let engine = Engine::portable(RegisterGroup::M1);
        assert_eq!(engine.max_vl(), portable::LANE_COUNT);
        assert_eq!(
            engine.with_group(RegisterGroup::M8).max_vl(),
            8 * portable::LANE_COUNT
        );
        assert_eq!(Backend::Avx2.lanes() * RegisterGroup::M4.factor(), 64);
    }

    #[test]
    fn test_set_vl_never_exceeds_remaining() {
        let engine = Engine::portable(RegisterGroup::M2);
        assert_eq!(engine.set_vl(1000), 16);
        assert_eq!(engine.set_vl(5), 5);
        assert_eq!(engine.set_vl(16), 16);
    }
}
