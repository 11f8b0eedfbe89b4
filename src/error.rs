//! Error types for q15-axpy operations.
//!
//! The kernel itself never fails. These errors come from the checked entry
//! points: slice validation, backend selection and the verification harness.

use std::fmt;

use crate::simd::Backend;

/// Errors that can occur around the Q15 AXPY kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Q15Error {
    /// Input and output slices do not share one length.
    LengthMismatch {
        /// Length of the addend `A`.
        a: usize,
        /// Length of the multiplicand `B`.
        b: usize,
        /// Length of the output `Y`.
        y: usize,
    },
    /// The requested backend is not compiled in or not supported by this CPU.
    UnsupportedBackend {
        /// The backend that was requested.
        backend: Backend,
    },
    /// The kernel disagreed with the reference model beyond the tolerance.
    VerificationFailed {
        /// Number of elements outside the tolerance.
        mismatches: usize,
        /// Number of elements compared.
        checked: usize,
        /// Largest absolute difference observed.
        max_abs_diff: u32,
    },
}

impl fmt::Display for Q15Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Q15Error::LengthMismatch { a, b, y } => write!(
                f,
                "Length mismatch: a has {} elements, b has {}, y has {}",
                a, b, y
            ),
            Q15Error::UnsupportedBackend { backend } => {
                write!(f, "Backend {} is not available on this CPU", backend.name())
            }
            Q15Error::VerificationFailed {
                mismatches,
                checked,
                max_abs_diff,
            } => write!(
                f,
                "Verification failed: {} of {} elements mismatched (max abs diff {})",
                mismatches, checked, max_abs_diff
            ),
        }
    }
}

impl std::error::Error for Q15Error {}

/// Result type alias for q15-axpy operations.
pub type Result<T> = std::result::Result<T, Q15Error>;

/// Creates a length mismatch error.
pub fn length_mismatch(a: usize, b: usize, y: usize) -> Q15Error {
    Q15Error::LengthMismatch { a, b, y }
}

/// Creates an unsupported backend error.
pub fn unsupported_backend(backend: Backend) -> Q15Error {
    Q15Error::UnsupportedBackend { backend }
}

/// Creates a verification failure error.
pub fn verification_failed(mismatches: usize, checked: usize, max_abs_diff: u32) -> Q15Error {
    Q15Error::VerificationFailed {
        mismatches,
        checked,
        max_abs_diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(4, 3, 4);
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("a has 4"));
        assert!(display.contains("b has 3"));
    }

    #[test]
    fn test_unsupported_backend_display() {
        let error = unsupported_backend(Backend::Avx2);
        let display = format!("{}", error);
        assert!(display.contains("AVX2"));
        assert!(display.contains("not available"));
    }

    #[test]
    fn test_verification_failed_display() {
        let error = verification_failed(3, 1024, 7);
        let display = format!("{}", error);
        assert!(display.contains("3 of 1024"));
        assert!(display.contains("max abs diff 7"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(length_mismatch(1, 2, 3), length_mismatch(1, 2, 3));
        assert_ne!(length_mismatch(1, 2, 3), length_mismatch(1, 2, 4));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = verification_failed(1, 1, 2);
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
