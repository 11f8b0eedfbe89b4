//! Verification harness for the Q15 AXPY kernel.
//!
//! Generates pseudo-random Q15 inputs, runs the truncating reference model
//! and the vector kernel on them, and compares the two element by element.
//! The hardware rounds where the reference truncates, so a difference of one
//! LSB is expected and accepted by default.
//!
//! A mismatch never stops the comparison. Every element is checked, the
//! first `max_reported` mismatches are kept (and logged), and the report
//! carries the aggregate verdict.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{verification_failed, Result};
use crate::kernel::q15_axpy_with;
use crate::q15::{saturating_q15_axpy_step, Q15_HALF};
use crate::simd::{Engine, RegisterGroup, VectorUnit};

/// Parameters of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Number of samples in `A` and `B`.
    pub len: usize,
    /// Gain applied to `B`.
    pub alpha: i16,
    /// Seed for the sample generator.
    pub seed: u64,
    /// Largest accepted `|kernel - reference|`, in LSBs.
    pub tolerance: u32,
    /// How many mismatches are kept in the report.
    pub max_reported: usize,
    /// Register grouping used by [`verify`]. Ignored by [`verify_with`].
    pub group: RegisterGroup,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            len: 1024,
            alpha: Q15_HALF,
            seed: 12345,
            tolerance: 1,
            max_reported: 10,
            group: RegisterGroup::default(),
        }
    }
}

/// One element outside the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub kernel: i16,
    pub reference: i16,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {}: kernel={}, reference={}",
            self.index, self.kernel, self.reference
        )
    }
}

/// Outcome of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Elements compared.
    pub checked: usize,
    /// Tolerance the comparison ran with.
    pub tolerance: u32,
    /// Elements outside the tolerance, including those not recorded.
    pub total_mismatches: usize,
    /// Largest `|kernel - reference|` seen, in or out of tolerance.
    pub max_abs_diff: u32,
    /// The first mismatches, capped at `max_reported`.
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.total_mismatches == 0
    }

    /// `Ok(self)` on a pass, [`Q15Error::VerificationFailed`](crate::error::Q15Error) otherwise.
    pub fn into_result(self) -> Result<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(verification_failed(
                self.total_mismatches,
                self.checked,
                self.max_abs_diff,
            ))
        }
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(
                f,
                "[PASS] {} samples within {} LSB of the reference model (max abs diff {})",
                self.checked, self.tolerance, self.max_abs_diff
            )
        } else {
            write!(
                f,
                "[FAIL] {} of {} samples differ by more than {} LSB (max abs diff {})",
                self.total_mismatches, self.checked, self.tolerance, self.max_abs_diff
            )
        }
    }
}

/// Uniform Q15 samples over the full `i16` range.
pub fn random_samples<R: Rng>(rng: &mut R, len: usize) -> Vec<i16> {
    (0..len)
        .map(|_| rng.random_range(i16::MIN..=i16::MAX))
        .collect()
}

/// Golden scalar loop: `y[i] = saturating_q15_axpy_step(a[i], b[i], alpha)`.
///
/// # Panics
///
/// If `a`, `b` and `y` do not all have the same length.
pub fn reference_axpy(a: &[i16], b: &[i16], y: &mut [i16], alpha: i16) {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    assert_eq!(a.len(), y.len(), "Vectors must be the same length");

    for ((y_i, &a_i), &b_i) in y.iter_mut().zip(a).zip(b) {
        *y_i = saturating_q15_axpy_step(a_i, b_i, alpha);
    }
}

/// Compares kernel output against reference output.
///
/// # Panics
///
/// If the two slices differ in length.
pub fn compare(
    kernel: &[i16],
    reference: &[i16],
    tolerance: u32,
    max_reported: usize,
) -> VerifyReport {
    assert_eq!(kernel.len(), reference.len(), "Vectors must be the same length");

    let mut report = VerifyReport {
        checked: kernel.len(),
        tolerance,
        total_mismatches: 0,
        max_abs_diff: 0,
        mismatches: Vec::new(),
    };

    for (index, (&k, &r)) in kernel.iter().zip(reference).enumerate() {
        let diff = (k as i32 - r as i32).unsigned_abs();
        report.max_abs_diff = report.max_abs_diff.max(diff);

        if diff > tolerance {
            report.total_mismatches += 1;
            if report.mismatches.len() < max_reported {
                let mismatch = Mismatch {
                    index,
                    kernel: k,
                    reference: r,
                };
                log::warn!("mismatch at {mismatch}");
                report.mismatches.push(mismatch);
            }
        }
    }

    report
}

/// Generates inputs from `config.seed`, runs reference and kernel through
/// `unit`, and compares them.
pub fn verify_with<U: VectorUnit + ?Sized>(unit: &U, config: &VerifyConfig) -> VerifyReport {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let a = random_samples(&mut rng, config.len);
    let b = random_samples(&mut rng, config.len);

    let mut y_ref = vec![0i16; config.len];
    let mut y_vec = vec![0i16; config.len];

    reference_axpy(&a, &b, &mut y_ref, config.alpha);
    q15_axpy_with(unit, &a, &b, &mut y_vec, config.alpha);

    let report = compare(&y_vec, &y_ref, config.tolerance, config.max_reported);

    if report.passed() {
        log::info!("{report}");
    } else {
        log::error!("{report}");
    }

    report
}

/// [`verify_with`] on the detected engine with `config.group`.
pub fn verify(config: &VerifyConfig) -> VerifyReport {
    verify_with(&Engine::detect().with_group(config.group), config)
}
