//! End-to-end runs of the verification harness.

use q15_axpy::q15::saturating_q15_axpy_step_rounded;
use q15_axpy::simd::{Backend, Engine, RegisterGroup, VectorUnit};
use q15_axpy::verify::{verify, verify_with, VerifyConfig};
use q15_axpy::Q15Error;

/// Correct arithmetic with bit 8 flipped, so every element is off by 256.
struct Broken;

impl VectorUnit for Broken {
    fn max_vl(&self) -> usize {
        16
    }

    unsafe fn axpy_chunk(&self, a: *const i16, b: *const i16, y: *mut i16, vl: usize, alpha: i16) {
        for i in 0..vl {
            let good = saturating_q15_axpy_step_rounded(*a.add(i), *b.add(i), alpha);
            *y.add(i) = good ^ 0x0100;
        }
    }
}

/// n = 1024, alpha = 0.5, random A/B: zero mismatches and a pass verdict.
#[test]
fn test_reference_scenario_passes() {
    let config = VerifyConfig::default();
    let report = verify(&config);

    println!("{report}");

    assert_eq!(report.checked, 1024);
    assert_eq!(report.total_mismatches, 0);
    assert!(report.mismatches.is_empty());
    assert!(report.max_abs_diff <= 1);
    assert!(report.passed());
    assert!(report.into_result().is_ok());
}

#[test]
fn test_every_backend_and_group_passes() {
    for backend in Backend::available() {
        for group in RegisterGroup::ALL {
            let engine = Engine::new(backend, group).expect("available backend");

            for (seed, alpha) in [(1u64, 16_384i16), (2, -32_768), (3, 32_767), (4, -1), (5, 3)] {
                let config = VerifyConfig {
                    len: 777,
                    alpha,
                    seed,
                    ..VerifyConfig::default()
                };

                let report = verify_with(&engine, &config);
                assert!(report.passed(), "{} {:?}: {report}", backend.name(), group);
            }
        }
    }
}

#[test]
fn test_zero_gain_is_bit_exact() {
    let config = VerifyConfig {
        alpha: 0,
        ..VerifyConfig::default()
    };

    let report = verify(&config);

    assert!(report.passed());
    assert_eq!(report.max_abs_diff, 0);
}

#[test]
fn test_broken_kernel_is_reported_without_aborting() {
    let config = VerifyConfig {
        len: 500,
        max_reported: 10,
        ..VerifyConfig::default()
    };

    let report = verify_with(&Broken, &config);

    println!("{report}");
    for mismatch in &report.mismatches {
        println!("  {mismatch}");
    }

    assert!(!report.passed());
    assert_eq!(report.checked, 500);
    assert_eq!(report.total_mismatches, 500);
    assert_eq!(report.mismatches.len(), 10);
    assert!(report.max_abs_diff >= 255);
    assert!(report.to_string().starts_with("[FAIL]"));

    let indices: Vec<usize> = report.mismatches.iter().map(|m| m.index).collect();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());

    match report.into_result() {
        Err(Q15Error::VerificationFailed {
            mismatches,
            checked,
            ..
        }) => {
            assert_eq!(mismatches, 500);
            assert_eq!(checked, 500);
        }
        other => panic!("expected a verification failure, got {other:?}"),
    }
}

#[test]
fn test_tolerance_zero_exposes_rounding_difference() {
    // the truncating reference and the rounding kernel disagree somewhere
    // in 1024 random products at alpha = 0.5
    let config = VerifyConfig {
        tolerance: 0,
        ..VerifyConfig::default()
    };

    let report = verify(&config);

    assert!(!report.passed());
    assert_eq!(report.max_abs_diff, 1);
}
