use std::process::ExitCode;

use q15_axpy::q15::to_f32;
use q15_axpy::simd::{Backend, Engine};
use q15_axpy::verify::{verify_with, VerifyConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = VerifyConfig::default();
    let detected = Engine::detect().backend();

    println!(
        "Running Q15 AXPY verification on {} samples (alpha = {}, {:?})...",
        config.len,
        to_f32(config.alpha),
        config.group
    );

    let mut all_passed = true;

    for backend in Backend::available() {
        let engine = match Engine::new(backend, config.group) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("{err}");
                all_passed = false;
                continue;
            }
        };

        let report = verify_with(&engine, &config);
        let marker = if backend == detected { " (detected)" } else { "" };

        println!("{}{marker}: {report}", backend.name());
        for mismatch in &report.mismatches {
            println!("  {mismatch}");
        }

        all_passed &= report.passed();
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
