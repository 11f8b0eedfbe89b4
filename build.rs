use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features the kernel has a backend for
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // alternative spellings reported by the OS (aarch64 Linux says "asimd")
    aliases: &'static [&'static str],
    cfg_flag: &'static str,
    target_arch: &'static [&'static str],
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "sse4_1" => 1,
            "neon" => 2,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                aliases: &[],
                cfg_flag: "sse",
                target_arch: &["x86", "x86_64"],
                detected: false,
            },
            CpuFeature {
                name: "avx2",
                aliases: &[],
                cfg_flag: "avx2",
                target_arch: &["x86", "x86_64"],
                detected: false,
            },
            CpuFeature {
                name: "neon",
                aliases: &["asimd"],
                cfg_flag: "neon",
                target_arch: &["aarch64"],
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let flags: Vec<String> = cpuinfo
                .lines()
                .filter(|line| line.starts_with("flags") || line.starts_with("Features"))
                .flat_map(|line| line.split_whitespace().map(str::to_lowercase))
                .collect();

            for feature in features.iter_mut() {
                feature.detected = flags
                    .iter()
                    .any(|flag| flag == feature.name || feature.aliases.contains(&flag.as_str()));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => feature.detected = contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => {
                        feature.detected = contents.contains("hw.optional.neon: 1")
                            || contents.contains("hw.optional.arm.adv_simd: 1")
                    }
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// TODO: Windows detector (GetLogicalProcessorInformationEx or cpuid via a helper binary)

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        let detectors = Self::cpu_features_detectors();

        for detector in detectors {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        features.sort();

        // Every detected backend gets compiled; the crate picks one at runtime.
        let mut any_detected = false;
        for feature in features
            .iter()
            .filter(|f| f.detected && f.target_arch.contains(&target_arch))
        {
            println!("cargo:rustc-cfg={}", feature.cfg_flag);
            any_detected = true;
        }

        if !any_detected {
            println!("cargo:rustc-cfg=fallback");
        }

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Only run CPU detection for native builds
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features, &target_arch);
}
