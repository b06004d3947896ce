//! Utility modules for benchmarking and reporting.

pub mod bench;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use bench::{mean_duration, random_buffer, time_seed, SizeReport, Speedup, TrialRow};
pub use cpu_affinity::CpuPinGuard;
pub use runner::{results_agree, BenchmarkRunner};
pub use timer::{time_kernel, TrialResult};

/// C compiler name detected at build time
pub const C_COMPILER_NAME: Option<&str> = option_env!("C_COMPILER_NAME");
