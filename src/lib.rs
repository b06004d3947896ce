//! # Dot-Product-Bench
//!
//! Times an accelerated dot product kernel against a scalar reference over
//! several input sizes and checks that both agree.
//!
//! ```no_run
//! use dot_product_bench::prelude::*;
//! use rand::SeedableRng;
//!
//! let registry = KernelRegistry::with_default_kernels();
//! let reference = registry.resolve("scalar")?;
//! let candidate = registry.default_candidate().expect("unrolled always runs");
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let reports = BenchmarkRunner::new(reference, candidate).run_sweep(&[1 << 20], 20, &mut rng)?;
//! print!("{}", format_sweep(&reports, 80));
//! # Ok::<(), BenchError>(())
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod registry;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

pub use error::{BenchError, BenchResult};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::error::{BenchError, BenchResult};
    pub use crate::math::dot_product::{DotProductKernel, KernelInfo};
    pub use crate::registry::KernelRegistry;
    pub use crate::utils::bench::{SizeReport, Speedup};
    pub use crate::utils::runner::BenchmarkRunner;
    pub use crate::utils::tui::{format_size_report, format_sweep};
}
