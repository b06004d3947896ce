//! Reference-vs-candidate dot product benchmark.
//!
//! Usage:
//!   dot-bench                          # scalar vs best available kernel
//!   dot-bench --candidate unrolled     # pick the candidate
//!   dot-bench --list                   # list kernels
//!
//! Sizes, trials, epsilon, warmup, seed and pinning come from the
//! `DOT_BENCH_*` environment variables; see `BenchConfig::from_env`.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dot_product_bench::config::BenchConfig;
use dot_product_bench::registry::{KernelRegistry, DEFAULT_REFERENCE};
use dot_product_bench::tui;
use dot_product_bench::utils::{time_seed, BenchmarkRunner};
use dot_product_bench::{BenchError, BenchResult};

#[derive(Parser, Debug)]
#[command(name = "dot-bench", version, about = "Time a dot product kernel against a scalar reference")]
struct Cli {
    /// Reference kernel
    #[arg(long, default_value = DEFAULT_REFERENCE)]
    reference: String,

    /// Candidate kernel (default: fastest kernel this CPU supports)
    #[arg(long)]
    candidate: Option<String>,

    /// List available kernels and exit
    #[arg(long, short = 'l')]
    list: bool,
}

fn run(cli: &Cli) -> BenchResult<()> {
    let registry = KernelRegistry::with_default_kernels();

    if cli.list {
        print!("{}", tui::format_kernel_list(&registry));
        return Ok(());
    }

    let config = BenchConfig::from_env()?;
    let reference = registry.resolve(&cli.reference)?;
    let candidate = match &cli.candidate {
        Some(name) => registry.resolve(name)?,
        None => registry.default_candidate().ok_or_else(|| BenchError::UnknownKernel {
            name: "<default candidate>".to_string(),
        })?,
    };

    let runner = BenchmarkRunner::new(reference, candidate).with_config(&config);
    // Fail on a missing CPU feature before printing anything.
    runner.check_capabilities()?;

    let seed = config.seed.unwrap_or_else(time_seed);
    info!("seed = {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let width = tui::term_width();
    print!("{}", tui::format_header(width));
    println!("reference: {}  candidate: {}\n", reference.name(), candidate.name());

    // Print each size as it finishes so a later allocation failure keeps them.
    runner.run_sweep_with(&config.sizes, config.trials, &mut rng, |report| {
        println!("{}", tui::format_size_report(report, width));
    })?;
    println!(
        "Note: agreement uses an absolute epsilon of {:e}; large sizes may disagree from rounding alone.",
        runner.epsilon()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
