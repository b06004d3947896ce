//! Benchmark configuration: compile-time defaults with startup overrides
//! from the environment.

use std::str::FromStr;

use crate::error::{BenchError, BenchResult};

/// Tested sizes: 2^20, 2^24, 2^28 elements
pub const DEFAULT_SIZES: [usize; 3] = [1 << 20, 1 << 24, 1 << 28];
pub const DEFAULT_TRIALS: usize = 20;
/// Absolute agreement tolerance. Only meaningful because inputs lie in
/// `[0, 1)` and sizes are bounded.
pub const DEFAULT_EPSILON: f64 = 1e-10;
pub const DEFAULT_WARMUP_ITERATIONS: usize = 1;

pub const ENV_SIZES: &str = "DOT_BENCH_SIZES";
pub const ENV_TRIALS: &str = "DOT_BENCH_TRIALS";
pub const ENV_EPSILON: &str = "DOT_BENCH_EPSILON";
pub const ENV_WARMUP: &str = "DOT_BENCH_WARMUP";
pub const ENV_SEED: &str = "DOT_BENCH_SEED";
pub const ENV_PIN: &str = "DOT_BENCH_PIN";

/// Configuration for one benchmark sweep
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Input sizes, processed in order
    pub sizes: Vec<usize>,
    /// Timed trials per size
    pub trials: usize,
    /// Agreement tolerance, absolute
    pub epsilon: f64,
    /// Untimed calls per kernel before each size's trials
    pub warmup_iterations: usize,
    /// Pin the measuring thread to its current core during the sweep
    pub pin_to_core: bool,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            epsilon: DEFAULT_EPSILON,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            pin_to_core: true,
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Defaults overridden by `DOT_BENCH_*` environment variables.
    pub fn from_env() -> BenchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> BenchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SIZES) {
            config.sizes = raw
                .split(',')
                .map(|s| parse_value::<usize>("sizes", s.trim()))
                .collect::<BenchResult<_>>()?;
        }
        if let Some(raw) = lookup(ENV_TRIALS) {
            config.trials = parse_value("trials", raw.trim())?;
        }
        if let Some(raw) = lookup(ENV_EPSILON) {
            config.epsilon = parse_value("epsilon", raw.trim())?;
        }
        if let Some(raw) = lookup(ENV_WARMUP) {
            config.warmup_iterations = parse_value("warmup_iterations", raw.trim())?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_value("seed", raw.trim())?);
        }
        if let Some(raw) = lookup(ENV_PIN) {
            config.pin_to_core = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(BenchError::InvalidConfig {
                        field: "pin_to_core",
                        message: format!("expected 0 or 1, got '{}'", other),
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations a sweep cannot run with.
    pub fn validate(&self) -> BenchResult<()> {
        if self.sizes.is_empty() {
            return Err(invalid("sizes", "at least one size is required"));
        }
        if self.sizes.contains(&0) {
            return Err(invalid("sizes", "sizes must be positive"));
        }
        if self.trials == 0 {
            return Err(invalid("trials", "must be positive"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(invalid("epsilon", "must be positive and finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: &str) -> BenchError {
    BenchError::InvalidConfig {
        field,
        message: message.to_string(),
    }
}

fn parse_value<T>(field: &'static str, raw: &str) -> BenchResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| BenchError::InvalidConfig {
        field,
        message: format!("'{}': {}", raw, e),
    })
}
