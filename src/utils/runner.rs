//! Benchmark runner: the reference-vs-candidate sweep.
//!
//! For each size the runner allocates two random buffers, warms both
//! kernels, then times `trials` back-to-back (reference, candidate) pairs on
//! the same inputs and checks that the results agree within an absolute
//! epsilon. Buffers are dropped before the next size is allocated.

use log::{debug, info, warn};
use rand::Rng;

use crate::config::{BenchConfig, DEFAULT_EPSILON, DEFAULT_WARMUP_ITERATIONS};
use crate::error::{BenchError, BenchResult};
use crate::math::dot_product::DotProductKernel;
use crate::utils::bench::{random_buffer, SizeReport, TrialRow};
use crate::utils::cpu_affinity::CpuPinGuard;
use crate::utils::timer::{time_kernel, warmup};

/// Whether two results agree within an absolute tolerance.
///
/// Absolute, not relative: with inputs in `[0, 1)` the sum grows with `n`,
/// so long reassociated reductions can legitimately exceed it.
pub fn results_agree(reference: f64, candidate: f64, epsilon: f64) -> bool {
    (candidate - reference).abs() < epsilon
}

/// Times a candidate kernel against a reference kernel.
pub struct BenchmarkRunner<'k> {
    reference: &'k dyn DotProductKernel,
    candidate: &'k dyn DotProductKernel,
    epsilon: f64,
    warmup_iterations: usize,
    pin_to_core: bool,
}

impl<'k> BenchmarkRunner<'k> {
    pub fn new(reference: &'k dyn DotProductKernel, candidate: &'k dyn DotProductKernel) -> Self {
        Self {
            reference,
            candidate,
            epsilon: DEFAULT_EPSILON,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            pin_to_core: false,
        }
    }

    /// Take epsilon, warmup and pinning from `config`.
    pub fn with_config(mut self, config: &BenchConfig) -> Self {
        self.epsilon = config.epsilon;
        self.warmup_iterations = config.warmup_iterations;
        self.pin_to_core = config.pin_to_core;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_warmup(mut self, iterations: usize) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Fail if either kernel cannot run on this machine.
    pub fn check_capabilities(&self) -> BenchResult<()> {
        self.reference.check_capability()?;
        self.candidate.check_capability()
    }

    /// Run the whole sweep, one [`SizeReport`] per size in input order.
    ///
    /// Capabilities are checked before anything is allocated. The first
    /// allocation failure aborts the sweep and names the failing size; use
    /// [`run_sweep_with`](Self::run_sweep_with) to see the sizes finished
    /// before it.
    pub fn run_sweep<R: Rng>(
        &self,
        sizes: &[usize],
        trials_per_size: usize,
        rng: &mut R,
    ) -> BenchResult<Vec<SizeReport>> {
        let mut reports = Vec::with_capacity(sizes.len());
        self.run_sweep_with(sizes, trials_per_size, rng, |report| reports.push(report.clone()))?;
        Ok(reports)
    }

    /// Like [`run_sweep`](Self::run_sweep), but hands each report to
    /// `on_report` as soon as its size is measured.
    ///
    /// Reports already delivered stay valid when a later size fails.
    pub fn run_sweep_with<R, F>(
        &self,
        sizes: &[usize],
        trials_per_size: usize,
        rng: &mut R,
        mut on_report: F,
    ) -> BenchResult<()>
    where
        R: Rng,
        F: FnMut(&SizeReport),
    {
        if trials_per_size == 0 {
            return Err(BenchError::InvalidConfig {
                field: "trials",
                message: "must be positive".to_string(),
            });
        }
        if let Some(pos) = sizes.iter().position(|&n| n == 0) {
            return Err(BenchError::InvalidConfig {
                field: "sizes",
                message: format!("size #{} is zero", pos + 1),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(BenchError::InvalidConfig {
                field: "epsilon",
                message: format!("{} is not a positive finite tolerance", self.epsilon),
            });
        }
        self.check_capabilities()?;

        info!(
            "sweep: reference={} candidate={} sizes={:?} trials={} epsilon={:e}",
            self.reference.name(),
            self.candidate.name(),
            sizes,
            trials_per_size,
            self.epsilon
        );

        let _pin = if self.pin_to_core {
            let guard = CpuPinGuard::current_core();
            match guard.core_id() {
                Some(core) => debug!("pinned to core {}", core),
                None => warn!("could not pin to a CPU core, measuring unpinned"),
            }
            guard
        } else {
            CpuPinGuard::unpinned()
        };

        for &n in sizes {
            info!("allocating 2 x {} doubles", n);
            let a = random_buffer(n, rng)?;
            let b = random_buffer(n, rng)?;

            let report = self.measure_batch(&a, &b, trials_per_size);
            info!(
                "n = {}: {}/{} agreed, speedup {}",
                n,
                report.agreement_count,
                report.trial_count(),
                report.speedup
            );
            on_report(&report);
            // `a` and `b` drop here, before the next size allocates.
        }

        Ok(())
    }

    /// Warm up, then time `trials` (reference, candidate) pairs on `a` and `b`.
    ///
    /// # Panics
    /// Panics if `a` and `b` have different lengths.
    pub fn measure_batch(&self, a: &[f64], b: &[f64], trials: usize) -> SizeReport {
        assert_eq!(a.len(), b.len(), "Buffers must have the same length");

        warmup(&[self.reference, self.candidate], a, b, self.warmup_iterations);

        let rows: Vec<TrialRow> = (1..=trials)
            .map(|index| {
                let reference = time_kernel(self.reference, a, b);
                let candidate = time_kernel(self.candidate, a, b);
                let agreed = results_agree(reference.value, candidate.value, self.epsilon);

                debug!(
                    "trial {}: ref={:?} ({}) cand={:?} ({}) agree={}",
                    index,
                    reference.elapsed,
                    reference.value,
                    candidate.elapsed,
                    candidate.value,
                    agreed
                );

                TrialRow {
                    index,
                    reference_time: reference.elapsed,
                    candidate_time: candidate.elapsed,
                    agreed,
                }
            })
            .collect();

        SizeReport::from_trials(a.len(), self.reference.name(), self.candidate.name(), rows)
    }
}
