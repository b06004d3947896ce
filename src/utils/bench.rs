//! Shared benchmark utilities: sample buffers, seeding and per-size statistics.

use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::error::{BenchError, BenchResult};

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Allocate a buffer of `len` doubles drawn uniformly from `[0, 1)`.
///
/// Memory is reserved fallibly: running out of memory is reported as
/// [`BenchError::Allocation`] instead of aborting the process.
pub fn random_buffer<R: Rng>(len: usize, rng: &mut R) -> BenchResult<Vec<f64>> {
    let alloc_error = || BenchError::Allocation {
        size: len,
        bytes: len.checked_mul(std::mem::size_of::<f64>()),
    };

    let mut buf: Vec<f64> = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| alloc_error())?;
    buf.extend((0..len).map(|_| rng.random::<f64>()));
    Ok(buf)
}

/// Mean of a set of durations, `Duration::ZERO` when empty.
pub fn mean_duration(times: &[Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    let total_ns: u128 = times.iter().map(Duration::as_nanos).sum();
    let mean_ns = total_ns / times.len() as u128;
    Duration::from_nanos(u64::try_from(mean_ns).unwrap_or(u64::MAX))
}

/// Reference mean over candidate mean.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Speedup {
    Ratio(f64),
    /// The candidate mean measured as exactly zero.
    Undefined,
}

impl Speedup {
    pub fn from_means(reference: Duration, candidate: Duration) -> Self {
        if candidate.is_zero() {
            Speedup::Undefined
        } else {
            Speedup::Ratio(reference.as_secs_f64() / candidate.as_secs_f64())
        }
    }

    pub fn ratio(self) -> Option<f64> {
        match self {
            Speedup::Ratio(r) => Some(r),
            Speedup::Undefined => None,
        }
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speedup::Ratio(r) => write!(f, "{:.2}x", r),
            Speedup::Undefined => f.write_str("undefined"),
        }
    }
}

/// One timed (reference, candidate) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRow {
    /// 1-based trial index
    pub index: usize,
    pub reference_time: Duration,
    pub candidate_time: Duration,
    pub agreed: bool,
}

/// Aggregate over every trial of one input size.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeReport {
    pub size: usize,
    pub reference_name: &'static str,
    pub candidate_name: &'static str,
    pub trials: Vec<TrialRow>,
    pub mean_reference: Duration,
    pub mean_candidate: Duration,
    /// Trials where candidate and reference agreed, always `<= trials.len()`
    pub agreement_count: usize,
    pub speedup: Speedup,
}

impl SizeReport {
    /// Aggregate a batch of trial rows.
    pub fn from_trials(
        size: usize,
        reference_name: &'static str,
        candidate_name: &'static str,
        trials: Vec<TrialRow>,
    ) -> Self {
        let reference_times: Vec<Duration> = trials.iter().map(|t| t.reference_time).collect();
        let candidate_times: Vec<Duration> = trials.iter().map(|t| t.candidate_time).collect();
        let mean_reference = mean_duration(&reference_times);
        let mean_candidate = mean_duration(&candidate_times);

        Self {
            size,
            reference_name,
            candidate_name,
            agreement_count: trials.iter().filter(|t| t.agreed).count(),
            mean_reference,
            mean_candidate,
            speedup: Speedup::from_means(mean_reference, mean_candidate),
            trials,
        }
    }

    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(index: usize, reference_us: u64, candidate_us: u64, agreed: bool) -> TrialRow {
        TrialRow {
            index,
            reference_time: Duration::from_micros(reference_us),
            candidate_time: Duration::from_micros(candidate_us),
            agreed,
        }
    }

    #[test]
    fn test_random_buffer_range_and_len() {
        let mut rng = StdRng::seed_from_u64(7);
        let buf = random_buffer(10_000, &mut rng).unwrap();
        assert_eq!(buf.len(), 10_000);
        assert!(buf.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_random_buffer_continues_stream() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = random_buffer(16, &mut rng).unwrap();
        let second = random_buffer(16, &mut rng).unwrap();
        assert_ne!(first, second);

        let mut replay = StdRng::seed_from_u64(7);
        assert_eq!(random_buffer(16, &mut replay).unwrap(), first);
    }

    #[test]
    fn test_random_buffer_capacity_overflow_is_allocation_error() {
        let mut rng = StdRng::seed_from_u64(1);
        match random_buffer(usize::MAX, &mut rng) {
            Err(BenchError::Allocation { size, bytes }) => {
                assert_eq!(size, usize::MAX);
                assert_eq!(bytes, None);
            }
            other => panic!("expected allocation error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_random_buffer_reports_byte_count_when_it_fits() {
        let mut rng = StdRng::seed_from_u64(1);
        let len = usize::MAX / 16;
        match random_buffer(len, &mut rng) {
            Err(BenchError::Allocation { size, bytes }) => {
                assert_eq!(size, len);
                assert_eq!(bytes, Some(len * 8));
            }
            other => panic!("expected allocation error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_mean_duration() {
        assert_eq!(mean_duration(&[]), Duration::ZERO);
        let times = [Duration::from_millis(1), Duration::from_millis(3)];
        assert_eq!(mean_duration(&times), Duration::from_millis(2));
    }

    #[test]
    fn test_speedup_ratio_and_display() {
        let s = Speedup::from_means(Duration::from_millis(4), Duration::from_millis(2));
        assert_eq!(s, Speedup::Ratio(2.0));
        assert_eq!(s.to_string(), "2.00x");
    }

    #[test]
    fn test_speedup_undefined_on_zero_candidate() {
        let s = Speedup::from_means(Duration::from_millis(4), Duration::ZERO);
        assert_eq!(s, Speedup::Undefined);
        assert_eq!(s.ratio(), None);
        assert_eq!(s.to_string(), "undefined");
    }

    #[test]
    fn test_size_report_aggregates() {
        let rows = vec![row(1, 100, 50, true), row(2, 300, 150, false), row(3, 200, 100, true)];
        let report = SizeReport::from_trials(1024, "scalar", "unrolled", rows);

        assert_eq!(report.trial_count(), 3);
        assert_eq!(report.agreement_count, 2);
        assert_eq!(report.mean_reference, Duration::from_micros(200));
        assert_eq!(report.mean_candidate, Duration::from_micros(100));
        assert_eq!(report.speedup, Speedup::Ratio(2.0));
    }

    #[test]
    fn test_size_report_zero_candidate_mean() {
        let rows = vec![row(1, 100, 0, true), row(2, 100, 0, true)];
        let report = SizeReport::from_trials(8, "scalar", "instant", rows);
        assert_eq!(report.mean_candidate, Duration::ZERO);
        assert_eq!(report.speedup, Speedup::Undefined);
    }
}
