//! Monotonic timing of single kernel calls.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::math::dot_product::DotProductKernel;

/// One timed kernel invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialResult {
    pub elapsed: Duration,
    pub value: f64,
}

/// Time a single call of `kernel` on `a` and `b`.
///
/// Inputs and output go through `black_box` so the call cannot be hoisted
/// out of the timed region or elided.
#[inline(never)]
pub fn time_kernel(kernel: &dyn DotProductKernel, a: &[f64], b: &[f64]) -> TrialResult {
    let (a, b) = (black_box(a), black_box(b));
    let start = Instant::now();
    let value = black_box(kernel.dot(a, b));
    let elapsed = start.elapsed();
    TrialResult { elapsed, value }
}

/// Call every kernel `iterations` times, discarding results.
pub fn warmup(kernels: &[&dyn DotProductKernel], a: &[f64], b: &[f64], iterations: usize) {
    for kernel in kernels {
        for _ in 0..iterations {
            black_box(kernel.dot(black_box(a), black_box(b)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dot_product::SCALAR;
    use std::cell::Cell;

    struct Counting(Cell<usize>);

    impl DotProductKernel for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn description(&self) -> &'static str {
            "Counts its calls"
        }
        fn dot(&self, _a: &[f64], _b: &[f64]) -> f64 {
            self.0.set(self.0.get() + 1);
            self.0.get() as f64
        }
    }

    #[test]
    fn test_time_kernel_returns_value() {
        let result = time_kernel(&SCALAR, &[1.0, 2.0], &[3.0, 4.0]);
        assert_eq!(result.value, 11.0);
    }

    #[test]
    fn test_warmup_calls_each_kernel() {
        let first = Counting(Cell::new(0));
        let second = Counting(Cell::new(0));
        let kernels: [&dyn DotProductKernel; 2] = [&first, &second];
        warmup(&kernels, &[], &[], 3);
        assert_eq!(first.0.get(), 3);
        assert_eq!(second.0.get(), 3);
    }
}
