//! Optimized scalar implementation with loop unrolling.
//!
//! Four independent accumulators break the add dependency chain so the
//! CPU can keep several multiply-adds in flight.

/// Compute the dot product with 4x loop unrolling.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_scalar_opt(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum0 = 0.0;
    let mut sum1 = 0.0;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;

    let a_chunks = a.chunks_exact(4);
    let b_chunks = b.chunks_exact(4);
    let a_tail = a_chunks.remainder();
    let b_tail = b_chunks.remainder();

    for (x, y) in a_chunks.zip(b_chunks) {
        sum0 += x[0] * y[0];
        sum1 += x[1] * y[1];
        sum2 += x[2] * y[2];
        sum3 += x[3] * y[3];
    }

    for (x, y) in a_tail.iter().zip(b_tail) {
        sum0 += x * y;
    }

    (sum0 + sum1) + (sum2 + sum3)
}
