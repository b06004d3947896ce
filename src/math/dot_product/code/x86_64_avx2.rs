//! x86_64 AVX2 + FMA implementation.
//!
//! Two 256-bit accumulators of 4 f64 lanes each, fed by fused
//! multiply-add. AVX2 and FMA are not part of the x86_64 baseline, so the
//! intrinsics live in a `#[target_feature]` function that is only entered
//! after run-time detection.

use std::arch::x86_64::*;

use super::original::dot_product_original;

/// Compute the dot product using AVX2 and FMA.
///
/// Falls back to the reference loop on CPUs without AVX2/FMA. The benchmark
/// runner refuses to select this kernel on such CPUs, so the fallback only
/// serves direct callers.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_x86_64_avx2(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        // SAFETY: both required target features were detected above.
        unsafe { dot_avx2_fma(a, b) }
    } else {
        dot_product_original(a, b)
    }
}

#[target_feature(enable = "avx2,fma")]
unsafe fn dot_avx2_fma(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len();
    let chunks = len / 8;

    let mut acc0 = _mm256_setzero_pd();
    let mut acc1 = _mm256_setzero_pd();

    for i in 0..chunks {
        let idx = i * 8;
        let pa = a.as_ptr().add(idx);
        let pb = b.as_ptr().add(idx);
        acc0 = _mm256_fmadd_pd(_mm256_loadu_pd(pa), _mm256_loadu_pd(pb), acc0);
        acc1 = _mm256_fmadd_pd(_mm256_loadu_pd(pa.add(4)), _mm256_loadu_pd(pb.add(4)), acc1);
    }

    // Horizontal sum: [a, b, c, d] -> (a + c) + (b + d)
    let acc = _mm256_add_pd(acc0, acc1);
    let lo = _mm256_castpd256_pd128(acc);
    let hi = _mm256_extractf128_pd(acc, 1);
    let pair = _mm_add_pd(lo, hi);
    let upper = _mm_unpackhi_pd(pair, pair);
    let mut result = _mm_cvtsd_f64(_mm_add_sd(pair, upper));

    let base = chunks * 8;
    for (x, y) in a[base..].iter().zip(&b[base..]) {
        result += x * y;
    }

    result
}
