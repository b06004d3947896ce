//! # Dot Product Kernels
//!
//! The dot product computes the sum of products of corresponding elements
//! in two equal-length vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! Every kernel here is a deterministic sequential reduction with a fixed
//! association order, so repeated calls on the same inputs are bit-identical.
//! Kernels differ in association order, which is why they may disagree with
//! the reference in the low bits on long inputs.
//!
//! ## Variants
//!
//! - **scalar**: plain left-to-right loop, the reference
//! - **unrolled**: four independent accumulators
//! - **c-scalar**: the reference loop compiled from C
//! - **x86_64-asm**: the reference loop in inline assembly
//! - **x86_64-sse2** / **x86_64-avx2**: SIMD intrinsics, AVX2 with FMA

pub mod code;
pub mod test;

pub use code::*;

use crate::error::{BenchError, BenchResult};

/// A CPU feature a kernel may need at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuFeature {
    Sse2,
    Avx2,
    Fma,
    /// The C kernels were compiled into this binary.
    CToolchain,
}

impl CpuFeature {
    pub fn name(self) -> &'static str {
        match self {
            CpuFeature::Sse2 => "sse2",
            CpuFeature::Avx2 => "avx2",
            CpuFeature::Fma => "fma",
            CpuFeature::CToolchain => "C toolchain",
        }
    }

    /// Whether the feature is usable on the running machine.
    pub fn is_available(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            CpuFeature::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            CpuFeature::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "x86_64")]
            CpuFeature::Fma => is_x86_feature_detected!("fma"),
            #[cfg(not(target_arch = "x86_64"))]
            CpuFeature::Sse2 | CpuFeature::Avx2 | CpuFeature::Fma => false,
            CpuFeature::CToolchain => C_IMPL_AVAILABLE,
        }
    }
}

/// A dot product strategy that can be benchmarked.
///
/// Implementations must not mutate their inputs and must return
/// bit-identical results for identical inputs.
pub trait DotProductKernel {
    /// Short identifier (e.g., "scalar", "x86_64-avx2")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Fail if this kernel cannot run on the current machine.
    fn check_capability(&self) -> BenchResult<()> {
        Ok(())
    }

    /// Compute `Σ a[i] * b[i]`. Both slices have the same length.
    fn dot(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Function signature shared by all built-in kernels
pub type DotProductFn = fn(&[f64], &[f64]) -> f64;

/// A built-in kernel: a plain function plus the features it needs.
#[derive(Clone, Copy)]
pub struct KernelInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub requires: &'static [CpuFeature],
    pub function: DotProductFn,
}

impl DotProductKernel for KernelInfo {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn check_capability(&self) -> BenchResult<()> {
        match self.requires.iter().find(|f| !f.is_available()) {
            Some(missing) => Err(BenchError::Capability {
                kernel: self.name,
                feature: missing.name(),
            }),
            None => Ok(()),
        }
    }

    #[inline]
    fn dot(&self, a: &[f64], b: &[f64]) -> f64 {
        (self.function)(a, b)
    }
}

impl std::fmt::Debug for KernelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelInfo")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish()
    }
}
