//! Dot product implementations.
//!
//! This module contains every built-in kernel variant.

pub mod c_impl;
mod original;
mod scalar_opt;
#[cfg(target_arch = "x86_64")]
mod x86_64_asm;
#[cfg(target_arch = "x86_64")]
mod x86_64_avx2;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

pub use c_impl::{dot_product_c_scalar, C_IMPL_AVAILABLE};
pub use original::dot_product_original;
pub use scalar_opt::dot_product_scalar_opt;
#[cfg(target_arch = "x86_64")]
pub use x86_64_asm::dot_product_x86_64_asm;
#[cfg(target_arch = "x86_64")]
pub use x86_64_avx2::dot_product_x86_64_avx2;
#[cfg(target_arch = "x86_64")]
pub use x86_64_sse2::dot_product_x86_64_sse2;

use super::{CpuFeature, KernelInfo};

/// The reference kernel
pub const SCALAR: KernelInfo = KernelInfo {
    name: "scalar",
    description: "Sequential left-to-right reference loop",
    requires: &[],
    function: dot_product_original,
};

pub const UNROLLED: KernelInfo = KernelInfo {
    name: "unrolled",
    description: "Scalar loop unrolled over four accumulators",
    requires: &[],
    function: dot_product_scalar_opt,
};

pub const C_SCALAR: KernelInfo = KernelInfo {
    name: "c-scalar",
    description: "Reference loop compiled from C",
    requires: &[CpuFeature::CToolchain],
    function: dot_product_c_scalar,
};

#[cfg(target_arch = "x86_64")]
pub const X86_64_ASM: KernelInfo = KernelInfo {
    name: "x86_64-asm",
    description: "x86_64 inline assembly, scalar SSE2 loop",
    requires: &[CpuFeature::Sse2],
    function: dot_product_x86_64_asm,
};

#[cfg(target_arch = "x86_64")]
pub const X86_64_SSE2: KernelInfo = KernelInfo {
    name: "x86_64-sse2",
    description: "x86_64 with SSE2 intrinsics, 2 lanes",
    requires: &[CpuFeature::Sse2],
    function: dot_product_x86_64_sse2,
};

#[cfg(target_arch = "x86_64")]
pub const X86_64_AVX2: KernelInfo = KernelInfo {
    name: "x86_64-avx2",
    description: "x86_64 with AVX2 + FMA intrinsics, 2x4 lanes",
    requires: &[CpuFeature::Avx2, CpuFeature::Fma],
    function: dot_product_x86_64_avx2,
};

/// All kernels compiled into this binary, reference first.
///
/// Kernels whose CPU features are missing at run time are still listed;
/// callers check [`DotProductKernel::check_capability`](super::DotProductKernel::check_capability).
pub fn builtin_kernels() -> Vec<KernelInfo> {
    let mut kernels = vec![SCALAR, UNROLLED];

    if C_IMPL_AVAILABLE {
        kernels.push(C_SCALAR);
    }

    #[cfg(target_arch = "x86_64")]
    {
        kernels.push(X86_64_ASM);
        kernels.push(X86_64_SSE2);
        kernels.push(X86_64_AVX2);
    }

    kernels
}
