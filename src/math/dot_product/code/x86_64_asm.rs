//! x86_64 inline assembly dot product.
//!
//! One element per iteration with scalar SSE2 instructions:
//!
//! ```asm
//! loop:
//!     movsd  xmm1, [a]     ; x = a[i]
//!     mulsd  xmm1, [b]     ; x *= b[i]
//!     addsd  xmm0, xmm1    ; sum += x
//!     add    a, 8
//!     add    b, 8
//!     dec    n
//!     jnz    loop
//! ```
//!
//! Multiply and add stay separate instructions (no FMA), in the same
//! left-to-right order as the reference, so the result is bit-identical to it.

use std::arch::asm;

/// Compute the dot product with a hand-written SSE2 loop.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_x86_64_asm(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum: f64 = 0.0;
    if a.is_empty() {
        return sum;
    }

    // SAFETY: both pointers cover `a.len()` readable f64s and the loop reads
    // exactly that many from each. SSE2 is part of the x86_64 baseline.
    unsafe {
        asm!(
            "2:",
            "movsd {x}, qword ptr [{pa}]",
            "mulsd {x}, qword ptr [{pb}]",
            "addsd {sum}, {x}",
            "add {pa}, 8",
            "add {pb}, 8",
            "dec {n}",
            "jnz 2b",
            pa = inout(reg) a.as_ptr() => _,
            pb = inout(reg) b.as_ptr() => _,
            n = inout(reg) a.len() => _,
            sum = inout(xmm_reg) sum,
            x = out(xmm_reg) _,
            options(nostack, readonly),
        );
    }

    sum
}
