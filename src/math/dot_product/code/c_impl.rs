//! FFI bindings for the C kernels.

#[cfg(c_kernel_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::c_double;

    extern "C" {
        pub fn dot_product_c_scalar(a: *const c_double, b: *const c_double, len: size_t) -> c_double;
    }
}

/// C reference loop wrapper
#[cfg(c_kernel_active)]
pub fn dot_product_c_scalar(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    // SAFETY: both pointers are valid for `a.len()` reads and the C side
    // only reads through them.
    unsafe { ffi::dot_product_c_scalar(a.as_ptr(), b.as_ptr(), a.len()) }
}

/// Whether the C kernels were compiled into this binary
#[cfg(c_kernel_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_kernel_active))]
pub const C_IMPL_AVAILABLE: bool = false;

// Never registered without a C compiler; the capability check rejects it first.
#[cfg(not(c_kernel_active))]
pub fn dot_product_c_scalar(_a: &[f64], _b: &[f64]) -> f64 {
    panic!("C kernel not compiled (requires GCC, Clang or MSVC)")
}
