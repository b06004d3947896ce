//! Tests for dot product kernels.

#[cfg(test)]
mod tests {
    use crate::math::dot_product::code::*;
    use crate::math::dot_product::{DotProductKernel, KernelInfo};
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-10;

    fn runnable_kernels() -> Vec<KernelInfo> {
        builtin_kernels()
            .into_iter()
            .filter(|k| k.check_capability().is_ok())
            .collect()
    }

    fn assert_all_agree(a: &[f64], b: &[f64], msg: &str) {
        let expected = dot_product_original(a, b);
        for kernel in runnable_kernels() {
            let result = kernel.dot(a, b);
            let diff = (result - expected).abs();
            assert!(
                diff < EPSILON,
                "{} [{}]: expected {}, got {}, diff = {}",
                msg,
                kernel.name,
                expected,
                result,
                diff
            );
        }
    }

    #[test]
    fn test_original_basic() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        // 5 + 12 + 21 + 32
        assert_eq!(dot_product_original(&a, &b), 70.0);
    }

    #[test]
    fn test_all_kernels_empty() {
        assert_all_agree(&[], &[], "empty");
        for kernel in runnable_kernels() {
            assert_eq!(kernel.dot(&[], &[]), 0.0, "{}", kernel.name);
        }
    }

    #[test]
    fn test_all_kernels_single() {
        for kernel in runnable_kernels() {
            assert_eq!(kernel.dot(&[3.0], &[4.0]), 12.0, "{}", kernel.name);
        }
    }

    #[test]
    fn test_all_kernels_exact_small_integers() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0; 4];
        for kernel in runnable_kernels() {
            assert_eq!(kernel.dot(&a, &b), 10.0, "{}", kernel.name);
        }
    }

    #[test]
    fn test_all_kernels_all_zero() {
        let a = vec![0.0; 1027];
        let b = vec![0.5; 1027];
        for kernel in runnable_kernels() {
            assert_eq!(kernel.dot(&a, &b), 0.0, "{}", kernel.name);
        }
    }

    #[test]
    fn test_all_kernels_all_equal() {
        // 0.5 * 0.5 = 0.25 is exact, and so is every partial sum below 2^53.
        let a = vec![0.5; 1001];
        let b = vec![0.5; 1001];
        for kernel in runnable_kernels() {
            assert_eq!(kernel.dot(&a, &b), 250.25, "{}", kernel.name);
        }
    }

    #[test]
    fn test_all_kernels_odd_tails() {
        // Lengths around every SIMD width and unroll factor
        for len in 1..=19 {
            let a: Vec<f64> = (0..len).map(|i| i as f64 + 1.0).collect();
            let b: Vec<f64> = (0..len).map(|i| (len - i) as f64).collect();
            assert_all_agree(&a, &b, &format!("len {}", len));
        }
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_original_length_mismatch_panics() {
        dot_product_original(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn test_builtin_kernels_reference_first() {
        let kernels = builtin_kernels();
        assert_eq!(kernels[0].name, "scalar");
        assert!(kernels[0].check_capability().is_ok());
    }

    /// Kernels that keep the reference's association order must match it
    /// bit for bit, not just within epsilon.
    #[test]
    fn test_sequential_kernels_bit_identical_to_reference() {
        let a: Vec<f64> = (0..4099).map(|i| ((i * 37 % 101) as f64) / 7.0).collect();
        let b: Vec<f64> = (0..4099).map(|i| ((i * 53 % 97) as f64) / 3.0).collect();
        let expected = dot_product_original(&a, &b);

        #[cfg(target_arch = "x86_64")]
        assert_eq!(dot_product_x86_64_asm(&a, &b).to_bits(), expected.to_bits());
        #[cfg(c_kernel_active)]
        assert_eq!(dot_product_c_scalar(&a, &b).to_bits(), expected.to_bits());
        let _ = expected;
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_asm_kernel_registered() {
        let kernels = builtin_kernels();
        let asm = kernels.iter().find(|k| k.name == "x86_64-asm").unwrap();
        assert!(asm.check_capability().is_ok());
        assert_eq!(asm.dot(&[1.5, 2.0, -3.0], &[2.0, 0.5, 1.0]), 1.0);
    }

    #[cfg(not(c_kernel_active))]
    #[test]
    fn test_c_kernel_reports_capability_error() {
        let err = C_SCALAR.check_capability().unwrap_err();
        assert!(err.to_string().contains("C toolchain"));
    }

    fn unit_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (0usize..=512).prop_flat_map(|n| {
            (
                prop::collection::vec(0.0f64..1.0, n),
                prop::collection::vec(0.0f64..1.0, n),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_kernels_agree_with_reference((a, b) in unit_pair()) {
            let expected = dot_product_original(&a, &b);
            for kernel in runnable_kernels() {
                let result = kernel.dot(&a, &b);
                prop_assert!(
                    (result - expected).abs() < EPSILON,
                    "{}: expected {}, got {}", kernel.name, expected, result
                );
            }
        }

        #[test]
        fn prop_kernels_are_deterministic((a, b) in unit_pair()) {
            for kernel in runnable_kernels() {
                let first = kernel.dot(&a, &b);
                let second = kernel.dot(&a, &b);
                prop_assert_eq!(first.to_bits(), second.to_bits(), "{}", kernel.name);
            }
        }

        #[test]
        fn prop_kernels_do_not_mutate_inputs((a, b) in unit_pair()) {
            let (a_before, b_before) = (a.clone(), b.clone());
            for kernel in runnable_kernels() {
                kernel.dot(&a, &b);
            }
            prop_assert_eq!(a, a_before);
            prop_assert_eq!(b, b_before);
        }
    }
}
