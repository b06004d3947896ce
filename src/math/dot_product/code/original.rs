//! Original (reference) implementation of dot product.
//!
//! A plain sequential loop. Every other kernel is checked against it.

/// Compute the dot product of two vectors, accumulating left to right.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use dot_product_bench::math::dot_product::dot_product_original;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [1.0, 1.0, 1.0, 1.0];
/// assert_eq!(dot_product_original(&a, &b), 10.0);
/// ```
pub fn dot_product_original(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}
