use super::*;
use approx::assert_relative_eq;

fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 * 0.25 - 3.0).collect()
}

#[test]
fn test_resolve_fallback_policy() {
    assert_eq!(Backend::Vectorized.resolve(DType::F32), Backend::Vectorized);
    assert_eq!(Backend::Vectorized.resolve(DType::F64), Backend::Generic);
    assert_eq!(Backend::Generic.resolve(DType::F32), Backend::Generic);
    assert_eq!(Backend::Generic.resolve(DType::I64), Backend::Generic);
    assert!(!Backend::Generic.supports(DType::I64));
    assert_eq!(Backend::default(), Backend::Vectorized);
}

#[test]
fn test_elementwise_kernels_agree() {
    // 19 elements: two full lanes plus a tail
    let x = ramp(19);
    let y: Vec<f32> = x.iter().map(|v| v * 2.0 + 1.0).collect();

    let g = Backend::Generic.map(&x, |v| v.max(0.0));
    let v = Backend::Vectorized.map(&x, |v| v.max(0.0));
    assert_eq!(g, v);

    let g = Backend::Generic.zip(&x, &y, |a, b| a * b);
    let v = Backend::Vectorized.zip(&x, &y, |a, b| a * b);
    assert_eq!(g, v);

    let mut acc_g = y.clone();
    let mut acc_v = y.clone();
    Backend::Generic.accumulate(&mut acc_g, &x);
    Backend::Vectorized.accumulate(&mut acc_v, &x);
    assert_eq!(acc_g, acc_v);
}

#[test]
fn test_sum_agrees_up_to_rounding() {
    let x = ramp(37);
    let g = Backend::Generic.sum(&x);
    let v = Backend::Vectorized.sum(&x);
    assert_relative_eq!(g, v, epsilon = 1e-4);
    let expected: f32 = x.iter().sum();
    assert_relative_eq!(g, expected, epsilon = 1e-4);
}

#[test]
fn test_matmul_kernels_agree() {
    // (2, 3) x (3, 2)
    let a = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let b = vec![7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
    let expected = vec![58.0, 64.0, 139.0, 154.0];
    assert_eq!(Backend::Generic.matmul(&a, &b, 2, 3, 2), expected);
    assert_eq!(Backend::Vectorized.matmul(&a, &b, 2, 3, 2), expected);
}
