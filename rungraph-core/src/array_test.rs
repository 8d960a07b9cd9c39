use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_creation_checks_length() {
    let a = NdArray::from_vec_f32(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    assert_eq!(a.shape(), &[3]);
    assert_eq!(a.dtype(), DType::F32);

    let err = NdArray::from_vec_f32(vec![1.0, 2.0], vec![3]).unwrap_err();
    assert_eq!(
        err,
        RunGraphError::TensorCreationError {
            data_len: 2,
            shape: vec![3]
        }
    );
}

#[test]
fn test_scalar_and_item() {
    let s = NdArray::scalar(2.5, DType::F64);
    assert_eq!(s.ndim(), 0);
    assert_eq!(s.item().unwrap(), 2.5);

    let v = NdArray::ones(&[2], DType::F32);
    assert!(matches!(v.item(), Err(RunGraphError::ShapeMismatch { .. })));
}

#[test]
fn test_zip_rejects_mismatches() {
    let a = NdArray::ones(&[2, 2], DType::F32);
    let b = NdArray::ones(&[4], DType::F32);
    let err = a
        .zip(&b, Backend::Generic, |x, y| x + y, |x, y| x + y, "add")
        .unwrap_err();
    assert!(matches!(err, RunGraphError::ShapeMismatch { .. }));

    let c = NdArray::ones(&[2, 2], DType::F64);
    let err = a
        .zip(&c, Backend::Generic, |x, y| x + y, |x, y| x + y, "add")
        .unwrap_err();
    assert!(matches!(err, RunGraphError::DTypeMismatch { .. }));
}

#[test]
fn test_integer_payload_is_not_differentiable() {
    let i = NdArray::from_vec_i64(vec![1, 2], vec![2]).unwrap();
    let err = i.map(Backend::Generic, |x| x, |x| x, "exp").unwrap_err();
    assert_eq!(
        err,
        RunGraphError::UnsupportedType {
            dtype: DType::I64,
            operation: "exp".to_string()
        }
    );
}

#[test]
fn test_accumulate_in_place() {
    let mut acc = NdArray::from_vec_f64(vec![1.0, 2.0], vec![2]).unwrap();
    let x = NdArray::from_vec_f64(vec![0.5, -1.0], vec![2]).unwrap();
    acc.accumulate(&x, Backend::Vectorized).unwrap();
    assert_eq!(acc.to_f64_vec(), vec![1.5, 1.0]);
}

#[test]
fn test_matmul_and_transpose() {
    let a = NdArray::from_vec_f32(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let t = a.transpose_2d().unwrap();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.to_f64_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

    let p = a.matmul(&t, Backend::Vectorized).unwrap();
    assert_eq!(p.shape(), &[2, 2]);
    assert_eq!(p.to_f64_vec(), vec![14.0, 32.0, 32.0, 77.0]);

    assert!(a.matmul(&a, Backend::Generic).is_err());
}

#[test]
fn test_concat_and_slice_axis0() {
    let a = NdArray::from_vec_f32(vec![1.0, 2.0], vec![1, 2]).unwrap();
    let b = NdArray::from_vec_f32(vec![3.0, 4.0, 5.0, 6.0], vec![2, 2]).unwrap();
    let c = NdArray::concat_axis0(&[&a, &b]).unwrap();
    assert_eq!(c.shape(), &[3, 2]);
    assert_eq!(c.slice_axis0(1, 3).unwrap(), b);
    assert_eq!(c.slice_axis0(0, 1).unwrap(), a);

    let bad = NdArray::ones(&[2, 3], DType::F32);
    assert!(NdArray::concat_axis0(&[&a, &bad]).is_err());
}

#[test]
fn test_randn_is_seeded() {
    let mut r1 = StdRng::seed_from_u64(7);
    let mut r2 = StdRng::seed_from_u64(7);
    let a = NdArray::randn(&[3, 4], DType::F32, &mut r1).unwrap();
    let b = NdArray::randn(&[3, 4], DType::F32, &mut r2).unwrap();
    assert_eq!(a, b);
    assert!(NdArray::randn(&[2], DType::I64, &mut r1).is_err());
}
