use super::*;
use crate::autograd::check_grad;
use crate::types::DType;
use crate::utils::testing::{check_array_near, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_matmul_forward() {
    let mut graph = Graph::new();
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]);
    let c = matmul_op(&mut graph, &a, &b).unwrap();
    check_tensor_near(&c, &[2, 2], &[58.0, 64.0, 139.0, 154.0], 1e-4);
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let mut graph = Graph::new();
    let a = create_test_tensor(vec![1.0; 6], vec![2, 3]);
    let b = create_test_tensor(vec![1.0; 4], vec![2, 2]);
    let err = matmul_op(&mut graph, &a, &b).unwrap_err();
    assert!(matches!(err, RunGraphError::ShapeMismatch { .. }));
}

#[test]
fn test_matmul_rejects_non_2d() {
    let mut graph = Graph::new();
    let a = create_test_tensor(vec![1.0; 3], vec![3]);
    let b = create_test_tensor(vec![1.0; 3], vec![3, 1]);
    assert!(matmul_op(&mut graph, &a, &b).is_err());
}

#[test]
fn test_matmul_backward() {
    let mut graph = Graph::new();
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = create_test_tensor_with_grad(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let c = matmul_op(&mut graph, &a, &b).unwrap();
    c.set_grad(Some(NdArray::ones(&[2, 2], DType::F32))).unwrap();
    graph.backward(&c).unwrap();
    // dA = 1 · Bᵀ: each row holds the row sums of B.
    check_array_near(&a.grad().unwrap(), &[2, 2], &[11.0, 15.0, 11.0, 15.0], 1e-5);
    // dB = Aᵀ · 1: each column holds the column sums of A.
    check_array_near(&b.grad().unwrap(), &[2, 2], &[4.0, 4.0, 6.0, 6.0], 1e-5);
}

#[test]
fn test_matmul_check_grad_random() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = NdArray::randn(&[3, 4], DType::F64, &mut rng).unwrap();
    let b = NdArray::randn(&[4, 2], DType::F64, &mut rng).unwrap();
    let result = check_grad(
        |graph: &mut Graph, xs: &[Tensor]| matmul_op(graph, &xs[0], &xs[1]),
        &[a, b],
        1e-6,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
}
