use super::*;
use crate::types::DType;
use crate::utils::testing::{check_array_near, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_sub_forward() {
    let mut graph = Graph::new();
    let a = create_test_tensor(vec![5.0, 7.0], vec![2]);
    let b = create_test_tensor(vec![1.0, 10.0], vec![2]);
    let c = sub_op(&mut graph, &a, &b).unwrap();
    check_tensor_near(&c, &[2], &[4.0, -3.0], 1e-6);
}

#[test]
fn test_sub_backward() {
    let mut graph = Graph::new();
    let a = create_test_tensor_with_grad(vec![5.0, 7.0], vec![2]);
    let b = create_test_tensor_with_grad(vec![1.0, 10.0], vec![2]);
    let c = sub_op(&mut graph, &a, &b).unwrap();
    c.set_grad(Some(NdArray::ones(&[2], DType::F32))).unwrap();
    graph.backward(&c).unwrap();
    check_array_near(&a.grad().unwrap(), &[2], &[1.0, 1.0], 1e-6);
    check_array_near(&b.grad().unwrap(), &[2], &[-1.0, -1.0], 1e-6);
}

#[test]
fn test_sub_only_one_side_requires_grad() {
    let mut graph = Graph::new();
    let a = create_test_tensor(vec![5.0, 7.0], vec![2]);
    let b = create_test_tensor_with_grad(vec![1.0, 10.0], vec![2]);
    let c = sub_op(&mut graph, &a, &b).unwrap();
    c.set_grad(Some(NdArray::ones(&[2], DType::F32))).unwrap();
    graph.backward(&c).unwrap();
    assert!(a.grad().is_none(), "Gradient for an input without requires_grad is dropped");
    check_array_near(&b.grad().unwrap(), &[2], &[-1.0, -1.0], 1e-6);
}
