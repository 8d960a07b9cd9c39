use super::*;
use crate::ops::arithmetic::{mul_constant_op, add_op};
use crate::types::DType;
use crate::utils::testing::{check_array_near, check_tensor_near, create_test_tensor_with_grad};

#[test]
fn test_split_outputs_share_value() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let outs = split_op(&mut graph, &x, 3).unwrap();
    assert_eq!(outs.len(), 3);
    for out in &outs {
        check_tensor_near(out, &[2], &[1.0, 2.0], 1e-6);
        assert!(out.requires_grad());
    }
    let node = graph.node(graph.creator_of(&outs[0]).unwrap()).unwrap();
    assert!(node.is_split());
    assert_eq!(node.kind(), OpKind::Split);
}

#[test]
fn test_split_zero_outputs_rejected() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let err = split_op(&mut graph, &x, 0).unwrap_err();
    assert!(matches!(err, RunGraphError::ArityMismatch { .. }));
    assert!(graph.is_empty());
}

#[test]
fn test_split_backward_sums_output_grads() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let outs = split_op(&mut graph, &x, 2).unwrap();
    let a = mul_constant_op(&mut graph, &outs[0], 2.0).unwrap();
    let b = mul_constant_op(&mut graph, &outs[1], 3.0).unwrap();
    let y = add_op(&mut graph, &a, &b).unwrap();
    y.set_grad(Some(NdArray::ones(&[2], DType::F32))).unwrap();
    graph.backward(&y).unwrap();
    check_array_near(&x.grad().unwrap(), &[2], &[5.0, 5.0], 1e-6);
}

#[test]
fn test_split_unused_output_contributes_zero() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let outs = split_op(&mut graph, &x, 2).unwrap();
    let a = mul_constant_op(&mut graph, &outs[0], 4.0).unwrap();
    a.set_grad(Some(NdArray::ones(&[2], DType::F32))).unwrap();
    graph.backward(&a).unwrap();
    check_array_near(&x.grad().unwrap(), &[2], &[4.0, 4.0], 1e-6);
}
