use super::*;
use crate::utils::testing::{check_array_near, create_test_tensor_with_grad};

#[test]
fn test_identity_passes_value_and_grad() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![2.5], vec![]);
    let y = identity_op(&mut graph, &x).unwrap();
    assert_eq!(y.get_f32_data().unwrap(), vec![2.5]);
    assert!(!y.same_handle(&x), "Identity produces a fresh tensor");

    graph.backward(&y).unwrap();
    check_array_near(&x.grad().unwrap(), &[], &[1.0], 1e-6);
}

#[test]
fn test_identity_accepts_integers_without_grad() {
    let mut graph = Graph::new();
    let x = Tensor::new_i64(vec![1, 2, 3], vec![3]).unwrap();
    let y = identity_op(&mut graph, &x).unwrap();
    assert_eq!(y.to_f64_vec(), vec![1.0, 2.0, 3.0]);
    assert!(graph.is_empty());
}
