use super::*;
use crate::backend::Backend;
use crate::config::GraphConfig;
use crate::utils::testing::{check_array_near, check_tensor_near, create_test_tensor_with_grad};
use approx::assert_relative_eq;

#[test]
fn test_sum_forward_is_scalar() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let s = sum_op(&mut graph, &x).unwrap();
    check_tensor_near(&s, &[], &[21.0], 1e-5);
    assert_relative_eq!(s.item().unwrap(), 21.0, epsilon = 1e-5);
}

#[test]
fn test_sum_backward_broadcasts() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let s = sum_op(&mut graph, &x).unwrap();
    graph.backward(&s).unwrap();
    check_array_near(&x.grad().unwrap(), &[2, 2], &[1.0; 4], 1e-6);
}

#[test]
fn test_sum_backends_agree() {
    let data: Vec<f32> = (0..37).map(|i| i as f32 * 0.25 - 3.0).collect();
    let mut results = Vec::new();
    for backend in [Backend::Generic, Backend::Vectorized] {
        let mut graph = Graph::with_config(GraphConfig::default().with_backend(backend));
        let x = Tensor::new(data.clone(), vec![37]).unwrap();
        results.push(sum_op(&mut graph, &x).unwrap().item().unwrap());
    }
    assert_relative_eq!(results[0], results[1], max_relative = 1e-6);
}
