use super::*;
use crate::ops::arithmetic::{add_op, mul_op, pow_constant_op};
use crate::ops::array::split_op;
use crate::ops::math_elem::exp_op;
use crate::utils::testing::create_test_tensor_with_grad;

#[test]
fn test_empty_output_set() {
    let graph = Graph::new();
    let cg = computational_graph(&graph, &[], false);
    assert!(cg.is_empty());
    assert_eq!(cg.len(), 0);
    assert_eq!(cg.to_dot(), "digraph graphname{\n}");
}

#[test]
fn test_edges_of_simple_expression() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = create_test_tensor_with_grad(vec![3.0, 4.0], vec![2]);
    let z = add_op(&mut graph, &x, &y).unwrap();
    let f = graph.creator_of(&z).unwrap();

    let cg = computational_graph(&graph, &[&z], false);
    assert_eq!(cg.len(), 3);
    assert!(cg.contains(&Edge::new(Vertex::Tensor(x.id()), Vertex::Op(f))));
    assert!(cg.contains(&Edge::new(Vertex::Tensor(y.id()), Vertex::Op(f))));
    assert!(cg.contains(&Edge::new(Vertex::Op(f), Vertex::Tensor(z.id()))));
    assert_eq!(cg.vertices().count(), 4);
}

#[test]
fn test_export_is_idempotent_and_read_only() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0], vec![]);
    let y = exp_op(&mut graph, &x).unwrap();
    let z = mul_op(&mut graph, &y, &x).unwrap();

    let first = computational_graph(&graph, &[&z], false);
    let second = computational_graph(&graph, &[&z], false);
    assert_eq!(first, second);
    assert_eq!(first.to_dot(), second.to_dot());
    assert!(x.grad().is_none() && y.grad().is_none() && z.grad().is_none());
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_labels_and_shapes() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0; 6], vec![2, 3]).with_name("x");
    let y = pow_constant_op(&mut graph, &x, 2.0).unwrap();
    let outs = split_op(&mut graph, &y, 2).unwrap();
    let s = crate::ops::reduction::sum_op(&mut graph, &outs[0]).unwrap();

    let cg = computational_graph(&graph, &[&s], false);
    assert_eq!(cg.label(&Vertex::Tensor(x.id())), Some("x: (2, 3), float32"));
    assert_eq!(cg.label(&Vertex::Tensor(s.id())), Some("float32"));
    let pow = graph.creator_of(&y).unwrap();
    assert_eq!(cg.label(&Vertex::Op(pow)), Some("** 2"));

    let dot = cg.to_dot();
    assert!(dot.starts_with("digraph graphname{\n"));
    assert!(dot.ends_with('}'));
    assert!(dot.contains(&format!("{} [label=\"x: (2, 3), float32\",shape=\"oval\"];", x.id())));
    assert!(dot.contains(&format!("{} [label=\"** 2\",shape=\"box\"];", pow)));
    let split = graph.creator_of(&outs[0]).unwrap();
    assert!(dot.contains(&format!("{} [label=\"split\",shape=\"hexagon\"];", split)));
    assert!(dot.contains(&format!("{} -> {};", x.id(), pow)));
    assert_eq!(dot.matches(&format!("{} [", x.id())).count(), 1, "Each vertex declared once");
    assert_eq!(format!("{}", cg), dot);
}

#[test]
fn test_split_elision_equals_direct_wiring() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0], vec![]);
    let outs = split_op(&mut graph, &x, 2).unwrap();
    let a = exp_op(&mut graph, &outs[0]).unwrap();
    let b = mul_op(&mut graph, &outs[1], &a).unwrap();
    let fa = graph.creator_of(&a).unwrap();
    let fb = graph.creator_of(&b).unwrap();

    let elided = computational_graph(&graph, &[&b], true);
    let expected: Vec<Edge> = vec![
        Edge::new(Vertex::Tensor(x.id()), Vertex::Op(fa)),
        Edge::new(Vertex::Op(fa), Vertex::Tensor(a.id())),
        Edge::new(Vertex::Tensor(x.id()), Vertex::Op(fb)),
        Edge::new(Vertex::Tensor(a.id()), Vertex::Op(fb)),
        Edge::new(Vertex::Op(fb), Vertex::Tensor(b.id())),
    ];
    assert_eq!(elided.len(), expected.len());
    for edge in &expected {
        assert!(elided.contains(edge), "missing {:?}", edge);
    }
    assert!(!elided.to_dot().contains("hexagon"));

    let full = computational_graph(&graph, &[&b], false);
    // x -> split -> {outs0, outs1} -> consumers replaces the two direct x edges
    assert_eq!(full.len(), elided.len() + 3);
}

#[test]
fn test_multiple_outputs_share_vertices() {
    let mut graph = Graph::new();
    let x = create_test_tensor_with_grad(vec![1.0], vec![]);
    let y = exp_op(&mut graph, &x).unwrap();
    let z = exp_op(&mut graph, &x).unwrap();
    let cg = computational_graph(&graph, &[&y, &z], false);
    assert_eq!(cg.len(), 4);
    assert_eq!(cg.vertices().count(), 5);
}
